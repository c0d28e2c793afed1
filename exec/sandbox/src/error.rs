//! Error types for the sandbox crate.

use crystalyse_error::ErrorExt;
use crystalyse_error::StatusCode;
use crystalyse_stack_trace_macro::stack_trace_debug;
use snafu::Location;
use snafu::Snafu;

#[derive(Snafu)]
#[stack_trace_debug]
#[snafu(visibility(pub(crate)), module)]
pub enum SandboxError {
    #[snafu(display("write denied: {message}"))]
    WriteDenied {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("path denied: {path}"))]
    PathDenied {
        path: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("network access denied by sandbox policy"))]
    NetworkDenied {
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("no sandbox backend is available on this platform"))]
    PlatformUnsupported {
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("failed to spawn sandboxed command: {source}"))]
    Spawn {
        source: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for SandboxError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::WriteDenied { .. } | Self::PathDenied { .. } | Self::NetworkDenied { .. } => {
                StatusCode::SandboxDenied
            }
            Self::PlatformUnsupported { .. } => StatusCode::PlatformUnsupported,
            Self::Spawn { .. } => StatusCode::ExecNotFound,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

pub type Result<T, E = SandboxError> = std::result::Result<T, E>;
