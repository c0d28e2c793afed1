//! Error types for the turn driver and its configuration.

use crystalyse_error::ErrorExt;
use crystalyse_error::StatusCode;
use crystalyse_stack_trace_macro::stack_trace_debug;
use snafu::Location;
use snafu::Snafu;

#[derive(Snafu)]
#[stack_trace_debug]
#[snafu(visibility(pub(crate)), module)]
pub enum CoreError {
    #[snafu(display("invalid configuration: {reason}"))]
    InvalidConfig {
        reason: String,
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("a shared lock was poisoned by a panicked task"))]
    LockPoisoned {
        #[snafu(implicit)]
        location: Location,
    },

    #[snafu(display("no sandbox backend is available on {platform}"))]
    PlatformUnsupported {
        platform: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for CoreError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidConfig { .. } => StatusCode::InvalidConfig,
            Self::LockPoisoned { .. } => StatusCode::ResourcesExhausted,
            Self::PlatformUnsupported { .. } => StatusCode::PlatformUnsupported,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

pub type Result<T, E = CoreError> = std::result::Result<T, E>;
