//! Error types for the executor crate.

use crystalyse_error::ErrorExt;
use crystalyse_error::StatusCode;
use crystalyse_stack_trace_macro::stack_trace_debug;
use snafu::Location;
use snafu::Snafu;

#[derive(Snafu)]
#[stack_trace_debug]
#[snafu(visibility(pub(crate)), module)]
pub enum ExecutorError {
    #[snafu(display("tool {name} is already registered"))]
    DuplicateTool {
        name: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for ExecutorError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::DuplicateTool { .. } => StatusCode::InvalidConfig,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

pub type Result<T, E = ExecutorError> = std::result::Result<T, E>;
