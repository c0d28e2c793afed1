//! Error types for the compaction crate.

use crystalyse_error::ErrorExt;
use crystalyse_error::StatusCode;
use crystalyse_stack_trace_macro::stack_trace_debug;
use snafu::Location;
use snafu::Snafu;

#[derive(Snafu)]
#[stack_trace_debug]
#[snafu(visibility(pub(crate)), module)]
pub enum CompactionError {
    #[snafu(display("summariser failed: {message}"))]
    SummariserFailed {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for CompactionError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::SummariserFailed { .. } => StatusCode::SummariserFailed,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

pub type Result<T, E = CompactionError> = std::result::Result<T, E>;
