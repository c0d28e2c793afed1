//! Unified status codes for error classification.
//!
//! Status code format: XX_YYY (5-digit)
//! - XX = Category (00-99)
//! - YYY = Code within category (000-999)
//!
//! Category layout:
//! - General/Core (00-02): Success, Common, Input
//! - Execution core (06-09): Tool, Sandbox, Compaction, Provenance
//! - Business (10-12): Config, Resource

use strum::AsRefStr;
use strum::EnumIter;
use strum::FromRepr;

/// Status code metadata.
#[derive(Debug, Clone, Copy)]
pub struct StatusMeta {
    pub retryable: bool,
    pub log_error: bool,
    pub category: StatusCategory,
}

/// Status code category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    /// Success (00_xxx)
    Success,
    /// Common/internal errors (01_xxx)
    Common,
    /// Parameter/validation errors (02_xxx)
    Input,
    /// Tool-call execution errors (06_xxx)
    Tool,
    /// Sandbox confinement errors (07_xxx)
    Sandbox,
    /// Context compaction errors (08_xxx)
    Compaction,
    /// Provenance tracking errors (09_xxx)
    Provenance,
    /// Configuration errors (10_xxx)
    Config,
    /// Resource/limit errors (12_xxx)
    Resource,
}

macro_rules! define_status_codes {
    ($(
        $(#[$attr:meta])*
        $name:ident = $value:expr => {
            retryable: $retry:expr,
            log_error: $log:expr,
            category: $cat:ident $(,)?
        }
    ),* $(,)?) => {
        /// Status codes for error classification.
        ///
        /// Format: XX_YYY (5-digit)
        /// - XX = Category (00-99)
        /// - YYY = Code within category (000-999)
        #[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumIter, FromRepr)]
        #[repr(i32)]
        pub enum StatusCode {
            $($(#[$attr])* $name = $value,)*
        }

        impl StatusCode {
            /// Returns the metadata for this status code.
            pub const fn meta(&self) -> StatusMeta {
                match self {
                    $(Self::$name => StatusMeta {
                        retryable: $retry,
                        log_error: $log,
                        category: StatusCategory::$cat,
                    },)*
                }
            }

            /// Returns the string name of this status code.
            pub const fn name(&self) -> &'static str {
                match self {
                    $(Self::$name => stringify!($name),)*
                }
            }
        }

        // Compile-time check for duplicate status code values
        const _: () = {
            const CODES: &[i32] = &[$($value),*];
            const fn check_unique() {
                let mut i = 0;
                while i < CODES.len() {
                    let mut j = i + 1;
                    while j < CODES.len() {
                        if CODES[i] == CODES[j] {
                            panic!("Duplicate status code value detected");
                        }
                        j += 1;
                    }
                    i += 1;
                }
            }
            check_unique();
        };
    };
}

define_status_codes! {
    // ====== Success (00_xxx) ======
    /// Operation succeeded.
    Success = 00_000 => { retryable: false, log_error: false, category: Success },

    // ====== Common errors (01_xxx) ======
    /// Unknown error.
    Unknown = 01_000 => { retryable: false, log_error: true, category: Common },
    /// Internal error, unexpected BUG.
    Internal = 01_001 => { retryable: true, log_error: true, category: Common },
    /// Unsupported operation.
    Unsupported = 01_002 => { retryable: false, log_error: false, category: Common },
    /// Task was cancelled.
    Cancelled = 01_003 => { retryable: false, log_error: false, category: Common },
    /// Caused by external system.
    External = 01_004 => { retryable: false, log_error: true, category: Common },

    // ====== Input/Validation errors (02_xxx) ======
    /// Invalid arguments.
    InvalidArguments = 02_000 => { retryable: false, log_error: false, category: Input },
    /// Invalid request format.
    InvalidRequest = 02_001 => { retryable: false, log_error: false, category: Input },
    /// Parse/Deserialize error.
    ParseError = 02_002 => { retryable: false, log_error: false, category: Input },
    /// Invalid JSON.
    InvalidJson = 02_003 => { retryable: false, log_error: false, category: Input },

    // ====== Tool execution errors (06_xxx) ======
    /// A tool call referenced a name not registered with the executor.
    UnknownTool = 06_000 => { retryable: false, log_error: false, category: Tool },
    /// The tool handler itself returned an error.
    HandlerFailed = 06_001 => { retryable: false, log_error: true, category: Tool },
    /// The tool call exceeded its per-call timeout.
    ToolTimeout = 06_002 => { retryable: true, log_error: false, category: Tool },
    /// The tool call observed cancellation before or during execution.
    ToolCancelled = 06_003 => { retryable: false, log_error: false, category: Tool },

    // ====== Sandbox errors (07_xxx) ======
    /// The sandboxed command was denied by the platform confinement layer.
    SandboxDenied = 07_000 => { retryable: false, log_error: false, category: Sandbox },
    /// No sandbox backend is available on this platform.
    PlatformUnsupported = 07_001 => { retryable: false, log_error: false, category: Sandbox },
    /// The command to execute could not be found.
    ExecNotFound = 07_002 => { retryable: false, log_error: false, category: Sandbox },
    /// The command could not be executed due to filesystem permissions.
    ExecPermissionDenied = 07_003 => { retryable: false, log_error: false, category: Sandbox },

    // ====== Compaction errors (08_xxx) ======
    /// The configured summariser callable failed.
    SummariserFailed = 08_000 => { retryable: true, log_error: true, category: Compaction },

    // ====== Provenance errors (09_xxx) ======
    /// Hashing an artefact's input/output failed.
    HashingFailed = 09_000 => { retryable: false, log_error: true, category: Provenance },
    /// Extracting numeric values from a tool output failed.
    ExtractionFailed = 09_001 => { retryable: false, log_error: false, category: Provenance },

    // ====== Config errors (10_xxx) ======
    /// Invalid configuration.
    InvalidConfig = 10_000 => { retryable: false, log_error: false, category: Config },

    // ====== Resource/Limit errors (12_xxx) ======
    /// Request timeout.
    Timeout = 12_000 => { retryable: true, log_error: false, category: Resource },
    /// Runtime resources exhausted (e.g. a poisoned lock).
    ResourcesExhausted = 12_001 => { retryable: false, log_error: true, category: Resource },
}

impl StatusCode {
    /// Returns true if `code` is success.
    pub fn is_success(code: i32) -> bool {
        Self::Success as i32 == code
    }

    /// Returns true if the error is retryable.
    pub const fn is_retryable(&self) -> bool {
        self.meta().retryable
    }

    /// Returns true if the error should be logged.
    pub const fn should_log_error(&self) -> bool {
        self.meta().log_error
    }

    /// Returns the category of this status code.
    pub const fn category(&self) -> StatusCategory {
        self.meta().category
    }

    /// Convert from i32.
    pub fn from_i32(value: i32) -> Option<Self> {
        Self::from_repr(value)
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
#[path = "status_code.test.rs"]
mod tests;
