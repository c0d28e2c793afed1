//! Shared error classification for the crystalyse execution core.
//!
//! Every fallible surface in this workspace maps its errors onto the single
//! [`StatusCode`] catalogue defined here via the [`ErrorExt`] trait, so a caller
//! several crates away from the failure site can still make a retry/log
//! decision without matching on every crate's error enum.

mod ext;
mod status_code;

pub use ext::BoxedError;
pub use ext::ErrorExt;
pub use ext::PlainError;
pub use ext::boxed;
pub use status_code::StatusCategory;
pub use status_code::StatusCode;
pub use status_code::StatusMeta;
