//! Small async primitives shared across the execution core: a cancellation
//! token wrapper, an order-preserving future queue, and a fair async
//! reader/writer lock.

mod lock;
mod queue;

pub use lock::AsyncRwLock;
pub use lock::ReadGuard;
pub use lock::WriteGuard;
pub use queue::OrderedFutures;

use std::future::Future;

/// Re-exported so callers never need to depend on `tokio-util` directly just
/// to name the type returned by [`CancellationToken::new`] and friends.
pub type CancellationToken = tokio_util::sync::CancellationToken;

/// The error returned by [`OrCancelExt::or_cancel`] when the token fires
/// before the wrapped future resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelErr {
    Cancelled,
}

impl std::fmt::Display for CancelErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::error::Error for CancelErr {}

/// Race any future against a [`CancellationToken`].
///
/// Returns `Ok(v)` if the future resolves first, `Err(CancelErr::Cancelled)`
/// if the token is already cancelled or becomes cancelled first. Checking
/// cancellation is biased ahead of polling the future so a token cancelled
/// before this call is ever awaited is observed immediately.
pub trait OrCancelExt: Future + Sized {
    fn or_cancel(
        self,
        token: &CancellationToken,
    ) -> impl Future<Output = Result<Self::Output, CancelErr>> + Send
    where
        Self: Send;
}

impl<F: Future + Send> OrCancelExt for F {
    async fn or_cancel(self, token: &CancellationToken) -> Result<Self::Output, CancelErr> {
        tokio::select! {
            biased;
            () = token.cancelled() => Err(CancelErr::Cancelled),
            v = self => Ok(v),
        }
    }
}

#[cfg(test)]
#[path = "lib.test.rs"]
mod tests;
