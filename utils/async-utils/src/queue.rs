//! An order-preserving queue of eagerly-started async work.

use std::collections::VecDeque;
use std::future::Future;

use tokio::task::JoinHandle;

/// Starts each pushed future executing immediately, and reports results back
/// in push order regardless of completion order.
///
/// This is the primitive the parallel tool executor uses to let independent
/// tool calls run concurrently while still handing the model's conversation
/// results back in the order it asked for them.
pub struct OrderedFutures<T> {
    handles: VecDeque<JoinHandle<T>>,
}

impl<T> Default for OrderedFutures<T> {
    fn default() -> Self {
        Self {
            handles: VecDeque::new(),
        }
    }
}

impl<T: Send + 'static> OrderedFutures<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `work` on the current runtime and appends it to the queue.
    ///
    /// The future begins executing as soon as this call returns; it is not
    /// lazily deferred until [`drain`](Self::drain) is called.
    pub fn push<F>(&mut self, work: F)
    where
        F: Future<Output = T> + Send + 'static,
    {
        self.handles.push_back(tokio::spawn(work));
    }

    /// The number of items pushed and not yet drained.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Awaits every queued item in push order and returns their results.
    ///
    /// A task that panics is treated as an implementation bug in this crate
    /// (every pushed future in this workspace is infallible by construction),
    /// so a join failure here is propagated as a panic rather than silently
    /// swallowed.
    pub async fn drain(&mut self) -> Vec<T> {
        let mut results = Vec::with_capacity(self.handles.len());
        while let Some(handle) = self.handles.pop_front() {
            match handle.await {
                Ok(value) => results.push(value),
                Err(join_err) => {
                    if let Ok(reason) = join_err.try_into_panic() {
                        std::panic::resume_unwind(reason);
                    }
                    // The task was cancelled externally (e.g. runtime shutdown);
                    // there is no value to report for it.
                }
            }
        }
        results
    }
}

#[cfg(test)]
#[path = "queue.test.rs"]
mod tests;
