//! Error types for queue construction and timed operations

use std::error::Error;
use std::fmt;

use thiserror::Error;

/// Errors raised while building a queue
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// A queue must be able to hold at least one element
    #[error("queue capacity must be greater than zero")]
    ZeroCapacity,

    /// The queue variant name did not match any known kind
    #[error("unknown queue kind `{0}` (expected `standard` or `pimpl`)")]
    UnknownKind(String),
}

/// A timed enqueue could not find free capacity before its deadline.
///
/// Ownership of the element never transferred to the queue, so it is handed
/// back to the caller, who decides whether to retry or drop it.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct EnqueueTimeoutError<T>(pub T);

impl<T> EnqueueTimeoutError<T> {
    /// Takes back the element that was not enqueued
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for EnqueueTimeoutError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EnqueueTimeoutError(..)")
    }
}

impl<T> fmt::Display for EnqueueTimeoutError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("timed out waiting for free queue capacity")
    }
}

impl<T> Error for EnqueueTimeoutError<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_error_returns_element() {
        let err = EnqueueTimeoutError(String::from("payload"));
        assert_eq!(err.to_string(), "timed out waiting for free queue capacity");
        assert_eq!(format!("{:?}", err), "EnqueueTimeoutError(..)");
        assert_eq!(err.into_inner(), "payload");
    }

    #[test]
    fn queue_error_messages() {
        assert_eq!(
            QueueError::ZeroCapacity.to_string(),
            "queue capacity must be greater than zero"
        );
        assert!(QueueError::UnknownKind("ring".into()).to_string().contains("`ring`"));
    }
}
