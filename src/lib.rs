//! # shared_queue
//!
//! A bounded, blocking, multiple-producer-multiple-consumer queue built on a
//! linked chain of slots guarded by separate head, tail and size locks.
//!
//! Producers block (or time out) while the queue is full, consumers block (or
//! time out) while it is empty, and elements come out in the order they were
//! committed. Two interchangeable implementations are provided:
//!
//! * [`SharedQueue`], generic over the element type;
//! * [`SharedQueuePImpl`], which keeps its elements in a type-erased
//!   [`ErasedQueue`] so the synchronization code is compiled once.
//!
//! [`QueueFactory`] builds either one behind the [`BlockingQueue`] trait.
//!
//! ```
//! use shared_queue::{BlockingQueue, SharedQueue};
//! use std::time::Duration;
//!
//! let queue = SharedQueue::new(1).unwrap();
//! queue.enqueue("x");
//! assert!(queue.enqueue_timeout("y", Duration::from_millis(10)).is_err());
//! assert_eq!(queue.dequeue(), "x");
//! ```

mod chain;
mod common;
mod error;

pub mod erased;
pub mod factory;
pub mod shared_queue;

// Re-exports for convenience
pub use common::BlockingQueue;
pub use erased::{Data, ErasedQueue, Holder, SharedQueuePImpl};
pub use error::{EnqueueTimeoutError, QueueError};
pub use factory::{QueueFactory, QueueKind};
pub use shared_queue::SharedQueue;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queues_are_send_and_sync() {
        fn is_send_sync<Q: Send + Sync>() -> bool { true }

        assert!(is_send_sync::<SharedQueue<Box<u32>>>());
        assert!(is_send_sync::<SharedQueuePImpl<std::cell::Cell<u32>>>());
        assert!(is_send_sync::<Box<dyn BlockingQueue<u32>>>());
    }
}
