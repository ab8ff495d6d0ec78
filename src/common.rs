//! Common functionality for the shared queues
//!
//! This module provides the queue capability shared by every variant and the
//! scope guard used to deliver condition-variable notifications.

use std::time::Duration;

use parking_lot::{Condvar, Mutex};

use crate::error::EnqueueTimeoutError;

/// Memory ordering constants for atomic operations
pub mod ordering {
    pub use std::sync::atomic::Ordering::Acquire as A;
    pub use std::sync::atomic::Ordering::Release as R;
}

/// Trait for bounded blocking queue operations
///
/// This trait defines the interface every queue variant provides. It is object
/// safe, so callers can hold a `Box<dyn BlockingQueue<T>>` without knowing
/// which variant was built.
pub trait BlockingQueue<T>: Send + Sync {
    /// Returns the number of elements currently resident in the queue
    fn count(&self) -> usize;

    /// Returns the fixed capacity the queue was built with
    fn capacity(&self) -> usize;

    /// Pushes an element to the queue, blocking while the queue is full
    fn enqueue(&self, element: T);

    /// Pushes an element to the queue, waiting at most `timeout` for space.
    ///
    /// On timeout the queue is left untouched and the element is returned
    /// inside the error.
    fn enqueue_timeout(&self, element: T, timeout: Duration) -> Result<(), EnqueueTimeoutError<T>>;

    /// Pops the oldest element, blocking while the queue is empty
    fn dequeue(&self) -> T;

    /// Pops the oldest element, waiting at most `timeout` for one to arrive.
    ///
    /// Returns `None` if nothing became available in time.
    fn dequeue_timeout(&self, timeout: Duration) -> Option<T>;

    /// Same as [`enqueue_timeout`](Self::enqueue_timeout) with a timeout in milliseconds
    fn enqueue_timeout_ms(&self, element: T, timeout_ms: u64) -> Result<(), EnqueueTimeoutError<T>> {
        self.enqueue_timeout(element, Duration::from_millis(timeout_ms))
    }

    /// Same as [`dequeue_timeout`](Self::dequeue_timeout) with a timeout in milliseconds
    fn dequeue_timeout_ms(&self, timeout_ms: u64) -> Option<T> {
        self.dequeue_timeout(Duration::from_millis(timeout_ms))
    }

    /// Checks if the queue was empty during this call
    ///
    /// The answer may be stale as soon as it is returned when other threads
    /// are pushing or popping concurrently.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Checks if the queue was full during this call
    ///
    /// Same caveat as [`is_empty`](Self::is_empty).
    fn is_full(&self) -> bool {
        self.count() >= self.capacity()
    }
}

/// Wakes one waiter of `cond` when dropped.
///
/// The paired mutex is taken for the duration of the notify so that a waiter
/// that has checked its predicate but not yet parked cannot miss the wakeup.
#[must_use = "the notification fires when the guard is dropped"]
pub(crate) struct NotifyOnDrop<'a, M> {
    lock: &'a Mutex<M>,
    cond: &'a Condvar,
}

impl<'a, M> NotifyOnDrop<'a, M> {
    #[inline]
    pub(crate) fn new(lock: &'a Mutex<M>, cond: &'a Condvar) -> Self {
        Self { lock, cond }
    }
}

impl<M> Drop for NotifyOnDrop<'_, M> {
    fn drop(&mut self) {
        let _guard = self.lock.lock();
        self.cond.notify_one();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn notifier_wakes_waiter_on_drop() {
        let state = Arc::new((Mutex::new(false), Condvar::new()));

        let waiter = {
            let state = state.clone();
            thread::spawn(move || {
                let (lock, cond) = &*state;
                let mut ready = lock.lock();
                cond.wait_while(&mut ready, |ready| !*ready);
                *ready
            })
        };

        {
            let (lock, cond) = &*state;
            let _notify = NotifyOnDrop::new(lock, cond);
            *lock.lock() = true;
        }

        assert!(waiter.join().unwrap());
    }

    #[test]
    fn notifier_fires_on_early_return() {
        fn bail(lock: &Mutex<u32>, cond: &Condvar, early: bool) -> u32 {
            let _notify = NotifyOnDrop::new(lock, cond);
            if early {
                return 0;
            }
            *lock.lock() += 1;
            1
        }

        let lock = Mutex::new(0);
        let cond = Condvar::new();
        assert_eq!(bail(&lock, &cond, true), 0);
        assert_eq!(bail(&lock, &cond, false), 1);
        // the guard must have released the lock on both paths
        assert!(lock.try_lock().is_some());
    }
}
