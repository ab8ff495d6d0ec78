//! Bounded blocking queue built on a linked slot chain
//!
//! The queue splits its shared state into three independently locked
//! regions so that producers and consumers only contend when they touch the
//! same end:
//!
//! * the head lock guards the consumer end of the chain and pairs with the
//!   "data available" condition;
//! * the tail lock guards the producer end of the chain;
//! * the size lock guards the occupancy counter and pairs with the
//!   "space available" condition.
//!
//! Lock order: only `dequeue` ever holds two of these at once, and it always
//! takes head then size. Every other path takes one lock at a time. Any
//! change to this module must keep that order.

use std::time::Duration;

use crossbeam_utils::CachePadded;
use parking_lot::{Condvar, Mutex};
use tracing::{debug, trace};

use crate::chain::{chain, Head, Tail};
use crate::common::{BlockingQueue, NotifyOnDrop};
use crate::error::{EnqueueTimeoutError, QueueError};

/// A bounded multi-producer multi-consumer queue with blocking and timed
/// enqueue/dequeue.
///
/// Elements are handed out in the order they were committed to the chain.
/// Elements still resident when the queue is dropped are dropped with it, so
/// drain the queue first if their release matters to the caller.
pub struct SharedQueue<T> {
    /// Consumer end of the chain
    head: CachePadded<Mutex<Head<T>>>,

    /// Producer end of the chain
    tail: CachePadded<Mutex<Tail<T>>>,

    /// Number of elements producers have been granted room for
    size: CachePadded<Mutex<usize>>,

    /// Signalled after an element is linked; waited on under `head`
    data_available: Condvar,

    /// Signalled after an element is unlinked; waited on under `size`
    space_available: Condvar,

    capacity: usize,
}

impl<T> SharedQueue<T> {
    /// Creates a new empty queue that holds at most `capacity` elements
    pub fn new(capacity: usize) -> Result<Self, QueueError> {
        if capacity == 0 {
            return Err(QueueError::ZeroCapacity);
        }

        let (head, tail) = chain();
        debug!(capacity, "shared queue created");

        Ok(Self {
            head: CachePadded::new(Mutex::new(head)),
            tail: CachePadded::new(Mutex::new(tail)),
            size: CachePadded::new(Mutex::new(0)),
            data_available: Condvar::new(),
            space_available: Condvar::new(),
            capacity,
        })
    }

    /// Reserves room for one element, waiting up to `timeout` (forever if `None`)
    fn reserve(&self, timeout: Option<Duration>) -> bool {
        let mut occupancy = self.size.lock();
        match timeout {
            None => {
                self.space_available
                    .wait_while(&mut occupancy, |occupancy| *occupancy >= self.capacity);
            }
            Some(timeout) => {
                self.space_available.wait_while_for(
                    &mut occupancy,
                    |occupancy| *occupancy >= self.capacity,
                    timeout,
                );
                // Room may have opened right at the deadline
                if *occupancy >= self.capacity {
                    return false;
                }
            }
        }
        *occupancy += 1;
        true
    }

    /// Links an element whose room has already been reserved
    fn commit(&self, element: T) {
        let _data = NotifyOnDrop::new(&*self.head, &self.data_available);
        self.tail.lock().push(element);
    }

    /// Gives back the room of an element that has just been unlinked.
    ///
    /// Called with the head lock held.
    #[inline]
    fn release(&self) {
        *self.size.lock() -= 1;
    }
}

impl<T: Send> BlockingQueue<T> for SharedQueue<T> {
    fn count(&self) -> usize {
        *self.size.lock()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn enqueue(&self, element: T) {
        self.reserve(None);
        self.commit(element);
    }

    fn enqueue_timeout(&self, element: T, timeout: Duration) -> Result<(), EnqueueTimeoutError<T>> {
        if !self.reserve(Some(timeout)) {
            trace!(?timeout, capacity = self.capacity, "enqueue timed out");
            return Err(EnqueueTimeoutError(element));
        }
        self.commit(element);
        Ok(())
    }

    fn dequeue(&self) -> T {
        let _space = NotifyOnDrop::new(&*self.size, &self.space_available);

        let mut head = self.head.lock();
        loop {
            if let Some(element) = head.pop() {
                self.release();
                return element;
            }
            self.data_available.wait(&mut head);
        }
    }

    fn dequeue_timeout(&self, timeout: Duration) -> Option<T> {
        let _space = NotifyOnDrop::new(&*self.size, &self.space_available);

        let mut head = self.head.lock();
        self.data_available
            .wait_while_for(&mut head, |head| head.is_empty(), timeout);

        let Some(element) = head.pop() else {
            trace!(?timeout, "dequeue timed out");
            return None;
        };
        self.release();
        Some(element)
    }
}
