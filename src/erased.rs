//! Type-erased queue variant
//!
//! [`ErasedQueue`] is a single, non-generic instantiation of the shared queue
//! over boxed [`Holder`]s. Its internals are compiled once, inside this
//! crate, no matter how many element types callers use it with.
//! [`SharedQueuePImpl`] is the typed front end: it wraps each element in a
//! [`Data`] holder on the way in and unwraps it on the way out, so callers
//! never see a holder.

use std::any::{self, Any};
use std::marker::PhantomData;
use std::time::Duration;

use tracing::debug;

use crate::common::BlockingQueue;
use crate::error::{EnqueueTimeoutError, QueueError};
use crate::shared_queue::SharedQueue;

/// An opaque element that can hand back what it wraps
pub trait Holder: Send {
    /// Recovers the wrapped element; the caller downcasts to the real type
    fn retrieve(self: Box<Self>) -> Box<dyn Any + Send>;
}

/// Holder for a single element of type `T`
pub struct Data<T>(pub T);

impl<T: Send + 'static> Holder for Data<T> {
    fn retrieve(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}

/// Shared queue core over erased elements
pub struct ErasedQueue {
    inner: SharedQueue<Box<dyn Holder>>,
}

impl ErasedQueue {
    /// Creates a new empty queue that holds at most `capacity` elements
    pub fn new(capacity: usize) -> Result<Self, QueueError> {
        Ok(Self {
            inner: SharedQueue::new(capacity)?,
        })
    }
}

impl BlockingQueue<Box<dyn Holder>> for ErasedQueue {
    fn count(&self) -> usize {
        self.inner.count()
    }

    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    fn enqueue(&self, element: Box<dyn Holder>) {
        self.inner.enqueue(element)
    }

    fn enqueue_timeout(
        &self,
        element: Box<dyn Holder>,
        timeout: Duration,
    ) -> Result<(), EnqueueTimeoutError<Box<dyn Holder>>> {
        self.inner.enqueue_timeout(element, timeout)
    }

    fn dequeue(&self) -> Box<dyn Holder> {
        self.inner.dequeue()
    }

    fn dequeue_timeout(&self, timeout: Duration) -> Option<Box<dyn Holder>> {
        self.inner.dequeue_timeout(timeout)
    }
}

/// Typed queue that stores its elements behind an [`ErasedQueue`].
///
/// Behaves exactly like [`SharedQueue`]; the only difference is where the
/// synchronization code gets compiled.
pub struct SharedQueuePImpl<T> {
    core: Box<ErasedQueue>,
    _marker: PhantomData<fn(T) -> T>,
}

impl<T: Send + 'static> SharedQueuePImpl<T> {
    /// Creates a new empty queue that holds at most `capacity` elements
    pub fn new(capacity: usize) -> Result<Self, QueueError> {
        let core = Box::new(ErasedQueue::new(capacity)?);
        debug!(capacity, element = any::type_name::<T>(), "pimpl queue created");
        Ok(Self {
            core,
            _marker: PhantomData,
        })
    }

    #[inline]
    fn into_holder(element: T) -> Box<dyn Holder> {
        Box::new(Data(element))
    }

    fn from_holder(holder: Box<dyn Holder>) -> T {
        match holder.retrieve().downcast::<Data<T>>() {
            Ok(data) => data.0,
            // Only `into_holder` feeds the private core, so every holder is a `Data<T>`
            Err(_) => unreachable!("erased queue holds a foreign element type"),
        }
    }
}

impl<T: Send + 'static> BlockingQueue<T> for SharedQueuePImpl<T> {
    fn count(&self) -> usize {
        self.core.count()
    }

    fn capacity(&self) -> usize {
        self.core.capacity()
    }

    fn enqueue(&self, element: T) {
        self.core.enqueue(Self::into_holder(element))
    }

    fn enqueue_timeout(&self, element: T, timeout: Duration) -> Result<(), EnqueueTimeoutError<T>> {
        self.core
            .enqueue_timeout(Self::into_holder(element), timeout)
            .map_err(|err| EnqueueTimeoutError(Self::from_holder(err.into_inner())))
    }

    fn dequeue(&self) -> T {
        Self::from_holder(self.core.dequeue())
    }

    fn dequeue_timeout(&self, timeout: Duration) -> Option<T> {
        self.core.dequeue_timeout(timeout).map(Self::from_holder)
    }
}
