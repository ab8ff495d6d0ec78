//! Construction switch between the queue variants

use std::fmt;
use std::str::FromStr;

use crate::common::BlockingQueue;
use crate::erased::SharedQueuePImpl;
use crate::error::QueueError;
use crate::shared_queue::SharedQueue;

/// Which queue implementation to build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum QueueKind {
    /// [`SharedQueue`], generic over the element type
    #[default]
    Standard,
    /// [`SharedQueuePImpl`], backed by the type-erased core
    PImpl,
}

impl fmt::Display for QueueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueKind::Standard => f.write_str("standard"),
            QueueKind::PImpl => f.write_str("pimpl"),
        }
    }
}

impl FromStr for QueueKind {
    type Err = QueueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(QueueKind::Standard),
            "pimpl" => Ok(QueueKind::PImpl),
            _ => Err(QueueError::UnknownKind(s.to_owned())),
        }
    }
}

/// Builds queues behind the common [`BlockingQueue`] capability
pub struct QueueFactory;

impl QueueFactory {
    /// Creates a queue of the given kind
    pub fn create<T: Send + 'static>(
        kind: QueueKind,
        capacity: usize,
    ) -> Result<Box<dyn BlockingQueue<T>>, QueueError> {
        match kind {
            QueueKind::Standard => Self::create_standard(capacity),
            QueueKind::PImpl => Self::create_pimpl(capacity),
        }
    }

    pub fn create_standard<T: Send + 'static>(
        capacity: usize,
    ) -> Result<Box<dyn BlockingQueue<T>>, QueueError> {
        Ok(Box::new(SharedQueue::new(capacity)?))
    }

    pub fn create_pimpl<T: Send + 'static>(
        capacity: usize,
    ) -> Result<Box<dyn BlockingQueue<T>>, QueueError> {
        Ok(Box::new(SharedQueuePImpl::new(capacity)?))
    }
}
