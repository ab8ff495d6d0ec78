//! Singly linked slot chain backing the shared queues
//!
//! The chain always ends in an empty sentinel slot. A producer writes its
//! element into the sentinel, links a fresh sentinel behind it and advances
//! the tail. A consumer unlinks the oldest slot only once that slot's `next`
//! link has been published, so the two ends never touch the same slot's
//! value at the same time.
//!
//! [`Head`] owns every slot in the chain. [`Tail`] is a non-owning pointer to
//! the current sentinel. Each end is meant to live behind its own lock.

use std::cell::UnsafeCell;
use std::marker::PhantomData;
use std::ptr::{self, NonNull};
use std::sync::atomic::AtomicPtr;

use crate::common::ordering;

struct Slot<T> {
    value: UnsafeCell<Option<T>>,
    next: AtomicPtr<Slot<T>>,
}

impl<T> Slot<T> {
    fn sentinel() -> NonNull<Slot<T>> {
        NonNull::from(Box::leak(Box::new(Slot {
            value: UnsafeCell::new(None),
            next: AtomicPtr::new(ptr::null_mut()),
        })))
    }
}

/// Consumer end: owns the oldest slot and, through it, the whole chain
pub(crate) struct Head<T> {
    slot: NonNull<Slot<T>>,
    _owns: PhantomData<Box<Slot<T>>>,
}

/// Producer end: points at the sentinel that receives the next element
pub(crate) struct Tail<T> {
    slot: NonNull<Slot<T>>,
}

// Safety: the ends only share slots through the atomic `next` link. A slot's
// value is written by the tail before `next` is released and read by the head
// only after `next` is acquired.
unsafe impl<T: Send> Send for Head<T> {}
unsafe impl<T: Send> Send for Tail<T> {}

/// Creates an empty chain made of a single sentinel slot
pub(crate) fn chain<T>() -> (Head<T>, Tail<T>) {
    let sentinel = Slot::sentinel();
    (
        Head {
            slot: sentinel,
            _owns: PhantomData,
        },
        Tail { slot: sentinel },
    )
}

impl<T> Tail<T> {
    /// Writes `value` into the sentinel and appends a new sentinel
    pub(crate) fn push(&mut self, value: T) {
        let sentinel = Slot::sentinel();
        // Safety: only the tail writes to the sentinel, and the head cannot
        // unlink it before `next` is published below.
        unsafe {
            let slot = self.slot.as_ref();
            *slot.value.get() = Some(value);
            slot.next.store(sentinel.as_ptr(), ordering::R);
        }
        self.slot = sentinel;
    }
}

impl<T> Head<T> {
    /// Returns true when no element is linked behind the head slot
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        // Safety: the head slot stays allocated for as long as `self` owns it
        unsafe { self.slot.as_ref() }.next.load(ordering::A).is_null()
    }

    /// Unlinks the oldest slot and returns its element
    pub(crate) fn pop(&mut self) -> Option<T> {
        // Safety: see `is_empty`
        let next = NonNull::new(unsafe { self.slot.as_ref() }.next.load(ordering::A))?;
        // Safety: a published `next` means the producer is done with this
        // slot, so the head is now its sole owner.
        let old = unsafe { Box::from_raw(self.slot.as_ptr()) };
        self.slot = next;
        old.value.into_inner()
    }
}

impl<T> Drop for Head<T> {
    fn drop(&mut self) {
        // Iterative so that long chains cannot overflow the stack
        while self.pop().is_some() {}
        // Safety: what remains is the sentinel, which nobody else frees
        unsafe { drop(Box::from_raw(self.slot.as_ptr())) };
    }
}
