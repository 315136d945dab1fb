use core::{cell::Cell, fmt, ptr};

use static_assertions::{assert_eq_size, assert_not_impl_any};

/// A link in a doubly linked list.
///
/// Embed one in every struct that should be able to join a
/// [`List`](super::list::List). Linked hooks form a ring through the list's
/// sentinel, so `next.prev == self` and `prev.next == self` hold for every
/// linked hook. Like [`ForwardListHook`](super::single::ForwardListHook) it is
/// neither `Clone` nor `Copy`.
pub struct ListHook {
    next: Cell<*mut ListHook>,
    prev: Cell<*mut ListHook>,
}

impl ListHook {
    /// Creates an unlinked hook.
    pub const fn new() -> Self {
        Self {
            next: Cell::new(ptr::null_mut()),
            prev: Cell::new(ptr::null_mut()),
        }
    }

    #[inline]
    pub(crate) fn next(&self) -> *mut ListHook {
        self.next.get()
    }

    #[inline]
    pub(crate) fn prev(&self) -> *mut ListHook {
        self.prev.get()
    }

    #[inline]
    pub(crate) fn set_next(&self, next: *mut ListHook) {
        self.next.set(next);
    }

    #[inline]
    pub(crate) fn set_prev(&self, prev: *mut ListHook) {
        self.prev.set(prev);
    }

    /// Points both links back at this hook: an empty ring.
    #[inline]
    pub(crate) fn close(&self) {
        let this = ptr::from_ref(self).cast_mut();
        self.next.set(this);
        self.prev.set(this);
    }

    /// Links `hook` between the adjacent `prev` and `next`.
    ///
    /// # Safety
    ///
    /// All three pointers must be live hooks and `prev.next == next`.
    #[inline]
    pub(crate) unsafe fn link_between(
        hook: *mut ListHook,
        prev: *mut ListHook,
        next: *mut ListHook,
    ) {
        unsafe {
            (*hook).set_prev(prev);
            (*hook).set_next(next);
            (*prev).set_next(hook);
            (*next).set_prev(hook);
        }
    }

    /// Links the chain `first..=last` in front of `next`.
    ///
    /// The chain's outer links are overwritten; whatever it was detached from
    /// must already be closed up.
    ///
    /// # Safety
    ///
    /// All pointers must be live hooks, `first` must reach `last` by `next`
    /// links, and `next` must be linked.
    #[inline]
    pub(crate) unsafe fn link_chain_before(
        first: *mut ListHook,
        last: *mut ListHook,
        next: *mut ListHook,
    ) {
        unsafe {
            let prev = (*next).prev();
            (*prev).set_next(first);
            (*first).set_prev(prev);
            (*last).set_next(next);
            (*next).set_prev(last);
        }
    }

    /// Unlinks `hook` from its neighbours and returns the following hook.
    ///
    /// The hook's own links are left stale.
    ///
    /// # Safety
    ///
    /// `hook` must be linked into a ring of live hooks.
    #[inline]
    pub(crate) unsafe fn unlink(hook: *mut ListHook) -> *mut ListHook {
        unsafe {
            let prev = (*hook).prev();
            let next = (*hook).next();
            (*prev).set_next(next);
            (*next).set_prev(prev);
            next
        }
    }
}

impl Default for ListHook {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ListHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListHook")
            .field("next", &self.next.get())
            .field("prev", &self.prev.get())
            .finish()
    }
}

assert_eq_size!(ListHook, [usize; 2]);
assert_not_impl_any!(ListHook: Clone, Copy, Sync);
