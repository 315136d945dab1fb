use core::{cell::Cell, fmt, ptr::NonNull};

use static_assertions::{assert_eq_size, assert_not_impl_any};

/// A link in a singly linked list.
///
/// Embed one in every struct that should be able to join a
/// [`ForwardList`](super::forward_list::ForwardList). The hook is created
/// unlinked and only the list ever touches it; it is neither `Clone` nor
/// `Copy`, since a copied hook would point into somebody else's chain.
#[derive(Default)]
pub struct ForwardListHook {
    next: Cell<Option<NonNull<Self>>>,
}

impl ForwardListHook {
    /// Creates an unlinked hook.
    pub const fn new() -> Self {
        Self {
            next: Cell::new(None),
        }
    }

    #[inline]
    pub(crate) fn next(&self) -> Option<NonNull<Self>> {
        self.next.get()
    }

    #[inline]
    pub(crate) fn set_next(&self, next: Option<NonNull<Self>>) {
        self.next.set(next);
    }
}

impl fmt::Debug for ForwardListHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForwardListHook")
            .field("next", &self.next.get())
            .finish()
    }
}

assert_eq_size!(ForwardListHook, usize);
assert_not_impl_any!(ForwardListHook: Clone, Copy, Sync);
