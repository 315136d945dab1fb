use alloc::boxed::Box;
use core::{fmt, marker::PhantomData, ptr::NonNull};

use super::{
    algo::{self, Prefetch},
    hint::intrusive_assert,
    iter::{ForwardListCursor, ForwardListIter, ForwardListRange},
    single::ForwardListHook,
    traits::{Adapter, container_of, hook_ptr},
};

/// An intrusive singly linked list.
///
/// The list owns nothing but a heap-allocated root hook; the elements are
/// borrowed for `'a` and linked through the [`ForwardListHook`] that `A`
/// designates. Elements are only ever handed out as shared references.
///
/// Positions are [`ForwardListCursor`]s. Because a singly linked list can only
/// relink after a known hook, every positional operation works on the element
/// *after* the cursor, and [`before_begin`](Self::before_begin) is the
/// position in front of the first element. That cursor refers to the root
/// hook, which stays at a fixed address until the list is dropped, so moving
/// the `ForwardList` value keeps it valid.
///
/// There is no element count; [`iter`](Self::iter)`().count()` walks the
/// chain.
pub struct ForwardList<'a, A>
where
    A: Adapter<Hook = ForwardListHook>,
{
    root: NonNull<ForwardListHook>,
    _marker: PhantomData<&'a A::Value>,
}

impl<'a, A> ForwardList<'a, A>
where
    A: Adapter<Hook = ForwardListHook>,
{
    /// Creates an empty list.
    ///
    /// Allocates the root hook; this is the list's only allocation.
    pub fn new() -> Self {
        Self {
            root: NonNull::from(Box::leak(Box::new(ForwardListHook::new()))),
            _marker: PhantomData,
        }
    }

    /// Creates a list holding `values` in order.
    ///
    /// # Safety
    ///
    /// None of the values may currently be linked through `A`'s hook, and
    /// each may appear only once.
    pub unsafe fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a A::Value>,
    {
        let mut list = Self::new();
        unsafe { list.assign(values) };
        list
    }

    /// Replaces the contents with `values` in order.
    ///
    /// # Safety
    ///
    /// Same as [`from_values`](Self::from_values).
    pub unsafe fn assign<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = &'a A::Value>,
    {
        let mut prev = self.root_ptr();
        for value in values {
            let hook = hook_ptr::<A>(value);
            unsafe { prev.as_ref() }.set_next(Some(hook));
            prev = hook;
        }
        unsafe { prev.as_ref() }.set_next(None);
    }

    #[inline]
    fn root(&self) -> &ForwardListHook {
        // SAFETY: the root lives until `drop`.
        unsafe { self.root.as_ref() }
    }

    #[inline]
    fn root_ptr(&self) -> NonNull<ForwardListHook> {
        self.root
    }

    /// Returns `true` if the list has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root().next().is_none()
    }

    /// Returns the first element.
    #[inline]
    pub fn front(&self) -> Option<&'a A::Value> {
        // SAFETY: every linked hook belongs to a value that lives for `'a`.
        self.root()
            .next()
            .map(|hook| unsafe { container_of::<A>(hook).as_ref() })
    }

    /// Returns the position in front of the first element.
    #[inline]
    pub fn before_begin(&self) -> ForwardListCursor<'a, A> {
        ForwardListCursor::from_ptr(Some(self.root_ptr()))
    }

    /// Returns the position of the first element, or `end()` if empty.
    #[inline]
    pub fn begin(&self) -> ForwardListCursor<'a, A> {
        ForwardListCursor::from_ptr(self.root().next())
    }

    /// Returns the past-the-end position.
    #[inline]
    pub fn end(&self) -> ForwardListCursor<'a, A> {
        ForwardListCursor::from_ptr(None)
    }

    /// Iterates over the elements from front to back.
    pub fn iter(&self) -> ForwardListIter<'_, A> {
        // SAFETY: the borrow of `self` keeps the chain from changing.
        let range = unsafe {
            ForwardListRange::new(
                ForwardListCursor::from_ptr(self.root().next()),
                ForwardListCursor::from_ptr(None),
            )
        };
        ForwardListIter::new(range)
    }

    /// Iterates over `[first, last)`.
    ///
    /// # Safety
    ///
    /// See [`ForwardListRange::new`].
    pub unsafe fn range(
        &self,
        first: ForwardListCursor<'a, A>,
        last: ForwardListCursor<'a, A>,
    ) -> ForwardListRange<'a, A> {
        unsafe { ForwardListRange::new(first, last) }
    }

    /// Unlinks every element.
    ///
    /// The elements' hooks are not touched; they keep stale links until they
    /// are inserted somewhere again.
    #[inline]
    pub fn clear(&mut self) {
        self.root().set_next(None);
    }

    /// Links `value` in as the first element.
    ///
    /// # Safety
    ///
    /// `value` must not currently be linked through `A`'s hook.
    pub unsafe fn push_front(&mut self, value: &'a A::Value) {
        let hook = hook_ptr::<A>(value);
        unsafe { hook.as_ref() }.set_next(self.root().next());
        self.root().set_next(Some(hook));
    }

    /// Unlinks and returns the first element.
    pub fn pop_front(&mut self) -> Option<&'a A::Value> {
        let hook = self.root().next()?;
        // SAFETY: `hook` is linked, so it is the hook of a value living for
        // `'a`.
        unsafe {
            self.root().set_next(hook.as_ref().next());
            Some(container_of::<A>(hook).as_ref())
        }
    }

    /// Links `value` in right after `pos` and returns its position.
    ///
    /// # Safety
    ///
    /// `pos` must be `before_begin()` or an element of this list, and `value`
    /// must not currently be linked through `A`'s hook.
    pub unsafe fn insert_after(
        &mut self,
        pos: ForwardListCursor<'a, A>,
        value: &'a A::Value,
    ) -> ForwardListCursor<'a, A> {
        let pos = unsafe { linked(pos.as_ptr()) };
        let hook = hook_ptr::<A>(value);
        unsafe {
            hook.as_ref().set_next(pos.as_ref().next());
            pos.as_ref().set_next(Some(hook));
        }
        ForwardListCursor::from_ptr(Some(hook))
    }

    /// Links `values` in order right after `pos`.
    ///
    /// Returns the position of the last inserted element, or `pos` if
    /// `values` was empty.
    ///
    /// # Safety
    ///
    /// Same as [`insert_after`](Self::insert_after) for every value; each
    /// value may appear only once.
    pub unsafe fn insert_range_after<I>(
        &mut self,
        pos: ForwardListCursor<'a, A>,
        values: I,
    ) -> ForwardListCursor<'a, A>
    where
        I: IntoIterator<Item = &'a A::Value>,
    {
        let mut prev = unsafe { linked(pos.as_ptr()) };
        let after = unsafe { prev.as_ref() }.next();
        for value in values {
            let hook = hook_ptr::<A>(value);
            unsafe { prev.as_ref() }.set_next(Some(hook));
            prev = hook;
        }
        unsafe { prev.as_ref() }.set_next(after);
        ForwardListCursor::from_ptr(Some(prev))
    }

    /// Unlinks the element after `pos` and returns the position that now
    /// follows `pos`.
    ///
    /// # Safety
    ///
    /// `pos` must be `before_begin()` or an element of this list, and must
    /// not be the last element.
    pub unsafe fn erase_after(
        &mut self,
        pos: ForwardListCursor<'a, A>,
    ) -> ForwardListCursor<'a, A> {
        let pos = unsafe { linked(pos.as_ptr()) };
        unsafe {
            let erased = linked(pos.as_ref().next());
            let after = erased.as_ref().next();
            pos.as_ref().set_next(after);
            ForwardListCursor::from_ptr(after)
        }
    }

    /// Unlinks every element strictly between `first` and `last` and returns
    /// `last`.
    ///
    /// Nothing happens when `first == last` or `last` directly follows
    /// `first`.
    ///
    /// # Safety
    ///
    /// `first` must be `before_begin()` or an element of this list and `last`
    /// must be reachable from it.
    pub unsafe fn erase_range_after(
        &mut self,
        first: ForwardListCursor<'a, A>,
        last: ForwardListCursor<'a, A>,
    ) -> ForwardListCursor<'a, A> {
        if first == last || unsafe { first.next() } == last {
            return last;
        }
        let first = unsafe { linked(first.as_ptr()) };
        unsafe { first.as_ref() }.set_next(last.as_ptr());
        last
    }

    /// Moves every element of `other` in right after `pos`, keeping their
    /// order. `other` is left empty.
    ///
    /// # Safety
    ///
    /// `pos` must be `before_begin()` or an element of this list.
    pub unsafe fn splice_after(
        &mut self,
        pos: ForwardListCursor<'a, A>,
        other: &mut ForwardList<'a, A>,
    ) {
        let pos = unsafe { linked(pos.as_ptr()) };
        let Some(head) = other.root().next() else {
            return;
        };
        unsafe {
            if let Some(after) = pos.as_ref().next() {
                let mut tail = head;
                while let Some(next) = tail.as_ref().next() {
                    tail = next;
                }
                tail.as_ref().set_next(Some(after));
            }
            pos.as_ref().set_next(Some(head));
        }
        other.clear();
    }

    /// Moves the element after `element` in `other` to right after `pos`.
    ///
    /// # Safety
    ///
    /// `pos` must be `before_begin()` or an element of this list, and
    /// `element` must be `before_begin()` or an element of `other` that is not
    /// its last one. `pos` must not be the moved element.
    pub unsafe fn splice_one_after(
        &mut self,
        pos: ForwardListCursor<'a, A>,
        other: &mut ForwardList<'a, A>,
        element: ForwardListCursor<'a, A>,
    ) {
        unsafe {
            let value = element.next().get();
            other.erase_after(element);
            self.insert_after(pos, value);
        }
    }

    /// Moves the elements strictly between `first` and `last` in `other` to
    /// right after `pos`, keeping their order.
    ///
    /// # Safety
    ///
    /// `pos` must be `before_begin()` or an element of this list, `first`
    /// must be `before_begin()` or an element of `other`, `last` must be
    /// reachable from `first`, and `pos` must not lie inside the moved range.
    pub unsafe fn splice_range_after(
        &mut self,
        pos: ForwardListCursor<'a, A>,
        _other: &mut ForwardList<'a, A>,
        first: ForwardListCursor<'a, A>,
        last: ForwardListCursor<'a, A>,
    ) {
        if first == last || unsafe { first.next() } == last {
            return;
        }
        unsafe {
            let pos = linked(pos.as_ptr());
            let first = linked(first.as_ptr());
            let head = linked(first.as_ref().next());
            let mut tail = head;
            while tail.as_ref().next() != last.as_ptr() {
                tail = linked(tail.as_ref().next());
            }
            tail.as_ref().set_next(pos.as_ref().next());
            pos.as_ref().set_next(Some(head));
            first.as_ref().set_next(last.as_ptr());
        }
    }

    /// Takes over the elements of `other`, dropping the current ones.
    /// `other` is left empty.
    pub fn move_from(&mut self, other: &mut ForwardList<'a, A>) {
        self.root().set_next(other.root().next());
        other.clear();
    }

    /// Moves the elements into a new list, leaving `self` empty.
    pub fn take(&mut self) -> Self {
        let mut list = Self::new();
        list.move_from(self);
        list
    }

    /// Exchanges the contents of two lists.
    ///
    /// Root hooks stay at their addresses, so `before_begin()` cursors swap
    /// lists along with the elements.
    pub fn swap(&mut self, other: &mut ForwardList<'a, A>) {
        core::mem::swap(self, other);
    }

    /// Calls `f` on every element from front to back.
    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(&'a A::Value),
    {
        self.for_each_with(algo::PREFETCH, f);
    }

    /// Calls `f` on every element from front to back, choosing whether to
    /// prefetch.
    pub fn for_each_with<const P: bool, F>(&self, prefetch: Prefetch<P>, f: F)
    where
        F: FnMut(&'a A::Value),
    {
        // SAFETY: `[begin, end)` is this list, borrowed for the whole walk.
        unsafe { algo::for_each_with(prefetch, self.begin(), self.end(), f) }
    }
}

/// Unwraps a hook pointer the caller promised is present.
///
/// # Safety
///
/// `hook` must be `Some`.
#[inline]
unsafe fn linked(hook: Option<NonNull<ForwardListHook>>) -> NonNull<ForwardListHook> {
    intrusive_assert!(hook.is_some());
    unsafe { hook.unwrap_unchecked() }
}

impl<'a, A> Drop for ForwardList<'a, A>
where
    A: Adapter<Hook = ForwardListHook>,
{
    fn drop(&mut self) {
        // SAFETY: allocated by `Box::leak` in `new` and never freed elsewhere.
        drop(unsafe { Box::from_raw(self.root.as_ptr()) });
    }
}

impl<A> Default for ForwardList<'_, A>
where
    A: Adapter<Hook = ForwardListHook>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for ForwardList<'_, A>
where
    A: Adapter<Hook = ForwardListHook>,
    A::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'s, 'a, A> IntoIterator for &'s ForwardList<'a, A>
where
    A: Adapter<Hook = ForwardListHook>,
{
    type Item = &'s A::Value;
    type IntoIter = ForwardListIter<'s, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

