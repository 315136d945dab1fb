use alloc::boxed::Box;
use core::{fmt, marker::PhantomData, ptr::NonNull};

use super::{
    algo::{self, Prefetch},
    double::ListHook,
    hint::intrusive_assert,
    iter::{ListCursor, ListIter, ListRange, ListReverseCursor},
    traits::{Adapter, hook_ptr},
};

/// An intrusive circular doubly linked list.
///
/// Elements are borrowed for `'a` and linked through the [`ListHook`] that `A`
/// designates. The list keeps a sentinel hook that closes the ring, so
/// [`end`](Self::end) is a real position that can be inserted before and
/// stepped back from. The sentinel is the list's only allocation: it is made
/// once in [`new`](Self::new) and lives at a fixed address, so moving the
/// `List` value does not invalidate elements or cursors.
///
/// The list keeps an exact element count. Mutations through cursors take
/// `&mut self` and are `unsafe`, since only the caller knows that the cursors
/// belong to this list.
pub struct List<'a, A>
where
    A: Adapter<Hook = ListHook>,
{
    root: NonNull<ListHook>,
    len: usize,
    _marker: PhantomData<&'a A::Value>,
}

impl<'a, A> List<'a, A>
where
    A: Adapter<Hook = ListHook>,
{
    /// Creates an empty list.
    ///
    /// Allocates the sentinel hook, so unlike the element operations this is
    /// not allocation free and cannot be `const`.
    pub fn new() -> Self {
        let root = NonNull::from(Box::leak(Box::new(ListHook::new())));
        // SAFETY: freshly allocated and not shared yet.
        unsafe { root.as_ref() }.close();
        Self {
            root,
            len: 0,
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
        self.clear();
        unsafe { self.insert_range(self.end(), values) };
    }

    #[inline]
    fn root(&self) -> &ListHook {
        // SAFETY: the sentinel lives until `drop`.
        unsafe { self.root.as_ref() }
    }

    #[inline]
    fn root_ptr(&self) -> *mut ListHook {
        self.root.as_ptr()
    }

    /// Returns `true` if the list has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the first element.
    #[inline]
    pub fn front(&self) -> Option<&'a A::Value> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: a non-empty ring starts with an element.
        Some(unsafe { self.begin().get() })
    }

    /// Returns the last element.
    #[inline]
    pub fn back(&self) -> Option<&'a A::Value> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: a non-empty ring ends with an element.
        Some(unsafe { self.end().prev().get() })
    }

    /// Returns the position of the first element, or `end()` if empty.
    #[inline]
    pub fn begin(&self) -> ListCursor<'a, A> {
        ListCursor::from_ptr(self.root().next())
    }

    /// Returns the sentinel position.
    #[inline]
    pub fn end(&self) -> ListCursor<'a, A> {
        ListCursor::from_ptr(self.root_ptr())
    }

    /// Returns the reverse position of the last element.
    #[inline]
    pub fn rbegin(&self) -> ListReverseCursor<'a, A> {
        ListReverseCursor::new(self.end())
    }

    /// Returns the reverse position past the first element.
    #[inline]
    pub fn rend(&self) -> ListReverseCursor<'a, A> {
        ListReverseCursor::new(self.begin())
    }

    /// Iterates over the elements from front to back. The iterator is
    /// double-ended.
    pub fn iter(&self) -> ListIter<'_, A> {
        // SAFETY: the borrow of `self` keeps the ring from changing.
        let range = unsafe {
            ListRange::new(
                ListCursor::from_ptr(self.root().next()),
                ListCursor::from_ptr(self.root_ptr()),
            )
        };
        ListIter::new(range, self.len)
    }

    /// Iterates over `[first, last)`.
    ///
    /// # Safety
    ///
    /// See [`ListRange::new`].
    pub unsafe fn range(
        &self,
        first: ListCursor<'a, A>,
        last: ListCursor<'a, A>,
    ) -> ListRange<'a, A> {
        unsafe { ListRange::new(first, last) }
    }

    /// Unlinks every element.
    ///
    /// The elements' hooks are not touched; they keep stale links until they
    /// are inserted somewhere again.
    #[inline]
    pub fn clear(&mut self) {
        self.root().close();
        self.len = 0;
    }

    /// Links `value` in as the first element.
    ///
    /// # Safety
    ///
    /// `value` must not currently be linked through `A`'s hook.
    pub unsafe fn push_front(&mut self, value: &'a A::Value) {
        unsafe { self.insert(self.begin(), value) };
    }

    /// Links `value` in as the last element.
    ///
    /// # Safety
    ///
    /// `value` must not currently be linked through `A`'s hook.
    pub unsafe fn push_back(&mut self, value: &'a A::Value) {
        unsafe { self.insert(self.end(), value) };
    }

    /// Unlinks and returns the first element.
    pub fn pop_front(&mut self) -> Option<&'a A::Value> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is non-empty, so `begin` is one of its elements.
        unsafe {
            let pos = self.begin();
            let value = pos.get();
            self.erase(pos);
            Some(value)
        }
    }

    /// Unlinks and returns the last element.
    pub fn pop_back(&mut self) -> Option<&'a A::Value> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is non-empty, so the sentinel's predecessor is one
        // of its elements.
        unsafe {
            let pos = self.end().prev();
            let value = pos.get();
            self.erase(pos);
            Some(value)
        }
    }

    /// Links `value` in right before `pos` and returns its position.
    ///
    /// # Safety
    ///
    /// `pos` must be an element of this list or `end()`, and `value` must not
    /// currently be linked through `A`'s hook.
    pub unsafe fn insert(
        &mut self,
        pos: ListCursor<'a, A>,
        value: &'a A::Value,
    ) -> ListCursor<'a, A> {
        let next = pos.as_ptr();
        intrusive_assert!(!next.is_null());
        let hook = hook_ptr::<A>(value).as_ptr();
        unsafe { ListHook::link_between(hook, (*next).prev(), next) };
        self.len += 1;
        ListCursor::from_ptr(hook)
    }

    /// Links `values` in order right before `pos`.
    ///
    /// Returns the position of the first inserted element, or `pos` if
    /// `values` was empty.
    ///
    /// # Safety
    ///
    /// Same as [`insert`](Self::insert) for every value; each value may appear
    /// only once.
    pub unsafe fn insert_range<I>(&mut self, pos: ListCursor<'a, A>, values: I) -> ListCursor<'a, A>
    where
        I: IntoIterator<Item = &'a A::Value>,
    {
        let after = pos.as_ptr();
        intrusive_assert!(!after.is_null());
        unsafe {
            let before = (*after).prev();
            let mut prev = before;
            for value in values {
                let hook = hook_ptr::<A>(value).as_ptr();
                (*hook).set_prev(prev);
                (*prev).set_next(hook);
                prev = hook;
                self.len += 1;
            }
            (*prev).set_next(after);
            (*after).set_prev(prev);
            ListCursor::from_ptr((*before).next())
        }
    }

    /// Unlinks the element at `pos` and returns the following position.
    ///
    /// # Safety
    ///
    /// `pos` must be an element of this list, not `end()`.
    pub unsafe fn erase(&mut self, pos: ListCursor<'a, A>) -> ListCursor<'a, A> {
        let hook = pos.as_ptr();
        intrusive_assert!(!hook.is_null() && hook != self.root_ptr());
        intrusive_assert!(self.len > 0);
        let next = unsafe { ListHook::unlink(hook) };
        self.len -= 1;
        ListCursor::from_ptr(next)
    }

    /// Unlinks every element of `[first, last)` and returns `last`.
    ///
    /// The relink is constant time; counting the removed elements walks the
    /// range.
    ///
    /// # Safety
    ///
    /// `first` and `last` must be positions of this list with `last`
    /// reachable from `first`.
    pub unsafe fn erase_range(
        &mut self,
        first: ListCursor<'a, A>,
        last: ListCursor<'a, A>,
    ) -> ListCursor<'a, A> {
        if first == last {
            return last;
        }
        unsafe {
            let n = first.distance(last);
            let before = (*first.as_ptr()).prev();
            (*before).set_next(last.as_ptr());
            (*last.as_ptr()).set_prev(before);
            intrusive_assert!(self.len >= n);
            self.len -= n;
        }
        last
    }

    /// Moves every element of `other` in right before `pos`, keeping their
    /// order. `other` is left empty.
    ///
    /// # Safety
    ///
    /// `pos` must be an element of this list or `end()`.
    pub unsafe fn splice(&mut self, pos: ListCursor<'a, A>, other: &mut List<'a, A>) {
        if other.is_empty() {
            return;
        }
        intrusive_assert!(!pos.is_null());
        let root = other.root();
        unsafe { ListHook::link_chain_before(root.next(), root.prev(), pos.as_ptr()) };
        self.len += other.len;
        other.clear();
    }

    /// Moves the element at `element` in `other` to right before `pos`.
    ///
    /// # Safety
    ///
    /// `pos` must be an element of this list or `end()`, and `element` must
    /// be an element of `other`.
    pub unsafe fn splice_one(
        &mut self,
        pos: ListCursor<'a, A>,
        other: &mut List<'a, A>,
        element: ListCursor<'a, A>,
    ) {
        unsafe {
            let value = element.get();
            other.erase(element);
            self.insert(pos, value);
        }
    }

    /// Moves the elements of `[first, last)` in `other` to right before
    /// `pos`, keeping their order. Both counts are adjusted by walking the
    /// range.
    ///
    /// # Safety
    ///
    /// `pos` must be an element of this list or `end()`, `first` and `last`
    /// must be positions of `other` with `last` reachable from `first`.
    pub unsafe fn splice_range(
        &mut self,
        pos: ListCursor<'a, A>,
        other: &mut List<'a, A>,
        first: ListCursor<'a, A>,
        last: ListCursor<'a, A>,
    ) {
        if first == last {
            return;
        }
        intrusive_assert!(!pos.is_null());
        unsafe {
            let n = first.distance(last);
            let head = first.as_ptr();
            let tail = (*last.as_ptr()).prev();
            let before = (*head).prev();
            (*before).set_next(last.as_ptr());
            (*last.as_ptr()).set_prev(before);
            intrusive_assert!(other.len >= n);
            other.len -= n;

            ListHook::link_chain_before(head, tail, pos.as_ptr());
            self.len += n;
        }
    }

    /// Takes over the elements of `other`, dropping the current ones.
    ///
    /// The ring is re-pointed at this list's sentinel; `other` is left empty
    /// and keeps its own sentinel.
    pub fn move_from(&mut self, other: &mut List<'a, A>) {
        self.clear();
        if other.is_empty() {
            return;
        }
        let theirs = other.root();
        // SAFETY: `other` is non-empty, so both ends are live element hooks
        // of its ring.
        unsafe { ListHook::link_chain_before(theirs.next(), theirs.prev(), self.root_ptr()) };
        self.len = other.len;
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
    /// Sentinels stay at their addresses, so this is constant time and every
    /// cursor keeps pointing at the same element; `end()` cursors swap lists.
    pub fn swap(&mut self, other: &mut List<'a, A>) {
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

    /// Folds the transformed elements from both ends; see
    /// [`algo::transform_reduce_with`].
    pub fn transform_reduce<T, R, F>(&self, init: T, reduce: R, transform: F) -> T
    where
        R: FnMut(T, T) -> T,
        F: FnMut(&'a A::Value) -> T,
    {
        self.transform_reduce_with(algo::PREFETCH, init, reduce, transform)
    }

    /// [`transform_reduce`](Self::transform_reduce), choosing whether to
    /// prefetch.
    pub fn transform_reduce_with<const P: bool, T, R, F>(
        &self,
        prefetch: Prefetch<P>,
        init: T,
        reduce: R,
        transform: F,
    ) -> T
    where
        R: FnMut(T, T) -> T,
        F: FnMut(&'a A::Value) -> T,
    {
        // SAFETY: `[begin, end)` is this list, borrowed for the whole walk.
        unsafe {
            algo::transform_reduce_with(prefetch, self.begin(), self.end(), init, reduce, transform)
        }
    }
}

impl<'a, A> Drop for List<'a, A>
where
    A: Adapter<Hook = ListHook>,
{
    fn drop(&mut self) {
        // SAFETY: allocated by `Box::leak` in `new` and never freed elsewhere.
        drop(unsafe { Box::from_raw(self.root.as_ptr()) });
    }
}

impl<A> Default for List<'_, A>
where
    A: Adapter<Hook = ListHook>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for List<'_, A>
where
    A: Adapter<Hook = ListHook>,
    A::Value: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'s, 'a, A> IntoIterator for &'s List<'a, A>
where
    A: Adapter<Hook = ListHook>,
{
    type Item = &'s A::Value;
    type IntoIter = ListIter<'s, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

