//! Cursors and iterators over the intrusive lists.
//!
//! Cursors are the positional handles the list operations take: plain copies
//! of a hook pointer that compare by address. They do not borrow the list, so
//! a cursor can be passed straight back into a `&mut self` operation; that is
//! also why moving or dereferencing one is `unsafe`. The iterator types wrap a
//! pair of cursors and are what safe code gets from `iter()`.

use core::{fmt, iter::FusedIterator, marker::PhantomData, ptr::{self, NonNull}};

use super::{
    double::ListHook,
    hint::{self, intrusive_assert},
    single::ForwardListHook,
    traits::{Adapter, BidirectionalCursor, LinkCursor, container_of},
};

/// A position in a [`ForwardList`](super::forward_list::ForwardList).
///
/// Either the list's root (`before_begin`), an element, or the null `end`.
pub struct ForwardListCursor<'a, A>
where
    A: Adapter<Hook = ForwardListHook>,
{
    hook: Option<NonNull<ForwardListHook>>,
    _marker: PhantomData<&'a A::Value>,
}

impl<'a, A> ForwardListCursor<'a, A>
where
    A: Adapter<Hook = ForwardListHook>,
{
    #[inline]
    pub(crate) fn from_ptr(hook: Option<NonNull<ForwardListHook>>) -> Self {
        Self {
            hook,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn as_ptr(self) -> Option<NonNull<ForwardListHook>> {
        self.hook
    }

    /// Returns `true` for `end()` and default-constructed cursors.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.hook.is_none()
    }

    /// Returns the element under the cursor.
    ///
    /// # Safety
    ///
    /// The cursor must point at a linked element: not `before_begin`, not
    /// `end`.
    #[inline]
    pub unsafe fn get(&self) -> &'a A::Value {
        intrusive_assert!(self.hook.is_some());
        unsafe { container_of::<A>(self.hook.unwrap_unchecked()).as_ref() }
    }

    /// Steps to the following position. A null cursor stays null.
    ///
    /// # Safety
    ///
    /// A non-null cursor must point at a live hook.
    #[inline]
    pub unsafe fn move_next(&mut self) {
        if let Some(hook) = self.hook {
            self.hook = unsafe { hook.as_ref() }.next();
        }
    }

    /// Returns the following position.
    ///
    /// # Safety
    ///
    /// Same as [`move_next`](Self::move_next).
    #[inline]
    pub unsafe fn next(self) -> Self {
        let mut cursor = self;
        unsafe { cursor.move_next() };
        cursor
    }

    /// Returns the position `n` steps ahead.
    ///
    /// # Safety
    ///
    /// Every position passed through must be a live hook.
    pub unsafe fn advance(self, n: usize) -> Self {
        let mut cursor = self;
        for _ in 0..n {
            unsafe { cursor.move_next() };
        }
        cursor
    }

    /// Hints the following hook into cache.
    ///
    /// # Safety
    ///
    /// A non-null cursor must point at a live hook.
    #[inline]
    pub unsafe fn prefetch_next(&self) {
        if let Some(hook) = self.hook {
            let next = unsafe { hook.as_ref() }.next();
            hint::prefetch(next.map_or(ptr::null(), |next| next.as_ptr().cast_const()));
        }
    }
}

impl<A> Clone for ForwardListCursor<'_, A>
where
    A: Adapter<Hook = ForwardListHook>,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for ForwardListCursor<'_, A> where A: Adapter<Hook = ForwardListHook> {}

impl<A> PartialEq for ForwardListCursor<'_, A>
where
    A: Adapter<Hook = ForwardListHook>,
{
    fn eq(&self, other: &Self) -> bool {
        self.hook == other.hook
    }
}

impl<A> Eq for ForwardListCursor<'_, A> where A: Adapter<Hook = ForwardListHook> {}

impl<A> Default for ForwardListCursor<'_, A>
where
    A: Adapter<Hook = ForwardListHook>,
{
    fn default() -> Self {
        Self::from_ptr(None)
    }
}

impl<A> fmt::Debug for ForwardListCursor<'_, A>
where
    A: Adapter<Hook = ForwardListHook>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ForwardListCursor").field(&self.hook).finish()
    }
}

impl<'a, A> LinkCursor for ForwardListCursor<'a, A>
where
    A: Adapter<Hook = ForwardListHook>,
{
    type Item = &'a A::Value;

    #[inline]
    unsafe fn get(&self) -> Self::Item {
        unsafe { ForwardListCursor::get(self) }
    }

    #[inline]
    unsafe fn move_next(&mut self) {
        unsafe { ForwardListCursor::move_next(self) }
    }

    #[inline]
    unsafe fn prefetch_next(&self) {
        unsafe { ForwardListCursor::prefetch_next(self) }
    }
}

/// The elements in `[front, back)` of a forward list.
pub struct ForwardListRange<'a, A>
where
    A: Adapter<Hook = ForwardListHook>,
{
    front: ForwardListCursor<'a, A>,
    back: ForwardListCursor<'a, A>,
}

impl<'a, A> ForwardListRange<'a, A>
where
    A: Adapter<Hook = ForwardListHook>,
{
    /// Creates an iterator over `[first, last)`.
    ///
    /// # Safety
    ///
    /// `last` must be reachable from `first`, every element in between must
    /// stay linked while the range is iterated, and `first` must not be
    /// `before_begin`.
    pub unsafe fn new(first: ForwardListCursor<'a, A>, last: ForwardListCursor<'a, A>) -> Self {
        Self { front: first, back: last }
    }
}

impl<'a, A> Iterator for ForwardListRange<'a, A>
where
    A: Adapter<Hook = ForwardListHook>,
{
    type Item = &'a A::Value;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        // SAFETY: `front` is strictly before `back`, so it is an element.
        unsafe {
            let value = self.front.get();
            self.front.move_next();
            Some(value)
        }
    }
}

impl<A> FusedIterator for ForwardListRange<'_, A> where A: Adapter<Hook = ForwardListHook> {}

/// An iterator over a borrowed [`ForwardList`](super::forward_list::ForwardList).
pub struct ForwardListIter<'a, A>
where
    A: Adapter<Hook = ForwardListHook>,
{
    range: ForwardListRange<'a, A>,
}

impl<'a, A> ForwardListIter<'a, A>
where
    A: Adapter<Hook = ForwardListHook>,
{
    pub(crate) fn new(range: ForwardListRange<'a, A>) -> Self {
        Self { range }
    }
}

impl<'a, A> Iterator for ForwardListIter<'a, A>
where
    A: Adapter<Hook = ForwardListHook>,
{
    type Item = &'a A::Value;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.range.next()
    }
}

impl<A> FusedIterator for ForwardListIter<'_, A> where A: Adapter<Hook = ForwardListHook> {}

/// A position in a [`List`](super::list::List).
///
/// Either an element or the list's sentinel, which is both `end()` and the
/// position before `begin()`.
pub struct ListCursor<'a, A>
where
    A: Adapter<Hook = ListHook>,
{
    hook: *mut ListHook,
    _marker: PhantomData<&'a A::Value>,
}

impl<'a, A> ListCursor<'a, A>
where
    A: Adapter<Hook = ListHook>,
{
    #[inline]
    pub(crate) fn from_ptr(hook: *mut ListHook) -> Self {
        Self {
            hook,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub(crate) fn as_ptr(self) -> *mut ListHook {
        self.hook
    }

    /// Returns `true` for default-constructed cursors.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.hook.is_null()
    }

    /// Returns the element under the cursor.
    ///
    /// # Safety
    ///
    /// The cursor must point at a linked element, not at the sentinel.
    #[inline]
    pub unsafe fn get(&self) -> &'a A::Value {
        intrusive_assert!(!self.hook.is_null());
        unsafe { container_of::<A>(NonNull::new_unchecked(self.hook)).as_ref() }
    }

    /// Steps to the following position. A null cursor stays null.
    ///
    /// # Safety
    ///
    /// A non-null cursor must point at a live hook.
    #[inline]
    pub unsafe fn move_next(&mut self) {
        if let Some(hook) = unsafe { self.hook.as_ref() } {
            self.hook = hook.next();
        }
    }

    /// Steps to the preceding position. A null cursor stays null.
    ///
    /// # Safety
    ///
    /// A non-null cursor must point at a live hook.
    #[inline]
    pub unsafe fn move_prev(&mut self) {
        if let Some(hook) = unsafe { self.hook.as_ref() } {
            self.hook = hook.prev();
        }
    }

    /// Returns the following position.
    ///
    /// # Safety
    ///
    /// Same as [`move_next`](Self::move_next).
    #[inline]
    pub unsafe fn next(self) -> Self {
        let mut cursor = self;
        unsafe { cursor.move_next() };
        cursor
    }

    /// Returns the preceding position.
    ///
    /// # Safety
    ///
    /// Same as [`move_prev`](Self::move_prev).
    #[inline]
    pub unsafe fn prev(self) -> Self {
        let mut cursor = self;
        unsafe { cursor.move_prev() };
        cursor
    }

    /// Returns the position `n` steps ahead.
    ///
    /// # Safety
    ///
    /// Every position passed through must be a live hook.
    pub unsafe fn advance(self, n: usize) -> Self {
        let mut cursor = self;
        for _ in 0..n {
            unsafe { cursor.move_next() };
        }
        cursor
    }

    /// Counts the steps from `self` to `last`.
    ///
    /// # Safety
    ///
    /// `last` must be reachable from `self` through live hooks.
    pub unsafe fn distance(self, last: Self) -> usize {
        let mut cursor = self;
        let mut n = 0;
        while cursor != last {
            unsafe { cursor.move_next() };
            n += 1;
        }
        n
    }

    /// Hints the following hook into cache.
    ///
    /// # Safety
    ///
    /// A non-null cursor must point at a live hook.
    #[inline]
    pub unsafe fn prefetch_next(&self) {
        if let Some(hook) = unsafe { self.hook.as_ref() } {
            hint::prefetch(hook.next().cast_const());
        }
    }

    /// Hints the preceding hook into cache.
    ///
    /// # Safety
    ///
    /// A non-null cursor must point at a live hook.
    #[inline]
    pub unsafe fn prefetch_prev(&self) {
        if let Some(hook) = unsafe { self.hook.as_ref() } {
            hint::prefetch(hook.prev().cast_const());
        }
    }
}

impl<A> Clone for ListCursor<'_, A>
where
    A: Adapter<Hook = ListHook>,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for ListCursor<'_, A> where A: Adapter<Hook = ListHook> {}

impl<A> PartialEq for ListCursor<'_, A>
where
    A: Adapter<Hook = ListHook>,
{
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.hook, other.hook)
    }
}

impl<A> Eq for ListCursor<'_, A> where A: Adapter<Hook = ListHook> {}

impl<A> Default for ListCursor<'_, A>
where
    A: Adapter<Hook = ListHook>,
{
    fn default() -> Self {
        Self::from_ptr(ptr::null_mut())
    }
}

impl<A> fmt::Debug for ListCursor<'_, A>
where
    A: Adapter<Hook = ListHook>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ListCursor").field(&self.hook).finish()
    }
}

impl<'a, A> LinkCursor for ListCursor<'a, A>
where
    A: Adapter<Hook = ListHook>,
{
    type Item = &'a A::Value;

    #[inline]
    unsafe fn get(&self) -> Self::Item {
        unsafe { ListCursor::get(self) }
    }

    #[inline]
    unsafe fn move_next(&mut self) {
        unsafe { ListCursor::move_next(self) }
    }

    #[inline]
    unsafe fn prefetch_next(&self) {
        unsafe { ListCursor::prefetch_next(self) }
    }
}

impl<A> BidirectionalCursor for ListCursor<'_, A>
where
    A: Adapter<Hook = ListHook>,
{
    #[inline]
    unsafe fn move_prev(&mut self) {
        unsafe { ListCursor::move_prev(self) }
    }

    #[inline]
    unsafe fn prefetch_prev(&self) {
        unsafe { ListCursor::prefetch_prev(self) }
    }
}

/// A [`ListCursor`] walking backwards.
///
/// It wraps a base cursor and refers to the element just before it, so
/// `rbegin()` wraps `end()` and `rend()` wraps `begin()`.
pub struct ListReverseCursor<'a, A>
where
    A: Adapter<Hook = ListHook>,
{
    base: ListCursor<'a, A>,
}

impl<'a, A> ListReverseCursor<'a, A>
where
    A: Adapter<Hook = ListHook>,
{
    /// Creates a reverse cursor referring to the element before `base`.
    #[inline]
    pub fn new(base: ListCursor<'a, A>) -> Self {
        Self { base }
    }

    /// Returns the wrapped forward cursor.
    #[inline]
    pub fn base(self) -> ListCursor<'a, A> {
        self.base
    }

    /// Returns the element before the base.
    ///
    /// # Safety
    ///
    /// The base's predecessor must be a linked element.
    #[inline]
    pub unsafe fn get(&self) -> &'a A::Value {
        unsafe { self.base.prev().get() }
    }

    /// Steps towards the front of the list.
    ///
    /// # Safety
    ///
    /// The base must point at a live hook.
    #[inline]
    pub unsafe fn move_next(&mut self) {
        unsafe { self.base.move_prev() }
    }

    /// Steps towards the back of the list.
    ///
    /// # Safety
    ///
    /// The base must point at a live hook.
    #[inline]
    pub unsafe fn move_prev(&mut self) {
        unsafe { self.base.move_next() }
    }
}

impl<A> Clone for ListReverseCursor<'_, A>
where
    A: Adapter<Hook = ListHook>,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for ListReverseCursor<'_, A> where A: Adapter<Hook = ListHook> {}

impl<A> PartialEq for ListReverseCursor<'_, A>
where
    A: Adapter<Hook = ListHook>,
{
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
    }
}

impl<A> Eq for ListReverseCursor<'_, A> where A: Adapter<Hook = ListHook> {}

impl<A> Default for ListReverseCursor<'_, A>
where
    A: Adapter<Hook = ListHook>,
{
    fn default() -> Self {
        Self::new(ListCursor::default())
    }
}

impl<A> fmt::Debug for ListReverseCursor<'_, A>
where
    A: Adapter<Hook = ListHook>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ListReverseCursor").field(&self.base).finish()
    }
}

impl<'a, A> LinkCursor for ListReverseCursor<'a, A>
where
    A: Adapter<Hook = ListHook>,
{
    type Item = &'a A::Value;

    #[inline]
    unsafe fn get(&self) -> Self::Item {
        unsafe { ListReverseCursor::get(self) }
    }

    #[inline]
    unsafe fn move_next(&mut self) {
        unsafe { ListReverseCursor::move_next(self) }
    }

    #[inline]
    unsafe fn prefetch_next(&self) {
        // The element after the current one in reverse order sits two hooks
        // before the base.
        unsafe { self.base.prev().prefetch_prev() }
    }
}

impl<A> BidirectionalCursor for ListReverseCursor<'_, A>
where
    A: Adapter<Hook = ListHook>,
{
    #[inline]
    unsafe fn move_prev(&mut self) {
        unsafe { ListReverseCursor::move_prev(self) }
    }

    #[inline]
    unsafe fn prefetch_prev(&self) {
        hint::prefetch(self.base.as_ptr().cast_const());
    }
}

/// The elements in `[front, back)` of a list, walkable from either end.
pub struct ListRange<'a, A>
where
    A: Adapter<Hook = ListHook>,
{
    front: ListCursor<'a, A>,
    back: ListCursor<'a, A>,
}

impl<'a, A> ListRange<'a, A>
where
    A: Adapter<Hook = ListHook>,
{
    /// Creates an iterator over `[first, last)`.
    ///
    /// # Safety
    ///
    /// `last` must be reachable from `first` and every element in between
    /// must stay linked while the range is iterated.
    pub unsafe fn new(first: ListCursor<'a, A>, last: ListCursor<'a, A>) -> Self {
        Self { front: first, back: last }
    }
}

impl<'a, A> Iterator for ListRange<'a, A>
where
    A: Adapter<Hook = ListHook>,
{
    type Item = &'a A::Value;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        // SAFETY: `front` is strictly before `back`, so it is an element.
        unsafe {
            let value = self.front.get();
            self.front.move_next();
            Some(value)
        }
    }
}

impl<A> DoubleEndedIterator for ListRange<'_, A>
where
    A: Adapter<Hook = ListHook>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        // SAFETY: `back` is strictly after `front`, so its predecessor is an
        // element.
        unsafe {
            self.back.move_prev();
            Some(self.back.get())
        }
    }
}

impl<A> FusedIterator for ListRange<'_, A> where A: Adapter<Hook = ListHook> {}

/// An iterator over a borrowed [`List`](super::list::List).
pub struct ListIter<'a, A>
where
    A: Adapter<Hook = ListHook>,
{
    range: ListRange<'a, A>,
    len: usize,
}

impl<'a, A> ListIter<'a, A>
where
    A: Adapter<Hook = ListHook>,
{
    pub(crate) fn new(range: ListRange<'a, A>, len: usize) -> Self {
        Self { range, len }
    }
}

impl<'a, A> Iterator for ListIter<'a, A>
where
    A: Adapter<Hook = ListHook>,
{
    type Item = &'a A::Value;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.range.next().inspect(|_| self.len -= 1)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<A> DoubleEndedIterator for ListIter<'_, A>
where
    A: Adapter<Hook = ListHook>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.range.next_back().inspect(|_| self.len -= 1)
    }
}

impl<A> ExactSizeIterator for ListIter<'_, A> where A: Adapter<Hook = ListHook> {}

impl<A> FusedIterator for ListIter<'_, A> where A: Adapter<Hook = ListHook> {}
