use core::ptr::NonNull;

/// Names one hook field of one value type.
///
/// An adapter is a zero-sized marker type handed to a container as a type
/// parameter. It plays the role a pointer-to-member plays in C++: the
/// container only ever holds pointers to hooks and uses [`OFFSET`] to get
/// back to the value that embeds them. Implementations are normally generated
/// with `#[derive(Hooks)]`.
///
/// # Safety
///
/// `OFFSET` must be the byte offset of a field of type `Hook` inside `Value`,
/// as reported by [`core::mem::offset_of!`].
///
/// [`OFFSET`]: Adapter::OFFSET
pub unsafe trait Adapter {
    /// The type embedding the hook.
    type Value;

    /// The hook type, [`ForwardListHook`](super::single::ForwardListHook) or
    /// [`ListHook`](super::double::ListHook).
    type Hook;

    /// Byte offset of the hook inside `Value`.
    const OFFSET: usize;
}

/// Returns a pointer to the hook `A` designates inside `value`.
///
/// The pointer is derived from the whole value, so [`container_of`] may walk
/// it back.
#[inline]
pub fn hook_ptr<A: Adapter>(value: &A::Value) -> NonNull<A::Hook> {
    let base = NonNull::from(value).cast::<u8>();
    // SAFETY: the adapter contract puts `OFFSET` inside `Value`.
    unsafe { base.add(A::OFFSET).cast() }
}

/// Returns a reference to the hook `A` designates inside `value`.
#[inline]
pub fn hook_of<A: Adapter>(value: &A::Value) -> &A::Hook {
    // SAFETY: `hook_ptr` points at a live field of `value`.
    unsafe { hook_ptr::<A>(value).as_ref() }
}

/// Recovers the value that embeds `hook`.
///
/// # Safety
///
/// `hook` must point at the `A`-designated field of a live `A::Value`, and
/// must carry the provenance of that value (as pointers from [`hook_ptr`]
/// do). Nothing here can check it.
#[inline]
pub unsafe fn container_of<A: Adapter>(hook: NonNull<A::Hook>) -> NonNull<A::Value> {
    // SAFETY: forwarded to the caller.
    unsafe { hook.cast::<u8>().sub(A::OFFSET).cast() }
}

/// A position in an intrusive list that can step forward.
///
/// Implemented by the cursor types in [`iter`](super::iter); the generic
/// algorithms in [`algo`](super::algo) work over any implementation.
pub trait LinkCursor: Copy + Eq {
    /// What dereferencing the cursor yields, usually `&'a Value`.
    type Item;

    /// Returns the element under the cursor.
    ///
    /// # Safety
    ///
    /// The cursor must point at a linked element, not at a sentinel, past the
    /// end, or at nothing.
    unsafe fn get(&self) -> Self::Item;

    /// Steps to the following position.
    ///
    /// # Safety
    ///
    /// The cursor must point at a live hook.
    unsafe fn move_next(&mut self);

    /// Hints that the following position is about to be visited.
    ///
    /// # Safety
    ///
    /// The cursor must point at a live hook.
    unsafe fn prefetch_next(&self);
}

/// A cursor that can also step backwards.
pub trait BidirectionalCursor: LinkCursor {
    /// Steps to the preceding position.
    ///
    /// # Safety
    ///
    /// The cursor must point at a live hook.
    unsafe fn move_prev(&mut self);

    /// Hints that the preceding position is about to be visited.
    ///
    /// # Safety
    ///
    /// The cursor must point at a live hook.
    unsafe fn prefetch_prev(&self);
}
