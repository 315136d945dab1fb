//! Traversal algorithms over cursor ranges.
//!
//! These work on any [`LinkCursor`] pair, so they apply to forward lists,
//! lists and reversed lists alike. The containers wrap them in safe methods
//! over their whole contents.

use super::traits::{BidirectionalCursor, LinkCursor};

/// Selects whether a traversal issues prefetch hints.
///
/// Prefetching never changes which elements are visited or in what order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Prefetch<const ENABLED: bool>;

/// Prefetch the next node before visiting the current one.
pub const PREFETCH: Prefetch<true> = Prefetch;

/// Plain pointer chasing.
pub const NO_PREFETCH: Prefetch<false> = Prefetch;

/// Calls `f` on every element of `[first, last)` in order.
///
/// # Safety
///
/// `last` must be reachable from `first`, every position before `last` must
/// be a linked element, and `f` must not unlink elements of the range.
pub unsafe fn for_each_with<const P: bool, C, F>(_: Prefetch<P>, mut first: C, last: C, mut f: F)
where
    C: LinkCursor,
    F: FnMut(C::Item),
{
    while first != last {
        unsafe {
            if P {
                first.prefetch_next();
            }
            let item = first.get();
            first.move_next();
            f(item);
        }
    }
}

/// [`for_each_with`] with prefetching enabled.
///
/// # Safety
///
/// Same as [`for_each_with`].
#[inline]
pub unsafe fn for_each<C, F>(first: C, last: C, f: F)
where
    C: LinkCursor,
    F: FnMut(C::Item),
{
    unsafe { for_each_with(PREFETCH, first, last, f) }
}

/// Transforms every element of `[first, last)` and folds the results,
/// walking in from both ends at once.
///
/// Two accumulators are kept. The front one starts at `init` and takes
/// elements from the front as `reduce(acc, x)`; the back one starts at the
/// last element and takes elements from the back as `reduce(x, acc)`. The
/// result is `reduce(front, back)`, so for an associative `reduce` it equals
/// a left fold from `init`, even if `reduce` is not commutative. An empty
/// range yields `init`.
///
/// # Safety
///
/// Same as [`for_each_with`]; additionally every position in the range must
/// be able to step backwards.
pub unsafe fn transform_reduce_with<const P: bool, C, T, R, F>(
    _: Prefetch<P>,
    mut first: C,
    mut last: C,
    init: T,
    mut reduce: R,
    mut transform: F,
) -> T
where
    C: BidirectionalCursor,
    R: FnMut(T, T) -> T,
    F: FnMut(C::Item) -> T,
{
    let mut front = init;
    let mut back = None;
    while first != last {
        unsafe {
            if P {
                first.prefetch_next();
            }
            front = reduce(front, transform(first.get()));
            first.move_next();
            if first == last {
                break;
            }

            if P {
                last.prefetch_prev();
            }
            last.move_prev();
            let x = transform(last.get());
            back = Some(match back {
                Some(acc) => reduce(x, acc),
                None => x,
            });
        }
    }
    match back {
        Some(back) => reduce(front, back),
        None => front,
    }
}

/// [`transform_reduce_with`] with prefetching enabled.
///
/// # Safety
///
/// Same as [`transform_reduce_with`].
#[inline]
pub unsafe fn transform_reduce<C, T, R, F>(first: C, last: C, init: T, reduce: R, transform: F) -> T
where
    C: BidirectionalCursor,
    R: FnMut(T, T) -> T,
    F: FnMut(C::Item) -> T,
{
    unsafe { transform_reduce_with(PREFETCH, first, last, init, reduce, transform) }
}
