//! Precondition and cache hints shared by the containers.

/// Checks a precondition the caller of an `unsafe fn` promised to uphold.
///
/// Debug builds panic with the failed expression and its file and line.
/// Release builds pass the condition to the optimizer as an assumption, so a
/// violated precondition is undefined behaviour there. Only use this where the
/// enclosing function's safety contract covers `$cond`.
macro_rules! intrusive_assert {
    ($cond:expr $(,)?) => {
        if cfg!(debug_assertions) {
            assert!($cond);
        } else {
            #[allow(unused_unsafe)]
            // SAFETY: guaranteed by the enclosing function's contract.
            unsafe {
                ::core::hint::assert_unchecked($cond)
            };
        }
    };
}

pub(crate) use intrusive_assert;

/// Hints the CPU to pull the cache line at `ptr` into L1.
///
/// Never dereferences `ptr`; null and dangling pointers are fine.
#[inline(always)]
pub(crate) fn prefetch<T>(ptr: *const T) {
    #[cfg(target_arch = "x86_64")]
    {
        use core::arch::x86_64::{_MM_HINT_T0, _mm_prefetch};

        #[allow(unused_unsafe)]
        // SAFETY: prefetch is a hint and does not fault on any address.
        unsafe {
            _mm_prefetch::<_MM_HINT_T0>(ptr.cast::<i8>())
        };
    }
    #[cfg(not(target_arch = "x86_64"))]
    let _ = ptr;
}
