//! # Intrusive Linked List
//!
//! This module provides intrusive singly and doubly linked lists.
//!
//! ## Core Components
//!
//! - [`traits`]: the [`Adapter`](traits::Adapter) contract that maps a hook back
//!   to the value embedding it, and the cursor traits used by [`algo`].
//! - [`single::ForwardListHook`] and [`double::ListHook`]: hooks embedded in
//!   user structs.
//! - [`forward_list::ForwardList`]: a null-terminated singly linked list.
//! - [`list::List`]: a sentinel-based circular doubly linked list with a
//!   maintained length.
//! - [`iter`]: C++-style cursors and Rust iterators over both containers.
//! - [`algo`]: traversal algorithms with optional prefetching.
//!
//! ## Safety
//!
//! The containers never own their elements. Operations that link values or
//! take cursors are `unsafe`, and the caller is responsible for:
//!
//! - Values outliving the lifetime `'a` of the list they are linked into.
//! - A hook being linked into at most one list at a time.
//! - Cursors passed to a list pointing into that same list.
//!
//! Debug builds check the cheap preconditions and panic on violation. Release
//! builds assume them.

mod hint;

pub mod algo;
pub mod double;
pub mod forward_list;
pub mod iter;
pub mod list;
pub mod single;
pub mod traits;

#[cfg(test)]
mod tests;
