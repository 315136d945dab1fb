//! Intrusive singly and doubly linked lists.
//!
//! Values carry their own links ("hooks") as ordinary fields, so joining a
//! list never allocates and one value can sit in several lists at once. See
//! [`linked_list::intrusive`] for the containers.

#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

pub mod linked_list;

pub use hooklist_derive::Hooks;
