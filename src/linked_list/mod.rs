//! An intrusive linked list implementation.
//!
//! In an intrusive linked list, the links are stored directly in the values
//! being linked. A value opts in by embedding a hook field
//! ([`ListHook`](intrusive::double::ListHook) or
//! [`ForwardListHook`](intrusive::single::ForwardListHook)) and naming it with
//! `#[hook(...)]`; the generated adapter type tells a container where the hook
//! lives. This is in contrast to a non-intrusive linked list, where the nodes
//! are allocated separately from the data.
//!
//! # Examples
//!
//! ```
//! use hooklist::Hooks;
//! use hooklist::linked_list::intrusive::{double::ListHook, list::List};
//!
//! #[derive(Hooks)]
//! struct Task {
//!     id: u32,
//!     #[hook(TaskLink)]
//!     link: ListHook,
//! }
//!
//! let tasks: Vec<Task> = (0..3)
//!     .map(|id| Task { id, link: ListHook::new() })
//!     .collect();
//!
//! let mut list = List::<TaskLink>::new();
//! for task in &tasks {
//!     // SAFETY: each task joins exactly one list through `link`.
//!     unsafe { list.push_front(task) };
//! }
//!
//! assert_eq!(list.len(), 3);
//! let ids: Vec<u32> = list.iter().map(|task| task.id).collect();
//! assert_eq!(ids, vec![2, 1, 0]);
//!
//! assert_eq!(list.pop_back().map(|task| task.id), Some(0));
//! assert_eq!(list.back().map(|task| task.id), Some(1));
//! ```
pub mod intrusive;
