use core::ops::Range;

use std::vec::Vec;

use super::{double::ListHook, single::ForwardListHook};
use crate::Hooks;

mod algo;

/// Test element. `value` doubles as the identity checked by the tests.
#[derive(Debug, Default, Hooks)]
#[hooks(crate_path = "crate")]
struct Object {
    value: usize,
    #[hook(ForwardLink)]
    forward: ForwardListHook,
    #[hook(Link)]
    link: ListHook,
    #[hook(SecondLink)]
    second: ListHook,
}

fn objects(values: Range<usize>) -> Vec<Object> {
    values
        .map(|value| Object {
            value,
            ..Default::default()
        })
        .collect()
}

fn values<'a>(objects: impl IntoIterator<Item = &'a Object>) -> Vec<usize> {
    objects.into_iter().map(|object| object.value).collect()
}

fn addresses<'a>(objects: impl IntoIterator<Item = &'a Object>) -> Vec<*const Object> {
    objects.into_iter().map(|object| object as *const Object).collect()
}
