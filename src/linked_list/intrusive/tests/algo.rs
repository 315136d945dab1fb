use std::{vec, vec::Vec};

use super::{ForwardLink, Link, objects, values};
use crate::linked_list::intrusive::{
    algo::{self, NO_PREFETCH, PREFETCH, Prefetch},
    forward_list::ForwardList,
    list::List,
};

fn histogram<const P: bool>(prefetch: Prefetch<P>) -> Vec<usize> {
    let fs = objects(0..16);
    let list = unsafe { List::<Link>::from_values(&fs) };
    let mut visited = vec![0; 16];
    let mut order = Vec::new();
    unsafe {
        algo::for_each_with(prefetch, list.begin(), list.end(), |o| {
            visited[o.value] += 1;
            order.push(o.value);
        });
    }
    assert!(visited.iter().all(|&n| n == 1));
    order
}

#[test]
fn test_for_each_prefetch_does_not_change_order() {
    let with = histogram(PREFETCH);
    let without = histogram(NO_PREFETCH);
    assert_eq!(with, (0..16).collect::<Vec<_>>());
    assert_eq!(with, without);
}

#[test]
fn test_for_each_defaults() {
    let fs = objects(0..16);
    let list = unsafe { List::<Link>::from_values(&fs) };
    let forward = unsafe { ForwardList::<ForwardLink>::from_values(&fs) };

    let mut order = Vec::new();
    unsafe { algo::for_each(list.begin(), list.end(), |o| order.push(o.value)) };
    assert_eq!(order, values(&fs));

    let mut order = Vec::new();
    unsafe { algo::for_each(forward.begin(), forward.end(), |o| order.push(o.value)) };
    assert_eq!(order, values(&fs));

    let mut sum = 0;
    list.for_each(|o| sum += o.value);
    assert_eq!(sum, 120);

    let mut order = Vec::new();
    list.for_each_with(NO_PREFETCH, |o| order.push(o.value));
    assert_eq!(order, values(&fs));
}

#[test]
fn test_for_each_sub_range_and_reverse() {
    let fs = objects(0..8);
    let list = unsafe { List::<Link>::from_values(&fs) };

    let mut order = Vec::new();
    unsafe {
        let first = list.begin().advance(2);
        let last = first.advance(3);
        algo::for_each(first, last, |o| order.push(o.value));
    }
    assert_eq!(order, vec![2, 3, 4]);

    let mut order = Vec::new();
    unsafe { algo::for_each(list.rbegin(), list.rend(), |o| order.push(o.value)) };
    assert_eq!(order, vec![7, 6, 5, 4, 3, 2, 1, 0]);

    let mut order = Vec::new();
    unsafe { algo::for_each(list.end(), list.end(), |o| order.push(o.value)) };
    assert!(order.is_empty());
}

#[test]
fn test_transform_reduce() {
    let fs = objects(0..16);
    let list = unsafe { List::<Link>::from_values(&fs) };

    let mut visited = [0; 16];
    let value = unsafe {
        algo::transform_reduce(list.begin(), list.end(), 4, |a, b| a + b, |o| {
            visited[o.value] += 1;
            o.value
        })
    };
    assert!(visited.iter().all(|&n| n == 1));
    assert_eq!(value, 124);

    for prefetch in [true, false] {
        let mut visited = [0; 16];
        let mut visit = |o: &super::Object| {
            visited[o.value] += 1;
            o.value
        };
        let value = if prefetch {
            list.transform_reduce_with(PREFETCH, 4, |a, b| a + b, &mut visit)
        } else {
            list.transform_reduce_with(NO_PREFETCH, 4, |a, b| a + b, &mut visit)
        };
        assert!(visited.iter().all(|&n| n == 1));
        assert_eq!(value, 124);
    }

    let value = list.transform_reduce(1u64, |a, b| a * b, |_| 2);
    assert_eq!(value, 65536);
}

#[test]
fn test_transform_reduce_keeps_association_order() {
    // Concatenation is associative but not commutative, so any reordering of
    // the operands shows up in the result.
    for n in 0..10 {
        let fs = objects(0..n);
        let list = unsafe { List::<Link>::from_values(&fs) };

        let concat = |mut a: Vec<usize>, b: Vec<usize>| {
            a.extend(b);
            a
        };
        let value = list.transform_reduce(vec![100], concat, |o| vec![o.value]);

        let mut expected = vec![100];
        expected.extend(0..n);
        assert_eq!(value, expected);

        let reversed = unsafe {
            algo::transform_reduce(list.rbegin(), list.rend(), Vec::new(), concat, |o| {
                vec![o.value]
            })
        };
        assert_eq!(reversed, (0..n).rev().collect::<Vec<_>>());
    }
}

#[test]
fn test_transform_reduce_empty() {
    let list = List::<Link>::new();
    let value = list.transform_reduce(7, |a, b| a + b, |o| o.value);
    assert_eq!(value, 7);
}
