use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hooklist::Hooks;
use hooklist::linked_list::intrusive::{
    algo::{self, NO_PREFETCH, PREFETCH},
    double::ListHook,
    forward_list::ForwardList,
    list::List,
    single::ForwardListHook,
};
use rand::seq::SliceRandom;
use std::hint::black_box;

const SIZES: [usize; 3] = [10, 10_000, 1_000_000];

#[derive(Default, Hooks)]
struct Object {
    #[hook(ObjectLink)]
    link: ListHook,
    #[hook(ObjectForwardLink)]
    forward: ForwardListHook,
    value: u64,
}

// Memory layout the list walks through
#[derive(Clone, Copy)]
enum DataSet {
    Sequential,
    Reversed,
    Random,
}

impl DataSet {
    const ALL: [DataSet; 3] = [DataSet::Sequential, DataSet::Reversed, DataSet::Random];

    fn name(self) -> &'static str {
        match self {
            DataSet::Sequential => "sequential",
            DataSet::Reversed => "reversed",
            DataSet::Random => "random",
        }
    }

    /// Returns the objects and the order in which to link them.
    fn build(self, n: usize) -> (Vec<Object>, Vec<usize>) {
        let objects: Vec<Object> = (0..n as u64)
            .map(|value| Object {
                value,
                ..Default::default()
            })
            .collect();
        let mut order: Vec<usize> = (0..n).collect();
        match self {
            DataSet::Sequential => {}
            DataSet::Reversed => order.reverse(),
            DataSet::Random => order.shuffle(&mut rand::rng()),
        }
        (objects, order)
    }
}

fn linked<'a>(objects: &'a [Object], order: &[usize]) -> List<'a, ObjectLink> {
    let mut list = List::new();
    for &i in order {
        unsafe { list.push_back(&objects[i]) };
    }
    list
}

fn for_each_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_for_each");
    for data_set in DataSet::ALL {
        for n in SIZES {
            let (objects, order) = data_set.build(n);
            let list = linked(&objects, &order);
            group.throughput(Throughput::Elements(n as u64));

            let id = BenchmarkId::new(format!("{}_prefetch", data_set.name()), n);
            group.bench_with_input(id, &list, |b, list| {
                b.iter(|| {
                    list.for_each_with(PREFETCH, |o| {
                        black_box(o.value);
                    })
                })
            });
            let id = BenchmarkId::new(format!("{}_plain", data_set.name()), n);
            group.bench_with_input(id, &list, |b, list| {
                b.iter(|| {
                    list.for_each_with(NO_PREFETCH, |o| {
                        black_box(o.value);
                    })
                })
            });
        }
    }
    group.finish();
}

fn reverse_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_for_each_rev");
    for data_set in DataSet::ALL {
        for n in SIZES {
            let (objects, order) = data_set.build(n);
            let list = linked(&objects, &order);
            group.throughput(Throughput::Elements(n as u64));

            group.bench_with_input(BenchmarkId::new(data_set.name(), n), &list, |b, list| {
                b.iter(|| unsafe { algo::for_each(list.rbegin(), list.rend(), |o| {
                    black_box(o.value);
                }) })
            });
        }
    }
    group.finish();
}

fn iterator_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_any");
    for data_set in DataSet::ALL {
        for n in SIZES {
            let (objects, order) = data_set.build(n);
            let list = linked(&objects, &order);
            group.throughput(Throughput::Elements(n as u64));

            group.bench_with_input(BenchmarkId::new(data_set.name(), n), &list, |b, list| {
                b.iter(|| black_box(list.iter().any(|o| o.value == u64::MAX)))
            });
        }
    }
    group.finish();
}

fn transform_reduce_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_transform_reduce");
    for data_set in DataSet::ALL {
        for n in SIZES {
            let (objects, order) = data_set.build(n);
            let list = linked(&objects, &order);
            group.throughput(Throughput::Elements(n as u64));

            let id = BenchmarkId::new(format!("{}_two_ends", data_set.name()), n);
            group.bench_with_input(id, &list, |b, list| {
                b.iter(|| black_box(list.transform_reduce(0u64, u64::wrapping_add, |o| o.value)))
            });
            let id = BenchmarkId::new(format!("{}_fold", data_set.name()), n);
            group.bench_with_input(id, &list, |b, list| {
                b.iter(|| black_box(list.iter().fold(0u64, |acc, o| acc.wrapping_add(o.value))))
            });
        }
    }
    group.finish();
}

fn forward_list_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("forward_list_for_each");
    for data_set in DataSet::ALL {
        for n in SIZES {
            let (objects, order) = data_set.build(n);
            let mut list = ForwardList::<ObjectForwardLink>::new();
            for &i in order.iter().rev() {
                unsafe { list.push_front(&objects[i]) };
            }
            group.throughput(Throughput::Elements(n as u64));

            group.bench_with_input(BenchmarkId::new(data_set.name(), n), &list, |b, list| {
                b.iter(|| list.for_each(|o| {
                    black_box(o.value);
                }))
            });
        }
    }
    group.finish();
}

criterion_group!(
    benches,
    for_each_benchmark,
    reverse_benchmark,
    iterator_benchmark,
    transform_reduce_benchmark,
    forward_list_benchmark
);
criterion_main!(benches);
