//! Delivery and teardown benchmarks for lifetime-bound bindings.
//!
//! - Fan-out: one subject driving N bound owners
//! - Teardown: dropping an owner that holds N bindings
//! - Combinator overhead: map + filter between producer and sink
//!
//! Run with: cargo bench -p ftui-bind --bench binding_bench

use std::cell::Cell;
use std::hint::black_box;
use std::rc::Rc;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use ftui_bind::{BindingOwner, BindingSink, Bindings, PublisherExt, Subject};

struct Gauge {
    value: Cell<u64>,
    bindings: Bindings,
}

impl BindingOwner for Gauge {
    fn bindings(&self) -> &Bindings {
        &self.bindings
    }
}

fn gauge() -> Rc<Gauge> {
    Rc::new(Gauge {
        value: Cell::new(0),
        bindings: Bindings::new(),
    })
}

fn value_sink(g: &Rc<Gauge>) -> BindingSink<Gauge, u64> {
    BindingSink::new(g, |g: &Gauge, v: &u64| g.value.set(*v))
}

fn bench_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("bind/fan_out");
    for owners in [1usize, 16, 256] {
        let subject = Subject::new();
        let gauges: Vec<_> = (0..owners).map(|_| gauge()).collect();
        for g in &gauges {
            let _ = value_sink(g) << &subject;
        }
        group.bench_with_input(BenchmarkId::from_parameter(owners), &owners, |b, _| {
            let mut n = 0u64;
            b.iter(|| {
                n += 1;
                subject.send(black_box(n));
            });
        });
    }
    group.finish();
}

fn bench_teardown(c: &mut Criterion) {
    let mut group = c.benchmark_group("bind/teardown");
    for bindings in [1usize, 32, 512] {
        group.bench_with_input(
            BenchmarkId::from_parameter(bindings),
            &bindings,
            |b, &bindings| {
                b.iter_batched(
                    || {
                        let subject = Subject::new();
                        let g = gauge();
                        for _ in 0..bindings {
                            let _ = value_sink(&g) << &subject;
                        }
                        (subject, g)
                    },
                    |(subject, g)| {
                        drop(g);
                        subject
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }
    group.finish();
}

fn bench_combinators(c: &mut Criterion) {
    let subject = Subject::new();
    let g = gauge();
    let _ = value_sink(&g) << subject.clone().filter(|v: &u64| v % 2 == 0).map(|v| v / 2);

    c.bench_function("bind/map_filter", |b| {
        let mut n = 0u64;
        b.iter(|| {
            n += 1;
            subject.send(black_box(n));
        });
    });
}

criterion_group!(benches, bench_fan_out, bench_teardown, bench_combinators);
criterion_main!(benches);
