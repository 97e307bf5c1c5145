use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use quotient_filter::QuotientFilter;

fn bench_insert(c: &mut Criterion) {
    let mut initial_items = 0u64;
    while initial_items < 1024 - 32 {
        c.bench_function(&format!("bench insert {}", initial_items), |b| {
            b.iter_batched_ref(
                || {
                    let mut filter = QuotientFilter::with_capacity(1024, 0.01).unwrap();
                    for i in 0..initial_items {
                        filter.insert(i);
                    }
                    filter
                },
                |filter| filter.insert(0xDEAD_BEEF),
                BatchSize::PerIteration,
            )
        });
        initial_items += 32;
    }
}

fn bench_may_contain(c: &mut Criterion) {
    c.bench_function("bench may_contain", |b| {
        b.iter_batched_ref(
            || {
                let mut filter = QuotientFilter::with_capacity(1024, 0.01).unwrap();
                for i in 0..512u64 {
                    filter.insert(i);
                }
                filter
            },
            |filter| filter.may_contain(0xDEAD_BEEF),
            BatchSize::PerIteration,
        )
    });
}

criterion_group!(benches, bench_insert, bench_may_contain);
criterion_main!(benches);
