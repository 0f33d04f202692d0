use chrono::{Duration, NaiveDate};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use stockchart_view::core::{PeriodRecord, ProjectionCache, project_records};

fn generate_records(count: usize) -> Vec<PeriodRecord> {
    let base = NaiveDate::from_ymd_opt(1995, 1, 2).expect("base date");
    (0..count)
        .map(|i| {
            let date = base + Duration::days(i as i64);
            let open = 100.0 + (i % 50) as f64;
            let close = if i % 2 == 0 { open + 1.5 } else { open - 1.5 };
            let high = open.max(close) + 0.75;
            let low = open.min(close) - 0.75;
            PeriodRecord::new(date.format("%Y%m%d").to_string(), open, high, low, close, 10_000)
                .expect("valid generated record")
                .with_averages(Some(open), Some(close), None, None)
        })
        .collect()
}

fn bench_project_records_10k(c: &mut Criterion) {
    let records = generate_records(10_000);
    c.bench_function("project_records_10k", |b| {
        b.iter(|| {
            let series = project_records(black_box(&records)).expect("projection");
            black_box(series.candles.len())
        })
    });
}

fn bench_memoized_reprojection_10k(c: &mut Criterion) {
    let records = generate_records(10_000);
    let mut cache = ProjectionCache::new();
    cache.project(&records).expect("warm-up projection");

    c.bench_function("memoized_reprojection_10k", |b| {
        b.iter(|| {
            let series = cache.project(black_box(&records)).expect("projection");
            black_box(series.candles.len())
        })
    });
}

criterion_group!(
    benches,
    bench_project_records_10k,
    bench_memoized_reprojection_10k
);
criterion_main!(benches);
