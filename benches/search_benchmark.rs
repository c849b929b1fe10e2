use std::sync::Arc;

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use vacation_finder::{
    generator::generate_records, Candidates, CombinationSearch, FinderConfig, FlightCatalog,
    VacationFinder,
};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn catalog(rows: usize) -> FlightCatalog {
    let mut rng = StdRng::seed_from_u64(42);
    FlightCatalog::from_records(generate_records(&mut rng, rows))
}

// Inner loop only: one destination, growing number of travelers
pub fn combination_benchmark(c: &mut Criterion) {
    let catalog = catalog(100_000);
    let search = CombinationSearch::default();
    let all_origins = ["Paris", "London", "Tokyo", "Dubai", "Berlin"];
    let mut group = c.benchmark_group("cheapest_combination");

    for travelers in 1..=all_origins.len() {
        let origins: Vec<String> = all_origins[..travelers]
            .iter()
            .map(|o| o.to_string())
            .collect();
        let candidates: Vec<Candidates> = origins
            .iter()
            .map(|o| Candidates::Flights(catalog.flights(o, "Rome")))
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(travelers),
            &candidates,
            |b, candidates| {
                b.iter(|| {
                    search
                        .find_cheapest_combination(&origins, black_box(start()), candidates)
                        .unwrap()
                })
            },
        );
    }

    group.finish();
}

// Full scan over the city list, sequential against threaded
pub fn vacation_benchmark(c: &mut Criterion) {
    let finder = VacationFinder::with_config(Arc::new(catalog(100_000)), &FinderConfig::default());
    let origins: Vec<String> = ["Paris", "London", "Tokyo"]
        .iter()
        .map(|o| o.to_string())
        .collect();
    let mut group = c.benchmark_group("cheapest_vacations");
    group.sample_size(10);

    for workers in [1, 4] {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &workers| {
            b.iter(|| {
                finder
                    .find_cheapest_vacations_parallel(&origins, start(), black_box(30), workers)
                    .unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, combination_benchmark, vacation_benchmark);
criterion_main!(benches);
