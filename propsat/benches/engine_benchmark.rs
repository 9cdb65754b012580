use criterion::{criterion_group, criterion_main, Criterion};
use proptest::strategy::{Strategy, ValueTree};
use proptest::test_runner::TestRunner;

use propsat::dpll::{classical, naive as dpll_naive, watched};
use propsat::resolution::{naive as resolution_naive, optimized};
use propsat::trace::{Trace, TraceFormat};
use propsat::truth_table;
use propsat_formula::test::sat_formula;
use propsat_formula::CnfFormula;

fn sample_formula() -> CnfFormula {
    let strategy = sat_formula(10usize..=10, 20usize..=20, 0.3..=0.3, 0.5..=0.5);
    let mut runner = TestRunner::default();
    strategy.new_tree(&mut runner).unwrap().current()
}

fn bench_engines(c: &mut Criterion) {
    let formula = sample_formula();
    let mut group = c.benchmark_group("engines");

    group.bench_function("truth_table", |b| {
        b.iter(|| {
            let mut trace = Trace::new(TraceFormat::Plain, false);
            truth_table::solve(
                &formula,
                &truth_table::TruthTableConfig::default(),
                None,
                &mut trace,
            )
            .unwrap()
        })
    });

    group.bench_function("naive_dpll", |b| {
        b.iter(|| {
            let mut trace = Trace::new(TraceFormat::Plain, false);
            dpll_naive::solve(
                &formula,
                &dpll_naive::NaiveDpllConfig::default(),
                None,
                &mut trace,
            )
            .unwrap()
        })
    });

    group.bench_function("classical_dpll", |b| {
        b.iter(|| {
            let mut trace = Trace::new(TraceFormat::Plain, false);
            classical::solve(
                &formula,
                &classical::ClassicalDpllConfig::default(),
                None,
                &mut trace,
            )
            .unwrap()
        })
    });

    group.bench_function("watched_dpll", |b| {
        b.iter(|| {
            let mut trace = Trace::new(TraceFormat::Plain, false);
            watched::solve(
                &formula,
                &watched::WatchedDpllConfig::default(),
                None,
                &mut trace,
            )
            .unwrap()
        })
    });

    group.bench_function("naive_resolution", |b| {
        b.iter(|| {
            let mut trace = Trace::new(TraceFormat::Plain, false);
            resolution_naive::solve(
                &formula,
                &resolution_naive::NaiveResolutionConfig::default(),
                None,
                &mut trace,
            )
            .unwrap()
        })
    });

    group.bench_function("optimized_resolution", |b| {
        b.iter(|| {
            let mut trace = Trace::new(TraceFormat::Plain, false);
            optimized::solve(
                &formula,
                &optimized::OptimizedResolutionConfig::default(),
                None,
                &mut trace,
            )
            .unwrap()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_engines);
criterion_main!(benches);
