use criterion::{black_box, criterion_group, criterion_main, Criterion};
use split_ledger::engine::LedgerEngine;
use split_ledger::simulation::generator::{generate_random_group, GroupConfig};

fn bench_settle_10_members(c: &mut Criterion) {
    let config = GroupConfig {
        member_count: 10,
        expense_count: 50,
        ..Default::default()
    };
    let (group, expenses) = generate_random_group(&config);
    let balances = LedgerEngine::compute_balances(&group, &expenses).unwrap();

    c.bench_function("settle_10_members", |b| {
        b.iter(|| LedgerEngine::compute_settlement_plan(black_box(&balances), group.currency()))
    });
}

fn bench_settle_100_members(c: &mut Criterion) {
    let config = GroupConfig {
        member_count: 100,
        expense_count: 500,
        ..Default::default()
    };
    let (group, expenses) = generate_random_group(&config);
    let balances = LedgerEngine::compute_balances(&group, &expenses).unwrap();

    c.bench_function("settle_100_members", |b| {
        b.iter(|| LedgerEngine::compute_settlement_plan(black_box(&balances), group.currency()))
    });
}

fn bench_settle_1000_members(c: &mut Criterion) {
    let config = GroupConfig {
        member_count: 1000,
        expense_count: 2000,
        ..Default::default()
    };
    let (group, expenses) = generate_random_group(&config);
    let balances = LedgerEngine::compute_balances(&group, &expenses).unwrap();

    c.bench_function("settle_1000_members", |b| {
        b.iter(|| LedgerEngine::compute_settlement_plan(black_box(&balances), group.currency()))
    });
}

fn bench_balances_1000_expenses(c: &mut Criterion) {
    let config = GroupConfig {
        member_count: 50,
        expense_count: 1000,
        ..Default::default()
    };
    let (group, expenses) = generate_random_group(&config);

    c.bench_function("balances_1000_expenses", |b| {
        b.iter(|| LedgerEngine::compute_balances(black_box(&group), black_box(&expenses)))
    });
}

criterion_group!(
    benches,
    bench_settle_10_members,
    bench_settle_100_members,
    bench_settle_1000_members,
    bench_balances_1000_expenses
);
criterion_main!(benches);
