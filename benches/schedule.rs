//! Schedule computation benchmarks.
//!
//! Measures the pure ordering step and the full pending-set read through the
//! in-memory store, plus the completion cascade over a wide fan-in.

#![allow(missing_docs)]

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use taskbrain::{
    order_schedule, FactStore, InMemoryFactStore, SchedulerService, Task, TaskPriority,
};

const PRIORITIES: [&str; 4] = ["High", "Medium", "Low", "Someday"];

fn make_tasks(count: usize) -> Vec<Task> {
    (0..count)
        .map(|i| {
            Task::new(format!("task-{i}"), format!("Task {i}"))
                .with_priority(TaskPriority::parse(PRIORITIES[i % PRIORITIES.len()]))
                .with_deadline(format!("2024-{:02}-{:02}", i % 12 + 1, i % 28 + 1))
        })
        .collect()
}

fn bench_order_schedule(c: &mut Criterion) {
    let mut group = c.benchmark_group("schedule/order");

    for count in [10usize, 100, 1_000, 10_000] {
        let tasks = make_tasks(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &tasks, |b, tasks| {
            b.iter_batched(
                || tasks.clone(),
                |tasks| order_schedule(black_box(tasks)),
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_full_schedule(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("schedule/full_schedule");

    for count in [100usize, 1_000] {
        let store = Arc::new(InMemoryFactStore::new());
        rt.block_on(async {
            for task in make_tasks(count) {
                store.insert(&task).await.unwrap();
            }
        });
        let service = SchedulerService::new(store);

        group.bench_with_input(BenchmarkId::from_parameter(count), &service, |b, service| {
            b.to_async(&rt).iter(|| async { service.full_schedule().await.unwrap() });
        });
    }

    group.finish();
}

fn bench_completion_cascade(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("schedule/complete_cascade");

    for dependents in [10usize, 100, 500] {
        group.bench_with_input(BenchmarkId::from_parameter(dependents), &dependents, |b, &dependents| {
            b.iter_batched(
                || {
                    let store = Arc::new(InMemoryFactStore::new());
                    rt.block_on(async {
                        store.insert(&Task::new("root", "Root")).await.unwrap();
                        for task in make_tasks(dependents) {
                            store.insert(&task.with_dependency("root")).await.unwrap();
                        }
                    });
                    SchedulerService::new(store)
                },
                |service| rt.block_on(async { service.complete_task(Some("root")).await.unwrap() }),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_order_schedule,
    bench_full_schedule,
    bench_completion_cascade
);
criterion_main!(benches);
