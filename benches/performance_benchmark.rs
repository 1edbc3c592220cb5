use chrono::{Duration, Utc};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::Rng;
use taskview::domain::filters::TaskFilters;
use taskview::domain::task::{Priority, Task};
use taskview::services::selectors::{due_soon, filter_tasks, task_stats};

fn create_random_task(i: usize) -> Task {
    let mut rng = rand::thread_rng();
    let now = Utc::now();

    let mut task = Task::new("bench-user".to_string(), format!("Task {}", i));
    task.priority = match rng.gen_range(0..3) {
        0 => Priority::Low,
        1 => Priority::Medium,
        _ => Priority::High,
    };
    task.category_id = match rng.gen_range(0..4) {
        0 => None,
        n => Some(format!("category-{}", n)),
    };
    task.description = rng
        .gen_bool(0.5)
        .then(|| format!("Description for task {}", i));
    task.tags = (0..rng.gen_range(0..4)).map(|t| format!("tag{}", t)).collect();
    if rng.gen_bool(0.6) {
        task.due_date = Some(now + Duration::hours(rng.gen_range(-240..480)));
    }
    if rng.gen_bool(0.4) {
        task.set_completed(true, now - Duration::hours(rng.gen_range(0..400)));
    }
    task
}

fn create_tasks(count: usize) -> Vec<Task> {
    (0..count).map(create_random_task).collect()
}

fn bench_task_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("task_stats");

    for size in [100, 1_000, 10_000] {
        let tasks = create_tasks(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &tasks, |b, tasks| {
            b.iter(|| task_stats(black_box(tasks)))
        });
    }

    group.finish();
}

fn bench_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_tasks");
    let tasks = create_tasks(10_000);

    let search = TaskFilters {
        search: Some("TAG2".to_string()),
        ..Default::default()
    };
    group.bench_function("search", |b| {
        b.iter(|| filter_tasks(black_box(&tasks), black_box(&search)))
    });

    let pending_high = TaskFilters {
        priority: Some(Priority::High),
        is_completed: Some(false),
        ..Default::default()
    };
    group.bench_function("pending_high", |b| {
        b.iter(|| filter_tasks(black_box(&tasks), black_box(&pending_high)))
    });

    group.bench_function("due_soon_7", |b| b.iter(|| due_soon(black_box(&tasks), 7)));

    group.finish();
}

criterion_group!(benches, bench_task_stats, bench_filtering);
criterion_main!(benches);
