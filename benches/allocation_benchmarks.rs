//! Performance benchmarks for the maintenance planner.
//!
//! Measures the allocator on 50, 200 and 1000 jobs over a one-year horizon,
//! and the `/schedule` endpoint end to end.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use maintenance_planner::api::{AppState, create_router};
use maintenance_planner::config::PlannerConfig;
use maintenance_planner::models::Job;
use maintenance_planner::scheduling::{
    Allocator, CapacityCalendar, annotate_days, days_between, duration_hours, run_schedule,
};

use axum::{body::Body, http::Request};
use chrono::NaiveDate;
use tower::ServiceExt;

/// Deterministic mix of small and large sites.
fn create_jobs(count: usize) -> Vec<Job> {
    (0..count)
        .map(|i| {
            let equipment = ((i * 37) % 60 + 1) as f64;
            Job::new(format!("site_{:04}", i), equipment, duration_hours(equipment), None)
        })
        .collect()
}

fn year_of_days() -> Vec<NaiveDate> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
    days_between(start, end).unwrap()
}

/// Benchmark: allocator alone, days already annotated.
fn bench_allocator(c: &mut Criterion) {
    let config = PlannerConfig::default();
    let calendar = CapacityCalendar::new(&config);
    let days = annotate_days(&calendar, &year_of_days());

    let mut group = c.benchmark_group("allocator");
    for job_count in [50, 200, 1000] {
        let jobs = create_jobs(job_count);
        group.throughput(Throughput::Elements(job_count as u64));
        group.bench_with_input(BenchmarkId::new("jobs", job_count), &jobs, |b, jobs| {
            b.iter(|| {
                let outcome = Allocator::new(config.small_job_threshold)
                    .allocate(black_box(jobs.clone()), black_box(&days));
                black_box(outcome)
            })
        });
    }
    group.finish();
}

/// Benchmark: monthly windows, twelve periods over the year.
fn bench_periods(c: &mut Criterion) {
    let config = PlannerConfig::default();
    let calendar = CapacityCalendar::new(&config);
    let day_range = year_of_days();

    let jobs: Vec<Job> = create_jobs(1000)
        .into_iter()
        .enumerate()
        .map(|(i, mut job)| {
            job.period = NaiveDate::from_ymd_opt(2025, (i % 12) as u32 + 1, 1);
            job
        })
        .collect();

    c.bench_function("periods_1000_jobs", |b| {
        b.iter(|| {
            let outcome = run_schedule(
                black_box(jobs.clone()),
                &calendar,
                &day_range,
                config.small_job_threshold,
            )
            .unwrap();
            black_box(outcome)
        })
    });
}

/// Benchmark: full HTTP round trip for 200 rows.
fn bench_schedule_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::default());

    let rows: Vec<serde_json::Value> = (0..200)
        .map(|i| serde_json::json!({"site": format!("site_{:03}", i), "equipment_count": (i * 7) % 40}))
        .collect();
    let body = serde_json::json!({
        "rows": rows,
        "start_date": "2025-01-01",
        "end_date": "2025-06-30"
    })
    .to_string();

    c.bench_function("schedule_endpoint_200_rows", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/schedule")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_allocator,
    bench_periods,
    bench_schedule_endpoint
);
criterion_main!(benches);
