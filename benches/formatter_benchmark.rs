use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use progress_tracker::models::{ContestResult, PlatformHistory, SubmissionResult};
use progress_tracker::services::formatter;

const HISTORY_LEN: u32 = 2000;

fn build_history() -> PlatformHistory {
    let contests = (0..HISTORY_LEN)
        .map(|id| ContestResult {
            name: format!("Weekly Contest {}", id),
            date: "2024-05-12".to_string(),
            rank: 1000.0 + id as f64,
            rating: 1500.0,
            solved: 3,
            contest_id: id.to_string(),
        })
        .collect();

    let submissions = (0..HISTORY_LEN)
        .map(|n| SubmissionResult {
            problem_url: format!("https://leetcode.com/problems/problem-{}", n),
            problem_name: format!("Problem {}", n),
            date: "2024-05-12T10:00:00Z".to_string(),
            language: "rust".to_string(),
            status: "Accepted".to_string(),
            code_url: format!("https://leetcode.com/submissions/detail/{}", n),
        })
        .collect();

    PlatformHistory {
        contests,
        submissions,
    }
}

fn benchmark_format_history(c: &mut Criterion) {
    let history = build_history();

    let mut group = c.benchmark_group("format_history");

    group.bench_function("full_history", |b| {
        b.iter(|| formatter::format_history(black_box(&history)))
    });

    group.bench_function("last_contest", |b| {
        let last = history.contests.last().cloned().unwrap_or_default();
        b.iter(|| formatter::format_last_contest(black_box(&last)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_format_history);
criterion_main!(benches);
