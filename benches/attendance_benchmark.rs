use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use tss_tracker::models::{UploadEvent, User, UserRole};
use tss_tracker::services::attendance::{build_presence_index, monthly_attendance};

const ROSTER_SIZE: usize = 300;

fn roster() -> Vec<User> {
    (0..ROSTER_SIZE)
        .map(|i| User {
            id: format!("user-{}", i),
            full_name: Some(format!("User {}", i)),
            email: format!("user{}@example.com", i),
            role: UserRole::User,
        })
        .collect()
}

/// Roughly one upload per user per day, every third one crediting a co-worker.
fn uploads(month_start: NaiveDate) -> Vec<UploadEvent> {
    let mut events = Vec::new();
    for day in 0..31 {
        let date = month_start + Duration::days(day);
        for i in 0..ROSTER_SIZE {
            if (i + day as usize) % 5 == 0 {
                continue;
            }
            let mentioned_user_ids = if i % 3 == 0 {
                vec![format!("user-{}", (i + 1) % ROSTER_SIZE)]
            } else {
                vec![]
            };
            events.push(UploadEvent {
                id: format!("{}-{}", day, i),
                author_id: format!("user-{}", i),
                date,
                mentioned_user_ids,
                description: None,
                photo_url: None,
                created_at: String::new(),
            });
        }
    }
    events
}

fn benchmark_monthly_attendance(c: &mut Criterion) {
    let month = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
    let today = NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid date");
    let roster = roster();
    let uploads = uploads(month);

    let mut group = c.benchmark_group("attendance");

    group.bench_function("presence_index_full_month", |b| {
        b.iter(|| build_presence_index(black_box(&uploads)))
    });

    group.bench_function("monthly_report_300_users", |b| {
        b.iter(|| monthly_attendance(black_box(&roster), black_box(&uploads), month, today))
    });

    group.finish();
}

criterion_group!(benches, benchmark_monthly_attendance);
criterion_main!(benches);
