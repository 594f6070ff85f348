// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use progress_tracker::config::Config;
use progress_tracker::db::{DocumentStore, FirestoreDb, MemoryDb};
use progress_tracker::models::{ContestResult, SubmissionResult, UserProgress};
use progress_tracker::routes::create_router;
use progress_tracker::services::ProgressStore;
use progress_tracker::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Unique email for test isolation on a shared emulator.
#[allow(dead_code)]
pub fn unique_email() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("user{}@example.com", nanos)
}

/// A registered user with no history on any platform.
#[allow(dead_code)]
pub fn new_user(email: &str) -> UserProgress {
    UserProgress {
        email: email.to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn contest(id: u32) -> ContestResult {
    ContestResult {
        name: format!("Weekly Contest {}", id),
        date: "2024-05-12".to_string(),
        rank: 1000.0 + id as f64,
        rating: 1500.0 + id as f64,
        solved: 3,
        contest_id: id.to_string(),
    }
}

#[allow(dead_code)]
pub fn submission(n: u32) -> SubmissionResult {
    SubmissionResult {
        problem_url: format!("https://leetcode.com/problems/problem-{}", n),
        problem_name: format!("Problem {}", n),
        date: "2024-05-12T10:00:00Z".to_string(),
        language: "rust".to_string(),
        status: "Accepted".to_string(),
        code_url: format!("https://leetcode.com/submissions/detail/{}", n),
    }
}

/// Memory-backed store seeded with the given users.
#[allow(dead_code)]
pub fn memory_store(emails: &[&str]) -> (ProgressStore, MemoryDb) {
    let db = MemoryDb::new();
    for email in emails {
        db.upsert_user(new_user(email));
    }
    let config = Config::test_default();
    let store = ProgressStore::new(Arc::new(db.clone()), config.store_timeout);
    (store, db)
}

/// Create a test app over the given store backend.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(db: Arc<dyn DocumentStore>) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let store = ProgressStore::new(db, config.store_timeout);

    let state = Arc::new(AppState { config, store });

    (create_router(state.clone()), state)
}
