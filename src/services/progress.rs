// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Platform-scoped reads and appends on a user's progress document.
//!
//! Reads project only the field they need. Appends go through the store's
//! atomic push, so concurrent ingestion workers never lose each other's
//! entries. Every store call is bounded by the configured timeout.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use validator::ValidateEmail;

use crate::db::{DocumentStore, FieldPath, LogEntries, LogKind};
use crate::error::{ProgressError, Result};
use crate::models::{
    ContestResult, Platform, PlatformHistory, PlatformSummary, SubmissionResult, UserProgress,
};

/// Largest number of entries accepted by a single append.
pub const MAX_APPEND_BATCH: usize = 400;

/// Store-facing API for one platform's history of one user.
#[derive(Clone)]
pub struct ProgressStore {
    db: Arc<dyn DocumentStore>,
    timeout: Duration,
}

impl ProgressStore {
    pub fn new(db: Arc<dyn DocumentStore>, timeout: Duration) -> Self {
        Self { db, timeout }
    }

    /// Release this handle's reference to the backend.
    ///
    /// Clones share one backend, whose connection closes when the last
    /// reference is dropped.
    pub fn close(self) {
        let remaining = Arc::strong_count(&self.db) - 1;
        drop(self.db);
        tracing::info!(remaining_handles = remaining, "Released progress store handle");
    }

    // ─── Reads ───────────────────────────────────────────────────

    /// Most recent contest on `platform`, or the zero value if there is none.
    pub async fn last_contest(&self, email: &str, platform: Platform) -> Result<ContestResult> {
        let user = self
            .find(email, &[FieldPath::Log(platform, LogKind::Contests)])
            .await?;

        Ok(user
            .platform_data
            .get(platform)
            .contests
            .last()
            .cloned()
            .unwrap_or_default())
    }

    /// Most recent submission on `platform`, or the zero value if there is none.
    pub async fn last_submission(
        &self,
        email: &str,
        platform: Platform,
    ) -> Result<SubmissionResult> {
        let user = self
            .find(email, &[FieldPath::Log(platform, LogKind::Submissions)])
            .await?;

        Ok(user
            .platform_data
            .get(platform)
            .submissions
            .last()
            .cloned()
            .unwrap_or_default())
    }

    /// Both history logs of `platform`, in full.
    ///
    /// Reads the whole user document; pollers should prefer
    /// [`last_contest`](Self::last_contest) and
    /// [`last_submission`](Self::last_submission).
    pub async fn full_history(&self, email: &str, platform: Platform) -> Result<PlatformHistory> {
        validate_email(email)?;

        let mut user = self
            .bounded(self.db.find_full(email))
            .await?
            .ok_or_else(|| ProgressError::UserNotFound(email.to_string()))?;
        let progress = std::mem::take(user.platform_data.get_mut(platform));

        tracing::debug!(
            email,
            %platform,
            contests = progress.contests.len(),
            submissions = progress.submissions.len(),
            "Fetched full history"
        );

        Ok(progress.into())
    }

    /// Handle, solved count and ranking on `platform`.
    pub async fn platform_summary(
        &self,
        email: &str,
        platform: Platform,
    ) -> Result<PlatformSummary> {
        let user = self.find(email, &[FieldPath::Profile(platform)]).await?;
        Ok(user.platform_data.get(platform).into())
    }

    // ─── Appends ─────────────────────────────────────────────────

    /// Append contests to the end of `platform`'s contest log, in order.
    pub async fn append_contests(
        &self,
        email: &str,
        platform: Platform,
        contests: Vec<ContestResult>,
    ) -> Result<()> {
        self.append(email, platform, LogEntries::Contests(contests))
            .await
    }

    /// Append submissions to the end of `platform`'s submission log, in order.
    pub async fn append_submissions(
        &self,
        email: &str,
        platform: Platform,
        submissions: Vec<SubmissionResult>,
    ) -> Result<()> {
        self.append(email, platform, LogEntries::Submissions(submissions))
            .await
    }

    async fn append(&self, email: &str, platform: Platform, entries: LogEntries) -> Result<()> {
        validate_email(email)?;

        let count = entries.len();
        if count > MAX_APPEND_BATCH {
            return Err(ProgressError::InvalidInput(format!(
                "at most {} entries per append, got {}",
                MAX_APPEND_BATCH, count
            )));
        }

        // Nothing to write, but an unknown user is still an error.
        if entries.is_empty() {
            self.find(email, &[FieldPath::Email]).await?;
            return Ok(());
        }

        let kind = entries.kind();
        let matched = self
            .bounded(self.db.push_each(email, platform, entries))
            .await?;
        if !matched {
            return Err(ProgressError::UserNotFound(email.to_string()));
        }

        tracing::info!(email, %platform, log = kind.as_str(), count, "Appended to history");
        Ok(())
    }

    // ─── Helpers ─────────────────────────────────────────────────

    /// Projection read that treats a missing document as `UserNotFound`.
    async fn find(&self, email: &str, fields: &[FieldPath]) -> Result<UserProgress> {
        validate_email(email)?;

        self.bounded(self.db.find_projected(email, fields))
            .await?
            .ok_or_else(|| ProgressError::UserNotFound(email.to_string()))
    }

    /// Run a store call under the configured timeout.
    async fn bounded<T>(&self, call: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| {
                ProgressError::StoreUnavailable(format!(
                    "store did not answer within {:?}",
                    self.timeout
                ))
            })?
    }
}

fn validate_email(email: &str) -> Result<()> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(ProgressError::InvalidInput(format!(
            "invalid email address: {:?}",
            email
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryDb;
    use async_trait::async_trait;

    /// Store that never answers.
    struct StalledDb;

    #[async_trait]
    impl DocumentStore for StalledDb {
        async fn find_projected(
            &self,
            _email: &str,
            _fields: &[FieldPath],
        ) -> Result<Option<UserProgress>> {
            std::future::pending().await
        }

        async fn find_full(&self, _email: &str) -> Result<Option<UserProgress>> {
            std::future::pending().await
        }

        async fn push_each(
            &self,
            _email: &str,
            _platform: Platform,
            _entries: LogEntries,
        ) -> Result<bool> {
            std::future::pending().await
        }
    }

    fn store_with_user(email: &str) -> (ProgressStore, MemoryDb) {
        let db = MemoryDb::new();
        db.upsert_user(UserProgress {
            email: email.to_string(),
            ..Default::default()
        });
        (
            ProgressStore::new(Arc::new(db.clone()), Duration::from_secs(1)),
            db,
        )
    }

    #[tokio::test]
    async fn test_stalled_store_times_out() {
        let store = ProgressStore::new(Arc::new(StalledDb), Duration::from_millis(50));

        let err = store
            .last_contest("a@x.com", Platform::Leetcode)
            .await
            .unwrap_err();
        assert!(matches!(err, ProgressError::StoreUnavailable(_)));

        let err = store
            .append_submissions(
                "a@x.com",
                Platform::Leetcode,
                vec![SubmissionResult::default()],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProgressError::StoreUnavailable(_)));
    }

    #[tokio::test]
    async fn test_malformed_email_is_invalid_input() {
        let (store, _) = store_with_user("a@x.com");

        for email in ["", "not-an-email", "a@"] {
            let err = store
                .last_submission(email, Platform::Codeforces)
                .await
                .unwrap_err();
            assert!(matches!(err, ProgressError::InvalidInput(_)), "{email}");
        }
    }

    #[tokio::test]
    async fn test_oversized_batch_is_rejected_without_writing() {
        let (store, db) = store_with_user("a@x.com");
        let batch = vec![ContestResult::default(); MAX_APPEND_BATCH + 1];

        let err = store
            .append_contests("a@x.com", Platform::Atcoder, batch)
            .await
            .unwrap_err();
        assert!(matches!(err, ProgressError::InvalidInput(_)));

        let user = db.find_full("a@x.com").await.unwrap().unwrap();
        assert!(user.platform_data.atcoder.contests.is_empty());
    }

    #[tokio::test]
    async fn test_empty_append_checks_user_exists() {
        let (store, _) = store_with_user("a@x.com");

        store
            .append_contests("a@x.com", Platform::Leetcode, Vec::new())
            .await
            .expect("empty append on known user");

        let err = store
            .append_contests("b@x.com", Platform::Leetcode, Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ProgressError::UserNotFound(_)));
    }

    #[test]
    fn test_close_releases_backend_reference() {
        let db: Arc<dyn DocumentStore> = Arc::new(MemoryDb::new());
        let store = ProgressStore::new(db.clone(), Duration::from_secs(1));
        let clone = store.clone();
        assert_eq!(Arc::strong_count(&db), 3);

        store.close();
        assert_eq!(Arc::strong_count(&db), 2);

        clone.close();
        assert_eq!(Arc::strong_count(&db), 1);
    }

    #[tokio::test]
    async fn test_platform_summary_reads_profile_fields() {
        let (store, db) = store_with_user("a@x.com");
        let mut user = db.find_full("a@x.com").await.unwrap().unwrap();
        user.platform_data.codechef.handle = "chef".to_string();
        user.platform_data.codechef.total_solved = 250;
        user.platform_data.codechef.ranking = 1834.0;
        db.upsert_user(user);

        let summary = store
            .platform_summary("a@x.com", Platform::Codechef)
            .await
            .unwrap();
        assert_eq!(summary.handle, "chef");
        assert_eq!(summary.total_solved, 250);
        assert_eq!(summary.ranking, 1834.0);
    }
}
