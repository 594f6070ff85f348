// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer.
//!
//! [`DocumentStore`] is the persistence boundary: find with a field
//! projection, find the whole document, and an atomic push-to-end on one
//! array field. Both backends guarantee per-document atomicity for
//! `push_each`.

pub mod firestore;
pub mod memory;

pub use self::firestore::FirestoreDb;
pub use self::memory::MemoryDb;

use async_trait::async_trait;
use std::fmt;

use crate::error::Result;
use crate::models::{ContestResult, Platform, PlatformProgress, SubmissionResult, UserProgress};

/// Collection names as constants.
pub mod collections {
    /// User progress documents (keyed by encoded email)
    pub const USERS: &str = "users";
}

/// Document id for a user: the email, URL-encoded so it is a valid id.
pub fn document_id(email: &str) -> String {
    urlencoding::encode(email).into_owned()
}

/// Which history log of a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Contests,
    Submissions,
}

impl LogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogKind::Contests => "contests",
            LogKind::Submissions => "submissions",
        }
    }
}

/// Addressable field inside a user document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    /// `email`, used for existence checks
    Email,
    /// `platformData.<platform>.<contests|submissions>`
    Log(Platform, LogKind),
    /// `platformData.<platform>.{handle,totalSolved,ranking}`, plus the
    /// older `totalsolved` key
    Profile(Platform),
}

impl FieldPath {
    /// Dotted storage paths for this field.
    pub fn paths(&self) -> Vec<String> {
        match self {
            FieldPath::Email => vec!["email".to_string()],
            FieldPath::Log(platform, log) => {
                vec![format!("platformData.{}.{}", platform, log.as_str())]
            }
            FieldPath::Profile(platform) => ["handle", "totalSolved", "totalsolved", "ranking"]
                .iter()
                .map(|field| format!("platformData.{}.{}", platform, field))
                .collect(),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.paths().join(","))
    }
}

/// Entries handed to [`DocumentStore::push_each`].
#[derive(Debug, Clone, PartialEq)]
pub enum LogEntries {
    Contests(Vec<ContestResult>),
    Submissions(Vec<SubmissionResult>),
}

impl LogEntries {
    pub fn kind(&self) -> LogKind {
        match self {
            LogEntries::Contests(_) => LogKind::Contests,
            LogEntries::Submissions(_) => LogKind::Submissions,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            LogEntries::Contests(entries) => entries.len(),
            LogEntries::Submissions(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Push every entry, in order, onto the end of the matching log.
    /// Duplicates are kept.
    pub fn append_to(self, progress: &mut PlatformProgress) {
        match self {
            LogEntries::Contests(contests) => progress.contests.extend(contests),
            LogEntries::Submissions(submissions) => progress.submissions.extend(submissions),
        }
    }
}

/// Document store holding one [`UserProgress`] per email.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch only the given fields of a user's document.
    ///
    /// Fields not requested are left at their zero value. Returns `None` if
    /// no document exists for the email.
    async fn find_projected(&self, email: &str, fields: &[FieldPath])
        -> Result<Option<UserProgress>>;

    /// Fetch a user's whole document.
    async fn find_full(&self, email: &str) -> Result<Option<UserProgress>>;

    /// Atomically append `entries`, in order, to the end of one platform log.
    ///
    /// Returns `false` if no document exists for the email (nothing is
    /// written in that case).
    async fn push_each(&self, email: &str, platform: Platform, entries: LogEntries)
        -> Result<bool>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_paths() {
        assert_eq!(FieldPath::Email.paths(), vec!["email"]);
        assert_eq!(
            FieldPath::Log(Platform::Leetcode, LogKind::Contests).paths(),
            vec!["platformData.leetcode.contests"]
        );
        assert_eq!(
            FieldPath::Log(Platform::Codechef, LogKind::Submissions).to_string(),
            "platformData.codechef.submissions"
        );
        assert_eq!(
            FieldPath::Profile(Platform::Atcoder).paths(),
            vec![
                "platformData.atcoder.handle",
                "platformData.atcoder.totalSolved",
                "platformData.atcoder.totalsolved",
                "platformData.atcoder.ranking",
            ]
        );
    }

    #[test]
    fn test_append_to_keeps_order_and_duplicates() {
        let first = ContestResult {
            contest_id: "1".to_string(),
            ..Default::default()
        };
        let second = ContestResult {
            contest_id: "2".to_string(),
            ..Default::default()
        };
        let mut progress = PlatformProgress {
            contests: vec![first.clone()],
            ..Default::default()
        };

        LogEntries::Contests(vec![second.clone(), first.clone(), first.clone()])
            .append_to(&mut progress);

        assert_eq!(progress.contests, vec![first.clone(), second, first.clone(), first]);
        assert!(progress.submissions.is_empty());
    }

    #[test]
    fn test_document_id_encodes_email() {
        assert_eq!(document_id("a@x.com"), "a%40x.com");
        assert_eq!(document_id("a/b@x.com"), "a%2Fb%40x.com");
    }
}
