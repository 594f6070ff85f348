// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process document store.
//!
//! Used for local runs without GCP and by the test suite. Each document
//! lives in a `DashMap` shard; `push_each` holds the shard's write lock for
//! the whole append, so concurrent appenders are serialized per document.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use crate::db::{document_id, DocumentStore, FieldPath, LogEntries, LogKind};
use crate::error::Result;
use crate::models::{Platform, UserProgress};

/// In-memory document store.
#[derive(Clone, Default)]
pub struct MemoryDb {
    users: Arc<DashMap<String, UserProgress>>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace a user document.
    pub fn upsert_user(&self, user: UserProgress) {
        self.users.insert(document_id(&user.email), user);
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Copy only the requested fields of `user` into an otherwise empty document.
fn project(user: &UserProgress, fields: &[FieldPath]) -> UserProgress {
    let mut projected = UserProgress::default();

    for field in fields {
        match *field {
            FieldPath::Email => projected.email = user.email.clone(),
            FieldPath::Log(platform, log) => {
                let source = user.platform_data.get(platform);
                let target = projected.platform_data.get_mut(platform);
                match log {
                    LogKind::Contests => target.contests = source.contests.clone(),
                    LogKind::Submissions => {
                        target.submissions = source.submissions.clone()
                    }
                }
            }
            FieldPath::Profile(platform) => {
                let source = user.platform_data.get(platform);
                let target = projected.platform_data.get_mut(platform);
                target.handle = source.handle.clone();
                target.total_solved = source.total_solved;
                target.ranking = source.ranking;
            }
        }
    }

    projected
}

#[async_trait]
impl DocumentStore for MemoryDb {
    async fn find_projected(
        &self,
        email: &str,
        fields: &[FieldPath],
    ) -> Result<Option<UserProgress>> {
        Ok(self
            .users
            .get(&document_id(email))
            .map(|user| project(&user, fields)))
    }

    async fn find_full(&self, email: &str) -> Result<Option<UserProgress>> {
        Ok(self
            .users
            .get(&document_id(email))
            .map(|user| user.value().clone()))
    }

    async fn push_each(
        &self,
        email: &str,
        platform: Platform,
        entries: LogEntries,
    ) -> Result<bool> {
        let Some(mut user) = self.users.get_mut(&document_id(email)) else {
            return Ok(false);
        };

        entries.append_to(user.platform_data.get_mut(platform));
        Ok(true)
    }
}
