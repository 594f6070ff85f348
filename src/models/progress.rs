// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user progress document.

use serde::{Deserialize, Serialize};

use crate::models::{ContestResult, Platforms, SubmissionResult};

/// User progress document stored in Firestore.
///
/// Every field defaults so that projection reads (which only return the
/// requested paths) decode into the same type. The fully lower-cased keys of
/// the older schema revision are accepted on read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProgress {
    /// Email address (unique, also the document key)
    pub email: String,
    #[serde(alias = "firstname")]
    pub first_name: String,
    #[serde(alias = "lastname")]
    pub last_name: String,
    #[serde(alias = "platformdata")]
    pub platform_data: Platforms,
}

/// Progress on a single platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformProgress {
    /// Account name on the platform
    pub handle: String,
    #[serde(alias = "totalsolved")]
    pub total_solved: i64,
    pub ranking: f64,
    /// Append-only, oldest first
    pub contests: Vec<ContestResult>,
    /// Append-only, oldest first
    pub submissions: Vec<SubmissionResult>,
}

/// Both history logs of one platform.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlatformHistory {
    pub contests: Vec<ContestResult>,
    pub submissions: Vec<SubmissionResult>,
}

impl From<PlatformProgress> for PlatformHistory {
    fn from(progress: PlatformProgress) -> Self {
        Self {
            contests: progress.contests,
            submissions: progress.submissions,
        }
    }
}

/// Profile fields of one platform, without the history logs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSummary {
    pub handle: String,
    pub total_solved: i64,
    pub ranking: f64,
}

impl From<&PlatformProgress> for PlatformSummary {
    fn from(progress: &PlatformProgress) -> Self {
        Self {
            handle: progress.handle.clone(),
            total_solved: progress.total_solved,
            ranking: progress.ranking,
        }
    }
}
