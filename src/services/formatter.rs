// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shapes stored history records into API responses.
//!
//! Pure functions. Contest ids are stored as text and parsed here; an id
//! that is not a number is reported, never turned into zero.

use serde::Serialize;

use crate::error::{ProgressError, Result};
use crate::models::{ContestResult, PlatformHistory, SubmissionResult};

/// Submission as returned to API callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub date: String,
    pub language: String,
    pub problem_status: String,
    pub problem_title: String,
    pub problem_link: String,
    pub code_link: String,
}

/// Contest as returned to API callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestRecord {
    pub contest_name: String,
    pub rank: f64,
    pub rating: f64,
    pub contest_id: i64,
    pub contest_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubmissionResponse {
    pub submissions: Vec<SubmissionRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContestResponse {
    pub contests: Vec<ContestRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompleteUserDataResponse {
    pub submissions: Vec<SubmissionRecord>,
    pub contests: Vec<ContestRecord>,
}

pub fn format_submission(submission: &SubmissionResult) -> SubmissionRecord {
    SubmissionRecord {
        date: submission.date.clone(),
        language: submission.language.clone(),
        problem_status: submission.status.clone(),
        problem_title: submission.problem_name.clone(),
        problem_link: submission.problem_url.clone(),
        code_link: submission.code_url.clone(),
    }
}

pub fn format_contest(contest: &ContestResult) -> Result<ContestRecord> {
    let contest_id = contest.contest_id.trim().parse::<i64>().map_err(|_| {
        ProgressError::MalformedRecord(format!(
            "contest {:?} has non-numeric id {:?}",
            contest.name, contest.contest_id
        ))
    })?;

    Ok(ContestRecord {
        contest_name: contest.name.clone(),
        rank: contest.rank,
        rating: contest.rating,
        contest_id,
        contest_date: contest.date.clone(),
    })
}

pub fn format_submissions(submissions: &[SubmissionResult]) -> SubmissionResponse {
    SubmissionResponse {
        submissions: submissions.iter().map(format_submission).collect(),
    }
}

/// Fails on the first contest whose id does not parse.
pub fn format_contests(contests: &[ContestResult]) -> Result<ContestResponse> {
    Ok(ContestResponse {
        contests: contests.iter().map(format_contest).collect::<Result<_>>()?,
    })
}

/// The zero-valued "no contests yet" result formats as an empty list.
pub fn format_last_contest(contest: &ContestResult) -> Result<ContestResponse> {
    if contest.is_empty() {
        return Ok(ContestResponse::default());
    }
    format_contests(std::slice::from_ref(contest))
}

/// The zero-valued "no submissions yet" result formats as an empty list.
pub fn format_last_submission(submission: &SubmissionResult) -> SubmissionResponse {
    if submission.is_empty() {
        return SubmissionResponse::default();
    }
    format_submissions(std::slice::from_ref(submission))
}

pub fn format_history(history: &PlatformHistory) -> Result<CompleteUserDataResponse> {
    let ContestResponse { contests } = format_contests(&history.contests)?;
    let SubmissionResponse { submissions } = format_submissions(&history.submissions);

    Ok(CompleteUserDataResponse {
        submissions,
        contests,
    })
}
