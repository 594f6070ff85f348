// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Progress API routes.
//!
//! All routes are scoped to one user and one platform:
//! `/api/users/{email}/platforms/{platform}/...`. The platform name is
//! parsed here, so an unknown platform is rejected before any store access.

use crate::error::{ProgressError, Result};
use crate::models::{ContestResult, Platform, PlatformSummary, SubmissionResult};
use crate::services::formatter::{
    self, CompleteUserDataResponse, ContestResponse, SubmissionResponse,
};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/users/{email}/platforms/{platform}",
            get(get_platform_summary),
        )
        .route(
            "/api/users/{email}/platforms/{platform}/contests",
            post(append_contests),
        )
        .route(
            "/api/users/{email}/platforms/{platform}/contests/last",
            get(get_last_contest),
        )
        .route(
            "/api/users/{email}/platforms/{platform}/submissions",
            post(append_submissions),
        )
        .route(
            "/api/users/{email}/platforms/{platform}/submissions/last",
            get(get_last_submission),
        )
        .route(
            "/api/users/{email}/platforms/{platform}/history",
            get(get_history),
        )
}

#[derive(Deserialize)]
struct ProgressPath {
    email: String,
    platform: String,
}

impl ProgressPath {
    fn platform(&self) -> Result<Platform> {
        self.platform.parse()
    }
}

// ─── Reads ───────────────────────────────────────────────────

async fn get_last_contest(
    State(state): State<Arc<AppState>>,
    Path(path): Path<ProgressPath>,
) -> Result<Json<ContestResponse>> {
    let platform = path.platform()?;
    let contest = state.store.last_contest(&path.email, platform).await?;
    Ok(Json(formatter::format_last_contest(&contest)?))
}

async fn get_last_submission(
    State(state): State<Arc<AppState>>,
    Path(path): Path<ProgressPath>,
) -> Result<Json<SubmissionResponse>> {
    let platform = path.platform()?;
    let submission = state.store.last_submission(&path.email, platform).await?;
    Ok(Json(formatter::format_last_submission(&submission)))
}

/// Full contest and submission history (bulk/backfill).
async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(path): Path<ProgressPath>,
) -> Result<Json<CompleteUserDataResponse>> {
    let platform = path.platform()?;
    let history = state.store.full_history(&path.email, platform).await?;
    Ok(Json(formatter::format_history(&history)?))
}

async fn get_platform_summary(
    State(state): State<Arc<AppState>>,
    Path(path): Path<ProgressPath>,
) -> Result<Json<PlatformSummary>> {
    let platform = path.platform()?;
    let summary = state.store.platform_summary(&path.email, platform).await?;
    Ok(Json(summary))
}

// ─── Appends ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct AppendContestsRequest {
    contests: Vec<ContestResult>,
}

#[derive(Deserialize)]
struct AppendSubmissionsRequest {
    submissions: Vec<SubmissionResult>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AppendResponse {
    pub appended: usize,
}

/// Turn axum's body rejection into our stable error code.
fn parse_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ProgressError::InvalidInput(rejection.body_text()))
}

async fn append_contests(
    State(state): State<Arc<AppState>>,
    Path(path): Path<ProgressPath>,
    body: std::result::Result<Json<AppendContestsRequest>, JsonRejection>,
) -> Result<Json<AppendResponse>> {
    let platform = path.platform()?;
    let AppendContestsRequest { contests } = parse_body(body)?;
    let appended = contests.len();

    state
        .store
        .append_contests(&path.email, platform, contests)
        .await?;

    Ok(Json(AppendResponse { appended }))
}

async fn append_submissions(
    State(state): State<Arc<AppState>>,
    Path(path): Path<ProgressPath>,
    body: std::result::Result<Json<AppendSubmissionsRequest>, JsonRejection>,
) -> Result<Json<AppendResponse>> {
    let platform = path.platform()?;
    let AppendSubmissionsRequest { submissions } = parse_body(body)?;
    let appended = submissions.len();

    state
        .store
        .append_submissions(&path.email, platform, submissions)
        .await?;

    Ok(Json(AppendResponse { appended }))
}
