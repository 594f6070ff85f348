// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod platform;
pub mod progress;
pub mod record;

pub use platform::{Platform, Platforms};
pub use progress::{PlatformHistory, PlatformProgress, PlatformSummary, UserProgress};
pub use record::{ContestResult, SubmissionResult};
