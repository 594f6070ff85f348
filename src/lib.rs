// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Progress-Tracker: competitive-programming progress per user and platform
//!
//! This crate keeps one progress document per user, with an independent
//! record for each tracked platform. Contest and submission history is
//! append-only and served through a small JSON API.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::ProgressStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: ProgressStore,
}
