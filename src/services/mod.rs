// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod formatter;
pub mod progress;

pub use progress::{ProgressStore, MAX_APPEND_BATCH};
