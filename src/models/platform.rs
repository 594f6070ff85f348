// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Closed set of tracked platforms and the per-platform lookup.
//!
//! Platform names enter the system as strings (URL paths, ingestion jobs)
//! and are parsed into [`Platform`] once. Everything past that boundary works
//! with the enum, so an unknown name can never reach the store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProgressError;
use crate::models::PlatformProgress;

/// A competitive-programming judge tracked per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Leetcode,
    Codeforces,
    Codechef,
    Cpoj,
    Hackerearth,
    Atcoder,
}

impl Platform {
    /// Every platform, in storage order.
    pub const ALL: [Platform; 6] = [
        Platform::Leetcode,
        Platform::Codeforces,
        Platform::Codechef,
        Platform::Cpoj,
        Platform::Hackerearth,
        Platform::Atcoder,
    ];

    /// Lower-case key used for this platform inside `platformData`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Leetcode => "leetcode",
            Platform::Codeforces => "codeforces",
            Platform::Codechef => "codechef",
            Platform::Cpoj => "cpoj",
            Platform::Hackerearth => "hackerearth",
            Platform::Atcoder => "atcoder",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ProgressError;

    /// Case-insensitive: "Leetcode", "LEETCODE" and "leetcode" are the same.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let key = name.trim().to_ascii_lowercase();
        Platform::ALL
            .into_iter()
            .find(|platform| platform.as_str() == key)
            .ok_or_else(|| ProgressError::InvalidPlatform(name.to_string()))
    }
}

/// Progress for every platform, keyed by lower-case platform name.
///
/// Missing keys decode as the zero value so that every document exposes all
/// platforms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Platforms {
    pub leetcode: PlatformProgress,
    pub codeforces: PlatformProgress,
    pub codechef: PlatformProgress,
    pub cpoj: PlatformProgress,
    pub hackerearth: PlatformProgress,
    pub atcoder: PlatformProgress,
}

impl Platforms {
    pub fn get(&self, platform: Platform) -> &PlatformProgress {
        match platform {
            Platform::Leetcode => &self.leetcode,
            Platform::Codeforces => &self.codeforces,
            Platform::Codechef => &self.codechef,
            Platform::Cpoj => &self.cpoj,
            Platform::Hackerearth => &self.hackerearth,
            Platform::Atcoder => &self.atcoder,
        }
    }

    pub fn get_mut(&mut self, platform: Platform) -> &mut PlatformProgress {
        match platform {
            Platform::Leetcode => &mut self.leetcode,
            Platform::Codeforces => &mut self.codeforces,
            Platform::Codechef => &mut self.codechef,
            Platform::Cpoj => &mut self.cpoj,
            Platform::Hackerearth => &mut self.hackerearth,
            Platform::Atcoder => &mut self.atcoder,
        }
    }

    /// Look up a platform by its (case-insensitive) name.
    ///
    /// An unknown name is `InvalidPlatform`, never another platform's data.
    pub fn resolve(&self, name: &str) -> Result<&PlatformProgress, ProgressError> {
        let platform: Platform = name.parse()?;
        Ok(self.get(platform))
    }
}
