// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contest and submission entries stored in a platform's history logs.
//!
//! Writes always use the camelCase keys below. Documents written by the
//! older schema revision (fully lower-cased keys, integer contest ids,
//! `oldrating`/`newrating`) are still readable through the aliases.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// One contest participation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestResult {
    #[serde(alias = "contestname")]
    pub name: String,
    /// Contest date as reported by the platform
    #[serde(default)]
    pub date: String,
    pub rank: f64,
    /// Rating after the contest
    #[serde(alias = "newrating")]
    pub rating: f64,
    /// Problems solved during the contest
    #[serde(default)]
    pub solved: i64,
    /// Platform contest identifier, numeric in practice but stored as text
    #[serde(alias = "contestid", deserialize_with = "deserialize_contest_id")]
    pub contest_id: String,
}

impl ContestResult {
    /// True for the zero value returned when a platform has no contests yet.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One judged submission snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    #[serde(alias = "problemurl")]
    pub problem_url: String,
    #[serde(alias = "problemname")]
    pub problem_name: String,
    #[serde(alias = "submissiondate")]
    pub date: String,
    #[serde(alias = "submissionlanguage")]
    pub language: String,
    /// Judge verdict ("Accepted", "Wrong Answer", ...)
    #[serde(alias = "submissionstatus")]
    pub status: String,
    #[serde(alias = "codeurl")]
    pub code_url: String,
}

impl SubmissionResult {
    /// True for the zero value returned when a platform has no submissions yet.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Accept a contest id stored either as text or as an integer (older schema).
fn deserialize_contest_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct ContestIdVisitor;

    impl Visitor<'_> for ContestIdVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a contest id as string or integer")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_string<E: de::Error>(self, value: String) -> Result<String, E> {
            Ok(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<String, E> {
            Ok(value.to_string())
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<String, E> {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(ContestIdVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contest_serializes_camel_case() {
        let contest = ContestResult {
            name: "Weekly 300".to_string(),
            date: "2022-06-26".to_string(),
            rank: 1500.0,
            rating: 1600.0,
            solved: 3,
            contest_id: "300".to_string(),
        };

        let value = serde_json::to_value(&contest).unwrap();
        assert_eq!(value["name"], "Weekly 300");
        assert_eq!(value["contestId"], "300");
        assert_eq!(value["rating"], 1600.0);
        assert!(value.get("contest_id").is_none());
    }

    #[test]
    fn test_contest_reads_legacy_shape() {
        let legacy = r#"{
            "contestname": "Round 842",
            "rank": 2301,
            "oldrating": 1490,
            "newrating": 1512,
            "contestid": 1768
        }"#;

        let contest: ContestResult = serde_json::from_str(legacy).unwrap();
        assert_eq!(contest.name, "Round 842");
        assert_eq!(contest.rank, 2301.0);
        assert_eq!(contest.rating, 1512.0);
        assert_eq!(contest.contest_id, "1768");
        assert_eq!(contest.solved, 0);
        assert_eq!(contest.date, "");
    }

    #[test]
    fn test_contest_rejects_wrong_types() {
        let bad = r#"{"name": "X", "rank": "first", "rating": 1, "contestId": "1"}"#;
        assert!(serde_json::from_str::<ContestResult>(bad).is_err());

        let bad_id = r#"{"name": "X", "rank": 1, "rating": 1, "contestId": {"id": 1}}"#;
        assert!(serde_json::from_str::<ContestResult>(bad_id).is_err());
    }

    #[test]
    fn test_submission_reads_legacy_shape() {
        let legacy = r#"{
            "problemurl": "https://leetcode.com/problems/two-sum",
            "problemname": "Two Sum",
            "submissiondate": "2023-01-02",
            "submissionlanguage": "rust",
            "submissionstatus": "Accepted",
            "codeurl": "https://leetcode.com/submissions/1"
        }"#;

        let submission: SubmissionResult = serde_json::from_str(legacy).unwrap();
        assert_eq!(submission.problem_name, "Two Sum");
        assert_eq!(submission.date, "2023-01-02");
        assert_eq!(submission.status, "Accepted");
    }

    #[test]
    fn test_zero_values_are_empty() {
        assert!(ContestResult::default().is_empty());
        assert!(SubmissionResult::default().is_empty());

        let submission = SubmissionResult {
            status: "Accepted".to_string(),
            ..Default::default()
        };
        assert!(!submission.is_empty());
    }
}
