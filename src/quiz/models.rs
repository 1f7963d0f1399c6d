//! Quiz result data models

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Every category a learner can complete a quiz in
pub const ALL_CATEGORIES: [&str; 4] = [
    "Operating Systems",
    "DBMS",
    "Data Structures",
    "Computer Networks",
];

/// Outcome of one completed quiz attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    /// Attempt id, stable across retries of the same submission
    pub id: Uuid,
    pub category: String,
    /// 0-100
    pub score_percentage: u8,
    /// Concepts the learner got wrong
    #[serde(default)]
    pub concept_gaps: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spent_secs: Option<u32>,
    pub completed_at: DateTime<Utc>,
}

impl QuizResult {
    pub fn new(category: String, score_percentage: u8, completed_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            score_percentage,
            concept_gaps: BTreeSet::new(),
            time_spent_secs: None,
            completed_at,
        }
    }

    /// Builder method to add concept gaps
    pub fn with_gaps<I, S>(mut self, gaps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.concept_gaps.extend(gaps.into_iter().map(Into::into));
        self
    }

    /// Builder method to add time spent
    pub fn with_time_spent(mut self, secs: u32) -> Self {
        self.time_spent_secs = Some(secs);
        self
    }

    pub fn has_gaps(&self) -> bool {
        !self.concept_gaps.is_empty()
    }
}

/// Statistics for one category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryQuizStats {
    pub attempts: usize,
    pub avg_score: u8,
    pub best_score: u8,
    pub gaps: BTreeSet<String>,
}

/// Statistics over a learner's quiz history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizStats {
    pub total_quizzes: usize,
    pub avg_score: Option<u8>,
    pub total_time_secs: u64,
    pub best_score: Option<u8>,
    pub by_category: BTreeMap<String, CategoryQuizStats>,
}
