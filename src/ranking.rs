//! # Result Ranking Module
//!
//! ## Purpose
//! Turns matched records into the ordered, size-bounded suggestion list the
//! API serializes. Ranking happens after the full match set is scored;
//! truncation is strictly the last step so a late high scorer is never lost.
//!
//! ## Input/Output Specification
//! - **Input**: Matched records, a scorer, an optional result limit
//! - **Output**: Suggestions sorted by score descending, ties stable on
//!   input order

use crate::scoring::Scorer;
use crate::Record;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One entry of the suggestion list returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Display label of the place, e.g. "Victoria, 02, CA"
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub score: f64,
}

/// Score every record, sort best-first, then truncate to `limit` entries
/// when `limit` is positive. The sort is stable: records with equal scores
/// keep the order the match phase produced them in, which keeps output
/// reproducible for a fixed index.
pub fn rank(records: Vec<Record>, scorer: &dyn Scorer, limit: Option<usize>) -> Vec<Suggestion> {
    let mut suggestions: Vec<Suggestion> = records
        .into_iter()
        .map(|record| {
            let score = scorer.score(&record);
            Suggestion {
                name: record.display_name,
                latitude: record.latitude,
                longitude: record.longitude,
                score,
            }
        })
        .collect();

    suggestions.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    if let Some(limit) = limit {
        if limit > 0 {
            suggestions.truncate(limit);
        }
    }

    suggestions
}
