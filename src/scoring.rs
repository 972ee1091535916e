//! # Relevance Scoring Module
//!
//! ## Purpose
//! Assigns relevance scores to matched records. Scoring is pluggable: the
//! query handler picks an implementation per request depending on whether
//! the caller supplied an anchor coordinate.
//!
//! ## Input/Output Specification
//! - **Input**: Matched records plus per-query context (query length or
//!   anchor coordinates)
//! - **Output**: Scores in which higher is better; both built-in scorers
//!   yield 1.0 for a perfect match
//!
//! ## Key Features
//! - Length-relative scoring favoring the shortest completion
//! - Great-circle distance scoring normalized to [0, 1]
//! - Guarded floating-point domain edges, never NaN

use crate::Record;
use std::f64::consts::PI;

/// Scores one record against the current query context. Implementations are
/// pure and cheap enough to run once per matched record per request.
pub trait Scorer {
    fn score(&self, record: &Record) -> f64;
}

/// Scores results by how close their name length is to the query length.
/// A name exactly as long as the query scores 1.0 and every additional
/// character halves the score, so the most specific completion wins.
pub struct RelativeLengthScorer {
    query_length: usize,
}

impl RelativeLengthScorer {
    pub fn new(query: &str) -> Self {
        Self {
            query_length: query.chars().count(),
        }
    }
}

impl Scorer for RelativeLengthScorer {
    fn score(&self, record: &Record) -> f64 {
        let extra = record.name.chars().count() as f64 - self.query_length as f64;
        (-extra).exp2()
    }
}

/// The decay applied per character a name extends beyond the query:
/// `2^-extra_chars`. Names shorter than the query (impossible for a true
/// prefix match) score above 1.0 rather than failing.
pub fn inverse_length_score(extra_chars: i32) -> f64 {
    (-(extra_chars as f64)).exp2()
}

/// Scores results by great-circle proximity to an anchor point. Coincident
/// points score 1.0 and antipodal points score 0.0.
pub struct GeoDistanceScorer {
    latitude: f64,
    longitude: f64,
}

impl GeoDistanceScorer {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl Scorer for GeoDistanceScorer {
    fn score(&self, record: &Record) -> f64 {
        distance_score(
            self.latitude,
            self.longitude,
            record.latitude,
            record.longitude,
        )
    }
}

/// Spherical cosine-law angular distance between two points, normalized by
/// π (the largest possible angle) and inverted so nearer is higher.
pub fn distance_score(lat1: f64, long1: f64, lat2: f64, long2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_lambda = (long2 - long1).to_radians();

    // rounding can push the cosine just outside its domain for
    // near-identical points; clamp so acos never returns NaN
    let cos_angle = phi1.sin() * phi2.sin() + phi1.cos() * phi2.cos() * delta_lambda.cos();
    let angle = cos_angle.clamp(-1.0, 1.0).acos();

    1.0 - angle / PI
}
