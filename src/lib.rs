//! # Trie-Structured Place Name Autocomplete Engine
//!
//! ## Overview
//! This library implements an autocomplete service for place names: given a
//! text prefix it returns matching places from a fixed in-memory dataset,
//! ranked by relevance and optionally biased toward a caller-supplied
//! geographic anchor.
//!
//! ## Architecture
//! The system is composed of several key modules:
//! - `ingestion`: Tab-separated dataset loading and record construction
//! - `trie`: Case-insensitive prefix tree with bounded breadth-first lookup
//! - `scoring`: Pluggable relevance scoring (length-relative, geo-distance)
//! - `ranking`: Stable score-ordered result assembly and truncation
//! - `api`: REST API endpoints for suggestions and health
//! - `config`: Configuration management and settings
//! - `errors`: Centralized error handling and types
//!
//! ## Input/Output Specification
//! - **Input**: GeoNames-style TSV dataset, query prefixes with optional
//!   anchor coordinates and result limits
//! - **Output**: JSON suggestion lists ordered best-first, deterministic for
//!   a fixed dataset
//!
//! ## Usage
//! ```rust,no_run
//! use place_suggest::{Config, PrefixIndex};
//! use place_suggest::ingestion::load_dataset;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config.toml")?;
//!     let mut index = PrefixIndex::new();
//!     for record in load_dataset(&config.dataset.path)? {
//!         let name = record.name.clone();
//!         index.insert(&name, record);
//!     }
//!     let matches = index.find_matches("vic", Some(10));
//!     println!("Found {} matches", matches.len());
//!     Ok(())
//! }
//! ```

// Core modules
pub mod config;
pub mod errors;
pub mod ingestion;
pub mod trie;
pub mod scoring;
pub mod ranking;
pub mod api;

// Re-exports for convenience
pub use config::Config;
pub use errors::{Result, SuggestError};
pub use ranking::{rank, Suggestion};
pub use scoring::{GeoDistanceScorer, RelativeLengthScorer, Scorer};
pub use trie::PrefixIndex;

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One place in the dataset. Constructed by the loader at startup and never
/// mutated afterwards; terminal trie nodes hold clones of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Dataset identifier, kept as an opaque string
    pub id: String,
    /// Canonical place name, the string the trie indexes
    pub name: String,
    /// Rendered label shown to callers, e.g. "Victoria, 02, CA"
    pub display_name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Country code from the dataset
    pub region: String,
}

/// Application state shared across request handlers. The index is built once
/// at startup and only ever read afterwards, so handlers share it through an
/// `Arc` without locking.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<config::Config>,
    pub index: Arc<trie::PrefixIndex>,
}
