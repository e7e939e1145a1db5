//! Riff Discovery
//!
//! Track search for Riff: a synchronous substring filter over the catalog
//! and a debounced, last-query-wins remote search.
//!
//! # Example
//!
//! ```rust
//! use riff_core::CatalogIndex;
//! use riff_discovery::{SearchAggregator, SearchConfig};
//! use std::sync::Arc;
//!
//! let search = SearchAggregator::new(Arc::new(CatalogIndex::sample().unwrap()), None, SearchConfig::default());
//! assert!(search.local_search("").is_empty());
//! ```

mod aggregator;
mod error;

pub use aggregator::{SearchAggregator, SearchConfig, SearchOutcome};
pub use error::{Result, SearchError};
