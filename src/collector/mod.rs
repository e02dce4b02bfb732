//! Match ingestion boundary
//!
//! This module feeds completed matches from the data source into the rating
//! engine and keeps team ratings in a pluggable store.

pub mod processor;
pub mod store;

// Re-export commonly used types
pub use processor::{MatchProcessor, ProcessingSummary};
pub use store::{InMemoryTeamStore, TeamStore};
