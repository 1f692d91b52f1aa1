//! Lume Discovery - faceted filtering and ranking for the Lume dating app
//!
//! This library provides the discovery engine behind the "Nearby People" and
//! "Places" screens: it filters an in-memory candidate set against range,
//! multi-select, cascading, single-select and free-text facets, sorts the
//! matches, and derives the active-filter badge count.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{
    child_domain, count_active, matches, on_parent_change, DiscoverySession, FilterError,
    FilterResult, ResultComposer, SortKey,
};
pub use models::{Candidate, Criteria, FacetDomains, Person, Place, Selection};
