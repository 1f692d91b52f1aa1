// Core engine exports
pub mod cascade;
pub mod composer;
pub mod counter;
pub mod distance;
pub mod error;
pub mod filters;
pub mod session;
pub mod sorting;

pub use cascade::{child_domain, on_parent_change, reconcile};
pub use composer::{FilterResult, ResultComposer};
pub use counter::count_active;
pub use distance::{annotate_distances, haversine_distance};
pub use error::FilterError;
pub use filters::{matches, matches_text};
pub use session::DiscoverySession;
pub use sorting::{compare, sort_candidates, SortKey};
