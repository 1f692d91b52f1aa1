use crate::core::{FilterResult, SortKey};
use crate::models::Selection;
use serde::{Deserialize, Serialize};

/// Response for the discovery query endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(flatten)]
    pub result: FilterResult,
    #[serde(rename = "activeFilters")]
    pub active_filters: usize,
    #[serde(rename = "sortKey")]
    pub sort_key: SortKey,
}

/// Ordered child options for a parent value, `all` first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildrenResponse {
    #[serde(rename = "parentKey")]
    pub parent_key: String,
    pub value: Selection,
    pub children: Vec<Selection>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
