use crate::models::{Candidate, Criteria, Selection};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Which discovery screen's domain tables a request refers to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    #[default]
    People,
    Places,
}

/// Viewer position used to fill in candidate distances
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct Origin {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

/// Request to filter and sort a candidate set
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QueryRequest {
    #[validate(length(max = 10000))]
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub criteria: Criteria,
    #[validate(length(min = 1))]
    #[serde(alias = "sort_key", rename = "sortKey", default)]
    pub sort_key: Option<String>,
    /// When present, `distanceKm` is recomputed for candidates with coordinates
    #[validate(nested)]
    #[serde(default)]
    pub origin: Option<Origin>,
}

/// Request to select a new parent value on a cascading facet
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangeParentRequest {
    pub criteria: Criteria,
    #[validate(length(min = 1))]
    #[serde(alias = "parent_key", rename = "parentKey")]
    pub parent_key: String,
    pub value: Selection,
}

/// Query string for the child-domain lookup
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChildrenQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "parent_key", rename = "parentKey")]
    pub parent_key: String,
    #[serde(default)]
    pub value: Selection,
    #[serde(default)]
    pub screen: Screen,
}

/// Query string for the all-inactive criteria lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultCriteriaQuery {
    #[serde(default)]
    pub screen: Screen,
}
