use thiserror::Error;

/// Contract violations raised by the discovery engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("Invalid sort key: {0}")]
    InvalidSortKey(String),

    #[error("No facet declared for key: {0}")]
    UnknownFacet(String),

    #[error("Invalid range for {key}: [{min}, {max}]")]
    InvalidRange { key: String, min: f64, max: f64 },
}
