// Model exports
pub mod candidate;
pub mod criteria;
pub mod domains;
pub mod requests;
pub mod responses;

pub use candidate::{keys, Attributes, Candidate, Person, Place};
pub use criteria::{Bounds, CascadingFacet, Criteria, MultiSelectFacet, RangeFacet, Selection, SingleSelectFacet};
pub use domains::{CascadeEntry, CascadeTable, DomainError, FacetDomains, OptionDomain, RangeDomain};
pub use requests::{ChangeParentRequest, ChildrenQuery, DefaultCriteriaQuery, Origin, QueryRequest, Screen};
pub use responses::{ChildrenResponse, ErrorResponse, HealthResponse, QueryResponse};
