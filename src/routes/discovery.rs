use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{annotate_distances, child_domain, count_active, on_parent_change, FilterError, ResultComposer, SortKey};
use crate::models::{
    ChangeParentRequest, ChildrenQuery, ChildrenResponse, Criteria, DefaultCriteriaQuery,
    ErrorResponse, FacetDomains, HealthResponse, QueryRequest, QueryResponse, Screen,
};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub people: Arc<FacetDomains>,
    pub places: Arc<FacetDomains>,
    pub composer: ResultComposer,
    pub default_sort: SortKey,
    pub max_candidates: usize,
}

impl AppState {
    fn domains(&self, screen: Screen) -> &FacetDomains {
        match screen {
            Screen::People => self.people.as_ref(),
            Screen::Places => self.places.as_ref(),
        }
    }
}

/// Configure all discovery routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/discovery/query", web::post().to(query))
        .route("/discovery/criteria/default", web::get().to(default_criteria))
        .route("/discovery/criteria/parent", web::post().to(change_parent))
        .route("/discovery/children", web::get().to(children));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// All-inactive criteria for a screen
///
/// GET /api/v1/discovery/criteria/default?screen=people|places
async fn default_criteria(
    state: web::Data<AppState>,
    query: web::Query<DefaultCriteriaQuery>,
) -> impl Responder {
    HttpResponse::Ok().json(Criteria::from_domains(state.domains(query.screen)))
}

/// Filter and sort a candidate set
///
/// POST /api/v1/discovery/query
///
/// Request body:
/// ```json
/// {
///   "candidates": [{ "kind": "person", "id": "1", "name": "Alex" }],
///   "criteria": { "ranges": [], "selections": [], "cascades": [], "text": "" },
///   "sortKey": "rating|reviewCount|distance|name",
///   "origin": { "latitude": 52.52, "longitude": 13.40 }
/// }
/// ```
async fn query(
    state: web::Data<AppState>,
    req: web::Json<QueryRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for query request: field_errors={:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    if req.candidates.len() > state.max_candidates {
        return bad_request(
            "Too many candidates",
            format!(
                "{} candidates exceeds the limit of {}",
                req.candidates.len(),
                state.max_candidates
            ),
        );
    }

    let sort_key = match req.sort_key.as_deref().map(str::parse::<SortKey>).transpose() {
        Ok(sort_key) => sort_key.unwrap_or(state.default_sort),
        Err(e) => {
            tracing::warn!("Rejected discovery query: {}", e);
            return filter_error(&e);
        }
    };

    let mut req = req.into_inner();
    if let Some(origin) = req.origin {
        annotate_distances(&mut req.candidates, origin.latitude, origin.longitude);
    }

    let result = state.composer.query(&req.candidates, &req.criteria, sort_key);
    let active_filters = count_active(&req.criteria);

    tracing::info!(
        "Returning {} of {} candidates ({} active filters, sort: {})",
        result.total,
        req.candidates.len(),
        active_filters,
        sort_key
    );

    HttpResponse::Ok().json(QueryResponse {
        result,
        active_filters,
        sort_key,
    })
}

/// Select a new parent value; the child facet is reset to `all`
///
/// POST /api/v1/discovery/criteria/parent
async fn change_parent(req: web::Json<ChangeParentRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    match on_parent_change(&req.criteria, &req.parent_key, req.value.clone()) {
        Ok(criteria) => HttpResponse::Ok().json(criteria),
        Err(e) => filter_error(&e),
    }
}

/// Ordered child domain for a parent value
///
/// GET /api/v1/discovery/children?parentKey=country&value=Germany&screen=people
async fn children(
    state: web::Data<AppState>,
    query: web::Query<ChildrenQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let Some(table) = state.domains(query.screen).cascade(&query.parent_key) else {
        return HttpResponse::NotFound().json(ErrorResponse {
            error: "Unknown facet".to_string(),
            message: format!("No cascading facet declared for {}", query.parent_key),
            status_code: 404,
        });
    };

    HttpResponse::Ok().json(ChildrenResponse {
        parent_key: query.parent_key.clone(),
        value: query.value.clone(),
        children: child_domain(table, &query.value),
    })
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

fn filter_error(err: &FilterError) -> HttpResponse {
    let error = match err {
        FilterError::InvalidSortKey(_) => "invalid_sort_key",
        FilterError::UnknownFacet(_) => "unknown_facet",
        FilterError::InvalidRange { .. } => "invalid_range",
    };
    bad_request(error, err.to_string())
}
