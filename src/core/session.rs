use crate::core::{
    cascade::{child_domain, on_parent_change},
    composer::{FilterResult, ResultComposer},
    counter::count_active,
    error::FilterError,
    sorting::SortKey,
};
use crate::models::{Candidate, Criteria, FacetDomains, Selection};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

const DEFAULT_CACHE_SIZE: usize = 32;

/// One discovery screen's lifecycle: a candidate set delivered once, criteria
/// that start all-inactive, and memoized query results.
///
/// Cached results are keyed by the serialized criteria and sort key and are
/// dropped whenever the candidate set is replaced.
pub struct DiscoverySession {
    candidates: Arc<[Candidate]>,
    domains: Arc<FacetDomains>,
    composer: ResultComposer,
    criteria: Criteria,
    sort: SortKey,
    cache: LruCache<String, FilterResult>,
}

impl DiscoverySession {
    pub fn new(candidates: Vec<Candidate>, domains: Arc<FacetDomains>, sort: SortKey) -> Self {
        Self::with_composer(candidates, domains, sort, ResultComposer::default(), DEFAULT_CACHE_SIZE)
    }

    pub fn with_composer(
        candidates: Vec<Candidate>,
        domains: Arc<FacetDomains>,
        sort: SortKey,
        composer: ResultComposer,
        cache_size: usize,
    ) -> Self {
        let capacity = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);

        Self {
            candidates: candidates.into(),
            criteria: Criteria::from_domains(&domains),
            domains,
            composer,
            sort,
            cache: LruCache::new(capacity),
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Replace the criteria with the outcome of a facet-update operation
    pub fn update<F>(&mut self, f: F) -> Result<(), FilterError>
    where
        F: FnOnce(&Criteria) -> Result<Criteria, FilterError>,
    {
        self.criteria = f(&self.criteria)?;
        Ok(())
    }

    /// Select a new parent value; the dependent child resets to `all`
    pub fn change_parent(&mut self, parent_key: &str, value: impl Into<Selection>) -> Result<(), FilterError> {
        self.criteria = on_parent_change(&self.criteria, parent_key, value)?;
        Ok(())
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    pub fn reset(&mut self) {
        self.criteria = self.criteria.reset();
    }

    /// Swap in a freshly fetched candidate set, discarding memoized results
    pub fn replace_candidates(&mut self, candidates: Vec<Candidate>) {
        tracing::debug!(
            "Replacing {} candidates with {}, clearing {} cached results",
            self.candidates.len(),
            candidates.len(),
            self.cache.len()
        );
        self.candidates = candidates.into();
        self.cache.clear();
    }

    /// Filtered, sorted view for the current criteria and sort key
    pub fn result(&mut self) -> FilterResult {
        let key = match serde_json::to_string(&(&self.criteria, self.sort)) {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!("Failed to build cache key, recomputing: {}", e);
                return self.composer.query(&self.candidates, &self.criteria, self.sort);
            }
        };

        if let Some(result) = self.cache.get(&key) {
            tracing::trace!("Result cache hit");
            return result.clone();
        }

        tracing::trace!("Result cache miss");
        let result = self.composer.query(&self.candidates, &self.criteria, self.sort);
        self.cache.put(key, result.clone());
        result
    }

    /// Badge count for the current criteria
    pub fn active_filter_count(&self) -> usize {
        count_active(&self.criteria)
    }

    /// Valid child options under the currently selected parent
    pub fn child_options(&self, parent_key: &str) -> Result<Vec<Selection>, FilterError> {
        let facet = self
            .criteria
            .cascade(parent_key)
            .ok_or_else(|| FilterError::UnknownFacet(parent_key.to_string()))?;

        Ok(self
            .domains
            .cascade(parent_key)
            .map(|table| child_domain(table, &facet.parent_value))
            .unwrap_or_else(|| vec![Selection::All]))
    }
}
