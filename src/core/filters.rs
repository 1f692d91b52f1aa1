use crate::models::{Attributes, CascadingFacet, Criteria, MultiSelectFacet, RangeFacet, SingleSelectFacet};

/// Check if a candidate satisfies every active facet of the criteria.
///
/// Facets are evaluated conjunctively. Inactive facets never reject, and a
/// candidate missing an attribute only fails the facets that reference it.
#[inline]
pub fn matches<A: Attributes + ?Sized>(candidate: &A, criteria: &Criteria) -> bool {
    criteria.ranges().iter().all(|f| matches_range(candidate, f))
        && criteria.selections().iter().all(|f| matches_selection(candidate, f))
        && criteria.cascades().iter().all(|f| matches_cascade(candidate, f))
        && criteria
            .single_select()
            .map_or(true, |f| matches_single_select(candidate, f))
        && matches_text(candidate, criteria.text())
}

/// Inclusive on both bounds
#[inline]
pub fn matches_range<A: Attributes + ?Sized>(candidate: &A, facet: &RangeFacet) -> bool {
    if !facet.is_active() {
        return true;
    }

    candidate
        .numeric(&facet.key)
        .is_some_and(|value| facet.bounds().contains(value))
}

#[inline]
pub fn matches_selection<A: Attributes + ?Sized>(candidate: &A, facet: &MultiSelectFacet) -> bool {
    if facet.selected.is_empty() {
        return true;
    }

    candidate
        .categorical(&facet.key)
        .is_some_and(|value| facet.selected.contains(value))
}

/// Parent and child are checked independently; an inconsistent pair built
/// outside the resolver simply matches nothing it shouldn't.
#[inline]
pub fn matches_cascade<A: Attributes + ?Sized>(candidate: &A, facet: &CascadingFacet) -> bool {
    facet.parent_value.accepts(candidate.categorical(&facet.parent_key))
        && facet.child_value.accepts(candidate.categorical(&facet.child_key))
}

#[inline]
pub fn matches_single_select<A: Attributes + ?Sized>(candidate: &A, facet: &SingleSelectFacet) -> bool {
    facet.value.accepts(candidate.categorical(&facet.key))
}

/// Case-insensitive substring search over the display name and tags.
///
/// Only the empty query is inactive; whitespace is part of the needle.
pub fn matches_text<A: Attributes + ?Sized>(candidate: &A, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

    contains(candidate.display_name()) || candidate.tags().iter().any(|tag| contains(tag))
}
