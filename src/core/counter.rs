use crate::models::Criteria;

/// Number of active facets, as shown on the filter badge.
///
/// Range facets count once however many bounds moved; multi-select facets
/// count each selected option; a cascading pair counts its parent and its
/// child separately. The free-text query never counts.
pub fn count_active(criteria: &Criteria) -> usize {
    let ranges = criteria.ranges().iter().filter(|f| f.is_active()).count();

    let selections: usize = criteria.selections().iter().map(|f| f.selected.len()).sum();

    let cascades: usize = criteria
        .cascades()
        .iter()
        .map(|f| usize::from(!f.parent_value.is_all()) + usize::from(!f.child_value.is_all()))
        .sum();

    let single = criteria
        .single_select()
        .map_or(0, |f| usize::from(!f.value.is_all()));

    ranges + selections + cascades + single
}
