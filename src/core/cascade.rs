use crate::core::error::FilterError;
use crate::models::{CascadeTable, Criteria, Selection};

/// Select a new parent value, resetting the dependent child to `all`.
///
/// Re-selecting the current parent is a no-op and keeps the child.
pub fn on_parent_change(
    criteria: &Criteria,
    parent_key: &str,
    value: impl Into<Selection>,
) -> Result<Criteria, FilterError> {
    let value = value.into();
    let mut next = criteria.clone();
    let facet = next.cascade_mut(parent_key)?;

    if facet.parent_value != value {
        tracing::trace!(
            "Parent {} changed {:?} -> {:?}, resetting {}",
            parent_key,
            facet.parent_value,
            value,
            facet.child_key
        );
        facet.parent_value = value;
        facet.child_value = Selection::All;
    }

    Ok(next)
}

/// Valid child options for a parent value, `all` first.
///
/// Never empty: `all` alone when the parent is `all` or has no known children.
pub fn child_domain(table: &CascadeTable, parent: &Selection) -> Vec<Selection> {
    let children = parent
        .as_value()
        .and_then(|value| table.children_of(value))
        .unwrap_or_default();

    std::iter::once(Selection::All)
        .chain(children.iter().map(|c| Selection::Value(c.clone())))
        .collect()
}

/// Reset a child selection that lies outside its parent's domain.
///
/// Criteria without a facet for the table's parent key, or with a consistent
/// pair, come back unchanged.
pub fn reconcile(criteria: &Criteria, table: &CascadeTable) -> Criteria {
    let mut next = criteria.clone();

    if let Ok(facet) = next.cascade_mut(&table.parent_key) {
        if !child_domain(table, &facet.parent_value).contains(&facet.child_value) {
            tracing::debug!(
                "Child {:?} is not valid under {:?}, resetting",
                facet.child_value,
                facet.parent_value
            );
            facet.child_value = Selection::All;
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{keys, FacetDomains};

    fn create_test_table() -> CascadeTable {
        CascadeTable::new(keys::COUNTRY, keys::CITY)
            .with_parent("Germany", &["Berlin", "Munich"])
            .with_parent("France", &["Paris", "Lyon"])
            .with_parent("Atlantis", &[])
    }

    fn germany_berlin() -> Criteria {
        let criteria = Criteria::from_domains(&FacetDomains::default());
        on_parent_change(&criteria, keys::COUNTRY, "Germany")
            .unwrap()
            .with_child_value(keys::COUNTRY, "Berlin")
            .unwrap()
    }

    #[test]
    fn test_parent_change_resets_child() {
        let next = on_parent_change(&germany_berlin(), keys::COUNTRY, "France").unwrap();
        let facet = next.cascade(keys::COUNTRY).unwrap();

        assert_eq!(facet.parent_value, Selection::value("France"));
        assert_eq!(facet.child_value, Selection::All);
    }

    #[test]
    fn test_same_parent_keeps_child() {
        let next = on_parent_change(&germany_berlin(), keys::COUNTRY, "Germany").unwrap();
        assert_eq!(next, germany_berlin());
    }

    #[test]
    fn test_parent_change_unknown_facet() {
        assert_eq!(
            on_parent_change(&germany_berlin(), "region", "EU"),
            Err(FilterError::UnknownFacet("region".to_string()))
        );
    }

    #[test]
    fn test_child_domain() {
        let table = create_test_table();

        assert_eq!(child_domain(&table, &Selection::All), vec![Selection::All]);
        assert_eq!(
            child_domain(&table, &Selection::value("France")),
            vec![Selection::All, Selection::value("Paris"), Selection::value("Lyon")]
        );
        assert_eq!(child_domain(&table, &Selection::value("Atlantis")), vec![Selection::All]);
        assert_eq!(child_domain(&table, &Selection::value("Spain")), vec![Selection::All]);
    }

    #[test]
    fn test_reconcile_out_of_domain_child() {
        let table = create_test_table();
        let bad = on_parent_change(
            &Criteria::from_domains(&FacetDomains::default()),
            keys::COUNTRY,
            "France",
        )
        .unwrap()
        .with_child_value(keys::COUNTRY, "Berlin")
        .unwrap();

        let fixed = reconcile(&bad, &table);
        let facet = fixed.cascade(keys::COUNTRY).unwrap();
        assert_eq!(facet.parent_value, Selection::value("France"));
        assert_eq!(facet.child_value, Selection::All);

        assert_eq!(reconcile(&germany_berlin(), &table), germany_berlin());
    }
}
