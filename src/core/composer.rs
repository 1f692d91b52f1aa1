use crate::core::{error::FilterError, filters::matches, sorting::{sort_candidates, SortKey}};
use crate::models::{keys, Attributes, Candidate, Criteria};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Filtered, ordered view of a candidate set plus its aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterResult {
    pub items: Vec<Candidate>,
    pub total: usize,
    #[serde(rename = "onlineCount")]
    pub online_count: usize,
    /// Count of `true` values per declared boolean flag
    #[serde(rename = "flagCounts")]
    pub flag_counts: BTreeMap<String, usize>,
}

impl FilterResult {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Discovery orchestrator: filter, then sort, then aggregate.
///
/// `query` is a pure function of its inputs; calling it twice with the same
/// arguments yields identical results, element order included.
#[derive(Debug, Clone)]
pub struct ResultComposer {
    flags: Vec<String>,
}

impl ResultComposer {
    pub fn new<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            flags: flags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_default_flags() -> Self {
        Self::new([keys::IS_ONLINE, keys::IS_VERIFIED])
    }

    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    /// Run the discovery pipeline over an in-memory candidate set
    ///
    /// # Arguments
    /// * `candidates` - Full candidate set for the session, in source order
    /// * `criteria` - Current facet selections
    /// * `sort` - Ordering for the filtered set
    ///
    /// # Returns
    /// FilterResult; an empty match set is a valid result, not an error
    pub fn query(&self, candidates: &[Candidate], criteria: &Criteria, sort: SortKey) -> FilterResult {
        let mut items: Vec<Candidate> = candidates
            .iter()
            .filter(|candidate| matches(*candidate, criteria))
            .cloned()
            .collect();

        sort_candidates(&mut items, sort);

        let online_count = count_flag(&items, keys::IS_ONLINE);
        let flag_counts = self
            .flags
            .iter()
            .map(|flag| (flag.clone(), count_flag(&items, flag)))
            .collect();

        tracing::debug!(
            "Query matched {} of {} candidates (sort: {}, online: {})",
            items.len(),
            candidates.len(),
            sort,
            online_count
        );

        FilterResult {
            total: items.len(),
            items,
            online_count,
            flag_counts,
        }
    }

    /// Same as [`query`](Self::query) with the sort key given by name
    pub fn query_by_name(
        &self,
        candidates: &[Candidate],
        criteria: &Criteria,
        sort_key: &str,
    ) -> Result<FilterResult, FilterError> {
        let sort = sort_key.parse::<SortKey>()?;
        Ok(self.query(candidates, criteria, sort))
    }
}

impl Default for ResultComposer {
    fn default() -> Self {
        Self::with_default_flags()
    }
}

fn count_flag(items: &[Candidate], flag: &str) -> usize {
    items.iter().filter(|c| c.flag(flag) == Some(true)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cascade::on_parent_change;
    use crate::models::{CascadeTable, FacetDomains, Person, RangeDomain};

    fn create_candidate(id: &str, name: &str, age: u8, city: &str, online: bool) -> Candidate {
        Candidate::from(Person {
            id: id.to_string(),
            name: name.to_string(),
            age: Some(age),
            country: Some("US".to_string()),
            city: Some(city.to_string()),
            is_online: online,
            is_verified: Some(id == "1"),
            ..Default::default()
        })
    }

    fn create_domains() -> FacetDomains {
        FacetDomains {
            ranges: vec![RangeDomain {
                key: keys::AGE.to_string(),
                min: 18.0,
                max: 99.0,
            }],
            options: vec![],
            single_select: None,
            cascades: vec![CascadeTable::new(keys::COUNTRY, keys::CITY)
                .with_parent("US", &["NY", "LA"])],
        }
    }

    #[test]
    fn test_query_basic() {
        let composer = ResultComposer::with_default_flags();
        let candidates = vec![
            create_candidate("1", "Alex", 26, "NY", true),
            create_candidate("2", "Sam", 40, "LA", false),
        ];
        let criteria = Criteria::from_domains(&create_domains())
            .with_range(keys::AGE, 18.0, 30.0)
            .unwrap();
        let criteria = on_parent_change(&criteria, keys::COUNTRY, "US").unwrap();

        let result = composer.query(&candidates, &criteria, SortKey::Name);

        assert_eq!(result.total, 1);
        assert_eq!(result.items[0].display_name(), "Alex");
        assert_eq!(result.online_count, 1);
        assert_eq!(result.flag_counts[keys::IS_VERIFIED], 1);
    }

    #[test]
    fn test_aggregates_use_filtered_set() {
        let composer = ResultComposer::with_default_flags();
        let candidates = vec![
            create_candidate("1", "Alex", 26, "NY", true),
            create_candidate("2", "Sam", 40, "LA", true),
            create_candidate("3", "Kim", 22, "LA", true),
        ];
        let criteria = Criteria::from_domains(&create_domains())
            .with_child_value(keys::COUNTRY, "LA")
            .unwrap();

        let result = composer.query(&candidates, &criteria, SortKey::Name);

        assert_eq!(result.total, 2);
        assert_eq!(result.online_count, 2);
        assert_eq!(result.flag_counts[keys::IS_VERIFIED], 0);
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let composer = ResultComposer::default();
        let candidates = vec![create_candidate("1", "Alex", 26, "NY", true)];
        let criteria = Criteria::from_domains(&create_domains()).with_text("nobody");

        let result = composer.query(&candidates, &criteria, SortKey::Distance);

        assert!(result.is_empty());
        assert_eq!(result.total, 0);
        assert_eq!(result.online_count, 0);
    }

    #[test]
    fn test_query_by_name_rejects_unknown_key() {
        let composer = ResultComposer::default();
        let criteria = Criteria::from_domains(&create_domains());

        assert_eq!(
            composer.query_by_name(&[], &criteria, "newest"),
            Err(FilterError::InvalidSortKey("newest".to_string()))
        );
        assert!(composer.query_by_name(&[], &criteria, "name").is_ok());
    }
}
