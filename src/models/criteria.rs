use crate::core::error::FilterError;
use crate::models::domains::FacetDomains;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub(crate) const ALL: &str = "all";

/// A facet value that is either the `all` sentinel or one concrete value.
///
/// Serializes as the plain string, with `"all"` reserved for the sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    #[default]
    All,
    Value(String),
}

impl Selection {
    pub fn value(value: impl Into<String>) -> Self {
        let value: String = value.into();
        Selection::from(value)
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn as_value(&self) -> Option<&str> {
        match self {
            Selection::All => None,
            Selection::Value(v) => Some(v),
        }
    }

    /// `All` accepts anything; a concrete value needs an equal attribute
    pub fn accepts(&self, attribute: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Value(expected) => attribute == Some(expected.as_str()),
        }
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        if value == ALL {
            Selection::All
        } else {
            Selection::Value(value)
        }
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Selection::from(value.to_string())
    }
}

impl From<Selection> for String {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::All => ALL.to_string(),
            Selection::Value(v) => v,
        }
    }
}

/// Inclusive numeric bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Numeric `[min, max]` filter, inactive while it spans its whole domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeFacet {
    pub key: String,
    pub min: f64,
    pub max: f64,
    pub domain: Bounds,
}

impl RangeFacet {
    pub fn new(key: &str, domain: Bounds) -> Self {
        Self {
            key: key.to_string(),
            min: domain.min,
            max: domain.max,
            domain,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            min: self.min,
            max: self.max,
        }
    }

    pub fn is_active(&self) -> bool {
        self.bounds() != self.domain
    }
}

/// Any-of filter over a categorical attribute; empty means "any"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiSelectFacet {
    pub key: String,
    #[serde(default)]
    pub selected: BTreeSet<String>,
}

impl MultiSelectFacet {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            selected: BTreeSet::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.selected.is_empty()
    }
}

/// Parent/child pair whose child domain depends on the parent (country → city)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadingFacet {
    pub parent_key: String,
    #[serde(default)]
    pub parent_value: Selection,
    pub child_key: String,
    #[serde(default)]
    pub child_value: Selection,
}

impl CascadingFacet {
    pub fn new(parent_key: &str, child_key: &str) -> Self {
        Self {
            parent_key: parent_key.to_string(),
            parent_value: Selection::All,
            child_key: child_key.to_string(),
            child_value: Selection::All,
        }
    }
}

/// Exact-value filter with an `all` sentinel (e.g. smoking)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleSelectFacet {
    pub key: String,
    #[serde(default)]
    pub value: Selection,
}

/// Complete set of facet selections driving a discovery query.
///
/// Built all-inactive from the domain tables and changed only through the
/// `with_*`/`clear_*` operations, each of which returns a new value. Parent
/// changes on cascading facets go through [`crate::core::cascade::on_parent_change`]
/// so the child selection is reset along with it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criteria {
    #[serde(default)]
    ranges: Vec<RangeFacet>,
    #[serde(default)]
    selections: Vec<MultiSelectFacet>,
    #[serde(default)]
    cascades: Vec<CascadingFacet>,
    #[serde(default)]
    single_select: Option<SingleSelectFacet>,
    #[serde(default)]
    text: String,
}

impl Criteria {
    /// All-inactive criteria covering every facet the tables declare
    pub fn from_domains(domains: &FacetDomains) -> Self {
        Self {
            ranges: domains
                .ranges
                .iter()
                .map(|r| {
                    RangeFacet::new(
                        &r.key,
                        Bounds {
                            min: r.min,
                            max: r.max,
                        },
                    )
                })
                .collect(),
            selections: domains
                .options
                .iter()
                .map(|o| MultiSelectFacet::new(&o.key))
                .collect(),
            cascades: domains
                .cascades
                .iter()
                .map(|c| CascadingFacet::new(&c.parent_key, &c.child_key))
                .collect(),
            single_select: domains.single_select.as_ref().map(|s| SingleSelectFacet {
                key: s.key.clone(),
                value: Selection::All,
            }),
            text: String::new(),
        }
    }

    /// Assemble criteria from explicit facets, bypassing the update operations
    pub fn from_parts(
        ranges: Vec<RangeFacet>,
        selections: Vec<MultiSelectFacet>,
        cascades: Vec<CascadingFacet>,
        single_select: Option<SingleSelectFacet>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            ranges,
            selections,
            cascades,
            single_select,
            text: text.into(),
        }
    }

    pub fn ranges(&self) -> &[RangeFacet] {
        &self.ranges
    }

    pub fn selections(&self) -> &[MultiSelectFacet] {
        &self.selections
    }

    pub fn cascades(&self) -> &[CascadingFacet] {
        &self.cascades
    }

    pub fn single_select(&self) -> Option<&SingleSelectFacet> {
        self.single_select.as_ref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn range(&self, key: &str) -> Option<&RangeFacet> {
        self.ranges.iter().find(|r| r.key == key)
    }

    pub fn selection(&self, key: &str) -> Option<&MultiSelectFacet> {
        self.selections.iter().find(|s| s.key == key)
    }

    pub fn cascade(&self, parent_key: &str) -> Option<&CascadingFacet> {
        self.cascades.iter().find(|c| c.parent_key == parent_key)
    }

    /// Narrow a range facet.
    ///
    /// Bounds that overlap the declared domain are clamped to it; a request
    /// lying entirely outside the domain fails with `InvalidRange`.
    pub fn with_range(&self, key: &str, min: f64, max: f64) -> Result<Self, FilterError> {
        let invalid = || FilterError::InvalidRange {
            key: key.to_string(),
            min,
            max,
        };
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(invalid());
        }

        let mut next = self.clone();
        let facet = next.range_mut(key)?;
        let domain = facet.domain;
        if max < domain.min || min > domain.max {
            return Err(invalid());
        }
        facet.min = min.max(domain.min).min(domain.max);
        facet.max = max.max(domain.min).min(domain.max);
        Ok(next)
    }

    pub fn clear_range(&self, key: &str) -> Result<Self, FilterError> {
        let mut next = self.clone();
        let facet = next.range_mut(key)?;
        facet.min = facet.domain.min;
        facet.max = facet.domain.max;
        Ok(next)
    }

    /// Replace the selected options of a multi-select facet
    pub fn with_selected<I, S>(&self, key: &str, values: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut next = self.clone();
        next.selection_mut(key)?.selected = values.into_iter().map(Into::into).collect();
        Ok(next)
    }

    /// Add the option if absent, remove it if present
    pub fn toggle_option(&self, key: &str, value: &str) -> Result<Self, FilterError> {
        let mut next = self.clone();
        let selected = &mut next.selection_mut(key)?.selected;
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        Ok(next)
    }

    pub fn clear_selection(&self, key: &str) -> Result<Self, FilterError> {
        let mut next = self.clone();
        next.selection_mut(key)?.selected.clear();
        Ok(next)
    }

    pub fn with_single_select(&self, value: impl Into<Selection>) -> Result<Self, FilterError> {
        let mut next = self.clone();
        let facet = next
            .single_select
            .as_mut()
            .ok_or_else(|| FilterError::UnknownFacet("single-select".to_string()))?;
        facet.value = value.into();
        Ok(next)
    }

    /// Narrow the child of a cascading pair without touching the parent
    pub fn with_child_value(
        &self,
        parent_key: &str,
        value: impl Into<Selection>,
    ) -> Result<Self, FilterError> {
        let mut next = self.clone();
        next.cascade_mut(parent_key)?.child_value = value.into();
        Ok(next)
    }

    pub fn with_text(&self, query: impl Into<String>) -> Self {
        Self {
            text: query.into(),
            ..self.clone()
        }
    }

    /// Every facet back to its inactive value
    pub fn reset(&self) -> Self {
        let mut next = self.clone();
        for facet in &mut next.ranges {
            facet.min = facet.domain.min;
            facet.max = facet.domain.max;
        }
        for facet in &mut next.selections {
            facet.selected.clear();
        }
        for facet in &mut next.cascades {
            facet.parent_value = Selection::All;
            facet.child_value = Selection::All;
        }
        if let Some(facet) = next.single_select.as_mut() {
            facet.value = Selection::All;
        }
        next.text.clear();
        next
    }

    pub(crate) fn cascade_mut(&mut self, parent_key: &str) -> Result<&mut CascadingFacet, FilterError> {
        self.cascades
            .iter_mut()
            .find(|c| c.parent_key == parent_key)
            .ok_or_else(|| FilterError::UnknownFacet(parent_key.to_string()))
    }

    fn range_mut(&mut self, key: &str) -> Result<&mut RangeFacet, FilterError> {
        self.ranges
            .iter_mut()
            .find(|r| r.key == key)
            .ok_or_else(|| FilterError::UnknownFacet(key.to_string()))
    }

    fn selection_mut(&mut self, key: &str) -> Result<&mut MultiSelectFacet, FilterError> {
        self.selections
            .iter_mut()
            .find(|s| s.key == key)
            .ok_or_else(|| FilterError::UnknownFacet(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::keys;

    #[test]
    fn test_selection_string_form() {
        assert_eq!(Selection::from("all"), Selection::All);
        assert_eq!(Selection::from("Berlin"), Selection::Value("Berlin".to_string()));
        assert_eq!(serde_json::to_string(&Selection::All).unwrap(), "\"all\"");

        let parsed: Selection = serde_json::from_str("\"Paris\"").unwrap();
        assert_eq!(parsed.as_value(), Some("Paris"));
    }

    #[test]
    fn test_defaults_are_inactive() {
        let criteria = Criteria::from_domains(&FacetDomains::default());

        assert!(criteria.ranges().iter().all(|r| !r.is_active()));
        assert!(criteria.selections().iter().all(|s| !s.is_active()));
        assert!(criteria.cascades().iter().all(|c| c.parent_value.is_all() && c.child_value.is_all()));
        assert!(criteria.single_select().unwrap().value.is_all());
        assert!(criteria.text().is_empty());
    }

    #[test]
    fn test_with_range_is_pure_and_clamps() {
        let criteria = Criteria::from_domains(&FacetDomains::default());
        let narrowed = criteria.with_range(keys::AGE, 10.0, 30.0).unwrap();

        assert!(!criteria.range(keys::AGE).unwrap().is_active());
        let age = narrowed.range(keys::AGE).unwrap();
        assert_eq!((age.min, age.max), (18.0, 30.0));
        assert!(age.is_active());
    }

    #[test]
    fn test_with_range_rejects_bad_input() {
        let criteria = Criteria::from_domains(&FacetDomains::default());

        assert!(matches!(
            criteria.with_range(keys::AGE, 40.0, 30.0),
            Err(FilterError::InvalidRange { .. })
        ));
        assert!(matches!(
            criteria.with_range(keys::AGE, f64::NAN, 30.0),
            Err(FilterError::InvalidRange { .. })
        ));
        assert!(matches!(
            criteria.with_range(keys::AGE, 120.0, 130.0),
            Err(FilterError::InvalidRange { .. })
        ));
        assert!(matches!(
            criteria.with_range(keys::AGE, 5.0, 10.0),
            Err(FilterError::InvalidRange { .. })
        ));
        assert_eq!(
            criteria.with_range("shoeSize", 1.0, 2.0),
            Err(FilterError::UnknownFacet("shoeSize".to_string()))
        );
    }

    #[test]
    fn test_toggle_option() {
        let criteria = Criteria::from_domains(&FacetDomains::default());
        let once = criteria.toggle_option(keys::ETHNICITY, "Asian").unwrap();
        let twice = once.toggle_option(keys::ETHNICITY, "Asian").unwrap();

        assert!(once.selection(keys::ETHNICITY).unwrap().selected.contains("Asian"));
        assert!(!twice.selection(keys::ETHNICITY).unwrap().is_active());
    }

    #[test]
    fn test_reset_clears_everything() {
        let criteria = Criteria::from_domains(&FacetDomains::default())
            .with_range(keys::AGE, 20.0, 30.0)
            .unwrap()
            .with_selected(keys::BODY_TYPE, ["Slim"])
            .unwrap()
            .with_single_select("Never")
            .unwrap()
            .with_child_value(keys::COUNTRY, "Berlin")
            .unwrap()
            .with_text("hiking");

        assert_eq!(criteria.reset(), Criteria::from_domains(&FacetDomains::default()));
    }

    #[test]
    fn test_single_select_missing_facet() {
        let criteria = Criteria::from_domains(&FacetDomains::places());
        assert!(criteria.with_single_select("Never").is_err());
    }
}
