use crate::models::candidate::{keys, Attributes};
use crate::models::criteria::ALL;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading facet-domain tables
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Failed to read domain tables: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse domain tables: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid domain table: {0}")]
    Invalid(String),
}

/// Full numeric domain of a range facet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeDomain {
    pub key: String,
    pub min: f64,
    pub max: f64,
}

/// Declared option list of a categorical facet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionDomain {
    pub key: String,
    pub values: Vec<String>,
}

/// One parent value and its known children, in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CascadeEntry {
    pub value: String,
    #[serde(default)]
    pub children: Vec<String>,
}

/// Parent-to-children lookup for a cascading facet pair (e.g. country → city)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CascadeTable {
    pub parent_key: String,
    pub child_key: String,
    #[serde(default)]
    pub parents: Vec<CascadeEntry>,
}

impl CascadeTable {
    pub fn new(parent_key: &str, child_key: &str) -> Self {
        Self {
            parent_key: parent_key.to_string(),
            child_key: child_key.to_string(),
            parents: Vec::new(),
        }
    }

    /// Append a parent with its children
    pub fn with_parent(mut self, value: &str, children: &[&str]) -> Self {
        self.parents.push(CascadeEntry {
            value: value.to_string(),
            children: children.iter().map(|c| c.to_string()).collect(),
        });
        self
    }

    /// Derive a table from the values actually present in a candidate set.
    ///
    /// Parents and children keep first-seen order. Candidates lacking either
    /// attribute, or carrying the reserved `all` value, are skipped.
    pub fn from_candidates<'a, A, I>(candidates: I, parent_key: &str, child_key: &str) -> Self
    where
        A: Attributes + 'a,
        I: IntoIterator<Item = &'a A>,
    {
        let mut table = Self::new(parent_key, child_key);

        for candidate in candidates {
            let (Some(parent), Some(child)) = (
                candidate.categorical(parent_key),
                candidate.categorical(child_key),
            ) else {
                continue;
            };
            if parent == ALL || child == ALL {
                continue;
            }

            let index = match table.parents.iter().position(|e| e.value == parent) {
                Some(index) => index,
                None => {
                    table.parents.push(CascadeEntry {
                        value: parent.to_string(),
                        children: Vec::new(),
                    });
                    table.parents.len() - 1
                }
            };

            let children = &mut table.parents[index].children;
            if !children.iter().any(|c| c == child) {
                children.push(child.to_string());
            }
        }

        table
    }

    /// Known children of a parent, or `None` if the parent is not declared
    pub fn children_of(&self, parent: &str) -> Option<&[String]> {
        self.parents
            .iter()
            .find(|entry| entry.value == parent)
            .map(|entry| entry.children.as_slice())
    }

    pub fn parent_values(&self) -> impl Iterator<Item = &str> {
        self.parents.iter().map(|entry| entry.value.as_str())
    }
}

/// Static facet-domain configuration for one discovery screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetDomains {
    #[serde(default)]
    pub ranges: Vec<RangeDomain>,
    #[serde(default)]
    pub options: Vec<OptionDomain>,
    #[serde(default)]
    pub single_select: Option<OptionDomain>,
    #[serde(default)]
    pub cascades: Vec<CascadeTable>,
}

impl FacetDomains {
    /// Parse and validate domain tables from TOML
    pub fn from_toml_str(source: &str) -> Result<Self, DomainError> {
        let domains: FacetDomains = toml::from_str(source)?;
        domains.validate()?;
        Ok(domains)
    }

    /// Load domain tables from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DomainError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        for range in &self.ranges {
            if !range.min.is_finite() || !range.max.is_finite() || range.min > range.max {
                return Err(DomainError::Invalid(format!(
                    "range domain {} has bounds [{}, {}]",
                    range.key, range.min, range.max
                )));
            }
        }

        let option_lists = self.options.iter().chain(self.single_select.as_ref());
        for domain in option_lists {
            if domain.values.iter().any(|v| v == ALL) {
                return Err(reserved_value(&domain.key));
            }
        }

        for table in &self.cascades {
            let mut seen = HashSet::new();
            for entry in &table.parents {
                if entry.value == ALL {
                    return Err(reserved_value(&table.parent_key));
                }
                if entry.children.iter().any(|c| c == ALL) {
                    return Err(reserved_value(&table.child_key));
                }
                if !seen.insert(entry.value.as_str()) {
                    return Err(DomainError::Invalid(format!(
                        "cascade {} -> {} declares parent {} twice",
                        table.parent_key, table.child_key, entry.value
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn range(&self, key: &str) -> Option<&RangeDomain> {
        self.ranges.iter().find(|r| r.key == key)
    }

    pub fn options(&self, key: &str) -> Option<&OptionDomain> {
        self.options.iter().find(|o| o.key == key)
    }

    pub fn cascade(&self, parent_key: &str) -> Option<&CascadeTable> {
        self.cascades.iter().find(|c| c.parent_key == parent_key)
    }

    /// Built-in tables for the Places screen
    pub fn places() -> Self {
        Self {
            ranges: vec![
                range(keys::RATING, 0.0, 5.0),
                range(keys::DISTANCE_KM, 0.0, 50.0),
                range(keys::REVIEW_COUNT, 0.0, 10_000.0),
            ],
            options: vec![options(
                keys::CATEGORY,
                &["Cafe", "Restaurant", "Bar", "Club", "Gym", "Park", "Museum"],
            )],
            single_select: None,
            cascades: vec![location_table()],
        }
    }
}

/// Built-in tables for the Nearby People screen
impl Default for FacetDomains {
    fn default() -> Self {
        Self {
            ranges: vec![
                range(keys::AGE, 18.0, 99.0),
                range(keys::HEIGHT, 140.0, 220.0),
                range(keys::WEIGHT, 40.0, 150.0),
            ],
            options: vec![
                options(
                    keys::SEXUAL_ORIENTATION,
                    &["Straight", "Gay", "Lesbian", "Bisexual", "Pansexual", "Queer", "Asexual"],
                ),
                options(
                    keys::BODY_TYPE,
                    &["Slim", "Athletic", "Average", "Muscular", "Curvy", "Large"],
                ),
                options(keys::POSITION, &["Top", "Bottom", "Versatile", "Side"]),
                options(
                    keys::ETHNICITY,
                    &[
                        "Asian",
                        "Black",
                        "Latino",
                        "Middle Eastern",
                        "Mixed",
                        "Native American",
                        "Pacific Islander",
                        "South Asian",
                        "White",
                        "Other",
                    ],
                ),
                options(
                    keys::EYE_COLOR,
                    &["Brown", "Blue", "Green", "Hazel", "Gray", "Amber"],
                ),
                options(
                    keys::SKIN_COLOR,
                    &["Fair", "Light", "Medium", "Olive", "Tan", "Brown", "Dark"],
                ),
                options(keys::ALCOHOL_HABIT, &["Never", "Socially", "Regularly"]),
            ],
            single_select: Some(options(
                keys::SMOKING_HABIT,
                &["Never", "Occasionally", "Regularly"],
            )),
            cascades: vec![location_table()],
        }
    }
}

fn range(key: &str, min: f64, max: f64) -> RangeDomain {
    RangeDomain {
        key: key.to_string(),
        min,
        max,
    }
}

fn options(key: &str, values: &[&str]) -> OptionDomain {
    OptionDomain {
        key: key.to_string(),
        values: values.iter().map(|v| v.to_string()).collect(),
    }
}

fn location_table() -> CascadeTable {
    CascadeTable::new(keys::COUNTRY, keys::CITY)
        .with_parent(
            "United States",
            &["New York", "Los Angeles", "Chicago", "Miami", "San Francisco"],
        )
        .with_parent("United Kingdom", &["London", "Manchester", "Edinburgh"])
        .with_parent("Germany", &["Berlin", "Munich", "Hamburg", "Cologne"])
        .with_parent("France", &["Paris", "Lyon", "Marseille", "Nice"])
        .with_parent("Turkey", &["Istanbul", "Ankara", "Izmir", "Antalya"])
}

fn reserved_value(key: &str) -> DomainError {
    DomainError::Invalid(format!("facet {} declares the reserved value \"{}\"", key, ALL))
}
