use serde::{Deserialize, Serialize};

/// Attribute names understood by facets and sort keys.
pub mod keys {
    pub const AGE: &str = "age";
    pub const HEIGHT: &str = "height";
    pub const WEIGHT: &str = "weight";
    pub const DISTANCE_KM: &str = "distanceKm";
    pub const RATING: &str = "rating";
    pub const REVIEW_COUNT: &str = "reviewCount";

    pub const SEXUAL_ORIENTATION: &str = "sexualOrientation";
    pub const BODY_TYPE: &str = "bodyType";
    pub const POSITION: &str = "position";
    pub const ETHNICITY: &str = "ethnicity";
    pub const EYE_COLOR: &str = "eyeColor";
    pub const SKIN_COLOR: &str = "skinColor";
    pub const SMOKING_HABIT: &str = "smokingHabit";
    pub const ALCOHOL_HABIT: &str = "alcoholHabit";
    pub const COUNTRY: &str = "country";
    pub const CITY: &str = "city";
    pub const CATEGORY: &str = "category";

    pub const IS_ONLINE: &str = "isOnline";
    pub const IS_VERIFIED: &str = "isVerified";
}

/// Shared attribute-access contract for anything the engine can filter and sort.
///
/// Lookups never fail: an unknown key or an unset optional field resolves to
/// `None`, and the caller decides what a missing attribute means.
pub trait Attributes {
    fn id(&self) -> &str;
    fn display_name(&self) -> &str;
    fn numeric(&self, key: &str) -> Option<f64>;
    fn categorical(&self, key: &str) -> Option<&str>;
    fn flag(&self, key: &str) -> Option<bool>;
    fn tags(&self) -> &[String];
}

/// Dating profile shown on the Nearby People screen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(rename = "heightCm", default)]
    pub height_cm: Option<u16>,
    #[serde(rename = "weightKg", default)]
    pub weight_kg: Option<u16>,
    #[serde(rename = "distanceKm", default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(rename = "sexualOrientation", default)]
    pub sexual_orientation: Option<String>,
    #[serde(rename = "bodyType", default)]
    pub body_type: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub ethnicity: Option<String>,
    #[serde(rename = "eyeColor", default)]
    pub eye_color: Option<String>,
    #[serde(rename = "skinColor", default)]
    pub skin_color: Option<String>,
    #[serde(rename = "smokingHabit", default)]
    pub smoking_habit: Option<String>,
    #[serde(rename = "alcoholHabit", default)]
    pub alcohol_habit: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(rename = "isOnline", default)]
    pub is_online: bool,
    #[serde(rename = "isVerified", default)]
    pub is_verified: Option<bool>,
}

impl Attributes for Person {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn numeric(&self, key: &str) -> Option<f64> {
        match key {
            keys::AGE => self.age.map(f64::from),
            keys::HEIGHT => self.height_cm.map(f64::from),
            keys::WEIGHT => self.weight_kg.map(f64::from),
            keys::DISTANCE_KM => self.distance_km,
            _ => None,
        }
    }

    fn categorical(&self, key: &str) -> Option<&str> {
        let value = match key {
            keys::SEXUAL_ORIENTATION => &self.sexual_orientation,
            keys::BODY_TYPE => &self.body_type,
            keys::POSITION => &self.position,
            keys::ETHNICITY => &self.ethnicity,
            keys::EYE_COLOR => &self.eye_color,
            keys::SKIN_COLOR => &self.skin_color,
            keys::SMOKING_HABIT => &self.smoking_habit,
            keys::ALCOHOL_HABIT => &self.alcohol_habit,
            keys::COUNTRY => &self.country,
            keys::CITY => &self.city,
            _ => return None,
        };
        value.as_deref()
    }

    fn flag(&self, key: &str) -> Option<bool> {
        match key {
            keys::IS_ONLINE => Some(self.is_online),
            keys::IS_VERIFIED => self.is_verified,
            _ => None,
        }
    }

    fn tags(&self) -> &[String] {
        &self.interests
    }
}

/// Venue shown on the Places screen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(rename = "reviewCount", default)]
    pub review_count: Option<u32>,
    #[serde(rename = "distanceKm", default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "isOnline", default)]
    pub is_online: bool,
    #[serde(rename = "isVerified", default)]
    pub is_verified: Option<bool>,
}

impl Attributes for Place {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn numeric(&self, key: &str) -> Option<f64> {
        match key {
            keys::RATING => self.rating,
            keys::REVIEW_COUNT => self.review_count.map(f64::from),
            keys::DISTANCE_KM => self.distance_km,
            _ => None,
        }
    }

    fn categorical(&self, key: &str) -> Option<&str> {
        let value = match key {
            keys::CATEGORY => &self.category,
            keys::COUNTRY => &self.country,
            keys::CITY => &self.city,
            _ => return None,
        };
        value.as_deref()
    }

    fn flag(&self, key: &str) -> Option<bool> {
        match key {
            keys::IS_ONLINE => Some(self.is_online),
            keys::IS_VERIFIED => self.is_verified,
            _ => None,
        }
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// A filterable entity from either discovery screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Candidate {
    Person(Person),
    Place(Place),
}

impl Candidate {
    fn inner(&self) -> &dyn Attributes {
        match self {
            Candidate::Person(person) => person,
            Candidate::Place(place) => place,
        }
    }

    /// Geographic position, when the candidate source supplied one
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let (lat, lon) = match self {
            Candidate::Person(p) => (p.latitude, p.longitude),
            Candidate::Place(p) => (p.latitude, p.longitude),
        };
        lat.zip(lon)
    }

    pub(crate) fn set_distance_km(&mut self, distance_km: f64) {
        match self {
            Candidate::Person(p) => p.distance_km = Some(distance_km),
            Candidate::Place(p) => p.distance_km = Some(distance_km),
        }
    }
}

impl Attributes for Candidate {
    fn id(&self) -> &str {
        self.inner().id()
    }

    fn display_name(&self) -> &str {
        self.inner().display_name()
    }

    fn numeric(&self, key: &str) -> Option<f64> {
        self.inner().numeric(key)
    }

    fn categorical(&self, key: &str) -> Option<&str> {
        self.inner().categorical(key)
    }

    fn flag(&self, key: &str) -> Option<bool> {
        self.inner().flag(key)
    }

    fn tags(&self) -> &[String] {
        self.inner().tags()
    }
}

impl From<Person> for Candidate {
    fn from(person: Person) -> Self {
        Candidate::Person(person)
    }
}

impl From<Place> for Candidate {
    fn from(place: Place) -> Self {
        Candidate::Place(place)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_attribute_lookup() {
        let person = Person {
            id: "p1".to_string(),
            name: "Alex".to_string(),
            age: Some(26),
            country: Some("US".to_string()),
            ..Default::default()
        };
        let candidate = Candidate::from(person);

        assert_eq!(candidate.numeric(keys::AGE), Some(26.0));
        assert_eq!(candidate.categorical(keys::COUNTRY), Some("US"));
        assert_eq!(candidate.categorical(keys::CITY), None);
        assert_eq!(candidate.numeric(keys::RATING), None);
        assert_eq!(candidate.flag(keys::IS_ONLINE), Some(false));
        assert_eq!(candidate.flag(keys::IS_VERIFIED), None);
    }

    #[test]
    fn test_candidate_tagged_json() {
        let json = r#"{"kind":"place","id":"c1","name":"Blue Bottle","rating":4.6,"reviewCount":120}"#;
        let candidate: Candidate = serde_json::from_str(json).unwrap();

        assert_eq!(candidate.id(), "c1");
        assert_eq!(candidate.numeric(keys::REVIEW_COUNT), Some(120.0));
        assert!(matches!(candidate, Candidate::Place(_)));
    }
}
