//! Reference data endpoints (regions, cities, categories).

use serde::{Deserialize, Serialize};

/// One of the three enumerations the service publishes for the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Regions,
    Cities,
    Categories,
}

impl ReferenceKind {
    /// All kinds, in the order the form lays them out.
    pub const ALL: [ReferenceKind; 3] = [
        ReferenceKind::Regions,
        ReferenceKind::Cities,
        ReferenceKind::Categories,
    ];

    /// Request path relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            ReferenceKind::Regions => "/regions",
            ReferenceKind::Cities => "/cities",
            ReferenceKind::Categories => "/categories",
        }
    }

    /// JSON key holding the list in the response body.
    pub fn key(&self) -> &'static str {
        match self {
            ReferenceKind::Regions => "regions",
            ReferenceKind::Cities => "cities",
            ReferenceKind::Categories => "categories",
        }
    }

    /// Parse a user supplied name (`regions`, `city`, ...).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regions" | "region" => Some(ReferenceKind::Regions),
            "cities" | "city" => Some(ReferenceKind::Cities),
            "categories" | "category" => Some(ReferenceKind::Categories),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Body of `GET /regions`, `GET /cities` and `GET /categories`.
///
/// Each endpoint wraps its list under its own key; a missing key decodes to an
/// empty list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceListBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
}

impl ReferenceListBody {
    /// Take the list belonging to `kind`.
    pub fn into_options(self, kind: ReferenceKind) -> Vec<String> {
        let list = match kind {
            ReferenceKind::Regions => self.regions,
            ReferenceKind::Cities => self.cities,
            ReferenceKind::Categories => self.categories,
        };
        list.unwrap_or_default()
    }
}
