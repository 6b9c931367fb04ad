//! Types for the business directory

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::resource::Identified;

/// Categories a business can be filed under
pub const BUSINESS_CATEGORIES: [&str; 14] = [
    "Restaurant",
    "Retail",
    "Healthcare",
    "Education",
    "Technology",
    "Finance",
    "Real Estate",
    "Entertainment",
    "Hospitality",
    "Professional Services",
    "Manufacturing",
    "Beauty & Wellness",
    "Automotive",
    "Other",
];

/// GeoJSON point; coordinates are `[longitude, latitude]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    pub kind: PointKind,
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointKind {
    #[default]
    Point,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            kind: PointKind::Point,
            coordinates: [longitude, latitude],
        }
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }
}

/// Postal address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    #[default]
    Email,
    Phone,
    Whatsapp,
}

/// One way of reaching a business
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "type")]
    pub kind: ContactKind,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Website {
    pub url: String,
    /// Role of the site, `main` unless stated otherwise
    #[serde(rename = "type", default = "Website::default_kind")]
    pub kind: String,
}

impl Website {
    fn default_kind() -> String {
        "main".to_string()
    }

    pub fn main(url: &str) -> Self {
        Self {
            url: url.to_string(),
            kind: Self::default_kind(),
        }
    }
}

/// A geolocated directory listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    /// The business ID
    #[serde(alias = "_id")]
    pub id: String,

    pub name: String,

    /// One of [`BUSINESS_CATEGORIES`]
    pub category: String,

    #[serde(default)]
    pub description: Option<String>,

    pub location: GeoPoint,

    pub address: Address,

    /// URL of the main image
    #[serde(default)]
    pub base_image: String,

    /// Gallery image URLs
    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub contacts: Vec<Contact>,

    #[serde(default)]
    pub websites: Vec<Website>,
}

impl Identified for Business {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Body of a business create or edit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessInput {
    pub name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub location: GeoPoint,
    pub address: Address,
    pub base_image: String,
    pub images: Vec<String>,
    pub contacts: Vec<Contact>,
    pub websites: Vec<Website>,
}

/// Address field the free-text search applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Name,
    City,
    State,
    Country,
}

impl SearchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::City => "city",
            SearchField::State => "state",
            SearchField::Country => "country",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SearchField::Name),
            "city" => Ok(SearchField::City),
            "state" => Ok(SearchField::State),
            "country" => Ok(SearchField::Country),
            _ => Err(Error::validation(format!("Unknown search field: {}", s))),
        }
    }
}

/// Server-side listing parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessQuery {
    /// 1-based page number
    pub page: u32,
    pub search: String,
    pub filter: SearchField,
}

impl Default for BusinessQuery {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            filter: SearchField::default(),
        }
    }
}

impl BusinessQuery {
    /// The search term and its field are sent only while a term is set
    pub(crate) fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("page".to_string(), self.page.to_string())];
        if !self.search.is_empty() {
            pairs.push(("search".to_string(), self.search.clone()));
            pairs.push(("filter".to_string(), self.filter.to_string()));
        }
        pairs
    }
}

/// Paginated listing body; unlike other routes the page is not nested in `data`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BusinessPage {
    pub data: Vec<Business>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct Pagination {
    pub pages: u32,
}
