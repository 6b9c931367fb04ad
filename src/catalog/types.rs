//! Types for catalog entities

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::resource::Identified;

/// Top-level catalog grouping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// The category ID
    #[serde(alias = "_id")]
    pub id: String,

    /// The category name
    pub name: String,

    /// Sections in display order
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// Sub-grouping of a category holding items and samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// The section ID
    #[serde(alias = "_id")]
    pub id: String,

    /// Display title
    #[serde(default)]
    pub title: String,

    /// Short name, usually the title
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Rich text shown under the section
    #[serde(default)]
    pub additional_info: Option<String>,

    /// Image URL
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub items: Vec<Item>,

    #[serde(default)]
    pub samples: Vec<Sample>,
}

/// A priced catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// The item ID
    #[serde(alias = "_id")]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Non-negative price
    pub price: f64,

    /// Feature tags in insertion order
    #[serde(default)]
    pub features: Vec<String>,

    /// Custom key/value attributes
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

/// A titled link attached to a sample
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub title: String,
    pub url: String,
}

/// A non-priced showcase entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// The sample ID
    #[serde(alias = "_id")]
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Image URL
    #[serde(default)]
    pub image: Option<String>,

    /// Preview URL
    #[serde(default)]
    pub preview: Option<String>,

    #[serde(default)]
    pub links: Vec<Link>,

    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl Identified for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Section {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Item {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Sample {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Body of a category create or edit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryInput {
    pub name: String,
}

/// Body of a section create or edit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionInput {
    pub title: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Body of an item create or edit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub features: Vec<String>,
    pub fields: BTreeMap<String, String>,
}

/// Body of a sample create or edit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    pub links: Vec<Link>,
    pub fields: BTreeMap<String, String>,
}

/// Totals across a loaded catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub categories: usize,
    pub sections: usize,
    pub items: usize,
    pub samples: usize,
}

impl CatalogStats {
    pub fn of(categories: &[Category]) -> Self {
        categories.iter().fold(
            Self {
                categories: categories.len(),
                ..Self::default()
            },
            |mut stats, category| {
                stats.sections += category.sections.len();
                for section in &category.sections {
                    stats.items += section.items.len();
                    stats.samples += section.samples.len();
                }
                stats
            },
        )
    }
}
