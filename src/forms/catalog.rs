use std::collections::BTreeMap;

use super::{Draft, Form, Notification};
use crate::catalog::{
    Category, CategoryDetail, CategoryInput, Item, ItemInput, Link, Sample, SampleInput, Section,
    SectionInput,
};
use crate::error::{Error, Result};

/// Trimmed text, or `None` when blank
pub(crate) fn optional(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

pub(crate) fn required(text: &str, message: &str) -> Result<String> {
    optional(text).ok_or_else(|| Error::validation(message))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryDraft {
    pub name: String,
}

impl From<&Category> for CategoryDraft {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
        }
    }
}

impl Draft for CategoryDraft {
    type Payload = CategoryInput;

    fn validate(&self) -> Result<CategoryInput> {
        Ok(CategoryInput {
            name: required(&self.name, "Please provide a category name")?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionDraft {
    pub title: String,
    /// Falls back to the title when left blank
    pub name: String,
    pub description: String,
    pub additional_info: String,
    pub image: String,
}

impl From<&Section> for SectionDraft {
    fn from(section: &Section) -> Self {
        let title = if section.title.trim().is_empty() {
            section.name.clone()
        } else {
            section.title.clone()
        };
        Self {
            title,
            name: section.name.clone(),
            description: section.description.clone().unwrap_or_default(),
            additional_info: section.additional_info.clone().unwrap_or_default(),
            image: section.image.clone().unwrap_or_default(),
        }
    }
}

impl Draft for SectionDraft {
    type Payload = SectionInput;

    fn validate(&self) -> Result<SectionInput> {
        let title = required(&self.title, "Please provide a section title")?;
        Ok(SectionInput {
            name: optional(&self.name).unwrap_or_else(|| title.clone()),
            title,
            description: optional(&self.description),
            additional_info: optional(&self.additional_info),
            image: optional(&self.image),
        })
    }
}

/// Draft of an item. The price stays text until submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    /// Section the item goes into
    pub section_id: Option<String>,
    pub name: String,
    pub description: String,
    pub price: String,
    pub features: Vec<String>,
    pub fields: BTreeMap<String, String>,
}

impl From<&Item> for ItemDraft {
    fn from(item: &Item) -> Self {
        Self {
            section_id: None,
            name: item.name.clone(),
            description: item.description.clone().unwrap_or_default(),
            price: item.price.to_string(),
            features: item.features.clone(),
            fields: item.fields.clone(),
        }
    }
}

impl ItemDraft {
    pub fn for_section(section_id: &str) -> Self {
        Self {
            section_id: Some(section_id.to_string()),
            ..Self::default()
        }
    }

    pub fn in_section(mut self, section_id: &str) -> Self {
        self.section_id = Some(section_id.to_string());
        self
    }

    /// Append a feature; blank input is refused
    pub fn with_feature(mut self, feature: &str) -> Result<Self> {
        let feature = required(feature, "Please enter a feature")?;
        self.features.push(feature);
        Ok(self)
    }

    /// Remove the feature at `index`; out-of-range indexes change nothing
    pub fn without_feature(mut self, index: usize) -> Self {
        if index < self.features.len() {
            self.features.remove(index);
        }
        self
    }

    /// Set a custom field, overwriting any value already under `key`
    pub fn with_field(mut self, key: &str, value: &str) -> Result<Self> {
        self.fields = with_field(self.fields, key, value)?;
        Ok(self)
    }

    pub fn without_field(mut self, key: &str) -> Self {
        self.fields.remove(key);
        self
    }
}

fn with_field(
    mut fields: BTreeMap<String, String>,
    key: &str,
    value: &str,
) -> Result<BTreeMap<String, String>> {
    let key = required(key, "Please provide both a field name and a value")?;
    let value = required(value, "Please provide both a field name and a value")?;
    fields.insert(key, value);
    Ok(fields)
}

/// Parse a price input: finite and not negative
pub fn parse_price(input: &str) -> Result<f64> {
    match input.trim().parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(Error::validation("Please enter a valid price")),
    }
}

impl Draft for ItemDraft {
    type Payload = ItemInput;

    fn section(&self) -> Option<&str> {
        self.section_id.as_deref()
    }

    fn place_in(&mut self, section_id: &str) {
        self.section_id = Some(section_id.to_string());
    }

    fn validate(&self) -> Result<ItemInput> {
        required(self.section_id.as_deref().unwrap_or_default(), "Please select a section")?;
        Ok(ItemInput {
            name: required(&self.name, "Please provide a name")?,
            description: optional(&self.description),
            price: parse_price(&self.price)?,
            features: self.features.clone(),
            fields: self.fields.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleDraft {
    /// Section the sample goes into
    pub section_id: Option<String>,
    pub name: String,
    pub description: String,
    pub image: String,
    pub preview: String,
    pub links: Vec<Link>,
    pub fields: BTreeMap<String, String>,
}

impl From<&Sample> for SampleDraft {
    fn from(sample: &Sample) -> Self {
        Self {
            section_id: None,
            name: sample.name.clone(),
            description: sample.description.clone().unwrap_or_default(),
            image: sample.image.clone().unwrap_or_default(),
            preview: sample.preview.clone().unwrap_or_default(),
            links: sample.links.clone(),
            fields: sample.fields.clone(),
        }
    }
}

impl SampleDraft {
    pub fn for_section(section_id: &str) -> Self {
        Self {
            section_id: Some(section_id.to_string()),
            ..Self::default()
        }
    }

    pub fn in_section(mut self, section_id: &str) -> Self {
        self.section_id = Some(section_id.to_string());
        self
    }

    /// Append a link; both title and URL are required
    pub fn with_link(mut self, title: &str, url: &str) -> Result<Self> {
        self.links.push(Link {
            title: required(title, "Please provide both a link title and URL")?,
            url: required(url, "Please provide both a link title and URL")?,
        });
        Ok(self)
    }

    pub fn without_link(mut self, index: usize) -> Self {
        if index < self.links.len() {
            self.links.remove(index);
        }
        self
    }

    pub fn with_field(mut self, key: &str, value: &str) -> Result<Self> {
        self.fields = with_field(self.fields, key, value)?;
        Ok(self)
    }

    pub fn without_field(mut self, key: &str) -> Self {
        self.fields.remove(key);
        self
    }
}

impl Draft for SampleDraft {
    type Payload = SampleInput;

    fn section(&self) -> Option<&str> {
        self.section_id.as_deref()
    }

    fn place_in(&mut self, section_id: &str) {
        self.section_id = Some(section_id.to_string());
    }

    fn validate(&self) -> Result<SampleInput> {
        required(self.section_id.as_deref().unwrap_or_default(), "Please select a section")?;
        Ok(SampleInput {
            name: required(&self.name, "Please provide a name")?,
            description: optional(&self.description),
            image: optional(&self.image),
            preview: optional(&self.preview),
            links: self.links.clone(),
            fields: self.fields.clone(),
        })
    }
}

impl CategoryDetail {
    /// Submit an item form to the controller of the section its draft names
    pub async fn submit_item(&self, form: &mut Form<ItemDraft>) -> Notification {
        match form.draft().section_id.clone().filter(|id| !id.is_empty()) {
            Some(section_id) => {
                let controller = self.items(&section_id);
                form.submit(&*controller).await
            }
            None => form
                .begin_submit()
                .err()
                .unwrap_or_else(|| Notification::error("Please select a section")),
        }
    }

    /// Submit a sample form to the controller of the section its draft names
    pub async fn submit_sample(&self, form: &mut Form<SampleDraft>) -> Notification {
        match form.draft().section_id.clone().filter(|id| !id.is_empty()) {
            Some(section_id) => {
                let controller = self.samples(&section_id);
                form.submit(&*controller).await
            }
            None => form
                .begin_submit()
                .err()
                .unwrap_or_else(|| Notification::error("Please select a section")),
        }
    }

    /// Seed an item edit form from the section's loaded items
    pub fn edit_item(&self, section_id: &str, item_id: &str) -> Option<Form<ItemDraft>> {
        let item = self.items(section_id).open_edit(item_id)?;
        Some(Form::edit(item_id, ItemDraft::from(&item).in_section(section_id)))
    }

    /// Seed a sample edit form from the section's loaded samples
    pub fn edit_sample(&self, section_id: &str, sample_id: &str) -> Option<Form<SampleDraft>> {
        let sample = self.samples(section_id).open_edit(sample_id)?;
        Some(Form::edit(sample_id, SampleDraft::from(&sample).in_section(section_id)))
    }
}
