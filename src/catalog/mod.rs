//! Categories, their sections, and the items and samples inside them

mod filter;
mod types;
mod view;

use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

use crate::controller::{ListController, LoadOutcome};
use crate::error::{Action, Error, Operation, Result};
use crate::fetch::ApiClient;
use crate::resource::{Listing, Resource, RestCollection};

pub use filter::*;
pub use types::*;
pub use view::ItemView;

pub type CategoryController = ListController<CategoryResource>;
pub type SectionController = ListController<SectionResource>;
pub type ItemController = ListController<ItemResource, ItemView>;
pub type SampleController = ListController<SampleResource>;

/// `/categories`
#[derive(Debug, Clone)]
pub struct CategoryResource {
    route: RestCollection,
}

impl CategoryResource {
    pub fn new(api: ApiClient) -> Self {
        Self {
            route: RestCollection::new(api, ["categories"], "category"),
        }
    }

    /// Fetch one category with its nested sections, items and samples
    pub async fn fetch(&self, id: &str) -> Result<Category> {
        self.route.fetch(id).await
    }
}

#[async_trait]
impl Resource for CategoryResource {
    type Entity = Category;
    type Input = CategoryInput;
    type Query = ();

    const ENTITY: &'static str = "category";

    async fn list(&self, _query: &()) -> Result<Listing<Category>> {
        Ok(Listing::single(self.route.list().await?))
    }

    async fn create(&self, input: &CategoryInput) -> Result<Category> {
        self.route.create(input).await
    }

    async fn update(&self, id: &str, input: &CategoryInput) -> Result<Category> {
        self.route.update(id, input).await
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.route.remove(id).await
    }
}

impl ListController<CategoryResource> {
    /// Totals across the loaded categories
    pub fn stats(&self) -> CatalogStats {
        CatalogStats::of(&self.entities())
    }
}

/// Fetch the parent category of a nested collection, reporting failure
/// against the nested entity
async fn fetch_parent(
    api: &ApiClient,
    category_id: &str,
    entity: &'static str,
) -> Result<Category> {
    let operation = Operation::new(Action::Fetch, entity);
    api.get(api.endpoint(&["categories", category_id])?, operation)
        .execute()
        .await
}

fn find_section(category: Category, section_id: &str, entity: &'static str) -> Result<Section> {
    category
        .sections
        .into_iter()
        .find(|s| s.id == section_id)
        .ok_or_else(|| {
            Error::request(
                Operation::new(Action::Fetch, entity),
                Some(StatusCode::NOT_FOUND),
                "Section not found",
            )
        })
}

/// `/categories/{cid}/sections`
#[derive(Debug, Clone)]
pub struct SectionResource {
    category_id: String,
    route: RestCollection,
}

impl SectionResource {
    pub fn new(api: ApiClient, category_id: &str) -> Self {
        Self {
            category_id: category_id.to_string(),
            route: RestCollection::new(api, ["categories", category_id, "sections"], "section"),
        }
    }

    pub fn category_id(&self) -> &str {
        &self.category_id
    }
}

#[async_trait]
impl Resource for SectionResource {
    type Entity = Section;
    type Input = SectionInput;
    type Query = ();

    const ENTITY: &'static str = "section";

    async fn list(&self, _query: &()) -> Result<Listing<Section>> {
        let category = fetch_parent(self.route.api(), &self.category_id, Self::ENTITY).await?;
        Ok(Listing::single(category.sections))
    }

    async fn create(&self, input: &SectionInput) -> Result<Section> {
        self.route.create(input).await
    }

    async fn update(&self, id: &str, input: &SectionInput) -> Result<Section> {
        self.route.update(id, input).await
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.route.remove(id).await
    }
}

/// `/categories/{cid}/sections/{sid}/items`
#[derive(Debug, Clone)]
pub struct ItemResource {
    category_id: String,
    section_id: String,
    route: RestCollection,
}

impl ItemResource {
    pub fn new(api: ApiClient, category_id: &str, section_id: &str) -> Self {
        Self {
            category_id: category_id.to_string(),
            section_id: section_id.to_string(),
            route: RestCollection::new(
                api,
                ["categories", category_id, "sections", section_id, "items"],
                "item",
            ),
        }
    }

    pub fn section_id(&self) -> &str {
        &self.section_id
    }
}

#[async_trait]
impl Resource for ItemResource {
    type Entity = Item;
    type Input = ItemInput;
    type Query = ();

    const ENTITY: &'static str = "item";

    fn parent_section(&self) -> Option<&str> {
        Some(&self.section_id)
    }

    async fn list(&self, _query: &()) -> Result<Listing<Item>> {
        let category = fetch_parent(self.route.api(), &self.category_id, Self::ENTITY).await?;
        let section = find_section(category, &self.section_id, Self::ENTITY)?;
        Ok(Listing::single(section.items))
    }

    async fn create(&self, input: &ItemInput) -> Result<Item> {
        self.route.create(input).await
    }

    async fn update(&self, id: &str, input: &ItemInput) -> Result<Item> {
        self.route.update(id, input).await
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.route.remove(id).await
    }
}

/// `/categories/{cid}/sections/{sid}/samples`
#[derive(Debug, Clone)]
pub struct SampleResource {
    category_id: String,
    section_id: String,
    route: RestCollection,
}

impl SampleResource {
    pub fn new(api: ApiClient, category_id: &str, section_id: &str) -> Self {
        Self {
            category_id: category_id.to_string(),
            section_id: section_id.to_string(),
            route: RestCollection::new(
                api,
                ["categories", category_id, "sections", section_id, "samples"],
                "sample",
            ),
        }
    }

    pub fn section_id(&self) -> &str {
        &self.section_id
    }
}

#[async_trait]
impl Resource for SampleResource {
    type Entity = Sample;
    type Input = SampleInput;
    type Query = ();

    const ENTITY: &'static str = "sample";

    fn parent_section(&self) -> Option<&str> {
        Some(&self.section_id)
    }

    async fn list(&self, _query: &()) -> Result<Listing<Sample>> {
        let category = fetch_parent(self.route.api(), &self.category_id, Self::ENTITY).await?;
        let section = find_section(category, &self.section_id, Self::ENTITY)?;
        Ok(Listing::single(section.samples))
    }

    async fn create(&self, input: &SampleInput) -> Result<Sample> {
        self.route.create(input).await
    }

    async fn update(&self, id: &str, input: &SampleInput) -> Result<Sample> {
        self.route.update(id, input).await
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.route.remove(id).await
    }
}

/// The opened category page: its sections, and per section an items and a
/// samples controller.
///
/// [`CategoryDetail::load`] fetches the category once and seeds every
/// nested controller from that single response.
pub struct CategoryDetail {
    api: ApiClient,
    category_id: String,
    category: RwLock<Option<Category>>,
    /// Sequence number of the most recently requested load
    latest: AtomicU64,
    sections: SectionController,
    items: RwLock<HashMap<String, Arc<ItemController>>>,
    samples: RwLock<HashMap<String, Arc<SampleController>>>,
}

impl CategoryDetail {
    pub fn new(api: ApiClient, category_id: &str) -> Self {
        Self {
            sections: ListController::new(SectionResource::new(api.clone(), category_id)),
            api,
            category_id: category_id.to_string(),
            category: RwLock::new(None),
            latest: AtomicU64::new(0),
            items: RwLock::new(HashMap::new()),
            samples: RwLock::new(HashMap::new()),
        }
    }

    pub fn category_id(&self) -> &str {
        &self.category_id
    }

    /// The category as of the last load, sections included
    pub fn category(&self) -> Option<Category> {
        self.category
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Refresh the category and every nested collection.
    ///
    /// Only the most recently requested load is applied. An older response
    /// arriving later leaves the page and every nested controller untouched
    /// and yields [`LoadOutcome::Superseded`].
    pub async fn load(&self) -> Result<LoadOutcome> {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let result = fetch_parent(&self.api, &self.category_id, "category").await;

        // Checked and applied under the category lock so loads apply in order
        let mut current = self
            .category
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if self.latest.load(Ordering::SeqCst) != seq {
            debug!(category = %self.category_id, seq, "discarding superseded category");
            return Ok(LoadOutcome::Superseded);
        }
        let category = result?;
        debug!(
            category = %self.category_id,
            sections = category.sections.len(),
            "category loaded"
        );

        self.sections.replace(category.sections.clone());
        {
            let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
            let mut samples = self.samples.write().unwrap_or_else(PoisonError::into_inner);
            items.retain(|id, _| category.sections.iter().any(|s| s.id == *id));
            samples.retain(|id, _| category.sections.iter().any(|s| s.id == *id));

            for section in &category.sections {
                items
                    .entry(section.id.clone())
                    .or_insert_with(|| Arc::new(self.new_items(&section.id)))
                    .replace(section.items.clone());
                samples
                    .entry(section.id.clone())
                    .or_insert_with(|| Arc::new(self.new_samples(&section.id)))
                    .replace(section.samples.clone());
            }
        }

        *current = Some(category);
        Ok(LoadOutcome::Applied)
    }

    pub fn sections(&self) -> &SectionController {
        &self.sections
    }

    /// The items controller of a section. Sections not seen by the last
    /// load get an empty controller that can be loaded on its own.
    pub fn items(&self, section_id: &str) -> Arc<ItemController> {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(section_id.to_string())
            .or_insert_with(|| Arc::new(self.new_items(section_id)))
            .clone()
    }

    /// The samples controller of a section
    pub fn samples(&self, section_id: &str) -> Arc<SampleController> {
        self.samples
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(section_id.to_string())
            .or_insert_with(|| Arc::new(self.new_samples(section_id)))
            .clone()
    }

    fn new_items(&self, section_id: &str) -> ItemController {
        ListController::new(ItemResource::new(self.api.clone(), &self.category_id, section_id))
    }

    fn new_samples(&self, section_id: &str) -> SampleController {
        ListController::new(SampleResource::new(self.api.clone(), &self.category_id, section_id))
    }
}
