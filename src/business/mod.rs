//! The paginated, searchable business directory

mod types;

use async_trait::async_trait;
use tracing::debug;

use crate::controller::{Debouncer, ListController, LoadOutcome};
use crate::error::{Action, Result};
use crate::fetch::ApiClient;
use crate::resource::{Listing, Resource, RestCollection};

pub use types::*;

pub type BusinessController = ListController<BusinessResource>;

/// `/businesses`
#[derive(Debug, Clone)]
pub struct BusinessResource {
    route: RestCollection,
}

impl BusinessResource {
    pub fn new(api: ApiClient) -> Self {
        Self {
            route: RestCollection::new(api, ["businesses"], "business"),
        }
    }
}

#[async_trait]
impl Resource for BusinessResource {
    type Entity = Business;
    type Input = BusinessInput;
    type Query = BusinessQuery;

    const ENTITY: &'static str = "business";

    async fn list(&self, query: &BusinessQuery) -> Result<Listing<Business>> {
        let page: BusinessPage = self
            .route
            .api()
            .get(self.route.url(&[])?, self.route.operation(Action::Fetch))
            .query(query.to_pairs())
            .execute_body()
            .await?;

        Ok(Listing {
            items: page.data,
            pages: page.pagination.map_or(1, |p| p.pages),
        })
    }

    async fn create(&self, input: &BusinessInput) -> Result<Business> {
        self.route.create(input).await
    }

    async fn update(&self, id: &str, input: &BusinessInput) -> Result<Business> {
        self.route.update(id, input).await
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.route.remove(id).await
    }
}

/// Business listing with debounced search and page navigation
pub struct BusinessDirectory {
    controller: BusinessController,
    debouncer: Debouncer,
}

impl BusinessDirectory {
    pub fn new(api: ApiClient) -> Self {
        let debouncer = Debouncer::new(api.options().search_debounce);
        Self {
            controller: ListController::new(BusinessResource::new(api)),
            debouncer,
        }
    }

    /// The underlying list controller, for loading, modals and mutations
    pub fn controller(&self) -> &BusinessController {
        &self.controller
    }

    pub async fn load(&self) -> Result<LoadOutcome> {
        self.controller.load().await
    }

    /// Feed one keystroke's worth of search text.
    ///
    /// Waits for the debounce delay; if newer text arrived meanwhile this
    /// returns `Ok(None)` without fetching. Otherwise the term becomes the
    /// query, the page resets to 1, and the listing is reloaded.
    pub async fn search(&self, term: &str) -> Result<Option<LoadOutcome>> {
        let Some(term) = self.debouncer.settle(term.to_string()).await else {
            debug!(term, "search input superseded");
            return Ok(None);
        };
        self.controller.update_query(|query| {
            query.search = term;
            query.page = 1;
        });
        self.controller.load().await.map(Some)
    }

    /// Choose which field the search term applies to and reload from page 1
    pub async fn set_search_field(&self, field: SearchField) -> Result<LoadOutcome> {
        self.controller.update_query(|query| {
            query.filter = field;
            query.page = 1;
        });
        self.controller.load().await
    }

    pub fn page(&self) -> u32 {
        self.controller.query().page
    }

    pub fn pages(&self) -> u32 {
        self.controller.pages()
    }

    /// Jump to `page`, clamped to the known page range
    pub async fn go_to_page(&self, page: u32) -> Result<LoadOutcome> {
        let page = page.clamp(1, self.pages().max(1));
        self.controller.update_query(|query| query.page = page);
        self.controller.load().await
    }

    pub async fn next_page(&self) -> Result<LoadOutcome> {
        self.go_to_page(self.page().saturating_add(1)).await
    }

    pub async fn previous_page(&self) -> Result<LoadOutcome> {
        self.go_to_page(self.page().saturating_sub(1)).await
    }
}
