//! User suggestions: filtered listing, edit and delete

mod types;

use async_trait::async_trait;

use crate::controller::{ListController, LoadOutcome};
use crate::error::{Action, Result};
use crate::fetch::ApiClient;
use crate::resource::{unsupported, Listing, Resource, RestCollection};

pub use types::*;

pub type SuggestionController = ListController<SuggestionResource>;

/// `/suggestions`. Suggestions are submitted by users, so there is no create route.
#[derive(Debug, Clone)]
pub struct SuggestionResource {
    route: RestCollection,
}

impl SuggestionResource {
    pub fn new(api: ApiClient) -> Self {
        Self {
            route: RestCollection::new(api, ["suggestions"], "suggestion"),
        }
    }
}

#[async_trait]
impl Resource for SuggestionResource {
    type Entity = Suggestion;
    type Input = SuggestionInput;
    type Query = SuggestionQuery;

    const ENTITY: &'static str = "suggestion";

    async fn list(&self, query: &SuggestionQuery) -> Result<Listing<Suggestion>> {
        let items = self
            .route
            .api()
            .get(self.route.url(&[])?, self.route.operation(Action::Fetch))
            .query(query.to_pairs())
            .execute()
            .await?;
        Ok(Listing::single(items))
    }

    async fn create(&self, _input: &SuggestionInput) -> Result<Suggestion> {
        Err(unsupported(Action::Create, Self::ENTITY))
    }

    async fn update(&self, id: &str, input: &SuggestionInput) -> Result<Suggestion> {
        self.route.update(id, input).await
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.route.remove(id).await
    }
}

impl ListController<SuggestionResource> {
    /// Change the listing filters and reload
    pub async fn filter_by(&self, query: SuggestionQuery) -> Result<LoadOutcome> {
        self.set_query(query);
        self.load().await
    }
}
