//! Timed announcements

mod types;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::controller::{Confirmation, ListController, LoadOutcome, View};
use crate::error::{Action, Result};
use crate::fetch::ApiClient;
use crate::resource::{Listing, Resource, RestCollection};

pub use types::*;

pub type AnnouncementController = ListController<AnnouncementResource, AnnouncementView>;

/// `/announcements`
#[derive(Debug, Clone)]
pub struct AnnouncementResource {
    route: RestCollection,
}

impl AnnouncementResource {
    pub fn new(api: ApiClient) -> Self {
        Self {
            route: RestCollection::new(api, ["announcements"], "announcement"),
        }
    }

    /// Fetch one announcement, e.g. to seed an edit form
    pub async fn fetch(&self, id: &str) -> Result<Announcement> {
        self.route.fetch(id).await
    }

    /// Delete every expired announcement in one request
    pub async fn delete_expired(&self) -> Result<()> {
        self.route
            .api()
            .delete(self.route.url(&["expired"])?, self.route.operation(Action::Delete))
            .execute_empty()
            .await
    }
}

#[async_trait]
impl Resource for AnnouncementResource {
    type Entity = Announcement;
    type Input = AnnouncementInput;
    type Query = AnnouncementScope;

    const ENTITY: &'static str = "announcement";

    async fn list(&self, scope: &AnnouncementScope) -> Result<Listing<Announcement>> {
        let items = match scope {
            AnnouncementScope::All => self.route.list().await?,
            AnnouncementScope::Active => {
                self.route
                    .api()
                    .get(self.route.url(&["active"])?, self.route.operation(Action::Fetch))
                    .execute()
                    .await?
            }
        };
        Ok(Listing::single(items))
    }

    async fn create(&self, input: &AnnouncementInput) -> Result<Announcement> {
        self.route.create(input).await
    }

    async fn update(&self, id: &str, input: &AnnouncementInput) -> Result<Announcement> {
        self.route.update(id, input).await
    }

    async fn remove(&self, id: &str) -> Result<()> {
        self.route.remove(id).await
    }
}

/// Announcements narrowed to one type, if a type is selected
#[derive(Debug, Clone, Default)]
pub struct AnnouncementView {
    kind: Option<AnnouncementKind>,
    visible: Vec<Announcement>,
}

impl AnnouncementView {
    pub fn kind(&self) -> Option<AnnouncementKind> {
        self.kind
    }

    pub fn visible(&self) -> &[Announcement] {
        &self.visible
    }
}

impl View<Announcement> for AnnouncementView {
    fn refresh(&mut self, entities: &[Announcement]) {
        self.visible = entities
            .iter()
            .filter(|a| self.kind.map_or(true, |kind| a.kind == kind))
            .cloned()
            .collect();
    }
}

impl ListController<AnnouncementResource, AnnouncementView> {
    /// Switch the page filter. Changing between all and active reloads;
    /// the type filter alone is applied locally.
    pub async fn set_filter(&self, filter: AnnouncementFilter) -> Result<LoadOutcome> {
        self.update_view(|view| view.kind = filter.kind());
        let scope = filter.scope();
        if self.query() == scope {
            return Ok(LoadOutcome::Applied);
        }
        self.set_query(scope);
        self.load().await
    }

    pub fn visible_announcements(&self) -> Vec<Announcement> {
        self.with_view(|view| view.visible.clone())
    }

    /// Loaded announcements already expired at `now`
    pub fn expired_at(&self, now: DateTime<Utc>) -> Vec<Announcement> {
        self.entities()
            .into_iter()
            .filter(|a| a.is_expired_at(now))
            .collect()
    }

    /// Delete all expired announcements once the user has confirmed.
    ///
    /// Returns `Ok(false)` without a request when declined.
    pub async fn purge_expired(&self, confirmation: Confirmation) -> Result<bool> {
        if confirmation == Confirmation::Declined {
            debug!("purge of expired announcements declined");
            return Ok(false);
        }
        if let Err(err) = self.resource().delete_expired().await {
            self.record_error(&err);
            return Err(err);
        }
        self.refresh_after_mutation().await;
        Ok(true)
    }
}
