//! Per-entity owners of what the user currently sees
//!
//! A [`ListController`] holds the fetched collection, the active listing
//! query, a derived [`View`] and the modal/delete targets for one entity
//! type. Filtering and sorting happen synchronously in the view; only
//! `load` and the mutations touch the network.

mod debounce;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::error::Result;
use crate::resource::{Identified, Resource};

pub use debounce::Debouncer;

/// Derived state recomputed from the collection without any I/O
pub trait View<E>: Default + Send + Sync {
    fn refresh(&mut self, entities: &[E]);
}

impl<E> View<E> for () {
    fn refresh(&mut self, _entities: &[E]) {}
}

/// Which create/edit modal is open
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    Closed,
    Create,
    /// Holds the id of the entity being edited, never a copy of it
    Edit(String),
}

/// The user's answer to a destructive-action prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

/// Whether a finished load was reflected in the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer load was requested while this one was in flight
    Superseded,
}

struct State<E, Q, V> {
    entities: Vec<E>,
    pages: u32,
    query: Q,
    view: V,
    modal: Modal,
    delete_target: Option<String>,
    last_error: Option<String>,
    loading: bool,
}

/// Owner of one entity type's collection and UI state
pub struct ListController<R: Resource, V = ()> {
    resource: R,
    state: RwLock<State<R::Entity, R::Query, V>>,
    /// Sequence number of the most recently requested load
    latest: AtomicU64,
}

impl<R, V> ListController<R, V>
where
    R: Resource,
    V: View<R::Entity>,
{
    pub fn new(resource: R) -> Self {
        Self::with_query(resource, R::Query::default())
    }

    pub fn with_query(resource: R, query: R::Query) -> Self {
        Self {
            resource,
            state: RwLock::new(State {
                entities: Vec::new(),
                pages: 1,
                query,
                view: V::default(),
                modal: Modal::Closed,
                delete_target: None,
                last_error: None,
                loading: false,
            }),
            latest: AtomicU64::new(0),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, State<R::Entity, R::Query, V>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State<R::Entity, R::Query, V>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    /// Fetch the collection for the current query and replace local state
    /// wholesale.
    ///
    /// A response is applied only if no other load was requested after this
    /// one; otherwise it is discarded and [`LoadOutcome::Superseded`] is
    /// returned, even when the stale request failed.
    pub async fn load(&self) -> Result<LoadOutcome> {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let query = {
            let mut state = self.write();
            state.loading = true;
            state.query.clone()
        };
        debug!(entity = R::ENTITY, seq, "loading collection");

        let result = self.resource.list(&query).await;

        let mut state = self.write();
        if self.latest.load(Ordering::SeqCst) != seq {
            debug!(entity = R::ENTITY, seq, "discarding superseded response");
            return Ok(LoadOutcome::Superseded);
        }
        state.loading = false;

        match result {
            Ok(listing) => {
                let state = &mut *state;
                state.entities = listing.items;
                state.pages = listing.pages.max(1);
                state.view.refresh(&state.entities);
                state.last_error = None;
                Ok(LoadOutcome::Applied)
            }
            Err(err) => {
                state.last_error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Replace the collection with entities fetched as part of a parent.
    ///
    /// Counts as the newest load, so any load still in flight is discarded.
    pub fn replace(&self, entities: Vec<R::Entity>) {
        self.latest.fetch_add(1, Ordering::SeqCst);
        let mut state = self.write();
        let state = &mut *state;
        state.entities = entities;
        state.pages = 1;
        state.loading = false;
        state.view.refresh(&state.entities);
    }

    /// Create an entity, then refresh the whole collection
    pub async fn create(&self, input: &R::Input) -> Result<()> {
        match self.resource.create(input).await {
            Ok(_) => {
                self.close_modal();
                self.refresh_after_mutation().await;
                Ok(())
            }
            Err(err) => {
                self.record_error(&err);
                Err(err)
            }
        }
    }

    /// Replace an entity with a complete document, then refresh
    pub async fn update(&self, id: &str, input: &R::Input) -> Result<()> {
        match self.resource.update(id, input).await {
            Ok(_) => {
                self.close_modal();
                self.refresh_after_mutation().await;
                Ok(())
            }
            Err(err) => {
                self.record_error(&err);
                Err(err)
            }
        }
    }

    /// Delete an entity the user has already confirmed deleting.
    ///
    /// A declined confirmation returns `Ok(false)` without any request.
    pub async fn remove(&self, id: &str, confirmation: Confirmation) -> Result<bool> {
        if confirmation == Confirmation::Declined {
            debug!(entity = R::ENTITY, id, "delete declined");
            return Ok(false);
        }

        match self.resource.remove(id).await {
            Ok(()) => {
                {
                    let mut state = self.write();
                    if state.delete_target.as_deref() == Some(id) {
                        state.delete_target = None;
                    }
                    if state.modal == Modal::Edit(id.to_string()) {
                        state.modal = Modal::Closed;
                    }
                }
                self.refresh_after_mutation().await;
                Ok(true)
            }
            Err(err) => {
                self.record_error(&err);
                Err(err)
            }
        }
    }

    /// Mark an entity as the pending delete while the user is asked to confirm
    pub fn request_delete(&self, id: &str) {
        self.write().delete_target = Some(id.to_string());
    }

    pub fn cancel_delete(&self) {
        self.write().delete_target = None;
    }

    pub fn delete_target(&self) -> Option<String> {
        self.read().delete_target.clone()
    }

    /// Delete the pending target. Returns `Ok(false)` when nothing was pending.
    pub async fn confirm_delete(&self) -> Result<bool> {
        let target = self.write().delete_target.take();
        match target {
            Some(id) => self.remove(&id, Confirmation::Confirmed).await,
            None => Ok(false),
        }
    }

    pub(crate) async fn refresh_after_mutation(&self) {
        if let Err(err) = self.load().await {
            warn!(entity = R::ENTITY, error = %err, "refresh after mutation failed");
        }
    }

    pub(crate) fn record_error(&self, err: &crate::error::Error) {
        self.write().last_error = Some(err.user_message());
    }

    pub fn open_create(&self) {
        self.write().modal = Modal::Create;
    }

    /// Open the edit modal for an entity in the current collection and
    /// return it for seeding a draft. Unknown ids leave the modal untouched.
    pub fn open_edit(&self, id: &str) -> Option<R::Entity> {
        let mut state = self.write();
        let entity = state.entities.iter().find(|e| e.id() == id).cloned()?;
        state.modal = Modal::Edit(id.to_string());
        Some(entity)
    }

    pub fn close_modal(&self) {
        self.write().modal = Modal::Closed;
    }

    pub fn modal(&self) -> Modal {
        self.read().modal.clone()
    }

    /// The entity the edit modal refers to, looked up in the current collection
    pub fn selected(&self) -> Option<R::Entity> {
        let state = self.read();
        match &state.modal {
            Modal::Edit(id) => state.entities.iter().find(|e| e.id() == id).cloned(),
            _ => None,
        }
    }

    pub fn entities(&self) -> Vec<R::Entity> {
        self.read().entities.clone()
    }

    pub fn find(&self, id: &str) -> Option<R::Entity> {
        self.read().entities.iter().find(|e| e.id() == id).cloned()
    }

    pub fn pages(&self) -> u32 {
        self.read().pages
    }

    pub fn query(&self) -> R::Query {
        self.read().query.clone()
    }

    /// Replace the listing query. Takes effect on the next `load`.
    pub fn set_query(&self, query: R::Query) {
        self.write().query = query;
    }

    /// Adjust the listing query in place. Takes effect on the next `load`.
    pub fn update_query(&self, f: impl FnOnce(&mut R::Query)) {
        f(&mut self.write().query);
    }

    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.read().last_error.clone()
    }

    pub fn clear_error(&self) {
        self.write().last_error = None;
    }

    /// Read the derived view
    pub fn with_view<T>(&self, f: impl FnOnce(&V) -> T) -> T {
        f(&self.read().view)
    }

    /// Change view settings and recompute it against the current collection.
    /// Never touches the network.
    pub fn update_view(&self, f: impl FnOnce(&mut V)) {
        let mut state = self.write();
        let state = &mut *state;
        f(&mut state.view);
        state.view.refresh(&state.entities);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Action, Error, Operation};
    use crate::resource::Listing;
    use async_trait::async_trait;
    use serde::Serialize;
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;
    use std::sync::{Arc, Mutex};
    use tokio::sync::{mpsc, oneshot};

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: String,
        text: String,
    }

    impl Identified for Note {
        fn id(&self) -> &str {
            &self.id
        }
    }

    #[derive(Debug, Clone, Serialize)]
    struct NoteInput {
        text: String,
    }

    fn note(id: &str, text: &str) -> Note {
        Note {
            id: id.to_string(),
            text: text.to_string(),
        }
    }

    /// In-memory backend that records every call
    #[derive(Default)]
    struct MemoryNotes {
        notes: Mutex<Vec<Note>>,
        calls: AtomicUsize,
        fail_writes: bool,
    }

    #[async_trait]
    impl Resource for MemoryNotes {
        type Entity = Note;
        type Input = NoteInput;
        type Query = String;

        const ENTITY: &'static str = "note";

        async fn list(&self, query: &String) -> Result<Listing<Note>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let notes = self.notes.lock().unwrap();
            Ok(Listing::single(
                notes
                    .iter()
                    .filter(|n| n.text.contains(query.as_str()))
                    .cloned()
                    .collect(),
            ))
        }

        async fn create(&self, input: &NoteInput) -> Result<Note> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_writes {
                return Err(Error::request(
                    Operation::new(Action::Create, "note"),
                    Some(reqwest::StatusCode::BAD_REQUEST),
                    "Text too long",
                ));
            }
            let mut notes = self.notes.lock().unwrap();
            let created = note(&format!("n{}", notes.len() + 1), &input.text);
            notes.push(created.clone());
            Ok(created)
        }

        async fn update(&self, id: &str, input: &NoteInput) -> Result<Note> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut notes = self.notes.lock().unwrap();
            let existing = notes.iter_mut().find(|n| n.id == id).ok_or_else(|| {
                Error::request(
                    Operation::new(Action::Update, "note"),
                    Some(reqwest::StatusCode::NOT_FOUND),
                    "Note not found",
                )
            })?;
            existing.text = input.text.clone();
            Ok(existing.clone())
        }

        async fn remove(&self, id: &str) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.notes.lock().unwrap().retain(|n| n.id != id);
            Ok(())
        }
    }

    fn seeded(notes: Vec<Note>) -> MemoryNotes {
        MemoryNotes {
            notes: Mutex::new(notes),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn load_replaces_collection() {
        let controller: ListController<MemoryNotes> =
            ListController::new(seeded(vec![note("n1", "alpha"), note("n2", "beta")]));

        assert_eq!(controller.load().await.unwrap(), LoadOutcome::Applied);
        assert_eq!(controller.entities().len(), 2);

        controller.set_query("alp".to_string());
        controller.load().await.unwrap();
        assert_eq!(controller.entities(), vec![note("n1", "alpha")]);
    }

    #[tokio::test]
    async fn create_refreshes_and_closes_modal() {
        let controller: ListController<MemoryNotes> = ListController::new(seeded(vec![]));
        controller.open_create();

        controller
            .create(&NoteInput {
                text: "fresh".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(controller.entities(), vec![note("n1", "fresh")]);
        assert_eq!(controller.modal(), Modal::Closed);
    }

    #[tokio::test]
    async fn failed_create_keeps_state_and_records_error() {
        let resource = MemoryNotes {
            notes: Mutex::new(vec![note("n1", "kept")]),
            fail_writes: true,
            ..Default::default()
        };
        let controller: ListController<MemoryNotes> = ListController::new(resource);
        controller.load().await.unwrap();
        controller.open_create();

        let err = controller
            .create(&NoteInput {
                text: "x".repeat(10),
            })
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Text too long");
        assert_eq!(controller.entities(), vec![note("n1", "kept")]);
        assert_eq!(controller.modal(), Modal::Create);
        assert_eq!(controller.last_error().as_deref(), Some("Text too long"));
    }

    #[tokio::test]
    async fn delete_without_confirmation_makes_no_request() {
        let controller: ListController<MemoryNotes> =
            ListController::new(seeded(vec![note("n1", "alpha")]));

        let removed = controller.remove("n1", Confirmation::Declined).await.unwrap();
        assert!(!removed);

        // nothing staged, so confirming deletes nothing either
        assert!(!controller.confirm_delete().await.unwrap());
        assert_eq!(controller.resource().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn staged_delete_runs_after_confirmation() {
        let controller: ListController<MemoryNotes> =
            ListController::new(seeded(vec![note("n1", "alpha"), note("n2", "beta")]));
        controller.load().await.unwrap();

        controller.request_delete("n1");
        assert_eq!(controller.delete_target().as_deref(), Some("n1"));
        controller.cancel_delete();
        assert_eq!(controller.delete_target(), None);

        controller.request_delete("n2");
        assert!(controller.confirm_delete().await.unwrap());
        assert_eq!(controller.entities(), vec![note("n1", "alpha")]);
        assert_eq!(controller.delete_target(), None);
    }

    #[tokio::test]
    async fn edit_modal_refers_to_live_entity() {
        let controller: ListController<MemoryNotes> =
            ListController::new(seeded(vec![note("n1", "alpha")]));
        controller.load().await.unwrap();

        assert!(controller.open_edit("missing").is_none());
        assert_eq!(controller.modal(), Modal::Closed);

        let seed = controller.open_edit("n1").unwrap();
        assert_eq!(seed.text, "alpha");

        controller
            .resource()
            .notes
            .lock()
            .unwrap()
            .first_mut()
            .unwrap()
            .text = "changed elsewhere".to_string();
        controller.load().await.unwrap();
        assert_eq!(controller.selected().unwrap().text, "changed elsewhere");

        controller.close_modal();
        assert!(controller.selected().is_none());
    }

    /// Backend whose responses are released by the test, one query at a time
    struct GatedNotes {
        started: mpsc::UnboundedSender<String>,
        gates: Mutex<HashMap<String, oneshot::Receiver<Vec<Note>>>>,
    }

    #[async_trait]
    impl Resource for GatedNotes {
        type Entity = Note;
        type Input = NoteInput;
        type Query = String;

        const ENTITY: &'static str = "note";

        async fn list(&self, query: &String) -> Result<Listing<Note>> {
            let gate = self.gates.lock().unwrap().remove(query).unwrap();
            self.started.send(query.clone()).unwrap();
            Ok(Listing::single(gate.await.unwrap()))
        }

        async fn create(&self, _input: &NoteInput) -> Result<Note> {
            unreachable!()
        }

        async fn update(&self, _id: &str, _input: &NoteInput) -> Result<Note> {
            unreachable!()
        }

        async fn remove(&self, _id: &str) -> Result<()> {
            unreachable!()
        }
    }

    #[tokio::test]
    async fn stale_response_does_not_override_newer_load() {
        let (started_tx, mut started_rx) = mpsc::unbounded_channel();
        let (release_a, gate_a) = oneshot::channel();
        let (release_b, gate_b) = oneshot::channel();
        let gates = HashMap::from([("A".to_string(), gate_a), ("B".to_string(), gate_b)]);

        let controller: Arc<ListController<GatedNotes>> = Arc::new(ListController::with_query(
            GatedNotes {
                started: started_tx,
                gates: Mutex::new(gates),
            },
            "A".to_string(),
        ));

        let first = tokio::spawn({
            let controller = controller.clone();
            async move { controller.load().await }
        });
        assert_eq!(started_rx.recv().await.unwrap(), "A");

        controller.set_query("B".to_string());
        let second = tokio::spawn({
            let controller = controller.clone();
            async move { controller.load().await }
        });
        assert_eq!(started_rx.recv().await.unwrap(), "B");

        release_b.send(vec![note("b1", "from B")]).unwrap();
        assert_eq!(second.await.unwrap().unwrap(), LoadOutcome::Applied);

        release_a.send(vec![note("a1", "from A")]).unwrap();
        assert_eq!(first.await.unwrap().unwrap(), LoadOutcome::Superseded);

        assert_eq!(controller.entities(), vec![note("b1", "from B")]);
        assert!(!controller.is_loading());
    }

    #[derive(Default)]
    struct TextLengths {
        lengths: Vec<usize>,
    }

    impl View<Note> for TextLengths {
        fn refresh(&mut self, entities: &[Note]) {
            self.lengths = entities.iter().map(|n| n.text.len()).collect();
        }
    }

    #[tokio::test]
    async fn view_follows_loads_and_replacements() {
        let controller: ListController<MemoryNotes, TextLengths> =
            ListController::new(seeded(vec![note("n1", "abc")]));
        controller.load().await.unwrap();
        assert_eq!(controller.with_view(|v| v.lengths.clone()), vec![3]);

        controller.replace(vec![note("x", "hello"), note("y", "")]);
        assert_eq!(controller.with_view(|v| v.lengths.clone()), vec![5, 0]);
    }
}
