//! Create/edit forms holding drafts until they are submitted
//!
//! A [`Form`] owns one draft. Every edit replaces the draft with a new value,
//! so discarding a form never affects the entity it was seeded from. Submit
//! validates the draft, hands the resulting payload to a
//! [`ListController`], and reports the outcome as a [`Notification`]
//! instead of an error.

mod announcement;
mod business;
mod catalog;
mod qa;
mod suggestion;

use tracing::debug;

use crate::controller::{ListController, View};
use crate::error::{Action, Result};
use crate::resource::Resource;

pub use announcement::AnnouncementDraft;
pub use business::BusinessDraft;
pub use catalog::{CategoryDraft, ItemDraft, SampleDraft, SectionDraft};
pub use qa::QaPairDraft;
pub use suggestion::{SuggestionDraft, DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS};

/// An editable, possibly incomplete entity
pub trait Draft: Clone {
    /// What a complete draft turns into
    type Payload;

    /// Check required fields and parse free-text input
    fn validate(&self) -> Result<Self::Payload>;

    /// Section a nested draft is bound to
    fn section(&self) -> Option<&str> {
        None
    }

    /// Bind a nested draft to a section
    fn place_in(&mut self, _section_id: &str) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    /// Editing the entity with this id
    Edit(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Editing,
    Submitting,
    /// The last submit failed; the draft is unchanged
    Failed(String),
    Saved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// A transient message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.level == Level::Success
    }
}

/// "category" becomes "Category"
pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One open create or edit modal
#[derive(Debug, Clone)]
pub struct Form<D> {
    mode: FormMode,
    draft: D,
    status: FormStatus,
}

impl<D: Draft> Form<D> {
    /// A create form with empty defaults
    pub fn create() -> Self
    where
        D: Default,
    {
        Self::with_draft(FormMode::Create, D::default())
    }

    /// An edit form seeded from an existing entity
    pub fn edit(id: &str, draft: D) -> Self {
        Self::with_draft(FormMode::Edit(id.to_string()), draft)
    }

    pub fn with_draft(mode: FormMode, draft: D) -> Self {
        Self {
            mode,
            draft,
            status: FormStatus::Editing,
        }
    }

    /// Open the controller's edit modal for `id` and seed a form from the
    /// entity. `None` if the controller does not hold that entity.
    pub fn open_edit<R, V>(controller: &ListController<R, V>, id: &str) -> Option<Self>
    where
        R: Resource<Input = D::Payload>,
        V: View<R::Entity>,
        D: for<'a> From<&'a R::Entity>,
    {
        let entity = controller.open_edit(id)?;
        let mut draft = D::from(&entity);
        if let Some(section_id) = controller.resource().parent_section() {
            draft.place_in(section_id);
        }
        Some(Self::edit(id, draft))
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Replace the draft with an edited copy
    pub fn update(&mut self, f: impl FnOnce(D) -> D) {
        self.draft = f(self.draft.clone());
        self.status = FormStatus::Editing;
    }

    /// Apply an edit that can be refused, e.g. adding an empty feature.
    /// A refused edit leaves the draft as it was.
    pub fn try_update(&mut self, f: impl FnOnce(D) -> Result<D>) -> Result<()> {
        self.draft = f(self.draft.clone())?;
        self.status = FormStatus::Editing;
        Ok(())
    }

    /// Validate the draft, or record why it cannot be submitted
    pub(crate) fn begin_submit(&mut self) -> std::result::Result<D::Payload, Notification> {
        match self.draft.validate() {
            Ok(payload) => {
                self.status = FormStatus::Submitting;
                Ok(payload)
            }
            Err(err) => {
                let message = err.user_message();
                debug!(message = %message, "draft rejected");
                self.status = FormStatus::Failed(message.clone());
                Err(Notification::error(message))
            }
        }
    }

    /// Record the outcome of a submit and turn it into a notification
    pub(crate) fn finish_submit(&mut self, result: Result<()>, success: String) -> Notification {
        match result {
            Ok(()) => {
                self.status = FormStatus::Saved;
                Notification::success(success)
            }
            Err(err) => {
                let message = err.user_message();
                self.status = FormStatus::Failed(message.clone());
                Notification::error(message)
            }
        }
    }

    /// Validate and send the draft through `controller`.
    ///
    /// Never fails: problems come back as an error notification with the
    /// form still open and the draft intact. Invalid drafts are not sent.
    pub async fn submit<R, V>(&mut self, controller: &ListController<R, V>) -> Notification
    where
        R: Resource<Input = D::Payload>,
        V: View<R::Entity>,
    {
        if let Some(section_id) = controller.resource().parent_section() {
            let drafted = self
                .draft
                .section()
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            match drafted {
                None => self.draft.place_in(section_id),
                Some(drafted) if drafted != section_id => {
                    let message = format!("{} belongs to another section", capitalize(R::ENTITY));
                    debug!(drafted = %drafted, section_id, "draft submitted to another section");
                    self.status = FormStatus::Failed(message.clone());
                    return Notification::error(message);
                }
                Some(_) => {}
            }
        }

        let payload = match self.begin_submit() {
            Ok(payload) => payload,
            Err(notification) => return notification,
        };

        let (result, action) = match &self.mode {
            FormMode::Create => (controller.create(&payload).await, Action::Create),
            FormMode::Edit(id) => (controller.update(id, &payload).await, Action::Update),
        };
        let success = format!("{} {}d successfully", capitalize(R::ENTITY), action.as_str());
        self.finish_submit(result, success)
    }
}
