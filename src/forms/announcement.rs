use super::catalog::{optional, required};
use super::{Draft, Form};
use crate::announcements::{
    format_expiry_input, parse_expiry, Announcement, AnnouncementInput, AnnouncementKind,
    AnnouncementResource,
};
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnouncementDraft {
    pub title: String,
    pub kind: AnnouncementKind,
    pub image_url: String,
    pub content: String,
    /// `YYYY-MM-DDTHH:MM` or RFC 3339
    pub expiry: String,
}

impl From<&Announcement> for AnnouncementDraft {
    fn from(announcement: &Announcement) -> Self {
        Self {
            title: announcement.title.clone(),
            kind: announcement.kind,
            image_url: announcement.image_url.clone().unwrap_or_default(),
            content: announcement.content.clone(),
            expiry: format_expiry_input(&announcement.expiry_date),
        }
    }
}

impl Draft for AnnouncementDraft {
    type Payload = AnnouncementInput;

    fn validate(&self) -> Result<AnnouncementInput> {
        Ok(AnnouncementInput {
            title: required(&self.title, "Please provide a title")?,
            kind: self.kind,
            image_url: optional(&self.image_url),
            content: required(&self.content, "Please provide content")?,
            expiry_date: parse_expiry(&self.expiry)?,
        })
    }
}

impl Form<AnnouncementDraft> {
    /// Seed an edit form from the backend's current copy of the announcement
    pub async fn fetch_edit(resource: &AnnouncementResource, id: &str) -> Result<Self> {
        let announcement = resource.fetch(id).await?;
        Ok(Self::edit(id, AnnouncementDraft::from(&announcement)))
    }
}
