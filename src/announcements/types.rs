//! Types for announcements

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::resource::Identified;

/// Format of a `datetime-local` input, minutes precision
pub const EXPIRY_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementKind {
    #[default]
    Info,
    Warning,
    Alert,
    Success,
}

/// A timed notice shown to users until it expires
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    /// The announcement ID
    #[serde(alias = "_id")]
    pub id: String,

    pub title: String,

    #[serde(rename = "type")]
    pub kind: AnnouncementKind,

    #[serde(default)]
    pub image_url: Option<String>,

    pub content: String,

    pub expiry_date: DateTime<Utc>,
}

impl Announcement {
    /// Whether the announcement has expired as of `now`. Expiry is inclusive.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiry_date
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

impl Identified for Announcement {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Body of an announcement create or edit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementInput {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: AnnouncementKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub content: String,
    pub expiry_date: DateTime<Utc>,
}

/// Which listing route to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnnouncementScope {
    #[default]
    All,
    /// Only announcements the backend considers unexpired
    Active,
}

/// The single filter control of the announcements page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnnouncementFilter {
    #[default]
    All,
    Active,
    /// All announcements of one type, filtered locally
    Kind(AnnouncementKind),
}

impl AnnouncementFilter {
    pub fn scope(&self) -> AnnouncementScope {
        match self {
            AnnouncementFilter::Active => AnnouncementScope::Active,
            _ => AnnouncementScope::All,
        }
    }

    pub fn kind(&self) -> Option<AnnouncementKind> {
        match self {
            AnnouncementFilter::Kind(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// Parse an expiry from RFC 3339 or a `datetime-local` value taken as UTC
pub fn parse_expiry(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return Err(Error::validation("Please provide an expiry date"));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(input, EXPIRY_INPUT_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| Error::validation(format!("Invalid expiry date: {}", input)))
}

/// Render an expiry for a `datetime-local` input
pub fn format_expiry_input(expiry: &DateTime<Utc>) -> String {
    expiry.format(EXPIRY_INPUT_FORMAT).to_string()
}
