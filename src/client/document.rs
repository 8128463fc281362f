//! The document record the client keeps for every upload.
use lazy_static::lazy_static;
use regex::Regex;
use serde_derive::{Deserialize, Serialize};

use crate::engine::Section;
use crate::server::api::upload::response::UploadResponse;

/// Thumbnail shown for every processed upload.
pub const PLACEHOLDER_THUMBNAIL: &str =
    "https://via.placeholder.com/163x217/808080/ffffff?text=Processed";

/// `type` of records created by an upload.
pub const PROCESSED: &str = "processed";

/// A document as the client knows it.
///
/// Persisted as-is with camelCase keys. Records written by older versions may
/// lack any field but `id`, or hold `null` in it; such fields default to
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique within the store.
    pub id: u64,
    /// Editable display title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Display date of the last quick view.
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_opened: String,
    /// Display date of the upload.
    #[serde(default, deserialize_with = "null_as_default")]
    pub added: String,
    /// Informational page count.
    #[serde(default, deserialize_with = "null_as_default")]
    pub pages: u32,
    /// Thumbnail URL.
    #[serde(default, deserialize_with = "null_as_default")]
    pub thumbnail: String,
    /// Record kind, `processed` for uploads.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Relative URL the relay serves the file at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// Engine identifier; chat is disabled without it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    /// Markdown summary from the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Section breakdown from the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<Section>>,
}

impl Document {
    /// Record for a freshly processed upload of `file_name`.
    #[must_use]
    pub fn from_upload(id: u64, file_name: &str, response: UploadResponse, today: &str) -> Self {
        Self {
            id,
            title: title_from_filename(file_name),
            last_opened: today.to_owned(),
            added: today.to_owned(),
            pages: 0,
            thumbnail: PLACEHOLDER_THUMBNAIL.to_owned(),
            kind: Some(PROCESSED.to_owned()),
            file_path: Some(response.file_path),
            document_id: response.document_id,
            summary: response.summary,
            sections: response.sections,
        }
    }

    /// Whether questions can be asked about this document.
    #[must_use]
    pub fn can_chat(&self) -> bool {
        self.document_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// Case-insensitive substring match of `query` against the title.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Read `null` as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de> + Default,
{
    Ok(<Option<T> as serde::Deserialize>::deserialize(deserializer)?.unwrap_or_default())
}

/// `file_name` with its last extension removed.
#[must_use]
#[allow(clippy::expect_used)]
pub fn title_from_filename(file_name: &str) -> String {
    lazy_static! {
        static ref EXTENSION: Regex = Regex::new(r"\.[^/.]+$").expect("Failed to compile regex!?!");
    }
    EXTENSION.replace(file_name, "").into_owned()
}
