//! The document store: the client's single source of truth for document
//! records.
//!
//! The store owns the collection and persists the whole of it to local
//! storage after every mutation. Views never touch local storage directly;
//! they are handed the store and read it after each mutation.
use std::fmt;
use std::path::Path;

use derive_more::Display;
use serde_json::Value;

use super::document::Document;
use super::relay::{Relay, RelayError};
use super::storage::LocalStorage;

/// Local storage key holding the serialized collection.
pub const STORAGE_KEY: &str = "kdf_documents";

/// Why a store operation did nothing.
#[derive(Debug, Display)]
pub enum StoreError {
    /// No record has the given id.
    #[display(fmt = "No document with id {}", _0)]
    NotFound(u64),
    /// Titles cannot be blank.
    #[display(fmt = "A document title cannot be blank")]
    BlankTitle,
    /// The relay could not process the upload.
    #[display(fmt = "Error: Could not process the document. {}", _0)]
    Upload(RelayError),
}

impl std::error::Error for StoreError {}

/// Called with the full collection after every mutation.
type Subscriber = Box<dyn Fn(&[Document])>;

/// Owned, persisted collection of [`Document`]s, newest first.
pub struct DocumentStore {
    /// Records, newest first.
    documents: Vec<Document>,
    /// Where the collection is persisted.
    storage: LocalStorage,
    /// Observers of mutations.
    subscribers: Vec<Subscriber>,
}

impl fmt::Debug for DocumentStore {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "{} documents persisted in {}",
            self.documents.len(),
            self.storage.path().display()
        )
    }
}

/// The records in `raw`, a JSON array, skipping any that cannot be read.
fn parse_documents(raw: &str) -> Vec<Document> {
    let records: Vec<Value> = serde_json::from_str(raw).unwrap_or_else(|err| {
        tracing::error!("Could not parse documents from local storage: {err}");
        Vec::new()
    });
    records
        .into_iter()
        .filter_map(|record| {
            serde_json::from_value(record)
                .map_err(|err| tracing::warn!("Skipping unreadable document record: {err}"))
                .ok()
        })
        .collect()
}

impl DocumentStore {
    /// Load the collection from `storage`.
    ///
    /// An absent entry means an empty collection. So does an unreadable one:
    /// the error is logged and the store starts empty. Single records that
    /// cannot be read are logged and skipped.
    #[must_use]
    pub fn load(storage: LocalStorage) -> Self {
        let documents = match storage.get_item(STORAGE_KEY) {
            Ok(Some(raw)) => parse_documents(&raw),
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::error!("Could not read documents from local storage: {err}");
                Vec::new()
            }
        };
        Self {
            documents,
            storage,
            subscribers: Vec::new(),
        }
    }

    /// All records, newest first.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// The record with `id`.
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    /// Records whose title contains `query`, ignoring case. Never mutates.
    #[must_use]
    pub fn filter(&self, query: &str) -> Vec<&Document> {
        self.documents.iter().filter(|doc| doc.matches(query)).collect()
    }

    /// Register `subscriber` to be called after every mutation. The bundled
    /// views re-read the store instead; this is for embedders that need
    /// change notification.
    pub fn subscribe(&mut self, subscriber: impl Fn(&[Document]) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Id the next record will get: one more than the largest id in use.
    #[must_use]
    pub fn next_id(&self) -> u64 {
        self.documents.iter().map(|doc| doc.id).max().unwrap_or(0) + 1
    }

    /// Upload `file` through `relay` and prepend the resulting record.
    ///
    /// # Errors
    /// Returns [`StoreError::Upload`] and leaves the collection untouched if
    /// the relay fails.
    pub async fn add_document(
        &mut self,
        relay: &dyn Relay,
        file: &Path,
        today: &str,
    ) -> Result<&Document, StoreError> {
        let response = relay.upload(file).await.map_err(|err| {
            tracing::error!("Error during file upload and processing: {err}");
            StoreError::Upload(err)
        })?;
        let file_name = file
            .file_name()
            .map_or_else(String::new, |name| name.to_string_lossy().into_owned());
        let id = self.next_id();
        self.documents
            .insert(0, Document::from_upload(id, &file_name, response, today));
        self.commit();
        self.get(id).ok_or(StoreError::NotFound(id))
    }

    /// Mark the record with `id` as opened `today`.
    ///
    /// # Errors
    /// Errors if there is no such record.
    pub fn quick_view(&mut self, id: u64, today: &str) -> Result<&Document, StoreError> {
        self.update(id, |doc| today.clone_into(&mut doc.last_opened))
    }

    /// Give the record with `id` a new title.
    ///
    /// # Errors
    /// Errors if `title` is blank or there is no such record.
    pub fn rename(&mut self, id: u64, title: &str) -> Result<&Document, StoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::BlankTitle);
        }
        self.update(id, |doc| title.clone_into(&mut doc.title))
    }

    /// Remove the record with `id`. The uploaded file stays on the relay.
    ///
    /// # Errors
    /// Errors if there is no such record.
    pub fn delete(&mut self, id: u64) -> Result<Document, StoreError> {
        let index = self
            .documents
            .iter()
            .position(|doc| doc.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let removed = self.documents.remove(index);
        self.commit();
        Ok(removed)
    }

    /// Apply `change` to the record with `id`, then commit.
    fn update(
        &mut self,
        id: u64,
        change: impl FnOnce(&mut Document),
    ) -> Result<&Document, StoreError> {
        let doc = self
            .documents
            .iter_mut()
            .find(|doc| doc.id == id)
            .ok_or(StoreError::NotFound(id))?;
        change(doc);
        self.commit();
        self.get(id).ok_or(StoreError::NotFound(id))
    }

    /// Persist the collection and notify subscribers.
    fn commit(&self) {
        self.persist();
        for subscriber in &self.subscribers {
            subscriber(self.documents.as_slice());
        }
    }

    /// Write the whole collection to local storage. Failures are logged.
    fn persist(&self) {
        let result = serde_json::to_string(&self.documents)
            .map_err(|err| err.to_string())
            .and_then(|raw| {
                self.storage
                    .set_item(STORAGE_KEY, &raw)
                    .map_err(|err| err.to_string())
            });
        if let Err(err) = result {
            tracing::error!("Could not save documents to local storage: {err}");
        }
    }
}
