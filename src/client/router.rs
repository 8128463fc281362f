//! Path based routing between the document list and a single document.
//!
//! The view is always a pure function of the current path and the store:
//! pushing a path, moving through history and loading a path directly all go
//! through [`resolve`]. The router keeps no view stack of its own.
use lazy_static::lazy_static;
use regex::Regex;

use super::document::Document;
use super::history::History;
use super::store::DocumentStore;

/// Path of the document list.
pub const ROOT_PATH: &str = "/";

/// What the client shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// The document list.
    List,
    /// A single document.
    Detail(Document),
    /// A document path that matches no record.
    NotFound,
}

/// Path of the detail view of the document with `id`.
#[must_use]
pub fn document_path(id: u64) -> String {
    format!("/documents/{id}")
}

/// The view for `path`.
///
/// `/documents/{id}` is the detail view when a record has that id and the
/// not-found view otherwise, including when the id is not a number. Every
/// other path is the list.
#[must_use]
#[allow(clippy::expect_used)]
pub fn resolve(path: &str, store: &DocumentStore) -> View {
    lazy_static! {
        static ref DOCUMENT: Regex =
            Regex::new(r"^/documents/([^/]+)/*$").expect("Failed to compile regex!?!");
    }
    let Some(captures) = DOCUMENT.captures(path) else {
        return View::List;
    };
    captures
        .get(1)
        .and_then(|id| id.as_str().parse::<u64>().ok())
        .and_then(|id| store.get(id))
        .map_or(View::NotFound, |doc| View::Detail(doc.clone()))
}

/// Current view plus the history it was derived from.
#[derive(Debug, Clone)]
pub struct Router {
    /// Visited paths.
    history: History,
    /// View for the current path.
    view: View,
}

impl Router {
    /// Router opened directly at `initial_path`, e.g. on reload or from a
    /// shared link.
    #[must_use]
    pub fn new(initial_path: &str, store: &DocumentStore) -> Self {
        Self {
            history: History::new(initial_path),
            view: resolve(initial_path, store),
        }
    }

    /// The current view.
    #[must_use]
    pub const fn view(&self) -> &View {
        &self.view
    }

    /// The current path.
    #[must_use]
    pub fn current_path(&self) -> &str {
        self.history.current()
    }

    /// Open the document with `id`.
    pub fn navigate_to_document(&mut self, id: u64, store: &DocumentStore) -> &View {
        self.push(&document_path(id), store)
    }

    /// Go back to the document list with a new history entry.
    pub fn go_back_to_list(&mut self, store: &DocumentStore) -> &View {
        self.push(ROOT_PATH, store)
    }

    /// Browser-style back. Stays put at the oldest entry.
    pub fn back(&mut self, store: &DocumentStore) -> &View {
        self.history.back();
        self.refresh(store)
    }

    /// Browser-style forward. Stays put at the newest entry.
    pub fn forward(&mut self, store: &DocumentStore) -> &View {
        self.history.forward();
        self.refresh(store)
    }

    /// Re-derive the view, e.g. after the store changed.
    pub fn refresh(&mut self, store: &DocumentStore) -> &View {
        self.view = resolve(self.history.current(), store);
        &self.view
    }

    /// Visit `path`.
    fn push(&mut self, path: &str, store: &DocumentStore) -> &View {
        tracing::debug!("Navigating to {path}");
        self.history.push(path);
        self.refresh(store)
    }
}
