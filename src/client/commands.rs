//! The client subcommands.
//!
//! Every command loads the store from local storage, does one thing and
//! prints the resulting view to stdout.
use std::io::{self, Write as _};
use std::path::Path;

use anyhow::Context as _;

use super::browse::{run_session, Session};
use super::detail::DocumentView;
use super::relay::HttpRelay;
use super::render;
use super::router::{document_path, resolve, View};
use super::storage::LocalStorage;
use super::store::{DocumentStore, StoreError};
use crate::config;
use crate::utils::dates::today;

/// Load the store configured in `conf`.
fn load_store(conf: &config::Client) -> DocumentStore {
    DocumentStore::load(LocalStorage::open(conf.storage_path()))
}

/// Upload `file` and print the new record.
///
/// # Errors
/// Errors if the relay fails to process the file or stdout is closed.
#[actix_web::main]
pub async fn upload(conf: config::Client, file: &Path) -> anyhow::Result<()> {
    let relay = HttpRelay::new(conf.backend_url()?);
    let mut store = load_store(&conf);
    tracing::info!("Processing document... This may take a moment.");
    let doc = store.add_document(&relay, file, &today()).await?;
    let mut out = io::stdout().lock();
    writeln!(out, "Added document {}\n", doc.id)?;
    render::quick_view(&mut out, doc)?;
    Ok(())
}

/// Print the documents whose title matches `query`.
///
/// # Errors
/// Errors if stdout is closed.
pub fn list(conf: &config::Client, query: &str) -> anyhow::Result<()> {
    let store = load_store(conf);
    render::list(&mut io::stdout().lock(), &store.filter(query), query)?;
    Ok(())
}

/// Print the quick view of document `id`, marking it opened today.
///
/// # Errors
/// Errors if there is no such document or stdout is closed.
pub fn peek(conf: &config::Client, id: u64) -> anyhow::Result<()> {
    let mut store = load_store(conf);
    let doc = store.quick_view(id, &today())?;
    render::quick_view(&mut io::stdout().lock(), doc)?;
    Ok(())
}

/// Give document `id` a new title.
///
/// # Errors
/// Errors if there is no such document or the title is blank.
pub fn rename(conf: &config::Client, id: u64, title: &str) -> anyhow::Result<()> {
    let mut store = load_store(conf);
    let doc = store.rename(id, title)?;
    writeln!(io::stdout().lock(), "Renamed document {} to \"{}\"", doc.id, doc.title)?;
    Ok(())
}

/// Remove document `id` from the collection.
///
/// # Errors
/// Errors if there is no such document.
pub fn delete(conf: &config::Client, id: u64) -> anyhow::Result<()> {
    let mut store = load_store(conf);
    let removed = store.delete(id)?;
    writeln!(io::stdout().lock(), "Deleted document {} \"{}\"", removed.id, removed.title)?;
    Ok(())
}

/// The detail view at `/documents/{id}`.
///
/// # Errors
/// Prints the not-found view and returns [`StoreError::NotFound`] if there
/// is no such document.
fn detail_view(
    conf: &config::Client,
    store: &DocumentStore,
    id: u64,
    out: &mut impl io::Write,
) -> anyhow::Result<DocumentView> {
    match resolve(&document_path(id), store) {
        View::Detail(doc) => Ok(DocumentView::new(doc, &conf.backend_url()?)),
        View::List | View::NotFound => {
            render::not_found(out)?;
            Err(StoreError::NotFound(id).into())
        }
    }
}

/// Print the view `path` resolves to, e.g. `/documents/3`.
///
/// # Errors
/// Errors if the backend url is invalid or stdout is closed.
pub fn open(conf: &config::Client, path: &str) -> anyhow::Result<()> {
    let store = load_store(conf);
    let mut out = io::stdout().lock();
    match resolve(path, &store) {
        View::List => render::list(&mut out, &store.filter(""), "")?,
        View::Detail(doc) => {
            render::detail(&mut out, &DocumentView::new(doc, &conf.backend_url()?))?;
        }
        View::NotFound => render::not_found(&mut out)?,
    }
    Ok(())
}

/// Ask `question` about document `id` and print the transcript.
///
/// # Errors
/// Errors if there is no such document, the backend url is invalid or stdout
/// is closed.
#[actix_web::main]
pub async fn chat(conf: config::Client, id: u64, question: String) -> anyhow::Result<()> {
    let relay = HttpRelay::new(conf.backend_url()?);
    let store = load_store(&conf);
    let mut out = io::stdout().lock();
    let mut view = detail_view(&conf, &store, id, &mut out)?;
    view.set_input(&question);
    view.send(&relay).await;
    render::detail(&mut out, &view)?;
    Ok(())
}

/// Browse interactively from `path`, reading commands from stdin.
///
/// # Errors
/// Errors if stdin or stdout fail.
#[actix_web::main]
pub async fn browse(conf: config::Client, path: String) -> anyhow::Result<()> {
    let backend_url = conf.backend_url()?;
    let relay = HttpRelay::new(backend_url.clone());
    let mut session = Session::new(load_store(&conf), &relay, backend_url, &path);
    run_session(&mut session, io::stdin().lock(), &mut io::stdout().lock())
        .await
        .context("interactive session failed")
}
