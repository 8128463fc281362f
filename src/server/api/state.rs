//! Centralized state management for the Actix web server
use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::engine::Engine;

/// Global, read-only state
pub trait Global: Send + Sync {
    /// Directory uploads are written to and served from
    fn uploads_dir(&self) -> &Path;
    /// The Clarity engine
    fn engine(&self) -> &dyn Engine;
    /// Largest accepted upload in bytes
    fn max_upload_bytes(&self) -> usize;
}

/// Application state
#[derive(Clone)]
pub struct App {
    /// Directory uploads are written to and served from
    pub uploads_dir: PathBuf,
    /// The Clarity engine
    pub engine: Arc<dyn Engine>,
    /// Largest accepted upload in bytes
    pub max_upload_bytes: usize,
}

impl Global for App {
    fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    fn engine(&self) -> &dyn Engine {
        self.engine.as_ref()
    }

    fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }
}

impl fmt::Debug for App {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(
            formatter,
            "Relay storing uploads in {} (max {} bytes)",
            self.uploads_dir.display(),
            self.max_upload_bytes
        )
    }
}
