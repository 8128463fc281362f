//! Running the CLI

// Allow exits because in this file we ideally handle all errors with known exit codes
#![allow(clippy::exit)]

use crate::client::commands;
use crate::config::{Config, DEFAULT_CONFIG_PATH};
use crate::server::app::serve_relay;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Clarity manages documents processed by the Clarity engine.
/// `serve` runs the relay, every other subcommand is the client.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,
    /// Also write logs, rotated daily, to this directory.
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// Clarity cli subcommands
    #[command(subcommand)]
    subcommands: Subcommands,
}

///
#[derive(Clone, clap::Subcommand)]
enum Subcommands {
    /// Run the relay between clients and the engine
    Serve {
        /// Address to bind to.
        #[arg(short, long)]
        bind: Option<String>,
        /// Port on which to serve the relay.
        #[arg(short, long)]
        port: Option<u16>,
        /// Directory uploads are stored in.
        #[arg(short, long)]
        uploads_dir: Option<PathBuf>,
        /// Base URL of the engine API.
        #[arg(short, long)]
        engine_url: Option<String>,
    },
    /// Upload a document for processing
    Upload {
        /// File to upload.
        file: PathBuf,
    },
    /// List documents, optionally filtered by title
    List {
        /// Case-insensitive title filter.
        #[arg(short, long, default_value_t = String::new())]
        search: String,
    },
    /// Show a document's details and mark it opened
    Peek {
        /// Document id.
        id: u64,
    },
    /// Rename a document
    Rename {
        /// Document id.
        id: u64,
        /// New title.
        title: String,
    },
    /// Remove a document from the collection
    Delete {
        /// Document id.
        id: u64,
    },
    /// Show the view at a path, e.g. `/documents/3`
    Open {
        /// Path to resolve.
        path: String,
    },
    /// Ask a question about a document
    Chat {
        /// Document id.
        id: u64,
        /// The question.
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Browse documents interactively
    Browse {
        /// Path to start at, e.g. `/documents/3`.
        #[arg(default_value_t = String::from("/"))]
        path: String,
    },
}

/// Log to stderr, and to a daily file under `log_dir` when given.
///
/// The returned guard flushes the file writer when dropped.
fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (file_layer, guard) = log_dir.map_or((None, None), |dir| {
        let (writer, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "clarity.log"));
        let layer = fmt::layer().with_writer(writer).with_ansi(false);
        (Some(layer), Some(guard))
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();
    guard
}

/// Apply command line overrides to the relay settings.
fn serve(
    mut conf: Config,
    bind: Option<String>,
    port: Option<u16>,
    uploads_dir: Option<PathBuf>,
    engine_url: Option<String>,
) -> anyhow::Result<()> {
    if let Some(bind) = bind {
        conf.server.bind = bind;
    }
    if let Some(port) = port {
        conf.server.port = port;
    }
    if let Some(uploads_dir) = uploads_dir {
        conf.server.uploads_dir = uploads_dir;
    }
    if let Some(engine_url) = engine_url {
        conf.server.engine_url = engine_url;
    }
    conf.validate()?;
    serve_relay(conf.server)?;
    Ok(())
}

/// Run the subcommand with `conf`.
fn execute(subcommands: Subcommands, conf: Config) -> anyhow::Result<()> {
    let client = conf.client.clone();
    match subcommands {
        Subcommands::Serve {
            bind,
            port,
            uploads_dir,
            engine_url,
        } => serve(conf, bind, port, uploads_dir, engine_url),
        Subcommands::Upload { file } => commands::upload(client, &file),
        Subcommands::List { search } => commands::list(&client, &search),
        Subcommands::Peek { id } => commands::peek(&client, id),
        Subcommands::Rename { id, title } => commands::rename(&client, id, &title),
        Subcommands::Delete { id } => commands::delete(&client, id),
        Subcommands::Open { path } => commands::open(&client, &path),
        Subcommands::Chat { id, question } => commands::chat(client, id, question.join(" ")),
        Subcommands::Browse { path } => commands::browse(client, path),
    }
}

/// Main entrypoint to application
///
/// Exits with status 1 when the configuration cannot be loaded or the
/// subcommand fails.
pub fn run() {
    let cli = Cli::parse();
    let guard = init_tracing(cli.log_dir.as_deref());
    tracing::debug!("Starting application");
    let conf = Config::load(Path::new(&cli.config)).unwrap_or_else(|err| {
        tracing::error!("Error: {err:#}");
        std::process::exit(1);
    });
    if let Err(err) = execute(cli.subcommands, conf) {
        tracing::error!("{err:#}");
        drop(guard);
        std::process::exit(1);
    }
}
