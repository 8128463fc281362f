//! Interactive browsing: a line based session over the list and detail
//! views.
use std::fmt;
use std::io::{self, BufRead, Write};

use url::Url;

use super::detail::DocumentView;
use super::relay::Relay;
use super::render;
use super::router::{Router, View};
use super::store::DocumentStore;

/// Printed for `help` and after an unknown command.
pub const HELP: &str = "\
Commands:
  open <id>         show a document
  back | forward    move through history
  home              go to the document list
  search [text]     filter the list by title, no text clears
  ask <question>    ask about the open document
  toggle <n>        expand or collapse section n
  help              show this help
  quit              leave";

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the document with this id.
    Open(u64),
    /// History back.
    Back,
    /// History forward.
    Forward,
    /// Back to the list.
    Home,
    /// Set the list filter, empty to clear it.
    Search(String),
    /// Ask about the open document.
    Ask(String),
    /// Toggle a section, 1-based as displayed.
    Toggle(usize),
    /// Print the command list.
    Help,
    /// End the session.
    Quit,
}

impl Command {
    /// Parse one input line.
    ///
    /// # Errors
    /// Returns the message to show when the line is not a command.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        match name {
            "open" => rest
                .parse()
                .map(Self::Open)
                .map_err(|_| format!("Not a document id: \"{rest}\"")),
            "back" => Ok(Self::Back),
            "forward" => Ok(Self::Forward),
            "home" | "list" => Ok(Self::Home),
            "search" => Ok(Self::Search(rest.to_owned())),
            "ask" => Ok(Self::Ask(rest.to_owned())),
            "toggle" => match rest.parse::<usize>() {
                Ok(number) if number > 0 => Ok(Self::Toggle(number - 1)),
                _ => Err(format!("Not a section number: \"{rest}\"")),
            },
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            _ => Err(format!("Unknown command \"{name}\"")),
        }
    }
}

/// State of one interactive session.
pub struct Session<'relay> {
    /// The documents.
    store: DocumentStore,
    /// Used to ask questions.
    relay: &'relay dyn Relay,
    /// Where stored files are served.
    backend_url: Url,
    /// Current path and view.
    router: Router,
    /// State of the open detail view.
    detail: Option<DocumentView>,
    /// List filter.
    query: String,
}

impl fmt::Debug for Session<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "Session at {} over {:?}", self.router.current_path(), self.store)
    }
}

impl<'relay> Session<'relay> {
    /// Session starting at `initial_path`.
    #[must_use]
    pub fn new(
        store: DocumentStore,
        relay: &'relay dyn Relay,
        backend_url: Url,
        initial_path: &str,
    ) -> Self {
        let router = Router::new(initial_path, &store);
        let mut session = Self {
            store,
            relay,
            backend_url,
            router,
            detail: None,
            query: String::new(),
        };
        session.sync_detail();
        session
    }

    /// The current view.
    #[must_use]
    pub const fn view(&self) -> &View {
        self.router.view()
    }

    /// The open detail view, if any.
    #[must_use]
    pub const fn detail(&self) -> Option<&DocumentView> {
        self.detail.as_ref()
    }

    /// The documents.
    #[must_use]
    pub const fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Apply `command`. Returns false once the session should end.
    ///
    /// # Errors
    /// Errors if `out` cannot be written to.
    pub async fn apply(&mut self, command: Command, out: &mut impl Write) -> io::Result<bool> {
        match command {
            Command::Open(id) => {
                self.router.navigate_to_document(id, &self.store);
            }
            Command::Back => {
                self.router.back(&self.store);
            }
            Command::Forward => {
                self.router.forward(&self.store);
            }
            Command::Home => {
                self.router.go_back_to_list(&self.store);
            }
            Command::Search(query) => self.query = query,
            Command::Ask(question) => {
                let Some(detail) = self.detail.as_mut() else {
                    writeln!(out, "Open a document before asking about it.")?;
                    return Ok(true);
                };
                detail.set_input(&question);
                detail.send(self.relay).await;
            }
            Command::Toggle(index) => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.toggle_section(index);
                }
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                return Ok(true);
            }
            Command::Quit => return Ok(false),
        }
        self.sync_detail();
        self.render(out)?;
        Ok(true)
    }

    /// Write the current view.
    ///
    /// # Errors
    /// Errors if `out` cannot be written to.
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "[{}]", self.router.current_path())?;
        match (self.router.view(), &self.detail) {
            (View::Detail(_), Some(detail)) => render::detail(out, detail),
            (View::NotFound, _) => render::not_found(out),
            _ => render::list(out, &self.store.filter(&self.query), &self.query),
        }
    }

    /// Keep the detail state in step with the routed view. A transcript
    /// survives only while the same document stays open.
    fn sync_detail(&mut self) {
        self.detail = match self.router.view() {
            View::Detail(doc) => match self.detail.take() {
                Some(open) if open.document().id == doc.id => Some(open),
                _ => Some(DocumentView::new(doc.clone(), &self.backend_url)),
            },
            View::List | View::NotFound => None,
        };
    }
}

/// Run `session` reading commands from `input` until `quit` or end of input.
///
/// # Errors
/// Errors if reading `input` or writing `out` fails.
pub async fn run_session(
    session: &mut Session<'_>,
    input: impl BufRead,
    out: &mut impl Write,
) -> io::Result<()> {
    session.render(out)?;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match Command::parse(&line) {
            Ok(command) => {
                if !session.apply(command, out).await? {
                    break;
                }
            }
            Err(message) => writeln!(out, "{message}\n{HELP}")?,
        }
        out.flush()?;
    }
    Ok(())
}
