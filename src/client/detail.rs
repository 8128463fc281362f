//! The document detail view: the stored file, the engine's summary and
//! sections, and a chat panel.
//!
//! A question shows up in the transcript before the relay has answered. It
//! starts out [`Delivery::Pending`] and is settled to `Delivered` or `Failed`
//! once the call returns; it is never removed.
use url::Url;

use super::document::Document;
use super::relay::{ChatAnswer, Relay, RelayError};
use crate::engine::Section;
use crate::utils::http::join_url;

/// First message of every transcript.
pub const GREETING: &str = "Hello! Ask me anything about this document.";
/// Answer given locally when the document has no engine id.
pub const NOT_PROCESSED: &str =
    "This document hasn't been processed by the AI engine yet. Please re-upload it to enable chat.";
/// Shown in place of an empty section list.
pub const NO_SECTIONS: &str = "No sections were identified in this document.";

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    /// The person asking.
    User,
    /// The engine, or the client speaking for it.
    Ai,
}

/// Whether a message reached the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Settled.
    Delivered,
    /// Sent, no answer yet.
    Pending,
    /// The relay call failed.
    Failed,
}

/// One line of the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Author.
    pub sender: Sender,
    /// Text, markdown for answers.
    pub text: String,
    /// Delivery state.
    pub status: Delivery,
}

impl ChatMessage {
    /// A settled message from the AI side.
    #[must_use]
    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Ai,
            text: text.into(),
            status: Delivery::Delivered,
        }
    }
}

/// A question that has been shown but not yet answered.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingQuestion {
    /// Index of the provisional message in the transcript.
    index: usize,
    /// Question text.
    question: String,
    /// Engine id of the document.
    document_id: String,
}

impl PendingQuestion {
    /// The question text.
    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }
}

/// State of the detail view of one document.
#[derive(Debug, Clone)]
pub struct DocumentView {
    /// The document shown.
    document: Document,
    /// Absolute URL of the stored file, empty without one.
    document_url: String,
    /// Chat transcript, oldest first.
    messages: Vec<ChatMessage>,
    /// Text typed but not yet sent.
    input: String,
    /// Whether an answer is awaited.
    thinking: bool,
    /// Index of the expanded section.
    open_section: Option<usize>,
}

impl DocumentView {
    /// Fresh view of `document`, its file served by the relay at `backend_url`.
    #[must_use]
    pub fn new(document: Document, backend_url: &Url) -> Self {
        let document_url = document
            .file_path
            .as_deref()
            .map_or_else(String::new, |path| join_url(backend_url, path));
        Self {
            document,
            document_url,
            messages: vec![ChatMessage::ai(GREETING)],
            input: String::new(),
            thinking: false,
            open_section: None,
        }
    }

    /// The document shown.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Absolute URL of the stored file, empty when there is none.
    #[must_use]
    pub fn document_url(&self) -> &str {
        &self.document_url
    }

    /// The transcript.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Text typed but not yet sent.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether an answer is awaited.
    #[must_use]
    pub const fn is_thinking(&self) -> bool {
        self.thinking
    }

    /// Replace the input text.
    pub fn set_input(&mut self, text: &str) {
        text.clone_into(&mut self.input);
    }

    /// The engine's sections, empty when there are none.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        self.document.sections.as_deref().unwrap_or_default()
    }

    /// Index of the expanded section.
    #[must_use]
    pub const fn open_section(&self) -> Option<usize> {
        self.open_section
    }

    /// Expand section `index`, or collapse it if it is the expanded one.
    /// Indexes past the last section are ignored.
    pub fn toggle_section(&mut self, index: usize) -> Option<usize> {
        if index < self.sections().len() {
            self.open_section = (self.open_section != Some(index)).then_some(index);
        }
        self.open_section
    }

    /// Start sending the current input.
    ///
    /// Blank input does nothing. Without an engine id the view answers
    /// locally. Otherwise the question is shown as pending, the input is
    /// cleared and the returned [`PendingQuestion`] must be settled with
    /// [`Self::complete`].
    pub fn begin_send(&mut self) -> Option<PendingQuestion> {
        if self.input.trim().is_empty() {
            return None;
        }
        let question = std::mem::take(&mut self.input);
        let Some(document_id) = self.document.document_id.clone().filter(|id| !id.is_empty())
        else {
            self.messages.push(ChatMessage::ai(NOT_PROCESSED));
            return None;
        };
        self.messages.push(ChatMessage {
            sender: Sender::User,
            text: question.clone(),
            status: Delivery::Pending,
        });
        self.thinking = true;
        Some(PendingQuestion {
            index: self.messages.len() - 1,
            question,
            document_id,
        })
    }

    /// Settle `pending` with the relay's `outcome`.
    pub fn complete(&mut self, pending: &PendingQuestion, outcome: Result<ChatAnswer, RelayError>) {
        let (status, reply) = match outcome {
            Ok(answer) => (Delivery::Delivered, answer.answer),
            Err(err) => {
                tracing::error!("Chat error: {err}");
                (Delivery::Failed, format!("Sorry, an error occurred: {err}"))
            }
        };
        if let Some(message) = self.messages.get_mut(pending.index) {
            message.status = status;
        }
        self.messages.push(ChatMessage::ai(reply));
        self.thinking = false;
    }

    /// Send the current input through `relay` and wait for the answer.
    pub async fn send(&mut self, relay: &dyn Relay) {
        if let Some(pending) = self.begin_send() {
            let outcome = relay.chat(&pending.question, &pending.document_id).await;
            self.complete(&pending, outcome);
        }
    }
}
