//! Plain text rendering of the client's views.
use std::io::{self, Write};

use super::detail::{Delivery, DocumentView, Sender, NO_SECTIONS};
use super::document::Document;

/// Heading of the not-found view.
pub const NOT_FOUND_TITLE: &str = "Document not found";
/// Body of the not-found view.
pub const NOT_FOUND_MESSAGE: &str = "The document may have been moved or deleted.";

/// Write the document list, or a hint when `documents` is empty.
///
/// # Errors
/// Errors if `out` cannot be written to.
pub fn list(out: &mut impl Write, documents: &[&Document], query: &str) -> io::Result<()> {
    if documents.is_empty() {
        return if query.is_empty() {
            writeln!(out, "No documents yet. Upload one with `clarity upload <file>`.")
        } else {
            writeln!(out, "No documents match \"{query}\".")
        };
    }
    for doc in documents {
        let chat = if doc.can_chat() { "chat" } else { "-" };
        writeln!(
            out,
            "{:>4}  {:<40}  added {:<10}  opened {:<10}  {chat}",
            doc.id, doc.title, doc.added, doc.last_opened
        )?;
    }
    Ok(())
}

/// Write the quick view of `doc`: its metadata, summary and sections.
///
/// # Errors
/// Errors if `out` cannot be written to.
pub fn quick_view(out: &mut impl Write, doc: &Document) -> io::Result<()> {
    writeln!(out, "{}", doc.title)?;
    writeln!(out, "Document Type: {}", doc.kind.as_deref().unwrap_or("-"))?;
    writeln!(out, "Pages: {}", doc.pages)?;
    writeln!(out, "Last Opened: {}", doc.last_opened)?;
    writeln!(out, "Added: {}", doc.added)?;
    if let Some(summary) = &doc.summary {
        writeln!(out, "\nAI-Generated Summary\n{summary}")?;
    }
    if let Some(sections) = doc.sections.as_ref().filter(|sections| !sections.is_empty()) {
        writeln!(out, "\nSection Breakdown")?;
        for section in sections {
            writeln!(out, "  {}\n    {}", section.title, section.summary)?;
        }
    }
    Ok(())
}

/// Write the detail view: title, file link, sections and the transcript.
///
/// # Errors
/// Errors if `out` cannot be written to.
pub fn detail(out: &mut impl Write, view: &DocumentView) -> io::Result<()> {
    let doc = view.document();
    writeln!(out, "{}", doc.title)?;
    if !view.document_url().is_empty() {
        writeln!(out, "File: {}", view.document_url())?;
    }
    if let Some(summary) = &doc.summary {
        writeln!(out, "\n{summary}")?;
    }
    writeln!(out, "\nSections")?;
    if view.sections().is_empty() {
        writeln!(out, "  {NO_SECTIONS}")?;
    }
    for (index, section) in view.sections().iter().enumerate() {
        let open = view.open_section() == Some(index);
        writeln!(out, "  [{}] {} {}", index + 1, if open { "v" } else { ">" }, section.title)?;
        if open {
            writeln!(out, "      {}", section.summary)?;
        }
    }
    writeln!(out, "\nAI Assistant")?;
    for message in view.messages() {
        transcript_line(out, message.sender, message.status, &message.text)?;
    }
    if view.is_thinking() {
        writeln!(out, "  ai> Thinking...")?;
    }
    Ok(())
}

/// One chat message.
fn transcript_line(
    out: &mut impl Write,
    sender: Sender,
    status: Delivery,
    text: &str,
) -> io::Result<()> {
    let who = match sender {
        Sender::User => "you",
        Sender::Ai => "ai",
    };
    let marker = match status {
        Delivery::Delivered => "",
        Delivery::Pending => " (sending)",
        Delivery::Failed => " (failed)",
    };
    writeln!(out, "  {who}> {text}{marker}")
}

/// Write the not-found view.
///
/// # Errors
/// Errors if `out` cannot be written to.
pub fn not_found(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{NOT_FOUND_TITLE}\n{NOT_FOUND_MESSAGE}")
}
