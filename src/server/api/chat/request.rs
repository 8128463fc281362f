use serde_derive::{Deserialize, Serialize};

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    /// The user's question.
    #[serde(default)]
    pub question: Option<String>,
    /// Engine identifier of the document the question is about.
    #[serde(default)]
    pub document_id: Option<String>,
}

impl ChatRequest {
    /// The question and document id, if both are present and non-empty.
    #[must_use]
    pub fn fields(&self) -> Option<(&str, &str)> {
        let question = self.question.as_deref().filter(|text| !text.is_empty())?;
        let document_id = self.document_id.as_deref().filter(|id| !id.is_empty())?;
        Some((question, document_id))
    }
}
