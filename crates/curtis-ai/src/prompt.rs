//! Prompt template with a single conversation-history slot.

/// Placeholder replaced by the conversation history.
pub const MEMORY_SLOT: &str = "{message_memory}";

/// Marks the end of the instruction block in Llama-2 chat prompts.
pub const LLAMA_CLOSING_MARKER: &str = "[/INST]";

const CURTIS_HEAD: &str = "<s>[INST] <<SYS>>
You are a friendly Canadian chatbot named 'Curtis Covalent'. Introduce yourself as such.

Please consider the message history below, then provide a brief and polite response.
<</SYS>>
";

// The trailing space after the marker matters to the model.
const CURTIS_TAIL: &str = " [/INST] ";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("template has no {MEMORY_SLOT} slot")]
    MissingSlot,
    #[error("template has more than one {MEMORY_SLOT} slot")]
    DuplicateSlot,
    #[error("closing marker {0:?} does not appear after the slot")]
    MissingClosingMarker(String),
}

/// Fixed wrapper text around one variable slot.
///
/// The text on either side of the slot is set at construction and never
/// changes; only the history substituted into the slot varies per prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    head: String,
    tail: String,
    closing_marker: String,
}

impl PromptTemplate {
    /// Parse a template containing exactly one [`MEMORY_SLOT`], followed
    /// somewhere by `closing_marker`.
    pub fn new(text: &str, closing_marker: impl Into<String>) -> Result<Self, TemplateError> {
        let closing_marker = closing_marker.into();
        let (head, tail) = text
            .split_once(MEMORY_SLOT)
            .ok_or(TemplateError::MissingSlot)?;
        if tail.contains(MEMORY_SLOT) {
            return Err(TemplateError::DuplicateSlot);
        }
        if closing_marker.is_empty() || !tail.contains(closing_marker.as_str()) {
            return Err(TemplateError::MissingClosingMarker(closing_marker));
        }
        Ok(Self {
            head: head.to_string(),
            tail: tail.to_string(),
            closing_marker,
        })
    }

    /// The Curtis Covalent persona wrapped in Llama-2 instruction tags.
    pub fn curtis() -> Self {
        Self {
            head: CURTIS_HEAD.to_string(),
            tail: CURTIS_TAIL.to_string(),
            closing_marker: LLAMA_CLOSING_MARKER.to_string(),
        }
    }

    /// Substitute `history` into the slot.
    pub fn render(&self, history: &str) -> String {
        let mut out = String::with_capacity(self.head.len() + history.len() + self.tail.len());
        out.push_str(&self.head);
        out.push_str(history);
        out.push_str(&self.tail);
        out
    }

    /// Text before the slot.
    pub fn opening(&self) -> &str {
        &self.head
    }

    /// Text after the slot.
    pub fn closing(&self) -> &str {
        &self.tail
    }

    pub fn closing_marker(&self) -> &str {
        &self.closing_marker
    }

    /// The template as written, slot included.
    pub fn text(&self) -> String {
        self.render(MEMORY_SLOT)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::curtis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curtis_template_parses_from_its_own_text() {
        let curtis = PromptTemplate::curtis();
        let parsed = PromptTemplate::new(&curtis.text(), LLAMA_CLOSING_MARKER).unwrap();
        assert_eq!(parsed, curtis);
    }

    #[test]
    fn curtis_template_ends_with_marker_and_space() {
        let text = PromptTemplate::curtis().text();
        assert!(text.starts_with("<s>[INST] <<SYS>>\n"));
        assert!(text.ends_with("{message_memory} [/INST] "));
    }

    #[test]
    fn render_only_changes_the_slot() {
        let template = PromptTemplate::curtis();
        let out = template.render("User: hi");
        assert!(out.starts_with(template.opening()));
        assert!(out.ends_with(template.closing()));
        assert_eq!(
            out.len(),
            template.opening().len() + "User: hi".len() + template.closing().len()
        );
    }

    #[test]
    fn rejects_missing_slot() {
        let err = PromptTemplate::new("no slot [/INST]", "[/INST]").unwrap_err();
        assert_eq!(err, TemplateError::MissingSlot);
    }

    #[test]
    fn rejects_two_slots() {
        let err =
            PromptTemplate::new("{message_memory} {message_memory} [/INST]", "[/INST]").unwrap_err();
        assert_eq!(err, TemplateError::DuplicateSlot);
    }

    #[test]
    fn rejects_marker_before_slot() {
        let err = PromptTemplate::new("[/INST] {message_memory}", "[/INST]").unwrap_err();
        assert!(matches!(err, TemplateError::MissingClosingMarker(_)));
    }

    #[test]
    fn custom_template_keeps_its_marker() {
        let template = PromptTemplate::new("### History\n{message_memory}\n### End", "### End").unwrap();
        assert_eq!(template.closing_marker(), "### End");
        assert_eq!(template.render("x"), "### History\nx\n### End");
    }
}
