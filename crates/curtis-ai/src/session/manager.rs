//! ConversationSession struct and history management.

use curtis_common::SessionId;
use tracing::debug;

use crate::memory::MemoryBuffer;
use crate::prompt::PromptTemplate;
use crate::{GenerateRequest, Message};

use super::types::ChatSettings;

/// Cue appended after the user's line so the model answers as the bot.
pub(crate) const BOT_CUE: &str = "Bot: ";

/// A chat conversation: bounded memory, display log and prompt building.
///
/// Turns take `&mut self`, so a session runs one turn at a time.
pub struct ConversationSession {
    pub(super) id: SessionId,
    pub(super) template: PromptTemplate,
    /// Lines replayed into the prompt.
    pub(super) memory: MemoryBuffer,
    /// Every completed turn, for display. Not bounded.
    pub(super) messages: Vec<Message>,
    pub(super) settings: ChatSettings,
}

impl ConversationSession {
    pub fn new(settings: ChatSettings) -> Self {
        Self {
            id: SessionId::new(),
            template: PromptTemplate::curtis(),
            memory: MemoryBuffer::new(settings.memory_length),
            messages: Vec::new(),
            settings,
        }
    }

    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    /// Build the full prompt for `user_text` from the current memory.
    pub fn format_prompt(&self, user_text: &str) -> String {
        let user_line = Message::user(user_text).render();
        let mut history: Vec<&str> = self.memory.iter().collect();
        history.push(&user_line);
        history.push(BOT_CUE);
        self.template.render(&history.join("\n\n"))
    }

    /// Remember a finished exchange, then trim memory to its bound.
    pub fn record_turn(&mut self, user_text: &str, bot_text: &str) {
        self.memory.push(Message::user(user_text).render());
        self.memory.push(Message::bot(bot_text).render());
    }

    /// Change the memory bound and trim right away.
    pub fn resize_memory(&mut self, bound: usize) {
        debug!(session = %self.id, from = self.memory.bound(), to = bound, "resizing memory");
        self.settings.memory_length = bound;
        self.memory.resize(bound);
    }

    pub fn set_max_response_tokens(&mut self, tokens: u32) {
        self.settings.max_response_tokens = tokens;
    }

    pub fn set_streaming(&mut self, streaming: bool) {
        self.settings.streaming = streaming;
    }

    pub(super) fn build_request(&self, user_text: &str) -> GenerateRequest {
        GenerateRequest {
            prompt: self.format_prompt(user_text),
            max_new_tokens: self.settings.max_response_tokens,
        }
    }

    /// Append a successful exchange to the log and memory. Empty replies
    /// are not recorded.
    pub(super) fn complete_turn(&mut self, user_text: &str, reply: &str) {
        if reply.is_empty() {
            debug!(session = %self.id, "empty reply, turn not recorded");
            return;
        }
        self.messages.push(Message::user(user_text));
        self.messages.push(Message::bot(reply));
        self.record_turn(user_text, reply);
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    /// Completed turns, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn memory(&self) -> &MemoryBuffer {
        &self.memory
    }

    pub fn settings(&self) -> ChatSettings {
        self.settings
    }

    /// Start a fresh conversation, keeping settings.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.memory.clear();
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new(ChatSettings::default())
    }
}
