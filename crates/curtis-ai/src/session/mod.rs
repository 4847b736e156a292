//! Conversation session management.
//!
//! A `ConversationSession` owns the bounded memory that is replayed into
//! every prompt and the log of completed turns.

mod chat;
mod manager;
mod types;


pub use manager::ConversationSession;
pub use types::ChatSettings;
