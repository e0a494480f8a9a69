//! Rendered chat log: messages and typing indicators in display order.

#[cfg(test)]
#[path = "message_test.rs"]
mod message_test;

use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Bot,
}

impl Origin {
    /// CSS modifier class used by the widget markup.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::User => "user-message",
            Self::Bot => "bot-message",
        }
    }
}

/// A single rendered message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub text: String,
    pub origin: Origin,
}

/// Handle to a shown typing indicator.
///
/// Live handles are never zero, so the default handle refers to nothing and
/// hiding it is a no-op.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TypingHandle(u64);

impl TypingHandle {
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// One block in the message list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatEntry {
    Message(ChatMessage),
    Typing(TypingHandle),
}

impl ChatEntry {
    /// Stable key for keyed list rendering.
    #[must_use]
    pub fn key(&self) -> u64 {
        match self {
            Self::Message(msg) => msg.id,
            Self::Typing(handle) => handle.id(),
        }
    }
}

/// Append-only message list with interleaved typing indicators.
///
/// Entries are only ever appended; the sole removals are hiding an indicator
/// and clearing the whole log.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatState {
    pub entries: Vec<ChatEntry>,
    next_id: u64,
}

impl ChatState {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Append a message and return its id.
    pub fn push(&mut self, text: impl Into<String>, origin: Origin) -> u64 {
        let id = self.allocate_id();
        self.entries.push(ChatEntry::Message(ChatMessage { id, text: text.into(), origin }));
        id
    }

    /// Append a typing indicator.
    pub fn show_typing(&mut self) -> TypingHandle {
        let handle = TypingHandle(self.allocate_id());
        self.entries.push(ChatEntry::Typing(handle));
        handle
    }

    /// Remove a typing indicator. Returns `false` if it was already gone.
    pub fn hide_typing(&mut self, handle: TypingHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| *entry != ChatEntry::Typing(handle));
        self.entries.len() != before
    }

    /// Drop every message and indicator. Ids keep increasing.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.entries.iter().filter_map(|entry| match entry {
            ChatEntry::Message(msg) => Some(msg),
            ChatEntry::Typing(_) => None,
        })
    }

    #[must_use]
    pub fn typing_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry, ChatEntry::Typing(_)))
            .count()
    }

    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.typing_count() > 0
    }
}
