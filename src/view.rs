//! Signal-backed [`ChatView`] shared by the widget and its submit tasks.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use chat_core::{ChatState, ChatView, Origin, TypingHandle};
use leptos::prelude::*;

/// CSS classes on a typing indicator block.
pub const TYPING_CONTAINER_CLASS: &str = "message bot-message typing-indicator-container";

/// Handles to the widget's reactive state: the message log and the input text.
///
/// `Copy`, so every submit task gets its own controller over the same view.
#[derive(Clone, Copy, Debug)]
pub struct WidgetView {
    chat: RwSignal<ChatState>,
    input: RwSignal<String>,
}

impl WidgetView {
    pub fn new(chat: RwSignal<ChatState>, input: RwSignal<String>) -> Self {
        Self { chat, input }
    }
}

impl ChatView for WidgetView {
    fn render(&self, text: &str, origin: Origin) {
        self.chat.update(|c| {
            c.push(text, origin);
        });
    }

    fn show_typing(&self) -> TypingHandle {
        // A disposed signal yields the default handle, which hides nothing.
        self.chat.try_update(ChatState::show_typing).unwrap_or_default()
    }

    fn hide_typing(&self, handle: TypingHandle) {
        self.chat.update(|c| {
            c.hide_typing(handle);
        });
    }

    fn clear_input(&self) {
        self.input.set(String::new());
    }

    fn clear_messages(&self) {
        self.chat.update(ChatState::clear);
    }
}

/// CSS classes for a message block.
pub fn message_class(origin: Origin) -> String {
    format!("message {}", origin.css_class())
}
