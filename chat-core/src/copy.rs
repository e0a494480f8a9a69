//! User-visible strings.

use serde::{Deserialize, Serialize};

/// Text the widget shows on its own behalf (everything that is not a reply).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatCopy {
    pub greeting: String,
    /// Shown for every failed query, whatever the cause.
    pub failure: String,
    /// Shown instead of sending when the browser reports it is offline.
    pub offline: String,
    pub connection_restored: String,
    pub connection_lost: String,
    pub typing_label: String,
}

impl Default for ChatCopy {
    fn default() -> Self {
        Self {
            greeting: "Hello! I am your book assistant. Ask me anything about the book.".to_owned(),
            failure: "Sorry, I encountered an error while processing your request.".to_owned(),
            offline: "You appear to be offline. Check your connection and try again.".to_owned(),
            connection_restored: "Connection restored.".to_owned(),
            connection_lost: "Connection lost. Messages cannot be sent until you are back online."
                .to_owned(),
            typing_label: "Assistant is typing".to_owned(),
        }
    }
}
