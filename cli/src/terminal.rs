//! Line-oriented [`ChatView`] for the terminal client.
//!
//! User input is not re-rendered (interactive users typed it after the `You: `
//! prompt; one-shot mode prints it with [`TerminalView::echo`]). Bot messages
//! are printed as `Assistant: ...` blocks. The typing indicator is a transient
//! line that is erased in place, and is only drawn when stdout is a terminal.
//!
//! `ChatView` methods cannot fail, so the first write error is kept and
//! handed back by [`TerminalView::take_error`].

#[cfg(test)]
#[path = "terminal_test.rs"]
mod terminal_test;

use std::cell::RefCell;
use std::io::{self, Write};

use chat_core::{ChatCopy, ChatMessage, ChatState, ChatView, Origin, TypingHandle};

const ERASE_LINE: &str = "\r\x1b[2K";

pub struct TerminalView<W: Write> {
    out: RefCell<W>,
    log: RefCell<ChatState>,
    indicator: bool,
    typing_label: String,
    error: RefCell<Option<io::Error>>,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, indicator: bool, copy: &ChatCopy) -> Self {
        Self {
            out: RefCell::new(out),
            log: RefCell::new(ChatState::default()),
            indicator,
            typing_label: copy.typing_label.clone(),
            error: RefCell::new(None),
        }
    }

    /// Print a line that is not part of the conversation.
    pub fn notice(&self, text: &str) {
        self.write(&format!("{text}\n"));
    }

    /// Print the input prompt without a newline.
    pub fn prompt(&self) {
        self.write("You: ");
    }

    /// Print the question being asked, as the prompt would have shown it.
    pub fn echo(&self, text: &str) {
        self.write(&format!("You: {text}\n"));
    }

    /// First output error since the last call, if any.
    pub fn take_error(&self) -> Option<io::Error> {
        self.error.borrow_mut().take()
    }

    /// Messages rendered since the last clear.
    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.log.borrow().messages().cloned().collect()
    }

    fn write(&self, text: &str) {
        let mut out = self.out.borrow_mut();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            tracing::debug!(error = %e, "terminal write failed");
            self.error.borrow_mut().get_or_insert(e);
        }
    }
}

/// Terminal rendering of one message; empty for user messages.
pub fn format_message(text: &str, origin: Origin) -> String {
    match origin {
        Origin::User => String::new(),
        Origin::Bot => format!("\nAssistant: {text}\n\n"),
    }
}

impl<W: Write> ChatView for TerminalView<W> {
    fn render(&self, text: &str, origin: Origin) {
        self.log.borrow_mut().push(text, origin);
        let line = format_message(text, origin);
        if !line.is_empty() {
            self.write(&line);
        }
    }

    fn show_typing(&self) -> TypingHandle {
        let handle = self.log.borrow_mut().show_typing();
        if self.indicator {
            self.write(&format!("{}...", self.typing_label));
        }
        handle
    }

    fn hide_typing(&self, handle: TypingHandle) {
        let removed = self.log.borrow_mut().hide_typing(handle);
        if removed && self.indicator {
            self.write(ERASE_LINE);
        }
    }

    fn clear_input(&self) {}

    fn clear_messages(&self) {
        self.log.borrow_mut().clear();
        self.write("\n--- chat cleared ---\n");
    }
}
