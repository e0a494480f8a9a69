//! Rendering seam between the send pipeline and a concrete front end.

use std::rc::Rc;

use crate::message::{Origin, TypingHandle};

/// Everything the pipeline may do to the screen.
///
/// Implementations take `&self` and use interior mutability (signals,
/// `RefCell`) since overlapping submissions share one view.
pub trait ChatView {
    /// Append a message block and keep it scrolled into view.
    fn render(&self, text: &str, origin: Origin);

    /// Append a typing indicator.
    fn show_typing(&self) -> TypingHandle;

    /// Remove a typing indicator. Must tolerate handles that are already gone.
    fn hide_typing(&self, handle: TypingHandle);

    /// Empty the text input after a message is accepted.
    fn clear_input(&self);

    /// Drop every rendered message and indicator.
    fn clear_messages(&self);
}

impl<V: ChatView + ?Sized> ChatView for Rc<V> {
    fn render(&self, text: &str, origin: Origin) {
        (**self).render(text, origin);
    }

    fn show_typing(&self) -> TypingHandle {
        (**self).show_typing()
    }

    fn hide_typing(&self, handle: TypingHandle) {
        (**self).hide_typing(handle);
    }

    fn clear_input(&self) {
        (**self).clear_input();
    }

    fn clear_messages(&self) {
        (**self).clear_messages();
    }
}
