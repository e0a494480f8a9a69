//! Send pipeline: one submission, one request, one terminal render.
//!
//! DESIGN
//! ======
//! `ChatController` is cheap to build and holds no per-request state, so each
//! submission runs as its own task and two requests may be outstanding at
//! once. Each task owns its typing indicator handle and releases it exactly
//! once before rendering its terminal message.
//!
//! ```text
//! Idle --submit--> Sending --2xx + "success"--> Succeeded --> Idle
//!                     \--any other outcome----> Failed    --> Idle
//! ```

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;

use crate::copy::ChatCopy;
use crate::message::{Origin, TypingHandle};
use crate::query::{QueryError, QueryTransport, classify_reply};
use crate::view::ChatView;

/// Reports whether the network is currently reachable.
pub trait Connectivity {
    fn is_online(&self) -> bool;
}

/// Connectivity source for environments without an online/offline signal.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysOnline;

impl Connectivity for AlwaysOnline {
    fn is_online(&self) -> bool {
        true
    }
}

/// Pipeline state for a single submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendPhase {
    Idle,
    Sending,
    Succeeded,
    Failed,
}

/// How a submission ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was empty after trimming; nothing rendered, nothing sent.
    Ignored,
    /// Offline at submission time; offline notice rendered, nothing sent.
    Offline,
    /// Reply text rendered as a bot message.
    Replied(String),
    /// Generic failure rendered; the cause is kept for logging.
    Failed(QueryError),
}

impl SendOutcome {
    /// Terminal phase reached by this submission.
    #[must_use]
    pub fn phase(&self) -> SendPhase {
        match self {
            Self::Ignored | Self::Offline => SendPhase::Idle,
            Self::Replied(_) => SendPhase::Succeeded,
            Self::Failed(_) => SendPhase::Failed,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Replied(_))
    }
}

/// Trim raw input, returning `None` when nothing is left to send.
#[must_use]
pub fn normalize_input(input: &str) -> Option<&str> {
    let trimmed = input.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Drives a view through the send pipeline and connectivity notices.
pub struct ChatController<V, T, C> {
    view: V,
    transport: T,
    connectivity: C,
    copy: ChatCopy,
}

impl<V, T, C> ChatController<V, T, C>
where
    V: ChatView,
    T: QueryTransport,
    C: Connectivity,
{
    pub fn new(view: V, transport: T, connectivity: C, copy: ChatCopy) -> Self {
        Self { view, transport, connectivity, copy }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Render the greeting as a bot message.
    pub fn greet(&self) {
        self.view.render(&self.copy.greeting, Origin::Bot);
    }

    /// Empty the message list and greet again.
    ///
    /// Requests still in flight keep running; their indicators are gone, so
    /// their later release is a no-op and only their terminal message lands.
    pub fn clear(&self) {
        self.view.clear_messages();
        self.greet();
    }

    /// Run one submission end to end.
    pub async fn submit(&self, input: &str) -> SendOutcome {
        let Some(text) = normalize_input(input) else {
            return SendOutcome::Ignored;
        };

        if !self.connectivity.is_online() {
            self.view.render(&self.copy.offline, Origin::Bot);
            return SendOutcome::Offline;
        }

        self.view.render(text, Origin::User);
        self.view.clear_input();

        let mut typing = Some(self.view.show_typing());
        let result = self
            .transport
            .post_query(text)
            .await
            .and_then(|reply| classify_reply(&reply));
        self.release_typing(&mut typing);

        match result {
            Ok(reply) => {
                self.view.render(&reply, Origin::Bot);
                SendOutcome::Replied(reply)
            }
            Err(e) => {
                self.view.render(&self.copy.failure, Origin::Bot);
                SendOutcome::Failed(e)
            }
        }
    }

    /// Render the notice for an online/offline transition.
    pub fn connectivity_changed(&self, online: bool) {
        let notice = if online { &self.copy.connection_restored } else { &self.copy.connection_lost };
        self.view.render(notice, Origin::Bot);
    }

    /// React to the page becoming hidden or visible.
    ///
    /// Returning to a page while offline repeats the offline notice. Returns
    /// whether anything was rendered.
    pub fn visibility_changed(&self, visible: bool) -> bool {
        if visible && !self.connectivity.is_online() {
            self.view.render(&self.copy.offline, Origin::Bot);
            return true;
        }
        false
    }

    fn release_typing(&self, typing: &mut Option<TypingHandle>) {
        if let Some(handle) = typing.take() {
            self.view.hide_typing(handle);
        }
    }
}
