//! Front-end independent core of the book assistant chat.
//!
//! This crate owns the `/query/` wire contract, the error taxonomy for a
//! query round trip, the rendered message log, and the send pipeline that
//! drives a [`view::ChatView`] through one [`query::QueryTransport`] call per
//! submission. The browser widget (root crate) and the terminal client
//! (`cli`) plug their own view, transport, and connectivity source into the
//! same [`pipeline::ChatController`].
//!
//! Nothing here logs. Every submission returns a [`pipeline::SendOutcome`]
//! carrying the failure cause, and each front end reports it with its own
//! logging facility.

pub mod copy;
pub mod message;
pub mod pipeline;
pub mod query;
pub mod view;

pub use copy::ChatCopy;
pub use message::{ChatEntry, ChatMessage, ChatState, Origin, TypingHandle};
pub use pipeline::{AlwaysOnline, ChatController, Connectivity, SendOutcome, SendPhase, normalize_input};
pub use query::{Endpoint, HttpReply, QueryError, QueryReply, QueryRequest, QueryTransport, classify_reply};
pub use view::ChatView;
