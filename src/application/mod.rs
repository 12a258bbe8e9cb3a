//! Application layer - command handlers and reply presentation.
//!
//! Sequences the domain for one chat query: the session records the query,
//! the gateway fetches the envelope, and the presenter turns it into the
//! final bot message.

pub mod handlers;
pub mod presenter;

pub use handlers::{
    SendMessageCommand, SendMessageError, SendMessageHandler, SendMessageOutcome,
    SendMessageResult,
};
pub use presenter::{BotReply, PresenterSettings, ResponsePresenter};
