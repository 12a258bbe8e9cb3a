//! Command handlers, grouped by feature.

pub mod chat;

pub use chat::{
    SendMessageCommand, SendMessageError, SendMessageHandler, SendMessageOutcome,
    SendMessageResult,
};
