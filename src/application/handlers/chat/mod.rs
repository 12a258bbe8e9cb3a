//! Chat handlers - driving one send cycle per user query.

mod send_message;

pub use send_message::{
    SendMessageCommand, SendMessageError, SendMessageHandler, SendMessageOutcome,
    SendMessageResult,
};
