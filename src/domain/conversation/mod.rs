//! Conversation module - per-surface chat sessions and their message logs.

mod log;
mod message;
mod session;
mod state;
mod surface;

pub use log::MessageLog;
pub use message::{Message, MessageContent, Role};
pub use session::{ChatSession, OutstandingRequest};
pub use state::ChatState;
pub use surface::ChatSurface;
