//! Chat session state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Whether a chat surface is waiting on the backend.
///
/// - `Idle`: accepts a new query
/// - `AwaitingResponse`: a query is outstanding; further sends are rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChatState {
    #[default]
    Idle,
    AwaitingResponse,
}

impl ChatState {
    /// Returns true if a new query may be sent.
    pub fn accepts_input(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl StateMachine for ChatState {
    fn next_states(&self) -> &'static [Self] {
        match self {
            ChatState::Idle => &[ChatState::AwaitingResponse],
            ChatState::AwaitingResponse => &[ChatState::Idle],
        }
    }
}
