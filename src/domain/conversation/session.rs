//! Chat session aggregate.
//!
//! Owns one surface's message log and its request state. Sending is split
//! in two: [`ChatSession::begin_send`] records the query and a placeholder,
//! [`ChatSession::complete`] swaps the placeholder for the reply. Only one
//! request may be outstanding at a time.

use serde::Serialize;
use tracing::debug;

use super::log::MessageLog;
use super::message::{Message, MessageContent};
use super::state::ChatState;
use super::surface::ChatSurface;
use crate::domain::chart::ChartAttachment;
use crate::domain::foundation::{DomainError, ErrorCode, MessageId, SessionId, StateMachine};

/// The request a session hands to the gateway after `begin_send`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutstandingRequest {
    pub surface: ChatSurface,
    pub query: String,
    pub user_message_id: MessageId,
    pub pending_id: MessageId,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    id: SessionId,
    surface: ChatSurface,
    state: ChatState,
    log: MessageLog,
}

impl ChatSession {
    pub fn new(surface: ChatSurface) -> Self {
        Self {
            id: SessionId::new(),
            surface,
            state: ChatState::Idle,
            log: MessageLog::new(),
        }
    }

    /// Records the user's query and a pending placeholder.
    ///
    /// The query is trimmed before it is stored and sent.
    ///
    /// # Errors
    ///
    /// - `PendingMessageOutstanding` if a request is already in flight
    /// - `ValidationFailed` if the query is blank
    pub fn begin_send(
        &mut self,
        query: &str,
        placeholder_text: &str,
    ) -> Result<OutstandingRequest, DomainError> {
        if !self.state.accepts_input() {
            return Err(DomainError::new(
                ErrorCode::PendingMessageOutstanding,
                "Wait for the current reply before sending another message",
            )
            .with_detail("session_id", self.id.to_string()));
        }

        let query = query.trim();
        let user_message = Message::user(query)?;
        let user_message_id = *user_message.id();
        let next_state = self.transition(ChatState::AwaitingResponse)?;

        self.log.append(user_message)?;
        let pending_id = self.log.open_pending(Message::placeholder(placeholder_text))?;
        self.state = next_state;

        debug!(session_id = %self.id, surface = %self.surface, "Chat request opened");
        Ok(OutstandingRequest {
            surface: self.surface,
            query: query.to_string(),
            user_message_id,
            pending_id,
        })
    }

    /// Resolves the outstanding request with the bot's reply.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if no request is outstanding
    pub fn complete(
        &mut self,
        content: MessageContent,
        chart: Option<ChartAttachment>,
    ) -> Result<&Message, DomainError> {
        let next_state = self.transition(ChatState::Idle)?;
        self.state = next_state;
        debug!(session_id = %self.id, surface = %self.surface, "Chat request resolved");
        self.log.resolve_pending(content, chart)
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn surface(&self) -> ChatSurface {
        self.surface
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    /// Returns true while a placeholder is waiting for its reply.
    pub fn is_awaiting_response(&self) -> bool {
        !self.state.accepts_input()
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn messages(&self) -> &[Message] {
        self.log.messages()
    }

    fn transition(&self, target: ChatState) -> Result<ChatState, DomainError> {
        self.state.transition_to(target).map_err(|err| {
            DomainError::new(ErrorCode::InvalidStateTransition, err.to_string())
                .with_detail("session_id", self.id.to_string())
        })
    }
}
