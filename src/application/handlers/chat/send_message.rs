//! SendMessage command handler.
//!
//! One cycle: record the query and a pending placeholder, ask the backend,
//! then replace the placeholder with the presented reply. A transport
//! failure still completes the cycle, with the generic error reply.

use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::application::presenter::{BotReply, ResponsePresenter};
use crate::domain::conversation::ChatSession;
use crate::domain::foundation::{DomainError, ErrorCode, MessageId};
use crate::ports::AnalyticsGateway;

/// Command to send one chat query.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub content: String,
}

impl SendMessageCommand {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Errors that stop a send before anything is recorded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SendMessageError {
    /// Message content is empty or whitespace only.
    #[error("Validation error: message content cannot be empty")]
    EmptyContent,

    /// A previous query on this session has not been answered yet.
    #[error("A request is already outstanding for this session")]
    RequestOutstanding,

    #[error("Domain error: {0}")]
    Domain(String),
}

impl From<DomainError> for SendMessageError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed | ErrorCode::EmptyField => SendMessageError::EmptyContent,
            ErrorCode::PendingMessageOutstanding => SendMessageError::RequestOutstanding,
            _ => SendMessageError::Domain(err.to_string()),
        }
    }
}

/// How the backend call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendMessageOutcome {
    /// The backend answered; its envelope was presented.
    Answered,
    /// The backend could not be reached.
    TransportFailed,
}

/// Result of a completed send cycle.
#[derive(Debug, Clone)]
pub struct SendMessageResult {
    pub user_message_id: MessageId,
    /// Id of the final bot message, shared with the placeholder it replaced.
    pub bot_message_id: MessageId,
    pub outcome: SendMessageOutcome,
}

/// Handler for SendMessage commands.
pub struct SendMessageHandler<G>
where
    G: AnalyticsGateway,
{
    gateway: Arc<G>,
    presenter: ResponsePresenter,
}

impl<G> SendMessageHandler<G>
where
    G: AnalyticsGateway + 'static,
{
    pub fn new(gateway: Arc<G>, presenter: ResponsePresenter) -> Self {
        Self { gateway, presenter }
    }

    /// Runs one full send cycle on `session`.
    ///
    /// Validation failures return before the log changes. Once the query is
    /// recorded the cycle always completes, so the log grows by exactly two
    /// messages and no placeholder is left behind.
    ///
    /// Dropping the returned future after the query is recorded (for
    /// example under `tokio::time::timeout`) leaves `session` awaiting a
    /// reply. Call [`SendMessageHandler::abandon`] to resolve it.
    pub async fn handle(
        &self,
        session: &mut ChatSession,
        cmd: SendMessageCommand,
    ) -> Result<SendMessageResult, SendMessageError> {
        if cmd.content.trim().is_empty() {
            return Err(SendMessageError::EmptyContent);
        }

        let request = session.begin_send(&cmd.content, &self.presenter.settings().pending_text)?;
        info!(
            session_id = %session.id(),
            surface = %request.surface,
            "Chat query sent"
        );

        let (reply, outcome) = match self.gateway.query(request.surface, &request.query).await {
            Ok(raw) => (
                self.presenter.present(request.surface, raw),
                SendMessageOutcome::Answered,
            ),
            Err(err) => {
                warn!(
                    session_id = %session.id(),
                    surface = %request.surface,
                    error = %err,
                    retryable = err.is_retryable(),
                    "Analytics backend unreachable"
                );
                (self.presenter.transport_failure(), SendMessageOutcome::TransportFailed)
            }
        };

        let BotReply { content, chart } = reply;
        let bot_message_id = *session.complete(content, chart)?.id();
        info!(session_id = %session.id(), outcome = ?outcome, "Chat reply recorded");

        Ok(SendMessageResult {
            user_message_id: request.user_message_id,
            bot_message_id,
            outcome,
        })
    }

    /// Resolves a request whose cycle was cancelled, using the transport
    /// failure reply. Returns `None` when nothing was outstanding.
    pub fn abandon(&self, session: &mut ChatSession) -> Result<Option<MessageId>, SendMessageError> {
        if !session.is_awaiting_response() {
            return Ok(None);
        }

        let BotReply { content, chart } = self.presenter.transport_failure();
        let bot_message_id = *session.complete(content, chart)?.id();
        warn!(session_id = %session.id(), "Abandoned chat request resolved");
        Ok(Some(bot_message_id))
    }
}
