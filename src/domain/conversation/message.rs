//! Message entity for chat logs.
//!
//! A message is either a user query or a bot reply. Bot replies start life
//! as a pending placeholder and are replaced, keeping the same id, once the
//! backend answers.

use serde::{Deserialize, Serialize};

use crate::domain::chart::ChartAttachment;
use crate::domain::foundation::{DomainError, MessageId, Timestamp};
use crate::domain::report::NormalizedReport;

/// Who sent a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Bot,
}

/// Body of a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MessageContent {
    Text(String),
    Report(NormalizedReport),
}

impl MessageContent {
    pub fn text(text: impl Into<String>) -> Self {
        MessageContent::Text(text.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(text) => Some(text),
            MessageContent::Report(_) => None,
        }
    }

    pub fn as_report(&self) -> Option<&NormalizedReport> {
        match self {
            MessageContent::Report(report) => Some(report),
            MessageContent::Text(_) => None,
        }
    }
}

/// An immutable entry in a chat log.
///
/// # Invariants
///
/// - user messages have non-blank text content and are never pending
/// - only bot messages may be pending
/// - a pending message carries no chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    id: MessageId,
    role: Role,
    content: MessageContent,
    timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    chart: Option<ChartAttachment>,
    #[serde(default)]
    pending: bool,
}

impl Message {
    /// Creates a user message.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is blank
    pub fn user(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        Self::validate_content(&content)?;

        Ok(Self {
            id: MessageId::new(),
            role: Role::User,
            content: MessageContent::Text(content),
            timestamp: Timestamp::now(),
            chart: None,
            pending: false,
        })
    }

    /// Creates a pending bot placeholder.
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            role: Role::Bot,
            content: MessageContent::Text(text.into()),
            timestamp: Timestamp::now(),
            chart: None,
            pending: true,
        }
    }

    /// Creates a final bot reply with the given id.
    pub fn bot(id: MessageId, content: MessageContent, chart: Option<ChartAttachment>) -> Self {
        Self {
            id,
            role: Role::Bot,
            content,
            timestamp: Timestamp::now(),
            chart,
            pending: false,
        }
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &MessageContent {
        &self.content
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    pub fn chart(&self) -> Option<&ChartAttachment> {
        self.chart.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn is_bot(&self) -> bool {
        self.role == Role::Bot
    }

    fn validate_content(content: &str) -> Result<(), DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::validation(
                "content",
                "Message content cannot be empty",
            ));
        }
        Ok(())
    }
}
