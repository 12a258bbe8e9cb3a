//! Append-only message log with one explicit pending slot.

use serde::Serialize;

use super::message::{Message, MessageContent};
use crate::domain::chart::ChartAttachment;
use crate::domain::foundation::{DomainError, ErrorCode, MessageId};

/// Position and id of the placeholder awaiting a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
struct PendingSlot {
    index: usize,
    id: MessageId,
}

/// Ordered chat history for one surface.
///
/// # Invariants
///
/// - messages are only ever appended
/// - at most one pending placeholder exists
/// - resolving replaces the placeholder in place and keeps its id
#[derive(Debug, Clone, Default, Serialize)]
pub struct MessageLog {
    messages: Vec<Message>,
    #[serde(skip)]
    pending: Option<PendingSlot>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a settled message.
    ///
    /// # Errors
    ///
    /// - `PendingMessageOutstanding` while a placeholder is unresolved
    /// - `ValidationFailed` if `message` is itself pending
    pub fn append(&mut self, message: Message) -> Result<(), DomainError> {
        self.ensure_no_pending()?;
        if message.is_pending() {
            return Err(DomainError::validation(
                "message",
                "Pending messages must be opened with open_pending",
            ));
        }
        self.messages.push(message);
        Ok(())
    }

    /// Appends a pending placeholder and returns its id.
    ///
    /// # Errors
    ///
    /// - `PendingMessageOutstanding` while another placeholder is unresolved
    /// - `ValidationFailed` if `placeholder` is not pending
    pub fn open_pending(&mut self, placeholder: Message) -> Result<MessageId, DomainError> {
        self.ensure_no_pending()?;
        if !placeholder.is_pending() {
            return Err(DomainError::validation(
                "placeholder",
                "Placeholder message must be pending",
            ));
        }

        let id = *placeholder.id();
        self.pending = Some(PendingSlot {
            index: self.messages.len(),
            id,
        });
        self.messages.push(placeholder);
        Ok(id)
    }

    /// Replaces the pending placeholder with the final reply.
    ///
    /// # Errors
    ///
    /// - `NoPendingMessage` if nothing is pending
    pub fn resolve_pending(
        &mut self,
        content: MessageContent,
        chart: Option<ChartAttachment>,
    ) -> Result<&Message, DomainError> {
        let slot = self.pending.take().ok_or_else(|| {
            DomainError::new(ErrorCode::NoPendingMessage, "No pending message to resolve")
        })?;

        let Some(entry) = self.messages.get_mut(slot.index) else {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "Pending slot points past the end of the log",
            )
            .with_detail("index", slot.index.to_string()));
        };
        *entry = Message::bot(slot.id, content, chart);
        Ok(entry)
    }

    /// The unresolved placeholder, if any.
    pub fn pending(&self) -> Option<&Message> {
        self.pending.and_then(|slot| self.messages.get(slot.index))
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn get(&self, id: &MessageId) -> Option<&Message> {
        self.messages.iter().find(|message| message.id() == id)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn ensure_no_pending(&self) -> Result<(), DomainError> {
        match self.pending {
            Some(slot) => Err(DomainError::new(
                ErrorCode::PendingMessageOutstanding,
                "A reply is still pending",
            )
            .with_detail("pending_id", slot.id.to_string())),
            None => Ok(()),
        }
    }
}
