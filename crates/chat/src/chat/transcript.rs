use edubot_llm::EndpointMessage;

use crate::chat::message::{INTRO_CONTENT, Message, MessageId};

/// Rejection reason for illegal transcript mutations.
///
/// Violations indicate caller bugs; the store reports them instead of
/// panicking so the session stays alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptViolation {
    /// The mutation would touch the fixed introductory entry.
    IntroProtected,
    /// An append was attempted while a pending placeholder is outstanding.
    PendingBlocksAppend,
    /// The tail entry is settled and may no longer be replaced or removed.
    TailSettled,
    /// No entry carries the given identifier.
    UnknownMessage(MessageId),
}

/// Ordered message sequence; the single source of truth for the conversation.
///
/// Invariants: index 0 is always the fixed intro entry; at most one pending
/// placeholder exists and it is always the last entry when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
    revision: u64,
}

impl Transcript {
    /// Creates a transcript seeded with the intro entry at id 0.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::system(MessageId::new(0), INTRO_CONTENT)],
            revision: 0,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        // The intro entry is permanent, so a transcript is never empty.
        false
    }

    /// Monotonic counter bumped on every content mutation. The presentation
    /// layer derives its scroll-to-bottom trigger from changes to this value.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns true while a reply placeholder is outstanding.
    pub fn has_pending(&self) -> bool {
        self.messages.last().is_some_and(Message::is_pending)
    }

    /// Appends a message to the end of the transcript.
    pub fn append(&mut self, message: Message) -> Result<(), TranscriptViolation> {
        if self.has_pending() {
            return Err(TranscriptViolation::PendingBlocksAppend);
        }

        self.messages.push(message);
        self.revision += 1;
        Ok(())
    }

    /// Replaces the trailing pending placeholder wholesale.
    pub fn replace_last(&mut self, message: Message) -> Result<(), TranscriptViolation> {
        self.check_tail_mutable()?;
        *self.messages.last_mut().expect("tail checked above") = message;
        self.revision += 1;
        Ok(())
    }

    /// Removes the trailing pending placeholder.
    pub fn remove_last(&mut self) -> Result<(), TranscriptViolation> {
        self.check_tail_mutable()?;
        self.messages.pop();
        self.revision += 1;
        Ok(())
    }

    /// Flips one message's expanded flag, keyed by id against this store.
    /// Returns the new flag value.
    pub fn toggle_expanded(&mut self, id: MessageId) -> Result<bool, TranscriptViolation> {
        let message = self
            .messages
            .iter_mut()
            .find(|message| message.id == id)
            .ok_or(TranscriptViolation::UnknownMessage(id))?;

        message.expanded = !message.expanded;
        Ok(message.expanded)
    }

    /// Builds the sequence sent to the endpoint: every entry from index 1
    /// onward, excluding the pending placeholder.
    pub fn outbound(&self) -> Vec<EndpointMessage> {
        self.messages
            .iter()
            .skip(1)
            .filter(|message| !message.is_pending())
            .map(|message| EndpointMessage::new(message.role, message.content.clone()))
            .collect()
    }

    fn check_tail_mutable(&self) -> Result<(), TranscriptViolation> {
        if self.messages.len() == 1 {
            return Err(TranscriptViolation::IntroProtected);
        }
        if !self.has_pending() {
            return Err(TranscriptViolation::TailSettled);
        }
        Ok(())
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
