use edubot_llm::{EndpointError, EndpointMessage};

use crate::chat::events::SessionEvent;
use crate::chat::message::{Message, MessageId};
use crate::chat::transcript::Transcript;

/// Ephemeral per-session UI state. Created at session start, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    pub is_submitting: bool,
    pub draft_input: String,
}

/// Conversation payload handed to the caller for the single asynchronous
/// endpoint invocation of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub messages: Vec<EndpointMessage>,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation no-op: blank input or a submission already in flight.
    Ignored,
    /// The optimistic update was applied; send this request and settle.
    Dispatched(OutboundRequest),
}

/// Result of applying an endpoint outcome to the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// The placeholder became the settled reply.
    Replied,
    /// The placeholder was rolled back; the user message is retained.
    /// `notice` carries the recognizable diagnostic when the failure had one.
    RolledBack { notice: Option<String> },
    /// No submission was in flight; the outcome was discarded.
    Ignored,
}

/// Owns the transcript and session state and runs the submission protocol.
///
/// All mutation happens through this controller on the caller's single
/// logical thread; the presentation layer only reads projections and drains
/// queued [`SessionEvent`]s.
pub struct SessionController {
    transcript: Transcript,
    state: SessionState,
    next_message_id: u64,
    events: Vec<SessionEvent>,
}

impl SessionController {
    pub fn new() -> Self {
        Self {
            transcript: Transcript::new(),
            state: SessionState::default(),
            // Id 0 belongs to the intro entry.
            next_message_id: 1,
            events: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.state.draft_input = draft.into();
    }

    /// Drains queued change notifications.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Submits one user message.
    ///
    /// Blank input and in-flight submissions are silently ignored; this is a
    /// UI debounce, not an error. On dispatch the user message and the reply
    /// placeholder are appended optimistically and the outbound sequence is
    /// returned for the caller to send. There is no request queue: the
    /// `is_submitting` gate rejects concurrent submissions instead of
    /// buffering them.
    pub fn submit(&mut self, raw_input: &str) -> SubmitOutcome {
        let trimmed = raw_input.trim();
        if trimmed.is_empty() || self.state.is_submitting {
            return SubmitOutcome::Ignored;
        }

        let user_message = Message::user(self.alloc_message_id(), trimmed);
        let placeholder = Message::pending(self.alloc_message_id());

        if let Err(violation) = self.transcript.append(user_message) {
            tracing::error!(?violation, "optimistic user append rejected");
            return SubmitOutcome::Ignored;
        }
        if let Err(violation) = self.transcript.append(placeholder) {
            tracing::error!(?violation, "placeholder append rejected");
            return SubmitOutcome::Ignored;
        }

        self.state.draft_input.clear();
        self.state.is_submitting = true;
        self.events.push(SessionEvent::ScrollToBottom);

        SubmitOutcome::Dispatched(OutboundRequest {
            messages: self.transcript.outbound(),
        })
    }

    /// Applies the endpoint outcome of the in-flight submission.
    ///
    /// Success replaces the placeholder with the settled reply. Failure rolls
    /// the placeholder back while keeping the optimistically appended user
    /// message; a recognizable diagnostic becomes a one-shot notice, anything
    /// else is only logged. Either way the submission gate reopens.
    pub fn settle(&mut self, outcome: Result<String, EndpointError>) -> Settlement {
        if !self.state.is_submitting {
            tracing::warn!("settlement arrived without a submission in flight");
            return Settlement::Ignored;
        }

        let settlement = match outcome {
            Ok(reply) => {
                let reply_message = Message::system(self.alloc_message_id(), reply);
                if let Err(violation) = self.transcript.replace_last(reply_message) {
                    tracing::error!(?violation, "reply reconciliation rejected");
                }
                Settlement::Replied
            }
            Err(error) => {
                let notice = error.rejection_reason().map(str::to_string);
                match &notice {
                    Some(reason) => {
                        self.events.push(SessionEvent::Notice(reason.clone()));
                    }
                    None => {
                        tracing::error!(error = %error, "endpoint call failed");
                    }
                }

                if let Err(violation) = self.transcript.remove_last() {
                    tracing::error!(?violation, "placeholder rollback rejected");
                }
                Settlement::RolledBack { notice }
            }
        };

        self.state.is_submitting = false;
        self.events.push(SessionEvent::ScrollToBottom);
        settlement
    }

    /// Flips one message's show-more/show-less state.
    pub fn toggle_expanded(&mut self, id: MessageId) -> Option<bool> {
        match self.transcript.toggle_expanded(id) {
            Ok(expanded) => Some(expanded),
            Err(violation) => {
                tracing::warn!(?violation, "expand toggle rejected");
                None
            }
        }
    }

    fn alloc_message_id(&mut self) -> MessageId {
        let id = MessageId::new(self.next_message_id);
        self.next_message_id = self.next_message_id.saturating_add(1);
        id
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}
