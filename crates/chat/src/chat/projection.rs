use std::time::{SystemTime, UNIX_EPOCH};

use edubot_llm::Role;

use crate::chat::message::{Message, MessageId};
use crate::chat::session::SessionState;
use crate::chat::transcript::Transcript;
use crate::theme::ThemeMode;

/// Messages longer than this expose a show-more/show-less toggle.
pub const TRUNCATION_THRESHOLD: usize = 500;

/// One renderable transcript row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    /// Rendered from wall-clock "now" at projection time; not a stored
    /// property of the message and not stable across re-renders.
    pub timestamp: String,
    pub expanded: bool,
    pub is_thinking: bool,
    pub is_truncatable: bool,
}

/// Renderable session snapshot derived from transcript and session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptView {
    pub theme: ThemeMode,
    pub is_welcome: bool,
    pub is_submitting: bool,
    pub messages: Vec<MessageView>,
}

/// Derives the renderable view. Pure except for reading the wall clock.
pub fn project(transcript: &Transcript, state: &SessionState, theme: ThemeMode) -> TranscriptView {
    let timestamp = clock_label(SystemTime::now());

    TranscriptView {
        theme,
        is_welcome: transcript.len() == 1,
        is_submitting: state.is_submitting,
        messages: transcript
            .messages()
            .iter()
            .map(|message| project_message(message, &timestamp))
            .collect(),
    }
}

fn project_message(message: &Message, timestamp: &str) -> MessageView {
    let is_thinking = message.is_pending();

    MessageView {
        id: message.id,
        role: message.role,
        content: message.content.clone(),
        timestamp: timestamp.to_string(),
        expanded: message.expanded,
        is_thinking,
        is_truncatable: !is_thinking && message.content.chars().count() > TRUNCATION_THRESHOLD,
    }
}

/// Speaker label shown above a bubble.
pub fn speaker_label(role: Role) -> &'static str {
    match role {
        Role::System => "Bot",
        Role::User => "You",
    }
}

/// Formats an `HH:MM` clock label (UTC) from a wall-clock instant.
pub fn clock_label(now: SystemTime) -> String {
    let seconds = now
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);
    let hours = (seconds / 3600) % 24;
    let minutes = (seconds / 60) % 60;
    format!("{hours:02}:{minutes:02}")
}

#[cfg(test)]
mod tests {
    use crate::chat::session::{SessionController, SubmitOutcome};

    use super::*;

    #[test]
    fn intro_only_transcript_projects_the_welcome_state() {
        let controller = SessionController::new();

        let view = project(
            controller.transcript(),
            controller.state(),
            ThemeMode::Dark,
        );

        assert!(view.is_welcome);
        assert!(!view.is_submitting);
        assert_eq!(view.messages.len(), 1);
    }

    #[test]
    fn welcome_state_ends_with_the_first_submission() {
        let mut controller = SessionController::new();
        assert!(matches!(
            controller.submit("hi"),
            SubmitOutcome::Dispatched(_)
        ));

        let view = project(
            controller.transcript(),
            controller.state(),
            ThemeMode::Dark,
        );

        assert!(!view.is_welcome);
        assert!(view.is_submitting);
    }

    #[test]
    fn placeholder_projects_as_thinking_without_a_toggle() {
        let mut controller = SessionController::new();
        controller.submit("hi");

        let view = project(
            controller.transcript(),
            controller.state(),
            ThemeMode::Dark,
        );
        let placeholder = view.messages.last().unwrap();

        assert!(placeholder.is_thinking);
        assert!(!placeholder.is_truncatable);
    }

    #[test]
    fn truncation_boundary_sits_between_500_and_501_characters() {
        let mut controller = SessionController::new();
        controller.submit("question");
        controller.settle(Ok("a".repeat(500)));
        controller.submit("another");
        controller.settle(Ok("b".repeat(501)));

        let view = project(
            controller.transcript(),
            controller.state(),
            ThemeMode::Dark,
        );

        let at_limit = &view.messages[2];
        let over_limit = &view.messages[4];
        assert_eq!(at_limit.content.chars().count(), 500);
        assert!(!at_limit.is_truncatable);
        assert!(over_limit.is_truncatable);
    }

    #[test]
    fn truncation_applies_to_user_messages_too() {
        let mut controller = SessionController::new();
        controller.submit(&"q".repeat(501));

        let view = project(
            controller.transcript(),
            controller.state(),
            ThemeMode::Dark,
        );

        assert!(view.messages[1].is_truncatable);
    }

    #[test]
    fn clock_label_renders_utc_hours_and_minutes() {
        let now = UNIX_EPOCH + std::time::Duration::from_secs(13 * 3600 + 7 * 60 + 9);
        assert_eq!(clock_label(now), "13:07");
    }

    #[test]
    fn speaker_labels_match_roles() {
        assert_eq!(speaker_label(Role::User), "You");
        assert_eq!(speaker_label(Role::System), "Bot");
    }
}
