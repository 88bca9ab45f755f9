/// Change notifications drained by the presentation layer.
pub mod events;
/// Transcript entries and the pending-reply sentinel.
pub mod message;
/// Pure derivation of renderable view state.
pub mod projection;
/// Scroll-to-bottom request tracking.
pub mod scroll;
/// Submission/settlement protocol and session state.
pub mod session;
/// The ordered message store and its invariants.
pub mod transcript;

pub use events::SessionEvent;
pub use message::{INTRO_CONTENT, Message, MessageId, PENDING_SENTINEL, Role};
pub use projection::{
    MessageView, TRUNCATION_THRESHOLD, TranscriptView, clock_label, project, speaker_label,
};
pub use scroll::ScrollTracker;
pub use session::{
    OutboundRequest, SessionController, SessionState, Settlement, SubmitOutcome,
};
pub use transcript::{Transcript, TranscriptViolation};
