pub use edubot_llm::Role;

/// Fixed introductory entry seeding every transcript. Never sent to the
/// endpoint and never removed.
pub const INTRO_CONTENT: &str =
    "I'm a sovereign AI agent living on the Internet Computer. Ask me anything.";

/// Sentinel content marking the transient reply placeholder.
pub const PENDING_SENTINEL: &str = "Thinking ...";

/// Stable identifier for one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(pub u64);

impl MessageId {
    /// Creates a typed message identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// One transcript entry.
///
/// `content` is immutable once settled; only the trailing pending placeholder
/// may be replaced wholesale. `expanded` is UI-only state, stored uniformly
/// for both roles even though user messages are never truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    pub expanded: bool,
    /// Marks the transient reply placeholder. Tracked structurally so a
    /// settled reply whose text happens to equal the sentinel stays settled.
    pending: bool,
}

impl Message {
    pub fn new(id: MessageId, role: Role, content: impl Into<String>) -> Self {
        Self {
            id,
            role,
            content: content.into(),
            expanded: false,
            pending: false,
        }
    }

    /// Creates a settled user message.
    pub fn user(id: MessageId, content: impl Into<String>) -> Self {
        Self::new(id, Role::User, content)
    }

    /// Creates a settled system message.
    pub fn system(id: MessageId, content: impl Into<String>) -> Self {
        Self::new(id, Role::System, content)
    }

    /// Creates the transient placeholder shown while a reply is outstanding.
    pub fn pending(id: MessageId) -> Self {
        Self {
            pending: true,
            ..Self::new(id, Role::System, PENDING_SENTINEL)
        }
    }

    /// Returns true for the transient reply placeholder.
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_placeholder_constructor_is_pending() {
        assert!(Message::pending(MessageId::new(1)).is_pending());
        assert!(!Message::system(MessageId::new(2), "a real reply").is_pending());
        assert!(!Message::user(MessageId::new(3), PENDING_SENTINEL).is_pending());
    }

    #[test]
    fn settled_sentinel_text_is_not_mistaken_for_the_placeholder() {
        let reply = Message::system(MessageId::new(4), PENDING_SENTINEL);

        assert!(!reply.is_pending());
        assert_eq!(reply.content, PENDING_SENTINEL);
    }

    #[test]
    fn messages_start_collapsed() {
        assert!(!Message::user(MessageId::new(1), "hi").expanded);
        assert!(!Message::system(MessageId::new(2), "hello").expanded);
    }
}
