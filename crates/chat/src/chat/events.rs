/// Change notifications queued by the session controller and drained by the
/// presentation layer after each operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The transcript content changed; scroll the view to the newest entry.
    ScrollToBottom,
    /// A one-shot alert carrying a recognizable failure diagnostic.
    Notice(String),
}
