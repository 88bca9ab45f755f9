#![deny(unsafe_code)]

//! Conversation session core: transcript store, submission protocol, and
//! view projection for a single-session chat client.

/// Chat domain: transcript, session controller, projection.
pub mod chat;
/// Environment-based endpoint bootstrap.
pub mod config;
/// Presentation theme mode.
pub mod theme;
