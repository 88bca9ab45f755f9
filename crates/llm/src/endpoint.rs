use std::future::Future;
use std::pin::Pin;

use snafu::Snafu;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Chat speaker role.
///
/// The conversational service speaks in the `System` role for its own
/// utterances; there is no separate assistant tag in this protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    System,
    User,
}

/// One outbound conversation entry as the endpoint sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointMessage {
    pub role: Role,
    pub content: String,
}

impl EndpointMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Connection settings for one remote endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub endpoint_id: String,
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl EndpointConfig {
    pub fn new(
        endpoint_id: impl Into<String>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: Option<String>,
    ) -> Self {
        Self {
            endpoint_id: endpoint_id.into().trim().to_string(),
            api_key: api_key.into().trim().to_string(),
            base_url: base_url.into().trim().to_string(),
            model: model
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
        }
    }
}

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
pub type EndpointResult<T> = Result<T, EndpointError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum EndpointError {
    #[snafu(display("missing API key for endpoint '{endpoint_id}'"))]
    MissingApiKey {
        stage: &'static str,
        endpoint_id: String,
    },
    #[snafu(display("endpoint '{endpoint_id}' is not supported"))]
    UnsupportedEndpoint {
        stage: &'static str,
        endpoint_id: String,
    },
    #[snafu(display("conversation request has no messages"))]
    EmptyConversation { stage: &'static str },
    #[snafu(display("http client failed on `{stage}`, {source}"))]
    HttpClient {
        stage: &'static str,
        source: rig::http_client::Error,
    },
    #[snafu(display("endpoint rejected the request: {reason}"))]
    Rejected { stage: &'static str, reason: String },
    #[snafu(display("completions failed on `{stage}`, {source}"))]
    CompletionsFailed {
        stage: &'static str,
        source: rig::completion::CompletionError,
    },
    #[snafu(display("endpoint returned an empty reply"))]
    EmptyReply { stage: &'static str },
}

impl EndpointError {
    /// Returns the human-readable diagnostic when the failure carries one.
    ///
    /// Only explicit rejections expose a message fit for the user; transport
    /// and parsing faults stay opaque and are surfaced through logs instead.
    pub fn rejection_reason(&self) -> Option<&str> {
        match self {
            Self::Rejected { reason, .. } => Some(reason.as_str()),
            _ => None,
        }
    }
}

/// Remote conversational-inference boundary.
///
/// One reply string per call, or a failure. Requests run to completion or
/// failure; no timeout, cancellation, or streaming is part of this contract.
pub trait AgentEndpoint: Send + Sync {
    fn id(&self) -> &str;
    fn model(&self) -> &str;
    fn send_conversation<'a>(
        &'a self,
        messages: Vec<EndpointMessage>,
    ) -> BoxFuture<'a, EndpointResult<String>>;
    fn send_prompt<'a>(&'a self, prompt: String) -> BoxFuture<'a, EndpointResult<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_trims_fields_and_fills_default_model() {
        let config = EndpointConfig::new(" openai ", " key ", " https://api.example/v1 ", None);

        assert_eq!(config.endpoint_id, "openai");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.base_url, "https://api.example/v1");
        assert_eq!(config.model, DEFAULT_OPENAI_MODEL);
    }

    #[test]
    fn config_keeps_explicit_model_and_ignores_blank_one() {
        let explicit = EndpointConfig::new("openai", "key", "", Some(" gpt-4o ".to_string()));
        assert_eq!(explicit.model, "gpt-4o");

        let blank = EndpointConfig::new("openai", "key", "", Some("   ".to_string()));
        assert_eq!(blank.model, DEFAULT_OPENAI_MODEL);
    }

    #[test]
    fn only_explicit_rejections_expose_a_reason() {
        let rejected = EndpointError::Rejected {
            stage: "test",
            reason: "quota exceeded".to_string(),
        };
        assert_eq!(rejected.rejection_reason(), Some("quota exceeded"));

        let opaque = EndpointError::EmptyReply { stage: "test" };
        assert_eq!(opaque.rejection_reason(), None);
    }
}
