use rig::completion::message::AssistantContent;
use rig::completion::{CompletionError, CompletionModel, Message as RigMessage};
use rig::one_or_many::OneOrMany;
use rig::prelude::CompletionClient;
use rig::providers::openai;
use snafu::{ResultExt, ensure};

use super::endpoint::{
    AgentEndpoint, BoxFuture, EmptyConversationSnafu, EmptyReplySnafu, EndpointConfig,
    EndpointError, EndpointMessage, EndpointResult, HttpClientSnafu, MissingApiKeySnafu, Role,
};

pub const RIG_OPENAI_ENDPOINT_ID: &str = "openai";

/// Fixed tutoring instruction sent with every conversation.
const TUTOR_PREAMBLE: &str =
    "You are a helpful educational assistant. Provide clear, concise, and accurate answers.";

pub struct RigEndpointAdapter {
    config: EndpointConfig,
}

impl RigEndpointAdapter {
    pub fn new(config: EndpointConfig) -> EndpointResult<Self> {
        ensure!(
            !config.api_key.is_empty(),
            MissingApiKeySnafu {
                stage: "rig-adapter-new",
                endpoint_id: config.endpoint_id.clone(),
            }
        );

        Ok(Self { config })
    }

    fn build_client(config: &EndpointConfig) -> EndpointResult<openai::Client> {
        let mut builder = openai::Client::builder().api_key(config.api_key.as_str());
        if !config.base_url.is_empty() {
            builder = builder.base_url(config.base_url.as_str());
        }
        builder.build().context(HttpClientSnafu {
            stage: "build-client",
        })
    }

    fn to_rig_message(message: &EndpointMessage) -> RigMessage {
        match message.role {
            // System-role entries are the agent's own prior utterances, so they
            // travel as assistant turns on the wire.
            Role::System => RigMessage::assistant(message.content.clone()),
            Role::User => RigMessage::user(message.content.clone()),
        }
    }

    /// Maps a completion failure into the endpoint taxonomy.
    ///
    /// Rejections that carry a human-readable diagnostic are split out so the
    /// session layer can surface them; everything else stays opaque.
    fn map_completion_error(stage: &'static str, source: CompletionError) -> EndpointError {
        match source {
            CompletionError::ProviderError(reason) | CompletionError::ResponseError(reason) => {
                EndpointError::Rejected { stage, reason }
            }
            source => EndpointError::CompletionsFailed { stage, source },
        }
    }

    fn flatten_reply(
        stage: &'static str,
        choice: OneOrMany<AssistantContent>,
    ) -> EndpointResult<String> {
        let reply = choice
            .iter()
            .filter_map(|content| match content {
                AssistantContent::Text(text) => Some(text.text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("");

        ensure!(!reply.trim().is_empty(), EmptyReplySnafu { stage });
        Ok(reply)
    }

    async fn run_conversation(
        config: &EndpointConfig,
        messages: Vec<EndpointMessage>,
    ) -> EndpointResult<String> {
        ensure!(
            !messages.is_empty(),
            EmptyConversationSnafu {
                stage: "send-conversation",
            }
        );

        let client = Self::build_client(config)?;
        let model = client.completion_model(config.model.clone());

        let mut history = messages.iter().map(Self::to_rig_message).collect::<Vec<_>>();
        let Some(prompt) = history.pop() else {
            return EmptyConversationSnafu {
                stage: "send-conversation-pop-prompt",
            }
            .fail();
        };

        let response = model
            .completion_request(prompt)
            .messages(history)
            .preamble(TUTOR_PREAMBLE.to_string())
            .send()
            .await
            .map_err(|source| Self::map_completion_error("send-conversation", source))?;

        Self::flatten_reply("send-conversation-reply", response.choice)
    }

    async fn run_prompt(config: &EndpointConfig, prompt: String) -> EndpointResult<String> {
        let client = Self::build_client(config)?;
        let model = client.completion_model(config.model.clone());

        let response = model
            .completion_request(RigMessage::user(prompt))
            .send()
            .await
            .map_err(|source| Self::map_completion_error("send-prompt", source))?;

        Self::flatten_reply("send-prompt-reply", response.choice)
    }
}

impl AgentEndpoint for RigEndpointAdapter {
    fn id(&self) -> &str {
        &self.config.endpoint_id
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn send_conversation<'a>(
        &'a self,
        messages: Vec<EndpointMessage>,
    ) -> BoxFuture<'a, EndpointResult<String>> {
        Box::pin(async move {
            let message_count = messages.len();
            let result = Self::run_conversation(&self.config, messages).await;

            if let Err(error) = &result {
                tracing::warn!(
                    endpoint_id = %self.config.endpoint_id,
                    model = %self.config.model,
                    message_count,
                    error = %error,
                    "conversation request failed"
                );
            }

            result
        })
    }

    fn send_prompt<'a>(&'a self, prompt: String) -> BoxFuture<'a, EndpointResult<String>> {
        Box::pin(async move {
            let result = Self::run_prompt(&self.config, prompt).await;

            if let Err(error) = &result {
                tracing::warn!(
                    endpoint_id = %self.config.endpoint_id,
                    model = %self.config.model,
                    error = %error,
                    "prompt request failed"
                );
            }

            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_requires_an_api_key() {
        let config = EndpointConfig::new("openai", "", "", None);
        assert!(matches!(
            RigEndpointAdapter::new(config),
            Err(EndpointError::MissingApiKey { .. })
        ));
    }

    #[test]
    fn provider_rejections_become_recognizable_failures() {
        let error = RigEndpointAdapter::map_completion_error(
            "test",
            CompletionError::ProviderError("model is overloaded".to_string()),
        );

        assert_eq!(error.rejection_reason(), Some("model is overloaded"));
    }

    #[test]
    fn transport_faults_stay_opaque() {
        let source = Box::<dyn std::error::Error + Send + Sync>::from("connection reset");
        let error =
            RigEndpointAdapter::map_completion_error("test", CompletionError::RequestError(source));

        assert!(error.rejection_reason().is_none());
        assert!(matches!(error, EndpointError::CompletionsFailed { .. }));
    }

    #[test]
    fn system_entries_travel_as_assistant_turns() {
        let system = EndpointMessage::new(Role::System, "earlier reply");
        let user = EndpointMessage::new(Role::User, "next question");

        assert_eq!(
            RigEndpointAdapter::to_rig_message(&system),
            RigMessage::assistant("earlier reply")
        );
        assert_eq!(
            RigEndpointAdapter::to_rig_message(&user),
            RigMessage::user("next question")
        );
    }
}
