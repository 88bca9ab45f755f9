#![deny(unsafe_code)]

//! Remote conversational-inference boundary for the chat client.

use std::sync::Arc;

mod endpoint;
pub mod prompt;
mod rig_adapter;

pub use endpoint::{
    AgentEndpoint, BoxFuture, DEFAULT_OPENAI_MODEL, EndpointConfig, EndpointError,
    EndpointMessage, EndpointResult, Role,
};
pub use prompt::{PracticeQuestion, StudyPrompt, practice_prompt};
pub use rig_adapter::{RIG_OPENAI_ENDPOINT_ID, RigEndpointAdapter};

pub fn create_endpoint(mut config: EndpointConfig) -> EndpointResult<Arc<dyn AgentEndpoint>> {
    if config.endpoint_id.trim().is_empty() {
        config.endpoint_id = RIG_OPENAI_ENDPOINT_ID.to_string();
    }

    match config.endpoint_id.as_str() {
        "openai" | "rig-openai" => {
            config.endpoint_id = RIG_OPENAI_ENDPOINT_ID.to_string();
            Ok(Arc::new(RigEndpointAdapter::new(config)?))
        }
        _ => Err(EndpointError::UnsupportedEndpoint {
            stage: "create-endpoint",
            endpoint_id: config.endpoint_id,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_endpoint_id_defaults_to_openai() {
        let endpoint = create_endpoint(EndpointConfig::new("", "key", "", None)).unwrap();
        assert_eq!(endpoint.id(), RIG_OPENAI_ENDPOINT_ID);
    }

    #[test]
    fn unknown_endpoint_id_is_rejected() {
        let result = create_endpoint(EndpointConfig::new("mystery", "key", "", None));
        assert!(matches!(
            result,
            Err(EndpointError::UnsupportedEndpoint { .. })
        ));
    }
}
