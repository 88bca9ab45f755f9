use edubot_llm::EndpointConfig;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Builds endpoint settings from the environment.
///
/// Returns `None` without an API key; the caller decides how to report the
/// missing configuration. The transcript core itself never reads files or
/// environment variables.
pub fn endpoint_config_from_env() -> Option<EndpointConfig> {
    let api_key = std::env::var("OPENAI_API_KEY")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())?;

    let model = std::env::var("OPENAI_MODEL")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    let base_url =
        std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

    Some(EndpointConfig::new("openai", api_key, base_url, model))
}
