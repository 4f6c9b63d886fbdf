//! Provider configuration loaded from environment variables.

/// Settings for the OpenAI-compatible provider.
///
/// | Env var                  | Default                       |
/// |--------------------------|-------------------------------|
/// | `OPENAI_API_KEY`         | unset (AI features disabled)  |
/// | `OPENAI_BASE_URL`        | `https://api.openai.com/v1`   |
/// | `OPENAI_CHAT_MODEL`      | `gpt-4`                       |
/// | `OPENAI_EMBEDDING_MODEL` | `text-embedding-3-small`      |
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub chat_model: String,
    pub embedding_model: String,
}

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
        }
    }
}

impl AiConfig {
    /// Load from environment variables. A missing or blank key leaves the
    /// provider disabled; it is never an error.
    pub fn from_env() -> Self {
        let var = |name: &str| {
            std::env::var(name)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            api_key: var("OPENAI_API_KEY"),
            base_url: var("OPENAI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            chat_model: var("OPENAI_CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            embedding_model: var("OPENAI_EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unconfigured() {
        let config = AiConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.chat_model, "gpt-4");
        assert_eq!(config.embedding_model, "text-embedding-3-small");
    }
}
