/// Errors from the provider client and the services built on it.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// No API key is configured.
    #[error("AI provider is not configured")]
    NotConfigured,

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("AI provider error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The provider's response could not be understood.
    #[error("Malformed provider response: {0}")]
    Decode(String),

    /// The provider reported an error inside an event stream.
    #[error("AI provider stream error: {0}")]
    Stream(String),

    /// The event stream closed before `[DONE]`.
    #[error("AI provider stream ended before completion")]
    Truncated,

    /// The provider answered without any content.
    #[error("Provider returned an empty response")]
    EmptyResponse,

    /// Nothing to embed.
    #[error("Cannot embed empty text")]
    EmptyInput,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
