use thiserror::Error;

pub type Result<T> = std::result::Result<T, SlackApiError>;

#[derive(Debug, Error)]
pub enum SlackApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Slack returned HTTP 200 with `"ok": false` and an error code
    /// such as `invalid_auth` or `channel_not_found`.
    #[error("Slack error: {0}")]
    Platform(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SlackApiError {
    fn from(err: reqwest::Error) -> Self {
        SlackApiError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for SlackApiError {
    fn from(err: serde_json::Error) -> Self {
        SlackApiError::Parse(err.to_string())
    }
}
