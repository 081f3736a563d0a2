use std::env;

use tracing::info;

use crate::error::{Result, SlacklineError};

/// Runtime configuration. The bot token is the only required piece; an
/// explicit value takes precedence over the `SLACK_BOT_TOKEN` environment
/// variable.
#[derive(Debug, Clone)]
pub struct Config {
    pub slack_bot_token: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::resolve(None)
    }

    /// Resolve the token: explicit argument first, environment second.
    /// Neither present is fatal; callers bail out before any loop starts.
    pub fn resolve(token: Option<String>) -> Result<Self> {
        let slack_bot_token = match token {
            Some(token) => token,
            None => env::var("SLACK_BOT_TOKEN").map_err(|_| {
                SlacklineError::Config(
                    "SLACK_BOT_TOKEN not passed to constructor or set as environment variable"
                        .to_string(),
                )
            })?,
        };

        Ok(Self { slack_bot_token })
    }

    pub fn log_redacted(&self) {
        info!(
            slack_bot_token = if self.slack_bot_token.is_empty() { "unset" } else { "[redacted]" },
            "Configuration loaded"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test covers all three resolution paths so nothing else races on
    // the process-wide environment variable.
    #[test]
    fn token_resolution_precedence() {
        env::remove_var("SLACK_BOT_TOKEN");
        assert!(matches!(
            Config::resolve(None),
            Err(SlacklineError::Config(_))
        ));

        env::set_var("SLACK_BOT_TOKEN", "xoxb-from-env");
        assert_eq!(
            Config::resolve(None).unwrap().slack_bot_token,
            "xoxb-from-env"
        );
        assert_eq!(
            Config::from_env().unwrap().slack_bot_token,
            "xoxb-from-env"
        );

        assert_eq!(
            Config::resolve(Some("xoxb-explicit".to_string()))
                .unwrap()
                .slack_bot_token,
            "xoxb-explicit"
        );
        env::remove_var("SLACK_BOT_TOKEN");
    }
}
