pub mod error;
pub mod types;

pub use error::{Result, SlackApiError};
pub use types::{
    AuthTest, Channel, ChannelList, Member, MemberList, PostMessageInput, PostedMessage,
    RtmConnectInfo, RtmIdentity,
};

use serde::de::DeserializeOwned;
use serde_json::Value;

const BASE_URL: &str = "https://slack.com/api";

pub struct SlackClient {
    client: reqwest::Client,
    token: String,
}

impl SlackClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token: token.into(),
        }
    }

    /// Verify the token and fetch the bot's own identity.
    pub async fn auth_test(&self) -> Result<AuthTest> {
        self.call("auth.test", None).await
    }

    /// Post a message, optionally into a thread.
    pub async fn post_message(
        &self,
        channel: &str,
        text: &str,
        thread_ts: Option<&str>,
    ) -> Result<PostedMessage> {
        let input = PostMessageInput {
            channel: channel.to_string(),
            text: text.to_string(),
            thread_ts: thread_ts.map(str::to_string),
        };

        tracing::debug!(channel, thread = thread_ts.unwrap_or(""), "Posting message");
        self.call("chat.postMessage", Some(serde_json::to_value(&input)?))
            .await
    }

    /// List public channels visible to the bot.
    pub async fn public_channels(&self) -> Result<Vec<Channel>> {
        let list: ChannelList = self
            .call(
                "conversations.list",
                Some(serde_json::json!({ "types": "public_channel", "limit": 1000 })),
            )
            .await?;
        Ok(list.channels)
    }

    /// List private channels the bot is a member of.
    pub async fn private_channels(&self) -> Result<Vec<Channel>> {
        let list: ChannelList = self
            .call(
                "conversations.list",
                Some(serde_json::json!({ "types": "private_channel", "limit": 1000 })),
            )
            .await?;
        Ok(list.channels)
    }

    /// List all workspace members.
    pub async fn users(&self) -> Result<Vec<Member>> {
        let list: MemberList = self
            .call("users.list", Some(serde_json::json!({ "limit": 1000 })))
            .await?;
        Ok(list.members)
    }

    /// Open an RTM session. Returns the websocket URL and the bot identity;
    /// driving the socket is up to the caller.
    pub async fn rtm_connect(&self) -> Result<RtmConnectInfo> {
        let info: RtmConnectInfo = self.call("rtm.connect", None).await?;
        tracing::info!(bot = %info.identity.name, "RTM session opened");
        Ok(info)
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, payload: Option<Value>) -> Result<T> {
        let url = format!("{}/{}", BASE_URL, method);
        let mut req = self.client.post(&url).bearer_auth(&self.token);
        if let Some(payload) = payload {
            req = req.json(&payload);
        }
        let resp = req.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SlackApiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: Value = resp.json().await?;
        decode(body)
    }
}

/// Unwrap Slack's `{"ok": bool, "error": code, ...}` response convention.
fn decode<T: DeserializeOwned>(body: Value) -> Result<T> {
    let ok = body.get("ok").and_then(Value::as_bool).unwrap_or(false);
    if !ok {
        let code = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown_error");
        return Err(SlackApiError::Platform(code.to_string()));
    }
    Ok(serde_json::from_value(body)?)
}
