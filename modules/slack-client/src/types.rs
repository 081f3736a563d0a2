use serde::{Deserialize, Serialize};

/// Identity of the authenticated bot, from `auth.test`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthTest {
    pub team: Option<String>,
    pub user: Option<String>,
    pub team_id: Option<String>,
    pub user_id: String,
    pub bot_id: Option<String>,
}

/// One conversation (public or private channel) from `conversations.list`.
#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: Option<String>,
    #[serde(default)]
    pub is_private: bool,
    /// Member user ids. Slack only includes these on some list endpoints;
    /// absent means "not reported", not "empty channel".
    #[serde(default)]
    pub members: Vec<String>,
}

/// One workspace member from `users.list`.
#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub real_name: Option<String>,
    #[serde(default)]
    pub is_bot: bool,
}

/// Session info from `rtm.connect`: the websocket URL plus the bot's own
/// identity. The socket itself is the caller's concern.
#[derive(Debug, Clone, Deserialize)]
pub struct RtmConnectInfo {
    pub url: String,
    #[serde(rename = "self")]
    pub identity: RtmIdentity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RtmIdentity {
    pub id: String,
    pub name: String,
}

/// Receipt for a posted message.
#[derive(Debug, Clone, Deserialize)]
pub struct PostedMessage {
    pub channel: String,
    pub ts: String,
}

/// Input for `chat.postMessage`.
#[derive(Debug, Clone, Serialize)]
pub struct PostMessageInput {
    pub channel: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelList {
    pub channels: Vec<Channel>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberList {
    pub members: Vec<Member>,
}
