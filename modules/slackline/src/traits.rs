// Trait abstractions for the dispatch core's external collaborators.
//
// ChatApi is the narrow slice of the Slack Web API the core consumes:
// outbound sends plus directory listings. StreamConnector establishes the
// inbound event session and EventSource (cursor.rs) pulls from it.
//
// These enable deterministic testing with MockChatApi and ScriptedSource:
// no network, no sockets.

use async_trait::async_trait;

use slack_client::{Channel, Member, SlackClient};

use crate::cursor::EventSource;
use crate::error::Result;

/// Identity facts recorded after authenticating.
#[derive(Debug, Clone)]
pub struct BotIdentity {
    pub user_id: String,
    pub bot_id: Option<String>,
}

#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Verify credentials and fetch the bot's own identity.
    async fn auth_test(&self) -> Result<BotIdentity>;

    /// Deliver a message, threaded when `thread_ts` is given.
    async fn send_message(&self, channel: &str, text: &str, thread_ts: Option<&str>)
        -> Result<()>;

    async fn public_channels(&self) -> Result<Vec<Channel>>;

    async fn private_channels(&self) -> Result<Vec<Channel>>;

    async fn users(&self) -> Result<Vec<Member>>;
}

#[async_trait]
impl ChatApi for SlackClient {
    async fn auth_test(&self) -> Result<BotIdentity> {
        let auth = SlackClient::auth_test(self).await?;
        Ok(BotIdentity {
            user_id: auth.user_id,
            bot_id: auth.bot_id,
        })
    }

    async fn send_message(
        &self,
        channel: &str,
        text: &str,
        thread_ts: Option<&str>,
    ) -> Result<()> {
        self.post_message(channel, text, thread_ts).await?;
        Ok(())
    }

    async fn public_channels(&self) -> Result<Vec<Channel>> {
        Ok(SlackClient::public_channels(self).await?)
    }

    async fn private_channels(&self) -> Result<Vec<Channel>> {
        Ok(SlackClient::private_channels(self).await?)
    }

    async fn users(&self) -> Result<Vec<Member>> {
        Ok(SlackClient::users(self).await?)
    }
}

/// Establishes the inbound event stream session, typically `rtm.connect`
/// plus a websocket adapted into an `EventSource` (see `StreamSource`).
/// A failed `connect` is a startup error; the listen loop never starts on
/// top of one.
#[async_trait]
pub trait StreamConnector: Send + Sync {
    type Source: EventSource;

    async fn connect(&self) -> Result<Self::Source>;
}
