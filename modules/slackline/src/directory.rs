// Directory helpers: id and name lookups over the workspace's channels and
// users. Convenience for handler code; the dispatch core itself never needs
// them.

use tracing::{debug, warn};

use crate::bot::SlackBot;
use crate::error::Result;

impl SlackBot {
    /// Ids of every public channel visible to the bot.
    pub async fn public_channel_ids(&self) -> Result<Vec<String>> {
        let ids: Vec<String> = self
            .api()
            .public_channels()
            .await?
            .into_iter()
            .map(|channel| channel.id)
            .collect();

        if ids.is_empty() {
            warn!("got no public channel ids");
        } else {
            debug!(count = ids.len(), "got public channel ids");
        }
        Ok(ids)
    }

    /// Ids of every private channel the bot is a member of.
    pub async fn private_channel_ids(&self) -> Result<Vec<String>> {
        let ids: Vec<String> = self
            .api()
            .private_channels()
            .await?
            .into_iter()
            .map(|channel| channel.id)
            .collect();

        if ids.is_empty() {
            warn!("got no private channel ids");
        } else {
            debug!(count = ids.len(), "got private channel ids");
        }
        Ok(ids)
    }

    pub async fn user_ids(&self) -> Result<Vec<String>> {
        let ids: Vec<String> = self
            .api()
            .users()
            .await?
            .into_iter()
            .map(|member| member.id)
            .collect();

        if ids.is_empty() {
            warn!("got no user ids");
        }
        Ok(ids)
    }

    pub async fn user_names(&self) -> Result<Vec<String>> {
        let names: Vec<String> = self
            .api()
            .users()
            .await?
            .into_iter()
            .map(|member| member.name)
            .collect();

        if names.is_empty() {
            warn!("got no user names");
        }
        Ok(names)
    }

    /// Ids of the users in the given public channel. Empty when the channel
    /// is unknown or Slack did not report membership.
    pub async fn users_in_channel(&self, channel_id: &str) -> Result<Vec<String>> {
        for channel in self.api().public_channels().await? {
            if channel.id == channel_id {
                if channel.members.is_empty() {
                    warn!(channel_id, "got no user ids for channel");
                }
                return Ok(channel.members);
            }
        }

        warn!(channel_id, "got no user ids for channel");
        Ok(Vec::new())
    }

    pub async fn channel_name_to_id(&self, name: &str) -> Result<Option<String>> {
        for channel in self.api().public_channels().await? {
            if channel.name.as_deref() == Some(name) {
                debug!(name, id = channel.id.as_str(), "resolved channel name");
                return Ok(Some(channel.id));
            }
        }

        warn!(name, "could not convert channel name to an id");
        Ok(None)
    }

    pub async fn channel_id_to_name(&self, channel_id: &str) -> Result<Option<String>> {
        for channel in self.api().public_channels().await? {
            if channel.id == channel_id {
                if let Some(name) = channel.name {
                    debug!(channel_id, name = name.as_str(), "resolved channel id");
                    return Ok(Some(name));
                }
            }
        }

        warn!(channel_id, "could not convert channel id to a name");
        Ok(None)
    }

    pub async fn user_name_to_id(&self, name: &str) -> Result<Option<String>> {
        for member in self.api().users().await? {
            if member.name == name {
                debug!(name, id = member.id.as_str(), "resolved user name");
                return Ok(Some(member.id));
            }
        }

        warn!(name, "could not convert user name to a user id");
        Ok(None)
    }

    pub async fn user_id_to_name(&self, user_id: &str) -> Result<Option<String>> {
        for member in self.api().users().await? {
            if member.id == user_id {
                debug!(user_id, name = member.name.as_str(), "resolved user id");
                return Ok(Some(member.name));
            }
        }

        warn!(user_id, "could not convert user id to a name");
        Ok(None)
    }
}
