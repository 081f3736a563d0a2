use tracing::{debug, warn};

use crate::error::NoDestinationError;
use crate::event::SlackEvent;
use crate::traits::ChatApi;

/// The per-event read view handed to handlers: typed accessors over one
/// event record plus a bound reply capability. Constructed fresh for each
/// inbound event and discarded once dispatch completes.
pub struct Envelope<'a> {
    api: &'a dyn ChatApi,
    event: &'a SlackEvent,
}

impl<'a> Envelope<'a> {
    pub fn new(api: &'a dyn ChatApi, event: &'a SlackEvent) -> Self {
        Self { api, event }
    }

    /// The underlying event record, for fields without a typed accessor.
    pub fn event(&self) -> &SlackEvent {
        self.event
    }

    /// Event category, e.g. "message" or "hello". Absent on malformed
    /// events.
    pub fn event_type(&self) -> Option<&str> {
        self.field("type")
    }

    /// Disambiguates events of the same type, e.g. "message_changed".
    pub fn subtype(&self) -> Option<&str> {
        self.field("subtype")
    }

    /// Origin channel id. Empty is a valid "no channel" value; the `hello`
    /// event carries none, for example.
    pub fn channel(&self) -> &str {
        self.field("channel").unwrap_or("")
    }

    /// Thread timestamp; empty means the message is not part of a thread.
    pub fn thread_ts(&self) -> &str {
        self.field("thread_ts").unwrap_or("")
    }

    /// Textual payload; absent for non-message events.
    pub fn message(&self) -> Option<&str> {
        self.field("text")
    }

    fn field(&self, key: &'static str) -> Option<&str> {
        let value = self.event.get_str(key);
        if value.is_none() {
            debug!(key, "event carries no such field");
        }
        value
    }

    /// Send `text` to the explicit `channel` if given, otherwise back to the
    /// channel the event came from. Replies stay in the originating thread
    /// when there is one. Delivery failures are logged and swallowed; only
    /// a missing destination is reported to the caller.
    pub async fn reply(
        &self,
        text: &str,
        channel: Option<&str>,
    ) -> Result<(), NoDestinationError> {
        let own = self.channel();
        let target = match channel {
            Some(explicit) if !explicit.is_empty() => explicit,
            _ if !own.is_empty() => own,
            _ => {
                warn!("no channel provided by caller or carried by the event");
                return Err(NoDestinationError);
            }
        };

        let thread_ts = self.thread_ts();
        let thread = if thread_ts.is_empty() {
            None
        } else {
            Some(thread_ts)
        };

        if let Err(err) = self.api.send_message(target, text, thread).await {
            warn!(channel = target, error = %err, "reply delivery failed; dropping message");
        }
        Ok(())
    }
}
