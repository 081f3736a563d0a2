// Test doubles for the dispatch core, matching the trait boundaries:
//
// - MockChatApi (ChatApi): records sends, serves canned directories,
//   optional send-failure injection. Builder pattern: `.with_user()`,
//   `.with_public_channel()`, `.failing_sends()`.
// - ScriptedSource (EventSource): replays a fixed sequence of events and
//   faults, then reports end-of-stream forever.
// - SourceConnector / FailingConnector (StreamConnector): the two startup
//   outcomes.
// - RecordingHandler (EventHandler): appends its label to a shared log.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use slack_client::{Channel, Member, SlackApiError};

use crate::cursor::EventSource;
use crate::envelope::Envelope;
use crate::error::{Result, SlacklineError, StreamError};
use crate::event::SlackEvent;
use crate::registry::EventHandler;
use crate::traits::{BotIdentity, ChatApi, StreamConnector};

// ---------------------------------------------------------------------------
// MockChatApi
// ---------------------------------------------------------------------------

/// One message captured by `MockChatApi::send_message`.
#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub channel: String,
    pub text: String,
    pub thread_ts: Option<String>,
}

pub struct MockChatApi {
    identity: BotIdentity,
    public_channels: Vec<Channel>,
    private_channels: Vec<Channel>,
    users: Vec<Member>,
    fail_sends: bool,
    sent: Mutex<Vec<SentMessage>>,
}

impl Default for MockChatApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChatApi {
    pub fn new() -> Self {
        Self {
            identity: BotIdentity {
                user_id: "U0BOT".to_string(),
                bot_id: Some("B0BOT".to_string()),
            },
            public_channels: Vec::new(),
            private_channels: Vec::new(),
            users: Vec::new(),
            fail_sends: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn with_public_channel(mut self, id: &str, name: &str, members: &[&str]) -> Self {
        self.public_channels.push(Channel {
            id: id.to_string(),
            name: Some(name.to_string()),
            is_private: false,
            members: members.iter().map(|m| m.to_string()).collect(),
        });
        self
    }

    pub fn with_private_channel(mut self, id: &str, name: &str) -> Self {
        self.private_channels.push(Channel {
            id: id.to_string(),
            name: Some(name.to_string()),
            is_private: true,
            members: Vec::new(),
        });
        self
    }

    pub fn with_user(mut self, id: &str, name: &str) -> Self {
        self.users.push(Member {
            id: id.to_string(),
            name: name.to_string(),
            real_name: None,
            is_bot: false,
        });
        self
    }

    /// Every send is recorded, then fails.
    pub fn failing_sends(mut self) -> Self {
        self.fail_sends = true;
        self
    }

    /// Messages captured so far, in send order.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatApi for MockChatApi {
    async fn auth_test(&self) -> Result<BotIdentity> {
        Ok(self.identity.clone())
    }

    async fn send_message(
        &self,
        channel: &str,
        text: &str,
        thread_ts: Option<&str>,
    ) -> Result<()> {
        self.sent.lock().unwrap().push(SentMessage {
            channel: channel.to_string(),
            text: text.to_string(),
            thread_ts: thread_ts.map(str::to_string),
        });

        if self.fail_sends {
            return Err(SlacklineError::Api(SlackApiError::Platform(
                "channel_not_found".to_string(),
            )));
        }
        Ok(())
    }

    async fn public_channels(&self) -> Result<Vec<Channel>> {
        Ok(self.public_channels.clone())
    }

    async fn private_channels(&self) -> Result<Vec<Channel>> {
        Ok(self.private_channels.clone())
    }

    async fn users(&self) -> Result<Vec<Member>> {
        Ok(self.users.clone())
    }
}

// ---------------------------------------------------------------------------
// ScriptedSource
// ---------------------------------------------------------------------------

enum ScriptedPull {
    Event(SlackEvent),
    Fault(StreamError),
}

/// Replays a fixed sequence of pulls, then reports end-of-stream forever.
#[derive(Default)]
pub struct ScriptedSource {
    pulls: VecDeque<ScriptedPull>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event(mut self, value: serde_json::Value) -> Self {
        self.pulls
            .push_back(ScriptedPull::Event(SlackEvent::from_value(value)));
        self
    }

    pub fn fault(mut self, fault: StreamError) -> Self {
        self.pulls.push_back(ScriptedPull::Fault(fault));
        self
    }
}

#[async_trait]
impl EventSource for ScriptedSource {
    async fn next_event(&mut self) -> std::result::Result<Option<SlackEvent>, StreamError> {
        match self.pulls.pop_front() {
            Some(ScriptedPull::Event(event)) => Ok(Some(event)),
            Some(ScriptedPull::Fault(fault)) => Err(fault),
            None => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// Connectors
// ---------------------------------------------------------------------------

/// Hands out a prepared source on the first `connect`.
pub struct SourceConnector {
    source: Mutex<Option<ScriptedSource>>,
}

impl SourceConnector {
    pub fn new(source: ScriptedSource) -> Self {
        Self {
            source: Mutex::new(Some(source)),
        }
    }
}

#[async_trait]
impl StreamConnector for SourceConnector {
    type Source = ScriptedSource;

    async fn connect(&self) -> Result<ScriptedSource> {
        self.source
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| SlacklineError::Startup("source already taken".to_string()))
    }
}

/// Always fails to establish the stream session.
pub struct FailingConnector;

#[async_trait]
impl StreamConnector for FailingConnector {
    type Source = ScriptedSource;

    async fn connect(&self) -> Result<ScriptedSource> {
        Err(SlacklineError::Startup(
            "injected connection failure".to_string(),
        ))
    }
}

// ---------------------------------------------------------------------------
// RecordingHandler
// ---------------------------------------------------------------------------

/// Appends its label to a shared log on every invocation; optionally fails
/// afterwards so isolation behavior can be asserted.
pub struct RecordingHandler {
    label: String,
    calls: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl RecordingHandler {
    pub fn arc(label: &str, calls: Arc<Mutex<Vec<String>>>) -> Arc<dyn EventHandler> {
        Arc::new(Self {
            label: label.to_string(),
            calls,
            fail: false,
        })
    }

    /// A handler that records its call, then fails.
    pub fn failing(label: &str, calls: Arc<Mutex<Vec<String>>>) -> Arc<dyn EventHandler> {
        Arc::new(Self {
            label: label.to_string(),
            calls,
            fail: true,
        })
    }
}

#[async_trait]
impl EventHandler for RecordingHandler {
    async fn handle(&self, _request: &Envelope<'_>) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(self.label.clone());
        if self.fail {
            anyhow::bail!("{} blew up", self.label);
        }
        Ok(())
    }
}
