use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use slack_client::SlackClient;

use crate::config::Config;
use crate::cursor::{EventCursor, EventSource};
use crate::envelope::Envelope;
use crate::error::Result;
use crate::registry::{EventHandler, Registry};
use crate::router::Router;
use crate::traits::{BotIdentity, ChatApi, StreamConnector};

/// Delay between reads from the event fire hose. A courtesy to the
/// transport, not a correctness requirement.
const DEFAULT_READ_DELAY: Duration = Duration::from_secs(1);

/// The long-lived dispatch core: owns the registration table, the routing
/// policy, and the shared API handle. Register handlers during setup, then
/// `start` (or `listen`) to pull events until the stream ends.
pub struct SlackBot {
    api: Arc<dyn ChatApi>,
    registry: Registry,
    router: Router,
    read_delay: Duration,
    identity: Option<BotIdentity>,
}

impl SlackBot {
    /// Build a bot talking to the real Slack Web API. The token comes from
    /// `token` when given, from `SLACK_BOT_TOKEN` otherwise; neither present
    /// is a fatal configuration error.
    pub fn new(token: Option<String>) -> Result<Self> {
        let config = Config::resolve(token)?;
        config.log_redacted();
        Ok(Self::with_api(Arc::new(SlackClient::new(
            config.slack_bot_token,
        ))))
    }

    /// Build on top of any `ChatApi` implementation.
    pub fn with_api(api: Arc<dyn ChatApi>) -> Self {
        info!("initialized. Ready to connect");
        Self {
            api,
            registry: Registry::new(),
            router: Router::new(),
            read_delay: DEFAULT_READ_DELAY,
            identity: None,
        }
    }

    /// Dispatch subtyped events to type-level handlers instead of
    /// suppressing them. Off by default; see `Router`.
    pub fn dispatch_subtyped_events(mut self) -> Self {
        self.router = Router::new().suppress_subtyped(false);
        self
    }

    pub fn read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = delay;
        self
    }

    /// Register `handler` for `event_type`. Registration happens during
    /// single-threaded setup, before the listen loop starts.
    pub fn register(&mut self, event_type: impl Into<String>, handler: Arc<dyn EventHandler>) {
        self.registry.register(event_type, handler);
    }

    pub fn api(&self) -> &dyn ChatApi {
        self.api.as_ref()
    }

    /// Identity recorded by `connect`, if it has run.
    pub fn identity(&self) -> Option<&BotIdentity> {
        self.identity.as_ref()
    }

    /// Verify credentials and record the bot's own identity.
    pub async fn connect(&mut self) -> Result<()> {
        info!("Connecting...");
        let identity = self.api.auth_test().await?;
        info!(
            user_id = identity.user_id.as_str(),
            bot_id = identity.bot_id.as_deref().unwrap_or(""),
            "Connected"
        );
        self.identity = Some(identity);
        Ok(())
    }

    /// Connect, establish the event stream, and listen until it ends. A
    /// failed establishment is returned as a startup error and the listen
    /// loop never begins.
    pub async fn start<C: StreamConnector>(&mut self, connector: &C) -> Result<()> {
        self.connect().await?;

        let source = match connector.connect().await {
            Ok(source) => source,
            Err(err) => {
                error!(
                    error = %err,
                    "Connection failed. Are you connected to the internet? Potentially invalid Slack token?"
                );
                return Err(err);
            }
        };

        info!("started!");
        self.listen(source).await;
        info!("stopped!");
        Ok(())
    }

    /// Pull events from `source` until it signals end-of-stream, dispatching
    /// each to the registered handlers. Transient stream faults and handler
    /// failures are logged and survived; end-of-stream is the only way out.
    pub async fn listen<S: EventSource>(&self, source: S) {
        let mut cursor = EventCursor::new(source);

        info!("began listening!");

        loop {
            match cursor.peek().await {
                Ok(Some(_)) => {}
                Ok(None) => {
                    info!("event stream ended; shutting down");
                    break;
                }
                Err(fault) => {
                    warn!(fault = %fault, "transient stream fault caught, but we will keep listening");
                    continue;
                }
            }

            // The lookahead is cached, so this cannot pull or fail.
            let Ok(Some(event)) = cursor.advance().await else {
                continue;
            };

            let envelope = Envelope::new(self.api.as_ref(), &event);
            self.router.dispatch(&self.registry, &envelope).await;

            tokio::time::sleep(self.read_delay).await;
        }

        info!("stopped listening!");
    }
}
