//! Event-driven dispatch for Slack bots.
//!
//! Register handlers against named event types, then let the bot pull
//! events from the stream and route them. One failing handler never stops
//! the others, transient stream faults never stop the loop, and the loop
//! only terminates when the stream itself ends.
//!
//! ```ignore
//! use futures::future::BoxFuture;
//! use slackline::{handler_fn, Envelope, SlackBot};
//!
//! fn pong<'a>(request: &'a Envelope<'a>) -> BoxFuture<'a, anyhow::Result<()>> {
//!     Box::pin(async move {
//!         if request.message().is_some_and(|m| m.eq_ignore_ascii_case("ping")) {
//!             request.reply("Pong", None).await?;
//!         }
//!         Ok(())
//!     })
//! }
//!
//! # async fn run(connector: impl slackline::StreamConnector) -> slackline::error::Result<()> {
//! let mut bot = SlackBot::new(None)?; // token from SLACK_BOT_TOKEN
//! bot.register("message", handler_fn(pong));
//! bot.start(&connector).await?;
//! # Ok(())
//! # }
//! ```

pub mod bot;
pub mod config;
pub mod cursor;
pub mod directory;
pub mod envelope;
pub mod error;
pub mod event;
pub mod registry;
pub mod router;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;

pub use bot::SlackBot;
pub use config::Config;
pub use cursor::{EventCursor, EventSource, StreamSource};
pub use envelope::Envelope;
pub use error::{NoDestinationError, SlacklineError, StreamError};
pub use event::SlackEvent;
pub use registry::{handler_fn, EventHandler, Registry};
pub use router::Router;
pub use traits::{BotIdentity, ChatApi, StreamConnector};
