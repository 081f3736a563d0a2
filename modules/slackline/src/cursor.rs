// One-slot lookahead over the raw event stream.
//
// The listen loop needs to tell "the stream ended for good" apart from "an
// event arrived" without losing the event in the process. EventCursor pulls
// at most one item per peek, caches it, and replays it on the next advance,
// so callers never observe a lost or duplicated item.

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};

use crate::error::StreamError;
use crate::event::SlackEvent;

/// The raw inbound event stream. `Ok(None)` means the stream is over for
/// good; that is the designated shutdown signal. Errors are transient
/// faults and leave the source pullable.
#[async_trait]
pub trait EventSource: Send {
    async fn next_event(&mut self) -> Result<Option<SlackEvent>, StreamError>;
}

pub struct EventCursor<S> {
    source: S,
    lookahead: Option<SlackEvent>,
}

impl<S: EventSource> EventCursor<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            lookahead: None,
        }
    }

    /// Look at the next event without consuming it. Pulls at most one item
    /// from the source; repeated peeks return the same cached event.
    pub async fn peek(&mut self) -> Result<Option<&SlackEvent>, StreamError> {
        if self.lookahead.is_none() {
            self.lookahead = self.source.next_event().await?;
        }
        Ok(self.lookahead.as_ref())
    }

    /// Consume the next event: the cached lookahead first, then the source.
    pub async fn advance(&mut self) -> Result<Option<SlackEvent>, StreamError> {
        if let Some(event) = self.lookahead.take() {
            return Ok(Some(event));
        }
        self.source.next_event().await
    }
}

/// Adapter for transports exposed as a `futures::Stream` of event results.
/// Stream exhaustion maps to the end-of-stream sentinel.
pub struct StreamSource {
    inner: BoxStream<'static, Result<SlackEvent, StreamError>>,
}

impl StreamSource {
    pub fn new(
        stream: impl Stream<Item = Result<SlackEvent, StreamError>> + Send + 'static,
    ) -> Self {
        Self {
            inner: stream.boxed(),
        }
    }
}

#[async_trait]
impl EventSource for StreamSource {
    async fn next_event(&mut self) -> Result<Option<SlackEvent>, StreamError> {
        match self.inner.next().await {
            Some(Ok(event)) => Ok(Some(event)),
            Some(Err(fault)) => Err(fault),
            None => Ok(None),
        }
    }
}
