use tracing::{debug, info, warn};

use crate::envelope::Envelope;
use crate::registry::Registry;

/// Routes one envelope to every handler registered for its event type, in
/// registration order, isolating each handler's failure from the rest.
pub struct Router {
    /// Skip events that carry a subtype. Slack emits both a raw event and a
    /// subtyped variant for the same logical action (message edits, thread
    /// broadcasts), and delivering both double-invokes business logic.
    /// Policy knob, on by default.
    suppress_subtyped: bool,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            suppress_subtyped: true,
        }
    }

    pub fn suppress_subtyped(mut self, suppress: bool) -> Self {
        self.suppress_subtyped = suppress;
        self
    }

    /// Invoke every handler registered for the envelope's event type. A
    /// failing handler is logged and skipped; handlers after it still run,
    /// and nothing propagates to the caller.
    pub async fn dispatch(&self, registry: &Registry, request: &Envelope<'_>) {
        let Some(event_type) = request.event_type() else {
            debug!("event carries no type; nothing to dispatch");
            return;
        };

        info!(
            event_type,
            subtype = request.subtype().unwrap_or(""),
            channel = request.channel(),
            "received event"
        );

        if self.suppress_subtyped {
            if let Some(subtype) = request.subtype() {
                debug!(event_type, subtype, "suppressing subtyped event");
                return;
            }
        }

        for handler in registry.lookup(event_type) {
            if let Err(err) = handler.handle(request).await {
                warn!(
                    event_type,
                    error = ?err,
                    "handler failed; continuing with remaining handlers"
                );
            }
        }
    }
}
