use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use tracing::warn;

use crate::envelope::Envelope;

/// User-supplied business logic invoked when its registered event type
/// arrives. Failures are isolated by the router; returning an error never
/// affects other handlers or the listen loop.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, request: &Envelope<'_>) -> anyhow::Result<()>;
}

/// Wrap a plain async function as a handler, so callers can register
/// free functions without writing an `EventHandler` impl:
///
/// ```ignore
/// fn pong<'a>(request: &'a Envelope<'a>) -> BoxFuture<'a, anyhow::Result<()>> {
///     Box::pin(async move {
///         request.reply("Pong", None).await?;
///         Ok(())
///     })
/// }
/// bot.register("message", handler_fn(pong));
/// ```
pub fn handler_fn<F>(f: F) -> Arc<dyn EventHandler>
where
    F: for<'a> Fn(&'a Envelope<'a>) -> BoxFuture<'a, anyhow::Result<()>> + Send + Sync + 'static,
{
    Arc::new(FnHandler(f))
}

struct FnHandler<F>(F);

#[async_trait]
impl<F> EventHandler for FnHandler<F>
where
    F: for<'a> Fn(&'a Envelope<'a>) -> BoxFuture<'a, anyhow::Result<()>> + Send + Sync,
{
    async fn handle(&self, request: &Envelope<'_>) -> anyhow::Result<()> {
        (self.0)(request).await
    }
}

/// Event-type → handler-list mapping. Built during single-threaded setup,
/// read-only once the listen loop starts, so no locking discipline applies.
#[derive(Default)]
pub struct Registry {
    registrations: HashMap<String, Vec<Arc<dyn EventHandler>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `handler` to the list for `event_type`, creating the list if
    /// absent. Registering the same handler (same allocation) twice for one
    /// type is a no-op; it will never be invoked twice for one event.
    pub fn register(&mut self, event_type: impl Into<String>, handler: Arc<dyn EventHandler>) {
        let event_type = event_type.into();
        let handlers = self.registrations.entry(event_type.clone()).or_default();

        if handlers.iter().any(|existing| Arc::ptr_eq(existing, &handler)) {
            warn!(
                event_type = event_type.as_str(),
                "handler already registered for this event type; ignoring"
            );
            return;
        }
        handlers.push(handler);
    }

    /// Handlers for `event_type` in registration order; empty for unknown
    /// types.
    pub fn lookup(&self, event_type: &str) -> &[Arc<dyn EventHandler>] {
        self.registrations
            .get(event_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of event types with at least one handler.
    pub fn registered_types(&self) -> usize {
        self.registrations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingHandler;
    use std::sync::Mutex;

    fn recorder() -> Arc<dyn EventHandler> {
        RecordingHandler::arc("h", Arc::new(Mutex::new(Vec::new())))
    }

    #[test]
    fn register_actually_registers() {
        let mut registry = Registry::new();
        registry.register("message", recorder());

        assert_eq!(registry.registered_types(), 1);
        assert_eq!(registry.lookup("message").len(), 1);
    }

    #[test]
    fn double_registration_is_a_noop() {
        let handler = recorder();
        let mut registry = Registry::new();
        registry.register("message", handler.clone());
        registry.register("message", handler);

        assert_eq!(registry.lookup("message").len(), 1);
    }

    #[test]
    fn same_handler_may_serve_multiple_types() {
        let handler = recorder();
        let mut registry = Registry::new();
        registry.register("message", handler.clone());
        registry.register("hello", handler);

        assert_eq!(registry.lookup("message").len(), 1);
        assert_eq!(registry.lookup("hello").len(), 1);
    }

    #[test]
    fn distinct_handlers_accumulate_in_order() {
        let mut registry = Registry::new();
        registry.register("message", recorder());
        registry.register("message", recorder());

        assert_eq!(registry.lookup("message").len(), 2);
    }

    #[test]
    fn lookup_of_unknown_type_is_empty_not_an_error() {
        let registry = Registry::new();
        assert!(registry.lookup("goodbye").is_empty());
    }
}
