use serde_json::{Map, Value};
use tracing::debug;

/// One raw event record off the stream.
///
/// Slack events are loosely-typed JSON objects whose fields vary by event
/// kind; this is a thin owned view over that object. Unknown shapes are
/// fine; accessors simply miss and callers fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct SlackEvent(Map<String, Value>);

impl SlackEvent {
    /// Build from any JSON value. Non-object payloads become an empty
    /// record rather than an error; every accessor will miss on them.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self(fields),
            other => {
                debug!(payload = %other, "Event payload is not a JSON object");
                Self(Map::new())
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String-typed field access; non-string values count as a miss.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}
