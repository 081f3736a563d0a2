use thiserror::Error;

pub type Result<T> = std::result::Result<T, SlacklineError>;

/// Errors surfaced to the embedding application. Anything that happens
/// inside a running listen loop is recovered there instead.
#[derive(Debug, Error)]
pub enum SlacklineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Startup error: {0}")]
    Startup(String),

    #[error(transparent)]
    Api(#[from] slack_client::SlackApiError),
}

/// Recoverable faults from the underlying event stream. The listen loop
/// logs these and keeps pulling; none of them terminate it. End-of-stream
/// is not an error: sources signal it with `Ok(None)`.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("stream configuration fault: {0}")]
    Config(String),

    #[error("unknown channel or user name: {0}")]
    Name(String),

    #[error("connection fault: {0}")]
    Connection(String),

    #[error("timed out waiting for an event: {0}")]
    Timeout(String),

    #[error("API fault: {0}")]
    Api(String),
}

/// The one failure `Envelope::reply` reports: no explicit channel was given
/// and the event itself carries none.
#[derive(Debug, Error)]
#[error("unable to determine which channel to reply to")]
pub struct NoDestinationError;
