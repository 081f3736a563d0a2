// End-to-end listen loop scenarios driven by scripted sources: dispatch,
// fault recovery, shutdown, and startup failure.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::BoxFuture;
use serde_json::json;

use slackline::testing::{
    FailingConnector, MockChatApi, RecordingHandler, ScriptedSource, SourceConnector,
};
use slackline::{handler_fn, Envelope, SlackBot, SlacklineError, StreamError};

type CallLog = Arc<Mutex<Vec<String>>>;

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

fn bot(api: MockChatApi) -> SlackBot {
    SlackBot::with_api(Arc::new(api)).read_delay(Duration::ZERO)
}

fn message(text: &str) -> serde_json::Value {
    json!({ "type": "message", "channel": "C1", "text": text })
}

#[tokio::test]
async fn dispatches_survives_a_fault_and_stops_at_end_of_stream() {
    init_tracing();

    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let mut bot = bot(MockChatApi::new());
    bot.register("message", RecordingHandler::arc("h", log.clone()));

    let source = ScriptedSource::new()
        .event(message("hi"))
        .fault(StreamError::Connection("socket reset".into()));

    // The loop must come back on its own once the script runs out.
    tokio::time::timeout(Duration::from_secs(5), bot.listen(source))
        .await
        .expect("listen loop should stop at end-of-stream");

    assert_eq!(*log.lock().unwrap(), vec!["h"]);
}

#[tokio::test]
async fn start_connects_then_listens_until_the_stream_ends() {
    init_tracing();

    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let mut bot = bot(MockChatApi::new());
    bot.register("message", RecordingHandler::arc("h", log.clone()));

    let connector = SourceConnector::new(ScriptedSource::new().event(message("hi")));
    bot.start(&connector).await.unwrap();

    assert_eq!(bot.identity().unwrap().user_id, "U0BOT");
    assert_eq!(*log.lock().unwrap(), vec!["h"]);
}

#[tokio::test]
async fn failed_stream_establishment_never_enters_the_loop() {
    init_tracing();

    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let mut bot = bot(MockChatApi::new());
    bot.register("message", RecordingHandler::arc("h", log.clone()));

    let err = bot.start(&FailingConnector).await.unwrap_err();

    assert!(matches!(err, SlacklineError::Startup(_)));
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn events_dispatch_in_arrival_order_to_handlers_in_registration_order() {
    init_tracing();

    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let mut bot = bot(MockChatApi::new());
    bot.register("message", RecordingHandler::arc("first", log.clone()));
    bot.register("message", RecordingHandler::arc("second", log.clone()));
    bot.register("hello", RecordingHandler::arc("greeter", log.clone()));

    let source = ScriptedSource::new()
        .event(json!({ "type": "hello" }))
        .event(message("one"))
        .event(message("two"));

    bot.listen(source).await;

    assert_eq!(
        *log.lock().unwrap(),
        vec!["greeter", "first", "second", "first", "second"]
    );
}

fn pong<'a>(request: &'a Envelope<'a>) -> BoxFuture<'a, anyhow::Result<()>> {
    Box::pin(async move {
        if request
            .message()
            .is_some_and(|m| m.eq_ignore_ascii_case("ping"))
        {
            request.reply("Pong", None).await?;
        }
        Ok(())
    })
}

#[tokio::test]
async fn ping_pong_round_trip() {
    init_tracing();

    let api = Arc::new(MockChatApi::new());
    let mut bot = SlackBot::with_api(api.clone()).read_delay(Duration::ZERO);
    bot.register("message", handler_fn(pong));

    let source = ScriptedSource::new()
        .event(message("ping"))
        .event(message("not a ping"));

    bot.listen(source).await;

    let sent = api.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].channel, "C1");
    assert_eq!(sent[0].text, "Pong");
}

#[tokio::test]
async fn subtyped_duplicates_do_not_reach_handlers() {
    init_tracing();

    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let mut bot = bot(MockChatApi::new());
    bot.register("message", RecordingHandler::arc("h", log.clone()));

    let source = ScriptedSource::new()
        .event(message("first version"))
        .event(json!({
            "type": "message",
            "subtype": "message_changed",
            "channel": "C1",
        }));

    bot.listen(source).await;

    assert_eq!(*log.lock().unwrap(), vec!["h"]);
}

#[tokio::test]
async fn the_suppression_knob_lets_subtyped_events_through() {
    init_tracing();

    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let mut bot = SlackBot::with_api(Arc::new(MockChatApi::new()))
        .read_delay(Duration::ZERO)
        .dispatch_subtyped_events();
    bot.register("message", RecordingHandler::arc("h", log.clone()));

    let source = ScriptedSource::new().event(json!({
        "type": "message",
        "subtype": "message_changed",
        "channel": "C1",
    }));

    bot.listen(source).await;

    assert_eq!(*log.lock().unwrap(), vec!["h"]);
}

#[tokio::test]
async fn a_failing_handler_does_not_take_down_later_events() {
    init_tracing();

    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let mut bot = bot(MockChatApi::new());
    bot.register("message", RecordingHandler::failing("boom", log.clone()));

    let source = ScriptedSource::new()
        .event(message("one"))
        .event(message("two"));

    bot.listen(source).await;

    assert_eq!(*log.lock().unwrap(), vec!["boom", "boom"]);
}
