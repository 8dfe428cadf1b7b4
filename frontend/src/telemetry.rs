//! Best-effort instrumentation sink.
//!
//! Mirrors the Application Insights wrapper the backend's status
//! endpoint reports on: initialized from a build-time connection
//! string, silently disabled when it is absent, and never allowed to
//! interrupt the action being tracked. Events are emitted as
//! structured console records.

use serde_json::{Map, Value, json};
use std::cell::RefCell;

thread_local! {
    static SINK: RefCell<Option<Sink>> = const { RefCell::new(None) };
}

struct Sink {
    #[allow(dead_code)]
    connection_string: String,
}

/// Milliseconds since the epoch; used by callers to report durations.
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

fn timestamp() -> String {
    js_sys::Date::new_0()
        .to_iso_string()
        .as_string()
        .unwrap_or_default()
}

/// Initialize the sink from the build environment. A missing
/// connection string disables telemetry without failing startup.
pub fn init_telemetry() {
    match option_env!("ARTSHARE_INSIGHTS_CONNECTION_STRING") {
        Some(cs) if !cs.is_empty() => {
            SINK.with(|sink| {
                *sink.borrow_mut() = Some(Sink {
                    connection_string: cs.to_string(),
                });
            });
            web_sys::console::log_1(&"[Telemetry] initialized".into());
        }
        _ => {
            web_sys::console::warn_1(
                &"[Telemetry] connection string not provided, telemetry disabled".into(),
            );
        }
    }
}

fn enabled() -> bool {
    SINK.with(|sink| sink.borrow().is_some())
}

fn emit(kind: &str, name: &str, mut properties: Map<String, Value>) {
    if !enabled() {
        return;
    }
    properties.insert("timestamp".into(), Value::String(timestamp()));
    let record = json!({
        "kind": kind,
        "name": name,
        "properties": properties,
    });
    // Serialization of these records cannot fail; losing one is fine
    // either way, telemetry never surfaces to the user.
    if let Ok(line) = serde_json::to_string(&record) {
        web_sys::console::log_1(&line.into());
    }
}

/// Key/value pairs attached to an event.
pub fn props<const N: usize>(pairs: [(&str, Value); N]) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

pub fn track_event(name: &str, properties: Map<String, Value>) {
    emit("event", name, properties);
}

pub fn track_page_view(name: &str) {
    emit("pageView", name, Map::new());
}

pub fn track_exception(message: &str, properties: Map<String, Value>) {
    let mut properties = properties;
    properties.insert("message".into(), Value::String(message.to_string()));
    emit("exception", "Exception", properties);
}

pub fn track_metric(name: &str, value: f64, properties: Map<String, Value>) {
    let mut properties = properties;
    properties.insert("value".into(), json!(value));
    emit("metric", name, properties);
}
