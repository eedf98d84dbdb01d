use std::sync::{Arc, Mutex, OnceLock};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer, layer::Context};

#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub fields: Vec<(String, String)>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn message(&self) -> Option<&str> {
        self.field("message")
    }
}

/// Shared view of every event emitted since the capture was installed.
#[derive(Clone)]
pub struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl EventCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Events with the given message whose `load_id` field matches.
    ///
    /// Tests in one binary share the subscriber, so filter by load id.
    pub fn for_load(&self, message: &str, load_id: &str) -> Vec<CapturedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.message() == Some(message) && e.field("load_id") == Some(load_id))
            .collect()
    }
}

/// Installs the capturing subscriber once per test binary and returns a handle to it.
pub fn capture_events() -> EventCapture {
    static CAPTURE: OnceLock<EventCapture> = OnceLock::new();

    CAPTURE
        .get_or_init(|| {
            let capture = EventCapture {
                events: Arc::new(Mutex::new(Vec::new())),
            };
            let layer = TestEventLayer {
                events: capture.events.clone(),
            };

            let subscriber = tracing_subscriber::registry().with(layer);

            tracing::subscriber::set_global_default(subscriber)
                .expect("failed to set global tracing subscriber");

            capture
        })
        .clone()
}

struct TestEventLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S> Layer<S> for TestEventLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Vec::new();
        let mut visitor = FieldVisitor {
            fields: &mut fields,
        };
        event.record(&mut visitor);

        let meta = event.metadata();

        self.events.lock().unwrap().push(CapturedEvent {
            level: *meta.level(),
            target: meta.target().to_string(),
            fields,
        });
    }
}

struct FieldVisitor<'a> {
    fields: &'a mut Vec<(String, String)>,
}

impl<'a> Visit for FieldVisitor<'a> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields
            .push((field.name().to_string(), value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.fields
            .push((field.name().to_string(), format!("{value:?}")));
    }
}
