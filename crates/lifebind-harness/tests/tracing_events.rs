#![forbid(unsafe_code)]

//! Structured events emitted over one bind/release cycle.
//!
//! A capturing layer records span openings and event messages (with their
//! fields) so the tests can check the log surface without parsing output.

use std::fmt;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use lifebind_core::{MainQueue, ViewId};
use lifebind_harness::{BindCounter, FixtureView, SampleBinding, ScreenFixture, ViewHostFixture};
use lifebind_runtime::{
    BindingOptions, ScreenBinding, ViewHostBinding, screen_binding_by_id, view_host_view_binding,
};
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id};
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Default)]
struct Fields(Vec<String>);

impl Visit for Fields {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0.insert(0, format!("{value:?}"));
        } else {
            self.0.push(format!("{}={value:?}", field.name()));
        }
    }
}

#[derive(Clone, Default)]
struct Capture {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Capture {
    fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    fn find(&self, needle: &str) -> Option<String> {
        self.lines().into_iter().find(|l| l.contains(needle))
    }
}

impl<S: Subscriber> Layer<S> for Capture {
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        let mut fields = Fields::default();
        attrs.record(&mut fields);
        self.lines.lock().unwrap().push(format!(
            "span {} {}",
            attrs.metadata().name(),
            fields.0.join(" ")
        ));
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Fields::default();
        event.record(&mut fields);
        self.lines.lock().unwrap().push(format!(
            "{} {}",
            event.metadata().level(),
            fields.0.join(" ")
        ));
    }
}

fn captured<R>(f: impl FnOnce() -> R) -> (Capture, R) {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    let out = tracing::subscriber::with_default(subscriber, f);
    (capture, out)
}

#[test]
fn bind_and_release_cycle_is_logged() {
    let (capture, ()) = captured(|| {
        let queue = MainQueue::new();
        let counter = BindCounter::new();
        let cache: ScreenBinding<ScreenFixture, Rc<SampleBinding>> =
            screen_binding_by_id(queue.clone(), ViewId::new(1), counter.bind_fn())
                .with_options(BindingOptions::labeled("inbox"));
        let screen = ScreenFixture::new();
        screen.set_content(FixtureView::new(1));

        cache.get(&screen).unwrap();
        screen.destroy();
        queue.run_pending();
    });

    let span = capture.find("span binding_bind").expect("bind span");
    assert!(span.contains("label=inbox"), "{span}");
    assert!(span.contains("source=\"self\""), "{span}");

    let created = capture.find("binding created").expect("created event");
    assert!(created.starts_with("DEBUG"), "{created}");
    assert!(created.contains("epoch=1"), "{created}");

    assert!(capture.find("binding release scheduled").is_some());
    let released = capture.find("binding released").expect("released event");
    assert!(released.contains("label=\"inbox\""), "{released}");
}

#[test]
fn binder_failure_is_logged_without_created_event() {
    let (capture, ()) = captured(|| {
        let queue = MainQueue::new();
        let counter = BindCounter::refusing([1]);
        let cache: ViewHostBinding<ViewHostFixture, Rc<SampleBinding>> =
            view_host_view_binding(queue, counter.bind_fn());
        let host = ViewHostFixture::new();
        host.create_view(FixtureView::new(1));
        assert!(cache.get(&host).is_err());
    });

    assert!(capture.find("fixture view created").is_some());
    let failed = capture.find("binder failed").expect("failure event");
    assert!(failed.contains("has no binding"), "{failed}");
    assert!(capture.find("binding created").is_none());
}
