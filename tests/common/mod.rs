#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use metadata_gate::{MetadataDocument, MetadataProbe, ProbeError, ProbeOutcome, Record};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::prelude::*;

/// Counts error-level events on the current thread
#[derive(Clone, Default)]
pub struct ErrorCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl ErrorCounter {
    pub fn run<T>(&self, f: impl FnOnce() -> T) -> T {
        let subscriber = tracing_subscriber::registry().with(self.clone());
        tracing::subscriber::with_default(subscriber, f)
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// What a mocked metadata backend answers with
#[derive(Clone)]
pub enum Backend {
    Body(&'static str),
    ConnectionRefused,
    /// Sleeps for the duration, then reports a timeout of that bound
    Timeout(Duration),
}

impl Backend {
    fn answer(&self) -> ProbeOutcome {
        match self {
            Backend::Body(body) => MetadataDocument::from_body(body.to_string()),
            Backend::ConnectionRefused => Err(ProbeError::Unreachable(
                "error trying to connect: Connection refused (os error 111)".to_string(),
            )),
            Backend::Timeout(bound) => {
                std::thread::sleep(*bound);
                Err(ProbeError::Timeout(*bound))
            }
        }
    }
}

/// Mock probe whose backend can be swapped between calls
pub struct MockProbe {
    script: Mutex<VecDeque<Backend>>,
    fallback: Backend,
    calls: AtomicUsize,
}

impl MockProbe {
    pub fn always(backend: Backend) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: backend,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn scripted(script: Vec<Backend>, fallback: Backend) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MetadataProbe for MockProbe {
    fn probe(&self) -> ProbeOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.fallback.clone()).answer()
    }
}

pub fn record(value: serde_json::Value) -> Record {
    value.as_object().cloned().unwrap()
}
