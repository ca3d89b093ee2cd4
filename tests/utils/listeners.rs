use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use eventbus::{EventListener, EventObject, ListenerError, ListenerRef};

// ============================================================================
// Recording Listeners
// ============================================================================

/// Records every payload it receives, in order
pub struct RecordingListener<T> {
    name: String,
    received: Mutex<Vec<T>>,
}

impl<T: Clone + Send + Sync + 'static> RecordingListener<T> {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            received: Mutex::new(Vec::new()),
        })
    }

    pub fn handle(self: &Arc<Self>) -> ListenerRef<T> {
        self.clone()
    }

    pub fn received(&self) -> Vec<T> {
        self.received.lock().clone()
    }

    pub fn last(&self) -> Option<T> {
        self.received.lock().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.received.lock().len()
    }
}

impl<T: Clone + Send + Sync + 'static> EventListener<T> for RecordingListener<T> {
    fn on_event(&self, event: &EventObject<T>) -> Result<(), ListenerError> {
        self.received.lock().push(event.source().clone());
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Appends its name to a shared journal, for checking delivery order
pub struct JournalListener {
    name: &'static str,
    journal: Arc<Mutex<Vec<&'static str>>>,
}

impl JournalListener {
    pub fn new<T>(name: &'static str, journal: &Arc<Mutex<Vec<&'static str>>>) -> ListenerRef<T> {
        Arc::new(Self {
            name,
            journal: journal.clone(),
        })
    }
}

impl<T> EventListener<T> for JournalListener {
    fn on_event(&self, _event: &EventObject<T>) -> Result<(), ListenerError> {
        self.journal.lock().push(self.name);
        Ok(())
    }

    fn name(&self) -> &str {
        self.name
    }
}

// ============================================================================
// Failing Listeners
// ============================================================================

/// Fails every event it receives, counting the attempts
pub struct FailingListener {
    calls: AtomicU32,
    error: ListenerError,
}

impl FailingListener {
    pub fn new(error: ListenerError) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicU32::new(0),
            error,
        })
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::Relaxed)
    }
}

impl<T> EventListener<T> for FailingListener {
    fn on_event(&self, _event: &EventObject<T>) -> Result<(), ListenerError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Err(self.error.clone())
    }

    fn name(&self) -> &str {
        "FailingListener"
    }
}
