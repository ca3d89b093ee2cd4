use parking_lot::RwLock;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, trace, warn};

use super::key::EventKey;
use super::listener::{same_listener, ListenerError, ListenerRef};
use super::object::EventObject;
use crate::config::DispatchPolicy;
use crate::shared::{BusError, ListenerFailure};

/// Ordered set of listeners for one event key
///
/// The listener list is copy-on-write: `fire` works on a snapshot taken when
/// it starts, so listeners added or removed while a dispatch is running (from
/// another thread or from inside a listener) never disturb that dispatch and
/// take effect from the next one.
pub struct EventSource<T> {
    key: EventKey,
    dispatch: DispatchPolicy,
    listeners: RwLock<Arc<Vec<ListenerRef<T>>>>,
}

impl<T: Send + Sync + 'static> EventSource<T> {
    pub fn new(key: EventKey, dispatch: DispatchPolicy) -> Self {
        Self {
            key,
            dispatch,
            listeners: RwLock::new(Arc::new(Vec::new())),
        }
    }

    pub fn key(&self) -> &EventKey {
        &self.key
    }

    pub fn dispatch_policy(&self) -> DispatchPolicy {
        self.dispatch
    }

    /// Appends `listener` unless it is already registered
    ///
    /// Returns whether the listener was added.
    pub fn add(&self, listener: ListenerRef<T>) -> bool {
        let mut listeners = self.listeners.write();
        if listeners.iter().any(|l| same_listener(l, &listener)) {
            trace!(key = %self.key, listener = listener.name(), "Listener already registered");
            return false;
        }

        debug!(key = %self.key, listener = listener.name(), "Adding listener");
        Arc::make_mut(&mut *listeners).push(listener);
        true
    }

    /// Removes `listener` if present
    ///
    /// Returns whether a listener was removed.
    pub fn remove(&self, listener: &ListenerRef<T>) -> bool {
        let mut listeners = self.listeners.write();
        let Some(index) = listeners.iter().position(|l| same_listener(l, listener)) else {
            trace!(key = %self.key, listener = listener.name(), "Listener not registered");
            return false;
        };

        debug!(key = %self.key, listener = listener.name(), "Removing listener");
        Arc::make_mut(&mut *listeners).remove(index);
        true
    }

    pub fn contains(&self, listener: &ListenerRef<T>) -> bool {
        self.listeners
            .read()
            .iter()
            .any(|l| same_listener(l, listener))
    }

    pub fn len(&self) -> usize {
        self.listeners.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.read().is_empty()
    }

    /// Snapshot of the current listeners in registration order
    pub fn listeners(&self) -> Arc<Vec<ListenerRef<T>>> {
        Arc::clone(&*self.listeners.read())
    }

    /// Delivers `event` to every listener in registration order
    pub fn fire(&self, event: &EventObject<T>) -> Result<(), BusError> {
        let listeners = self.listeners();
        trace!(key = %self.key, listeners = listeners.len(), "Firing event");

        match self.dispatch {
            DispatchPolicy::FailStop => {
                for listener in listeners.iter() {
                    if let Err(e) = listener.on_event(event) {
                        warn!(
                            key = %self.key,
                            listener = listener.name(),
                            error = %e,
                            "Listener failed, aborting dispatch"
                        );
                        return Err(e.into());
                    }
                }
                Ok(())
            }
            DispatchPolicy::Isolate => {
                let failures: Vec<ListenerFailure> = listeners
                    .iter()
                    .filter_map(|listener| {
                        let error = match panic::catch_unwind(AssertUnwindSafe(|| {
                            listener.on_event(event)
                        })) {
                            Ok(Ok(())) => return None,
                            Ok(Err(e)) => e,
                            Err(payload) => ListenerError::Panic(panic_message(payload.as_ref())),
                        };
                        warn!(
                            key = %self.key,
                            listener = listener.name(),
                            error = %error,
                            "Listener failed, continuing dispatch"
                        );
                        Some(ListenerFailure {
                            listener: listener.name().to_string(),
                            error,
                        })
                    })
                    .collect();

                if failures.is_empty() {
                    Ok(())
                } else {
                    Err(BusError::ListenersFailed {
                        key: self.key.to_string(),
                        failures,
                    })
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Type-erased view of an [`EventSource`], as stored in the registry
pub trait AnyEventSource: Send + Sync {
    fn key(&self) -> &EventKey;

    /// Name of the payload type this source delivers
    fn payload_type(&self) -> &'static str;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Send + Sync + 'static> AnyEventSource for EventSource<T> {
    fn key(&self) -> &EventKey {
        EventSource::key(self)
    }

    fn payload_type(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn len(&self) -> usize {
        EventSource::len(self)
    }

    fn as_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Shared handle to a registry entry whose payload type is not known statically
pub type SourceHandle = Arc<dyn AnyEventSource>;

impl dyn AnyEventSource {
    /// Recovers the typed source, or `None` if it delivers a different payload type
    pub fn downcast<T: Send + Sync + 'static>(self: Arc<Self>) -> Option<Arc<EventSource<T>>> {
        self.as_any().downcast::<EventSource<T>>().ok()
    }
}
