use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, trace};

use super::key::{Event, EventKey};
use super::listener::ListenerRef;
use super::object::EventObject;
use super::source::{EventSource, SourceHandle};
use crate::config::{BusConfig, DispatchPolicy};
use crate::shared::BusError;

/// Registry of event sources keyed by event type
///
/// Cloning is cheap and every clone shares the same registry, so the bus can
/// be handed to each component that publishes or listens.
#[derive(Clone)]
pub struct EventBus {
    name: Arc<str>,
    dispatch: DispatchPolicy,
    /// Event sources: key -> source
    sources: Arc<RwLock<HashMap<EventKey, SourceHandle>>>,
}

impl EventBus {
    /// Creates a bus with the default configuration
    pub fn new() -> Self {
        Self::with_config(BusConfig::default())
    }

    /// Creates a bus with the given name and default dispatch policy
    pub fn named(name: impl Into<String>) -> Self {
        Self::with_config(BusConfig::new(name))
    }

    pub fn with_config(config: BusConfig) -> Self {
        debug!(name = %config.name, dispatch = %config.dispatch, "Creating event bus");
        Self {
            name: config.name.into(),
            dispatch: config.dispatch,
            sources: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dispatch_policy(&self) -> DispatchPolicy {
        self.dispatch
    }

    /// Returns the source for `T`, creating an empty one if none exists
    pub fn event_source<T: Event>(&self) -> Result<Arc<EventSource<T>>, BusError> {
        self.get_or_create(EventKey::new(T::KEY)?)
    }

    /// Returns the source stored under an explicit `key`, creating it if absent
    pub fn event_source_with_key<T: Send + Sync + 'static>(
        &self,
        key: &str,
    ) -> Result<Arc<EventSource<T>>, BusError> {
        self.get_or_create(EventKey::new(key.to_string())?)
    }

    /// Looks up the source stored under `key` without creating one
    pub fn get(&self, key: &str) -> Option<SourceHandle> {
        self.sources.read().get(key).cloned()
    }

    /// Looks up the source for `T` without creating one
    pub fn get_source<T: Event>(&self) -> Result<Option<Arc<EventSource<T>>>, BusError> {
        self.get(T::KEY).map(downcast_source::<T>).transpose()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.sources.read().contains_key(key)
    }

    pub fn contains<T: Event>(&self) -> bool {
        self.contains_key(T::KEY)
    }

    /// Attaches `listener` to the source for `T`
    pub fn register<T: Event>(&self, listener: ListenerRef<T>) -> Result<(), BusError> {
        self.event_source::<T>()?.add(listener);
        Ok(())
    }

    /// Attaches `listener` to the source stored under an explicit `key`
    pub fn register_with_key<T: Send + Sync + 'static>(
        &self,
        key: &str,
        listener: ListenerRef<T>,
    ) -> Result<(), BusError> {
        self.event_source_with_key::<T>(key)?.add(listener);
        Ok(())
    }

    /// Detaches `listener` from the source for `T`
    ///
    /// Never creates a source. Returns whether the listener was registered.
    pub fn unregister<T: Event>(&self, listener: &ListenerRef<T>) -> Result<bool, BusError> {
        self.unregister_with_key(T::KEY, listener)
    }

    pub fn unregister_with_key<T: Send + Sync + 'static>(
        &self,
        key: &str,
        listener: &ListenerRef<T>,
    ) -> Result<bool, BusError> {
        EventKey::validate(key)?;
        match self.get(key) {
            Some(handle) => Ok(downcast_source::<T>(handle)?.remove(listener)),
            None => Ok(false),
        }
    }

    /// Detaches and returns the source stored under `key`
    ///
    /// Listeners on the removed source receive no further posts from this bus;
    /// the next registration for `key` starts a fresh source.
    #[instrument(skip(self), fields(bus = %self.name))]
    pub fn remove(&self, key: &str) -> Option<SourceHandle> {
        let removed = self.sources.write().remove(key);
        match &removed {
            Some(source) => debug!(key = %key, listeners = source.len(), "Removed event source"),
            None => trace!(key = %key, "No event source to remove"),
        }
        removed
    }

    pub fn remove_source<T: Event>(&self) -> Option<SourceHandle> {
        self.remove(T::KEY)
    }

    /// Posts `value` to the listeners registered for its type
    ///
    /// Does nothing if no source exists for the type; posting never creates one.
    pub fn post<T: Event>(&self, value: T) -> Result<(), BusError> {
        self.post_with_key(T::KEY, value)
    }

    /// Posts `value` to the listeners stored under an explicit `key`
    pub fn post_with_key<T: Send + Sync + 'static>(
        &self,
        key: &str,
        value: T,
    ) -> Result<(), BusError> {
        EventKey::validate(key)?;
        let Some(handle) = self.get(key) else {
            trace!(bus = %self.name, key = %key, "No event source for post");
            return Ok(());
        };

        let source = downcast_source::<T>(handle)?;
        trace!(
            bus = %self.name,
            key = %key,
            listeners = source.len(),
            "Posting event"
        );
        source.fire(&EventObject::new(value))
    }

    /// Keys of all registered sources, sorted
    pub fn keys(&self) -> Vec<EventKey> {
        let mut keys: Vec<EventKey> = self.sources.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.sources.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.read().is_empty()
    }

    fn get_or_create<T: Send + Sync + 'static>(
        &self,
        key: EventKey,
    ) -> Result<Arc<EventSource<T>>, BusError> {
        if let Some(handle) = self.sources.read().get(&key).cloned() {
            return downcast_source::<T>(handle);
        }

        // Check and insert under one write lock so racing callers share a source.
        let handle = {
            let mut sources = self.sources.write();
            let dispatch = self.dispatch;
            sources
                .entry(key.clone())
                .or_insert_with(|| {
                    debug!(bus = %self.name, key = %key, "Creating event source");
                    Arc::new(EventSource::<T>::new(key.clone(), dispatch)) as SourceHandle
                })
                .clone()
        };

        downcast_source::<T>(handle)
    }
}

fn downcast_source<T: Send + Sync + 'static>(
    handle: SourceHandle,
) -> Result<Arc<EventSource<T>>, BusError> {
    let key = handle.key().to_string();
    let bound = handle.payload_type();
    handle.downcast::<T>().ok_or_else(|| BusError::TypeMismatch {
        key,
        bound,
        requested: std::any::type_name::<T>(),
    })
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("name", &self.name)
            .field("dispatch", &self.dispatch)
            .field("keys", &self.keys())
            .finish()
    }
}
