// Type-keyed publish/subscribe components
//
// This module provides the registry that maps event keys to event sources,
// the sources themselves, and the listener and envelope types they deliver.

// Public API - what other modules can use
pub use bus::EventBus;
pub use key::{Event, EventKey};
pub use listener::{listener_fn, EventListener, ListenerError, ListenerRef, NoOpListener};
pub use object::EventObject;
pub use source::{AnyEventSource, EventSource, SourceHandle};
pub use subscribers::{Broadcast, SubscriberBus};

// Internal modules
mod bus;
mod key;
mod listener;
mod object;
mod source;
mod subscribers;
