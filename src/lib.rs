//! # eventbus
//!
//! An in-process, type-keyed publish/subscribe registry. Publishers post a
//! value; the bus finds the event source registered for the value's type and
//! hands it to every listener of that source, in registration order, on the
//! posting thread.
//!
//! ```text
//!   register::<T>(listener)            post(value: T)
//!            │                               │
//!            ▼                               ▼
//!   ┌──────────────────────────────────────────────────┐
//!   │ EventBus: key ──► EventSource (one per key)      │
//!   │   T::KEY = "NavigationEventState" ──► source A   │
//!   │   T::KEY = "ImportWizardModel"    ──► source B   │
//!   └──────────────────────────────────────────────────┘
//!                                │ fire(EventObject<T>)
//!                                ▼
//!                  listener 1 ► listener 2 ► listener 3
//! ```
//!
//! - Sources are created on first registration and only removed explicitly.
//! - Posting never creates a source; a post with no source is a no-op.
//! - A failing listener stops the dispatch and its error is returned to the
//!   poster, unless the bus is configured with [`DispatchPolicy::Isolate`].
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use eventbus::{impl_event, listener_fn, EventBus, EventObject};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Saved { path: String }
//! impl_event!(Saved);
//!
//! let bus = EventBus::named("editor");
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let sink = seen.clone();
//! let listener = listener_fn(move |event: &EventObject<Saved>| {
//!     sink.lock().unwrap().push(event.source().path.clone());
//!     Ok(())
//! });
//! bus.register(listener.clone()).unwrap();
//!
//! bus.post(Saved { path: "notes.txt".into() }).unwrap();
//! bus.unregister(&listener).unwrap();
//! bus.post(Saved { path: "ignored.txt".into() }).unwrap();
//!
//! assert_eq!(*seen.lock().unwrap(), vec!["notes.txt".to_string()]);
//! ```

pub mod config;
pub mod event;
mod global;
pub mod shared;
pub mod wizard;

// Re-export commonly used types for easier access
pub use config::{BusConfig, DispatchPolicy};
pub use event::{
    listener_fn, AnyEventSource, Broadcast, Event, EventBus, EventKey, EventListener,
    EventObject, EventSource, ListenerError, ListenerRef, NoOpListener, SourceHandle,
    SubscriberBus,
};
pub use global::global;
pub use shared::{BusError, ListenerFailure};
