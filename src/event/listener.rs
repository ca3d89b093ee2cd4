use std::sync::Arc;
use thiserror::Error;

use super::object::EventObject;

/// Errors a listener can raise while handling an event
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListenerError {
    #[error("Listener rejected event: {0}")]
    Rejected(String),

    #[error("Listener failed: {0}")]
    Failed(String),

    #[error("Listener panicked: {0}")]
    Panic(String),
}

impl ListenerError {
    /// The listener refused the event (invalid for its current state)
    pub fn rejected(msg: impl Into<String>) -> Self {
        ListenerError::Rejected(msg.into())
    }

    /// The listener accepted the event but could not finish handling it
    pub fn failed(msg: impl Into<String>) -> Self {
        ListenerError::Failed(msg.into())
    }
}

/// Trait for components that react to events of payload type `T`
///
/// Listeners are invoked synchronously on the posting thread, in the order
/// they were registered. Returning an error stops the current dispatch under
/// the default [`DispatchPolicy`](crate::DispatchPolicy).
///
/// Any `Fn(&EventObject<T>) -> Result<(), ListenerError>` closure is a listener.
pub trait EventListener<T>: Send + Sync {
    /// Handle one posted event
    fn on_event(&self, event: &EventObject<T>) -> Result<(), ListenerError>;

    /// Get a human-readable name for this listener (for logging/debugging)
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<T, F> EventListener<T> for F
where
    F: Fn(&EventObject<T>) -> Result<(), ListenerError> + Send + Sync,
{
    fn on_event(&self, event: &EventObject<T>) -> Result<(), ListenerError> {
        self(event)
    }
}

/// Shared handle to a registered listener
///
/// Membership in an event source is decided by the identity of the pointed-to
/// listener, so keep the handle around to unregister later.
pub type ListenerRef<T> = Arc<dyn EventListener<T>>;

/// Wraps a closure in a [`ListenerRef`]
pub fn listener_fn<T, F>(f: F) -> ListenerRef<T>
where
    T: 'static,
    F: Fn(&EventObject<T>) -> Result<(), ListenerError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Whether two handles point at the same listener
pub(crate) fn same_listener<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    // Compare data pointers only; vtable pointers may differ across codegen units.
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

/// A listener that ignores every event
///
/// Useful in tests and as a placeholder where a listener is required.
pub struct NoOpListener;

impl<T> EventListener<T> for NoOpListener {
    fn on_event(&self, _event: &EventObject<T>) -> Result<(), ListenerError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "NoOpListener"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_closure_is_a_listener() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let listener: ListenerRef<u32> = listener_fn(move |event: &EventObject<u32>| {
            counter.fetch_add(*event.source(), Ordering::Relaxed);
            Ok(())
        });

        listener.on_event(&EventObject::new(3)).unwrap();
        listener.on_event(&EventObject::new(4)).unwrap();

        assert_eq!(calls.load(Ordering::Relaxed), 7);
    }

    #[test]
    fn test_identity_is_by_pointer() {
        let a: ListenerRef<u32> = Arc::new(NoOpListener);
        let b: ListenerRef<u32> = Arc::new(NoOpListener);
        let a2 = a.clone();

        assert!(same_listener(&a, &a2));
        assert!(!same_listener(&a, &b));
    }

    #[test]
    fn test_error_helpers() {
        assert_eq!(
            ListenerError::rejected("bad state"),
            ListenerError::Rejected("bad state".to_string())
        );
        assert_eq!(
            ListenerError::failed("boom").to_string(),
            "Listener failed: boom"
        );
    }
}
