use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, trace};

/// Contract for a bus that delivers events of type `E` to subscribers of type `S`
///
/// Unlike [`EventBus`](super::EventBus), there is no routing: every posted
/// event goes to every registered subscriber.
pub trait Broadcast<S, E> {
    /// Adds `subscriber`; registering an equal subscriber again is ignored
    fn register(&self, subscriber: S);

    /// Removes `subscriber` if present
    fn unregister(&self, subscriber: &S);

    /// Delivers `event` to every subscriber in registration order
    fn post(&self, event: &E);

    /// Currently registered subscribers
    fn subscribers(&self) -> Vec<S>;
}

type Deliver<S, E> = dyn Fn(&S, &E) + Send + Sync;

/// Subscriber list with a delivery callback
///
/// The callback decides how an event reaches a subscriber, so `S` can be any
/// handle (a channel, a widget, an id) without implementing a listener trait.
/// Posting iterates a snapshot, so the callback may register or unregister.
pub struct SubscriberBus<S, E> {
    subscribers: RwLock<Arc<Vec<S>>>,
    deliver: Box<Deliver<S, E>>,
}

impl<S, E> SubscriberBus<S, E>
where
    S: Clone + PartialEq,
{
    pub fn new(deliver: impl Fn(&S, &E) + Send + Sync + 'static) -> Self {
        Self {
            subscribers: RwLock::new(Arc::new(Vec::new())),
            deliver: Box::new(deliver),
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.read().is_empty()
    }
}

impl<S, E> Broadcast<S, E> for SubscriberBus<S, E>
where
    S: Clone + PartialEq,
{
    fn register(&self, subscriber: S) {
        let mut subscribers = self.subscribers.write();
        if subscribers.contains(&subscriber) {
            trace!("Subscriber already registered");
            return;
        }
        Arc::make_mut(&mut *subscribers).push(subscriber);
        debug!(subscribers = subscribers.len(), "Subscriber registered");
    }

    fn unregister(&self, subscriber: &S) {
        let mut subscribers = self.subscribers.write();
        if let Some(index) = subscribers.iter().position(|s| s == subscriber) {
            Arc::make_mut(&mut *subscribers).remove(index);
            debug!(subscribers = subscribers.len(), "Subscriber unregistered");
        }
    }

    fn post(&self, event: &E) {
        let subscribers = Arc::clone(&*self.subscribers.read());
        trace!(subscribers = subscribers.len(), "Posting to subscribers");
        for subscriber in subscribers.iter() {
            (self.deliver)(subscriber, event);
        }
    }

    fn subscribers(&self) -> Vec<S> {
        self.subscribers.read().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct TestEvent {
        message: String,
    }

    impl TestEvent {
        fn new(message: &str) -> Self {
            Self {
                message: message.to_string(),
            }
        }
    }

    /// Collects received events; equality is by identity of the inbox
    #[derive(Clone, Default)]
    struct TestSubscriber {
        inbox: Arc<Mutex<Vec<TestEvent>>>,
    }

    impl PartialEq for TestSubscriber {
        fn eq(&self, other: &Self) -> bool {
            Arc::ptr_eq(&self.inbox, &other.inbox)
        }
    }

    impl TestSubscriber {
        fn received(&self) -> Vec<TestEvent> {
            self.inbox.lock().clone()
        }
    }

    fn test_bus() -> SubscriberBus<TestSubscriber, TestEvent> {
        SubscriberBus::new(|subscriber: &TestSubscriber, event: &TestEvent| {
            subscriber.inbox.lock().push(event.clone())
        })
    }

    #[test]
    fn test_register_and_post_event() {
        let bus = test_bus();
        let subscriber1 = TestSubscriber::default();
        let subscriber2 = TestSubscriber::default();
        let event = TestEvent::new("Test Event");

        bus.register(subscriber1.clone());
        bus.register(subscriber2.clone());
        bus.post(&event);

        assert_eq!(subscriber1.received(), vec![event.clone()]);
        assert_eq!(subscriber2.received(), vec![event]);
    }

    #[test]
    fn test_duplicate_registration_ignored() {
        let bus = test_bus();
        let subscriber = TestSubscriber::default();

        bus.register(subscriber.clone());
        bus.register(subscriber.clone());
        bus.post(&TestEvent::new("once"));

        assert_eq!(bus.len(), 1);
        assert_eq!(subscriber.received().len(), 1);
    }

    #[test]
    fn test_unregister_subscriber() {
        let bus = test_bus();
        let subscriber = TestSubscriber::default();

        bus.register(subscriber.clone());
        bus.unregister(&subscriber);
        bus.unregister(&subscriber);
        bus.post(&TestEvent::new("Test Event"));

        assert!(subscriber.received().is_empty());
    }

    #[test]
    fn test_no_subscribers() {
        let bus = test_bus();

        bus.post(&TestEvent::new("Test Event"));

        assert!(bus.subscribers().is_empty());
        assert!(bus.is_empty());
    }
}
