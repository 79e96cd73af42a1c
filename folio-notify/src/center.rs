use crate::notification::Notification;
use std::sync::{Arc, Mutex};

pub type SubscribeFn = Arc<dyn Fn(&Notification) + Send + Sync>;

/// A registered notification handler.
pub struct Subscriber {
    subscriber: SubscribeFn,
}

impl Subscriber {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&Notification) + Send + Sync + 'static,
    {
        Self {
            subscriber: Arc::new(handler),
        }
    }

    pub fn subscriber(&self) -> SubscribeFn {
        self.subscriber.clone()
    }
}

/// Utility function to create a subscriber from a closure.
pub fn make_subscriber<F>(handler: F) -> Subscriber
where
    F: Fn(&Notification) + Send + Sync + 'static,
{
    Subscriber::new(handler)
}

/// In-process notification dispatch.
///
/// Delivery is fire-and-forget: subscribers are invoked in registration
/// order and cannot fail or roll back the operation that published the
/// notification. Clones share the same subscriber list.
#[derive(Clone, Default)]
pub struct NotificationCenter {
    subscribers: Arc<Mutex<Vec<Subscriber>>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for every future notification.
    pub fn subscribe(&self, subscriber: Subscriber) {
        if let Ok(mut guard) = self.subscribers.lock() {
            guard.push(subscriber);
        }
    }

    /// Deliver a notification to every subscriber.
    ///
    /// Returns `None` when no subscribers are registered.
    pub fn publish(&self, notification: &Notification) -> Option<()> {
        let guard = self.subscribers.lock().ok()?;
        if guard.is_empty() {
            tracing::debug!(title = %notification.title, "no subscribers for notification");
            return None;
        }
        for subscriber in guard.iter() {
            subscriber.subscriber()(notification);
        }
        Some(())
    }
}

#[cfg(test)]
mod notification_center_tests {
    use super::*;

    #[test]
    fn publish_reaches_every_subscriber() {
        let shared_str1 = Arc::new(Mutex::new(String::from("")));
        let shared_str_clone1 = Arc::clone(&shared_str1);

        let shared_str2 = Arc::new(Mutex::new(String::from("")));
        let shared_str_clone2 = Arc::clone(&shared_str2);

        let center = NotificationCenter::new();

        center.subscribe(make_subscriber(move |n: &Notification| {
            let mut message1 = shared_str1.lock().unwrap();
            *message1 = format!("fire1: {}", n.title)
        }));
        center.subscribe(make_subscriber(move |n: &Notification| {
            let mut message2 = shared_str2.lock().unwrap();
            *message2 = format!("fire2: {}", n.title)
        }));

        let result = center.publish(&Notification::new("Page Published", "Your page is now live."));

        assert_eq!(result, Some(()));
        assert_eq!(*shared_str_clone1.lock().unwrap(), "fire1: Page Published");
        assert_eq!(*shared_str_clone2.lock().unwrap(), "fire2: Page Published");
    }

    #[test]
    fn publish_without_subscribers_returns_none() {
        let center = NotificationCenter::new();

        let result = center.publish(&Notification::new("Page Deleted", "The page has been removed."));

        assert!(result.is_none());
    }

    #[test]
    fn clones_share_subscribers() {
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let delivered_clone = Arc::clone(&delivered);

        let center = NotificationCenter::new();
        let handle = center.clone();

        handle.subscribe(make_subscriber(move |n: &Notification| {
            delivered.lock().unwrap().push(n.clone());
        }));

        center.publish(&Notification::new("Media Uploaded", "Your file has been uploaded."));

        assert_eq!(delivered_clone.lock().unwrap().len(), 1);
    }
}
