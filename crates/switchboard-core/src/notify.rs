//! Mutation notifications.
//!
//! Handlers that create, update or delete a resource publish a
//! [`Notification`] after the server confirms the change. Delivery is
//! best-effort: publishing never blocks, never fails the handler, and a
//! subscriber that falls behind loses the oldest notifications.
//!
//! # Example
//!
//! ```rust,ignore
//! let bus = NotificationBus::new(64);
//! let mut rx = bus.subscribe();
//!
//! bus.publish(Notification::deleted("product", json!(42)));
//! let note = rx.recv().await?;
//! assert_eq!(note.event, "product-deleted");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Payload carried by a notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationDetail {
    /// The resource as returned by the server
    Data(Value),
    /// Identifier of a removed resource
    Id(Value),
}

/// A named broadcast event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Event name, e.g. `product-created`
    pub event: String,
    /// Event payload
    pub detail: NotificationDetail,
}

impl Notification {
    /// `<resource>-created` carrying the created resource.
    pub fn created(resource: &str, data: Value) -> Self {
        Self {
            event: format!("{}-created", resource),
            detail: NotificationDetail::Data(data),
        }
    }

    /// `<resource>-updated` carrying the updated resource.
    pub fn updated(resource: &str, data: Value) -> Self {
        Self {
            event: format!("{}-updated", resource),
            detail: NotificationDetail::Data(data),
        }
    }

    /// `<resource>-deleted` carrying the removed resource's id.
    pub fn deleted(resource: &str, id: Value) -> Self {
        Self {
            event: format!("{}-deleted", resource),
            detail: NotificationDetail::Id(id),
        }
    }
}

/// Publish/subscribe channel owned by the application
///
/// Cloning yields another handle to the same channel.
#[derive(Debug, Clone)]
pub struct NotificationBus {
    sender: broadcast::Sender<Notification>,
}

impl NotificationBus {
    /// Create a bus buffering up to `capacity` notifications per subscriber.
    ///
    /// A `capacity` of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Fire-and-forget publish; returns how many subscribers received it.
    pub fn publish(&self, notification: Notification) -> usize {
        let event = notification.event.clone();
        match self.sender.send(notification) {
            Ok(receivers) => {
                debug!(event = %event, receivers, "Notification published");
                receivers
            }
            Err(_) => {
                trace!(event = %event, "Notification dropped, no subscribers");
                0
            }
        }
    }

    /// Start receiving notifications published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_constructors() {
        let created = Notification::created("product", json!({"id": 1}));
        assert_eq!(created.event, "product-created");
        assert_eq!(created.detail, NotificationDetail::Data(json!({"id": 1})));

        assert_eq!(Notification::updated("product", json!({})).event, "product-updated");

        let deleted = Notification::deleted("product", json!("abc"));
        assert_eq!(deleted.event, "product-deleted");
        assert_eq!(deleted.detail, NotificationDetail::Id(json!("abc")));
    }

    #[test]
    fn test_detail_wire_shape() {
        let note = Notification::deleted("product", json!(42));
        assert_eq!(
            serde_json::to_value(&note).unwrap(),
            json!({"event": "product-deleted", "detail": {"id": 42}})
        );

        let note = Notification::created("product", json!({"id": 1}));
        assert_eq!(
            serde_json::to_value(&note).unwrap(),
            json!({"event": "product-created", "detail": {"data": {"id": 1}}})
        );
    }

    #[test]
    fn test_publish_without_subscribers_is_harmless() {
        let bus = NotificationBus::new(4);
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.publish(Notification::deleted("product", json!(1))), 0);
    }

    #[tokio::test]
    async fn test_every_subscriber_receives() {
        let bus = NotificationBus::new(4);
        let mut first = bus.subscribe();
        let mut second = bus.clone().subscribe();

        assert_eq!(bus.publish(Notification::deleted("product", json!(9))), 2);

        assert_eq!(first.recv().await.unwrap().event, "product-deleted");
        assert_eq!(second.recv().await.unwrap().event, "product-deleted");
    }

    #[tokio::test]
    async fn test_lagging_subscriber_loses_oldest() {
        let bus = NotificationBus::new(2);
        let mut rx = bus.subscribe();

        for id in 0..3 {
            bus.publish(Notification::deleted("product", json!(id)));
        }

        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Lagged(1))
        ));
        let next = rx.recv().await.unwrap();
        assert_eq!(next.detail, NotificationDetail::Id(json!(1)));
    }

    #[tokio::test]
    async fn test_zero_capacity_still_delivers() {
        let bus = NotificationBus::new(0);
        let mut rx = bus.subscribe();

        assert_eq!(bus.publish(Notification::deleted("product", json!(7))), 1);
        let note = rx.recv().await.unwrap();
        assert_eq!(note.detail, NotificationDetail::Id(json!(7)));
    }
}
