use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};
use uuid::Uuid;

/// Domain events published after a purchase order write commits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    PurchaseOrderCreated {
        purchase_order_id: Uuid,
        purchase_order_number: Option<String>,
    },
    PurchaseOrderAmended {
        purchase_order_id: Uuid,
        item_count: usize,
    },
    PurchaseOrderStatusChanged {
        purchase_order_id: Uuid,
        from_status: Option<String>,
        to_status: String,
    },
    PurchaseOrderDeleted(Uuid),
    PurchaseOrderNumberAssigned {
        purchase_order_id: Uuid,
        purchase_order_number: String,
    },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::PurchaseOrderCreated { .. } => "purchase_order.created",
            Event::PurchaseOrderAmended { .. } => "purchase_order.amended",
            Event::PurchaseOrderStatusChanged { .. } => "purchase_order.status_changed",
            Event::PurchaseOrderDeleted(_) => "purchase_order.deleted",
            Event::PurchaseOrderNumberAssigned { .. } => "purchase_order.number_assigned",
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Sends an event, logging instead of failing when the channel is closed.
    pub async fn send_or_log(&self, event: Event) {
        let name = event.name();
        if let Err(e) = self.send(event).await {
            warn!(event = name, "{}", e);
        }
    }
}

/// Drains the channel, logging every event until all senders are dropped.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        metrics::counter!("procurement.events.processed", 1, "event" => event.name());
        match &event {
            Event::PurchaseOrderCreated {
                purchase_order_id,
                purchase_order_number,
            } => info!(
                %purchase_order_id,
                purchase_order_number = purchase_order_number.as_deref().unwrap_or("-"),
                "Purchase order created"
            ),
            Event::PurchaseOrderAmended {
                purchase_order_id,
                item_count,
            } => info!(%purchase_order_id, item_count, "Purchase order amended"),
            Event::PurchaseOrderStatusChanged {
                purchase_order_id,
                from_status,
                to_status,
            } => info!(
                %purchase_order_id,
                from_status = from_status.as_deref().unwrap_or("-"),
                to_status = %to_status,
                "Purchase order status changed"
            ),
            Event::PurchaseOrderDeleted(purchase_order_id) => {
                info!(%purchase_order_id, "Purchase order deleted")
            }
            Event::PurchaseOrderNumberAssigned {
                purchase_order_id,
                purchase_order_number,
            } => info!(
                %purchase_order_id,
                %purchase_order_number,
                "Purchase order number assigned"
            ),
        }
    }

    info!("Event processing loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_reach_the_receiver() {
        let (tx, mut rx) = mpsc::channel(4);
        let sender = EventSender::new(tx);
        let id = Uuid::new_v4();

        sender.send(Event::PurchaseOrderDeleted(id)).await.unwrap();

        assert_eq!(rx.recv().await, Some(Event::PurchaseOrderDeleted(id)));
    }

    #[tokio::test]
    async fn closed_channel_is_only_logged() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let sender = EventSender::new(tx);

        assert!(sender.send(Event::PurchaseOrderDeleted(Uuid::nil())).await.is_err());
        sender
            .send_or_log(Event::PurchaseOrderDeleted(Uuid::nil()))
            .await;
    }
}
