//! Concierge messaging between clients and the atelier team, plus the
//! outbound notification seam (e-mail or SMS adapters live behind it).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::orders::domain::OrderId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageSender {
    Client,
    Atelier,
}

impl MessageSender {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Atelier => "atelier",
        }
    }
}

/// One entry in an order's concierge thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConciergeMessage {
    pub sender: MessageSender,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

/// Trait describing outbound notification hooks.
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notification: ConciergeNotification) -> Result<(), NotificationError>;
}

/// Templated payload so routes and tests can assert integration boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConciergeNotification {
    pub template: String,
    pub order_id: OrderId,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
