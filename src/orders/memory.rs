use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::concierge::{ConciergeNotification, NotificationError, NotificationPublisher};

use super::domain::{OrderId, OrderRecord};
use super::repository::{OrderRepository, RepositoryError};

/// Process-local order store backing the default server wiring and tests.
#[derive(Default, Clone)]
pub struct MemoryOrderRepository {
    records: Arc<Mutex<BTreeMap<String, OrderRecord>>>,
}

impl MemoryOrderRepository {
    fn guard(&self) -> Result<MutexGuard<'_, BTreeMap<String, OrderRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("order store poisoned".to_string()))
    }
}

impl OrderRepository for MemoryOrderRepository {
    fn insert(&self, record: OrderRecord) -> Result<OrderRecord, RepositoryError> {
        let mut guard = self.guard()?;
        if guard.contains_key(&record.id.0) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.0.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: OrderRecord) -> Result<(), RepositoryError> {
        self.guard()?.insert(record.id.0.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &OrderId) -> Result<Option<OrderRecord>, RepositoryError> {
        Ok(self.guard()?.get(&id.0).cloned())
    }

    fn fetch_by_share_key(&self, key: &str) -> Result<Option<OrderRecord>, RepositoryError> {
        Ok(self
            .guard()?
            .values()
            .find(|record| {
                record
                    .share_key
                    .as_ref()
                    .map(|share| share.0 == key)
                    .unwrap_or(false)
            })
            .cloned())
    }

    fn open_orders(&self, limit: usize) -> Result<Vec<OrderRecord>, RepositoryError> {
        Ok(self
            .guard()?
            .values()
            .filter(|record| !record.timeline.is_complete())
            .take(limit)
            .cloned()
            .collect())
    }
}

/// Captures outbound notifications instead of dispatching them.
#[derive(Default, Clone)]
pub struct MemoryNotifications {
    events: Arc<Mutex<Vec<ConciergeNotification>>>,
}

impl MemoryNotifications {
    pub fn events(&self) -> Vec<ConciergeNotification> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl NotificationPublisher for MemoryNotifications {
    fn publish(&self, notification: ConciergeNotification) -> Result<(), NotificationError> {
        self.events
            .lock()
            .map_err(|_| NotificationError::Transport("notification log poisoned".to_string()))?
            .push(notification);
        Ok(())
    }
}
