use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::concierge::{
    ConciergeMessage, ConciergeNotification, MessageSender, NotificationError,
    NotificationPublisher,
};
use crate::fitting::confidence::estimate;
use crate::fitting::validation::{summarize, MeasurementRules, ValidationIssue};
use crate::production::domain::OrderStatus;
use crate::production::progress::{ProgressUpdate, ShareKey};
use crate::production::timeline::ProductionTimeline;

use super::domain::{
    OrderId, OrderRecord, OrderRequest, ProductionUpdate, ProgressUpdateRequest, SharedProgressView,
};
use super::repository::{OrderRepository, RepositoryError};

/// Service composing the measurement rules, order repository, and outbound
/// notification hooks.
pub struct OrderService<R, N> {
    repository: Arc<R>,
    notifications: Arc<N>,
    rules: MeasurementRules,
}

static ORDER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_order_id() -> OrderId {
    let id = ORDER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    OrderId(format!("ord-{id:06}"))
}

impl<R, N> OrderService<R, N>
where
    R: OrderRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(repository: Arc<R>, notifications: Arc<N>) -> Self {
        Self {
            repository,
            notifications,
            rules: MeasurementRules::standard(),
        }
    }

    /// Place a new order from the configurator checkout.
    ///
    /// Out-of-range measurements are rejected; missing ones are not. The
    /// fit-confidence snapshot communicates incompleteness and the atelier
    /// takes the rest at the first fitting.
    pub fn place(
        &self,
        request: OrderRequest,
        now: DateTime<Utc>,
    ) -> Result<OrderRecord, OrderServiceError> {
        let issues = self.rules.range_issues(&request.measurements);
        if !issues.is_empty() {
            return Err(OrderServiceError::InvalidMeasurements { issues });
        }

        let fit = estimate(&request.measurements, &request.body);
        let timeline = ProductionTimeline::standard();
        let record = OrderRecord {
            id: next_order_id(),
            client_name: request.client_name,
            contact_email: request.contact_email,
            gown: request.gown,
            measurements: request.measurements,
            body: request.body,
            fit,
            status: OrderStatus::Received,
            stage: timeline.current_stage().to_string(),
            eta: request.requested_delivery,
            timeline,
            updates: Vec::new(),
            messages: Vec::new(),
            share_key: None,
            placed_at: now,
        };

        let stored = self.repository.insert(record)?;

        let mut details = BTreeMap::new();
        details.insert("client".to_string(), stored.client_name.clone());
        details.insert("silhouette".to_string(), stored.gown.silhouette.label().to_string());
        self.notifications.publish(ConciergeNotification {
            template: "order_received".to_string(),
            order_id: stored.id.clone(),
            details,
        })?;

        Ok(stored)
    }

    pub fn get(&self, id: &OrderId) -> Result<OrderRecord, OrderServiceError> {
        let record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Orders still in flight, for the atelier dashboard.
    pub fn open_orders(&self, limit: usize) -> Result<Vec<OrderRecord>, OrderServiceError> {
        Ok(self.repository.open_orders(limit)?)
    }

    /// Toggle one timeline step and persist the cascaded result.
    pub fn toggle_step(
        &self,
        id: &OrderId,
        step_label: &str,
        now: DateTime<Utc>,
    ) -> Result<OrderRecord, OrderServiceError> {
        let mut record = self.get(id)?;

        record.timeline = record.timeline.toggle_step(step_label, now);
        record.stage = record.timeline.current_stage().to_string();
        if record.status == OrderStatus::Received && record.timeline.completed_count() > 0 {
            record.status = OrderStatus::InProduction;
        }

        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Administrative overwrite of the production state.
    pub fn update_production(
        &self,
        id: &OrderId,
        update: ProductionUpdate,
    ) -> Result<OrderRecord, OrderServiceError> {
        let mut record = self.get(id)?;

        record.timeline = ProductionTimeline::from_steps(update.timeline);
        record.status = update.status;
        record.stage = update.stage;
        record.eta = update.eta;

        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Record a progress note; publishing provisions the share key on first
    /// use and notifies the client.
    pub fn record_progress_update(
        &self,
        id: &OrderId,
        request: ProgressUpdateRequest,
        now: DateTime<Utc>,
    ) -> Result<OrderRecord, OrderServiceError> {
        let mut record = self.get(id)?;

        let update = ProgressUpdate {
            title: request.title,
            message: request.message,
            step_label: request.step_label,
            published: request.publish,
            posted_at: now,
        };

        if update.published && record.share_key.is_none() {
            record.share_key = Some(ShareKey::generate());
        }
        record.updates.push(update.clone());

        self.repository.update(record.clone())?;

        if update.published {
            let mut details = BTreeMap::new();
            details.insert("title".to_string(), update.title.clone());
            if let Some(share_key) = &record.share_key {
                details.insert("share_key".to_string(), share_key.to_string());
            }
            self.notifications.publish(ConciergeNotification {
                template: "progress_published".to_string(),
                order_id: record.id.clone(),
                details,
            })?;
        }

        Ok(record)
    }

    /// Resolve the public progress page behind a share key.
    pub fn shared_view(&self, share_key: &str) -> Result<SharedProgressView, OrderServiceError> {
        let record = self
            .repository
            .fetch_by_share_key(share_key)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record.shared_view())
    }

    /// Append to the order's concierge thread. Client messages ping the
    /// atelier team.
    pub fn post_message(
        &self,
        id: &OrderId,
        sender: MessageSender,
        body: String,
        now: DateTime<Utc>,
    ) -> Result<OrderRecord, OrderServiceError> {
        let body = body.trim().to_string();
        if body.is_empty() {
            return Err(OrderServiceError::EmptyMessage);
        }

        let mut record = self.get(id)?;
        record.messages.push(ConciergeMessage {
            sender,
            body,
            sent_at: now,
        });
        self.repository.update(record.clone())?;

        if sender == MessageSender::Client {
            let mut details = BTreeMap::new();
            details.insert("client".to_string(), record.client_name.clone());
            self.notifications.publish(ConciergeNotification {
                template: "concierge_message".to_string(),
                order_id: record.id.clone(),
                details,
            })?;
        }

        Ok(record)
    }

    pub fn messages(&self, id: &OrderId) -> Result<Vec<ConciergeMessage>, OrderServiceError> {
        Ok(self.get(id)?.messages)
    }
}

/// Error raised by the order service.
#[derive(Debug, thiserror::Error)]
pub enum OrderServiceError {
    #[error("measurement validation failed: {}", summarize(.issues))]
    InvalidMeasurements { issues: Vec<ValidationIssue> },
    #[error("message body must not be empty")]
    EmptyMessage,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
}
