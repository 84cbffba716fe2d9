use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::fitting::domain::{BodyProfile, BraCup, MeasurementSet};
use crate::orders::domain::{GownSelection, OrderId, OrderRecord, OrderRequest, Silhouette};
use crate::orders::memory::{MemoryNotifications, MemoryOrderRepository};
use crate::orders::repository::{OrderRepository, RepositoryError};
use crate::orders::service::OrderService;

pub(super) fn gown() -> GownSelection {
    GownSelection {
        silhouette: Silhouette::Mermaid,
        fabric: "Silk Mikado".to_string(),
        color: "Ivory".to_string(),
        neckline: Some("Bateau".to_string()),
        sleeves: None,
        embellishments: vec!["Hand-beaded bodice".to_string()],
    }
}

pub(super) fn order_request() -> OrderRequest {
    OrderRequest {
        client_name: "Elena Moreau".to_string(),
        contact_email: "elena@example.com".to_string(),
        gown: gown(),
        measurements: MeasurementSet {
            bust: Some(92.0),
            underbust: Some(74.0),
            waist: Some(70.0),
            hips: Some(98.0),
            hollow_to_floor: Some(148.0),
            height: Some(168.0),
            preferred_heel: Some(8.0),
        },
        body: BodyProfile {
            height: Some(168.0),
            weight: Some(58.0),
            bra_band: Some(32),
            bra_cup: Some(BraCup::C),
        },
        requested_delivery: None,
    }
}

pub(super) fn sparse_order_request() -> OrderRequest {
    let mut request = order_request();
    request.measurements = MeasurementSet {
        bust: Some(92.0),
        waist: Some(70.0),
        ..MeasurementSet::default()
    };
    request.body = BodyProfile::default();
    request
}

pub(super) fn build_service() -> (
    OrderService<MemoryOrderRepository, MemoryNotifications>,
    Arc<MemoryOrderRepository>,
    Arc<MemoryNotifications>,
) {
    let repository = Arc::new(MemoryOrderRepository::default());
    let notifications = Arc::new(MemoryNotifications::default());
    let service = OrderService::new(repository.clone(), notifications.clone());
    (service, repository, notifications)
}

pub(super) struct UnavailableRepository;

impl OrderRepository for UnavailableRepository {
    fn insert(&self, _record: OrderRecord) -> Result<OrderRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: OrderRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &OrderId) -> Result<Option<OrderRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_by_share_key(&self, _key: &str) -> Result<Option<OrderRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn open_orders(&self, _limit: usize) -> Result<Vec<OrderRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
