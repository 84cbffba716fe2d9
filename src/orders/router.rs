use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::concierge::{MessageSender, NotificationPublisher};

use super::domain::{OrderId, OrderRecord, OrderRequest, ProductionUpdate, ProgressUpdateRequest};
use super::repository::{OrderRepository, RepositoryError};
use super::service::{OrderService, OrderServiceError};

#[derive(Debug, Deserialize)]
pub(crate) struct ToggleStepRequest {
    label: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OpenOrdersQuery {
    #[serde(default = "default_open_orders_limit")]
    limit: usize,
}

fn default_open_orders_limit() -> usize {
    50
}

#[derive(Debug, Deserialize)]
pub(crate) struct PostMessageRequest {
    sender: MessageSender,
    body: String,
}

/// Router builder exposing order intake, production tracking, progress
/// updates, the public share view, and the concierge thread.
pub fn order_router<R, N>(service: Arc<OrderService<R, N>>) -> Router
where
    R: OrderRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route(
            "/api/v1/orders",
            post(place_handler::<R, N>).get(open_orders_handler::<R, N>),
        )
        .route("/api/v1/orders/:order_id", get(status_handler::<R, N>))
        .route(
            "/api/v1/orders/:order_id/timeline/toggle",
            post(toggle_step_handler::<R, N>),
        )
        .route(
            "/api/v1/orders/:order_id/production",
            put(update_production_handler::<R, N>),
        )
        .route(
            "/api/v1/orders/:order_id/updates",
            post(progress_update_handler::<R, N>),
        )
        .route(
            "/api/v1/orders/:order_id/messages",
            post(post_message_handler::<R, N>).get(messages_handler::<R, N>),
        )
        .route("/api/v1/progress/:share_key", get(shared_view_handler::<R, N>))
        .with_state(service)
}

pub(crate) async fn place_handler<R, N>(
    State(service): State<Arc<OrderService<R, N>>>,
    axum::Json(request): axum::Json<OrderRequest>,
) -> Response
where
    R: OrderRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.place(request, Utc::now()) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn open_orders_handler<R, N>(
    State(service): State<Arc<OrderService<R, N>>>,
    Query(query): Query<OpenOrdersQuery>,
) -> Response
where
    R: OrderRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.open_orders(query.limit) {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(OrderRecord::status_view).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R, N>(
    State(service): State<Arc<OrderService<R, N>>>,
    Path(order_id): Path<String>,
) -> Response
where
    R: OrderRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.get(&OrderId(order_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn toggle_step_handler<R, N>(
    State(service): State<Arc<OrderService<R, N>>>,
    Path(order_id): Path<String>,
    axum::Json(request): axum::Json<ToggleStepRequest>,
) -> Response
where
    R: OrderRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.toggle_step(&OrderId(order_id), &request.label, Utc::now()) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_production_handler<R, N>(
    State(service): State<Arc<OrderService<R, N>>>,
    Path(order_id): Path<String>,
    axum::Json(update): axum::Json<ProductionUpdate>,
) -> Response
where
    R: OrderRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.update_production(&OrderId(order_id), update) {
        Ok(record) => (StatusCode::OK, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn progress_update_handler<R, N>(
    State(service): State<Arc<OrderService<R, N>>>,
    Path(order_id): Path<String>,
    axum::Json(request): axum::Json<ProgressUpdateRequest>,
) -> Response
where
    R: OrderRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.record_progress_update(&OrderId(order_id), request, Utc::now()) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.status_view())).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn post_message_handler<R, N>(
    State(service): State<Arc<OrderService<R, N>>>,
    Path(order_id): Path<String>,
    axum::Json(request): axum::Json<PostMessageRequest>,
) -> Response
where
    R: OrderRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.post_message(&OrderId(order_id), request.sender, request.body, Utc::now()) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.messages)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn messages_handler<R, N>(
    State(service): State<Arc<OrderService<R, N>>>,
    Path(order_id): Path<String>,
) -> Response
where
    R: OrderRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.messages(&OrderId(order_id)) {
        Ok(messages) => (StatusCode::OK, axum::Json(messages)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn shared_view_handler<R, N>(
    State(service): State<Arc<OrderService<R, N>>>,
    Path(share_key): Path<String>,
) -> Response
where
    R: OrderRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.shared_view(&share_key) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: OrderServiceError) -> Response {
    let status = match &error {
        OrderServiceError::InvalidMeasurements { .. } | OrderServiceError::EmptyMessage => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        OrderServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        OrderServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        OrderServiceError::Repository(RepositoryError::Unavailable(_))
        | OrderServiceError::Notification(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
