//! Order intake from the dress configurator, production tracking, and the
//! shareable progress view.

pub mod domain;
pub mod memory;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    GownSelection, OrderId, OrderRecord, OrderRequest, OrderStatusView, ProductionUpdate,
    ProgressUpdateRequest, SharedProgressView, Silhouette,
};
pub use memory::{MemoryNotifications, MemoryOrderRepository};
pub use repository::{OrderRepository, RepositoryError};
pub use router::order_router;
pub use service::{OrderService, OrderServiceError};
