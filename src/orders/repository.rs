use super::domain::{OrderId, OrderRecord};

/// Storage abstraction so the order service can be exercised in isolation.
/// Durability and write ordering are the store's concern; concurrent editors
/// resolve last-write-wins here, not in the domain logic.
pub trait OrderRepository: Send + Sync {
    fn insert(&self, record: OrderRecord) -> Result<OrderRecord, RepositoryError>;
    fn update(&self, record: OrderRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &OrderId) -> Result<Option<OrderRecord>, RepositoryError>;
    fn fetch_by_share_key(&self, key: &str) -> Result<Option<OrderRecord>, RepositoryError>;
    fn open_orders(&self, limit: usize) -> Result<Vec<OrderRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
