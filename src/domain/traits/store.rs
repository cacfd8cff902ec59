use async_trait::async_trait;
use crate::application::errors::StorageError;
use crate::domain::entities::Order;

/// Remote order store - accepts a single insert per checkout
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert_order(&self, order: &Order) -> Result<(), StorageError>;
}
