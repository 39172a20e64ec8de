//! Order collection operations.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Order, OrderId};

/// Repository trait for the order collection.
///
/// Orders are write-once. The read methods exist for tests and operators;
/// no HTTP endpoint reads orders back.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert an order and return its store-assigned id. Any `id` already set
    /// on `order` is ignored.
    async fn insert_order(&self, order: &Order) -> RepositoryResult<OrderId>;

    /// Retrieve a stored order.
    async fn get_order(&self, id: OrderId) -> RepositoryResult<Order>;

    /// Number of stored orders.
    async fn count_orders(&self) -> RepositoryResult<u64>;
}
