use async_trait::async_trait;

use crate::models::Order;

/// Repository trait for order persistence
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Stores a new order and returns it with its assigned id
    async fn create_order(
        &self,
        order: &Order,
    ) -> Result<Order, Box<dyn std::error::Error + Send + Sync>>;

    async fn get_order(
        &self,
        id: u64,
    ) -> Result<Option<Order>, Box<dyn std::error::Error + Send + Sync>>;

    /// Returns false when no order had that id
    async fn update_order(
        &self,
        order: &Order,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;

    /// Returns false when no order had that id
    async fn delete_order(
        &self,
        id: u64,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_orders(
        &self,
        student_id: &str,
    ) -> Result<Vec<Order>, Box<dyn std::error::Error + Send + Sync>>;
}
