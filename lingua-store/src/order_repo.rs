use std::collections::BTreeMap;

use async_trait::async_trait;
use lingua_order::{Order, OrderRepository};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct OrderTable {
    next_id: u64,
    rows: BTreeMap<u64, Order>,
}

/// Order storage kept in process memory; ids start at 1
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    table: RwLock<OrderTable>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create_order(
        &self,
        order: &Order,
    ) -> Result<Order, Box<dyn std::error::Error + Send + Sync>> {
        let mut table = self.table.write().await;
        table.next_id += 1;

        let mut stored = order.clone();
        stored.id = table.next_id;
        table.rows.insert(stored.id, stored.clone());

        debug!(order_id = stored.id, "Order row inserted");
        Ok(stored)
    }

    async fn get_order(
        &self,
        id: u64,
    ) -> Result<Option<Order>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn update_order(
        &self,
        order: &Order,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&order.id) {
            Some(row) => {
                *row = order.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_order(
        &self,
        id: u64,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn list_orders(
        &self,
        student_id: &str,
    ) -> Result<Vec<Order>, Box<dyn std::error::Error + Send + Sync>> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|order| order.belongs_to(student_id))
            .cloned()
            .collect())
    }
}
