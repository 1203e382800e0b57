use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use lingua_catalog::CatalogRepository;
use lingua_order::{OrderLimits, OrderRepository, OrderService};

/// Source of "today" for the automatic order options
#[derive(Debug, Clone, Copy)]
pub enum Clock {
    System,
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Utc::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogRepository>,
    pub orders: Arc<OrderService>,
    pub clock: Clock,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        order_repo: Arc<dyn OrderRepository>,
        limits: OrderLimits,
        clock: Clock,
    ) -> Self {
        let orders = OrderService::new(catalog.clone(), order_repo, limits);
        Self {
            catalog,
            orders: Arc::new(orders),
            clock,
        }
    }
}
