pub mod models;
pub mod validation;
pub mod options;
pub mod schedule;
pub mod repository;
pub mod manager;

pub use models::{Order, OrderDraft, OrderQuote, OrderTarget, OrderUpdate};
pub use validation::{OrderLimits, ValidOrder, ValidationError};
pub use repository::OrderRepository;
pub use manager::{OrderError, OrderService};
