use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use lingua_catalog::{pricing, CatalogRepository, PricingRequest, ServiceOffering};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::models::{Order, OrderDraft, OrderQuote, OrderTarget, OrderUpdate};
use crate::options::with_automatic_options;
use crate::repository::OrderRepository;
use crate::schedule::{self, BookableDates};
use crate::validation::{self, OrderLimits, ValidationError};

/// Prices, creates and edits orders on behalf of a student account
pub struct OrderService {
    catalog: Arc<dyn CatalogRepository>,
    orders: Arc<dyn OrderRepository>,
    limits: OrderLimits,
    // Serializes the count-then-insert sequence of order creation
    create_guard: Mutex<()>,
}

impl OrderService {
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        orders: Arc<dyn OrderRepository>,
        limits: OrderLimits,
    ) -> Self {
        Self {
            catalog,
            orders,
            limits,
            create_guard: Mutex::new(()),
        }
    }

    pub fn limits(&self) -> &OrderLimits {
        &self.limits
    }

    /// Validate and price a draft without saving it.
    ///
    /// The automatic options (early registration, group enrollment,
    /// intensive course) are derived here; whatever the draft says about
    /// them is ignored.
    pub async fn quote(&self, draft: &OrderDraft, today: NaiveDate) -> Result<OrderQuote, OrderError> {
        let valid = validation::validate_draft(draft, &self.limits)?;
        let (offering, bookable) = self.resolve_offering(valid.target, today).await?;
        validation::check_start_date(valid.date_start, &bookable, today)?;
        let duration = offering
            .course_duration_hours()
            .or(valid.duration)
            .unwrap_or_default();

        let options = with_automatic_options(
            valid.options,
            &offering,
            valid.date_start,
            valid.persons,
            duration,
            today,
        );
        let request = PricingRequest::new(
            offering,
            valid.date_start,
            valid.time_start.clone(),
            valid.persons,
            duration,
            options,
        );
        let price = pricing::quote(&request);

        debug!(
            target_kind = ?valid.target,
            base_rate = price.hourly_rate,
            duration = price.duration_hours,
            multiplier = price.date_multiplier,
            surcharge = price.time_surcharge,
            total = price.total,
            "Order priced"
        );

        Ok(OrderQuote {
            target: valid.target,
            date_start: valid.date_start,
            end_date: schedule::end_date(&offering, valid.date_start),
            time_start: valid.time_start,
            persons: valid.persons,
            options,
            price,
        })
    }

    /// Price and persist a new order. The price is always recomputed here.
    pub async fn create_order(
        &self,
        student_id: &str,
        draft: &OrderDraft,
        today: NaiveDate,
    ) -> Result<Order, OrderError> {
        let _guard = self.create_guard.lock().await;

        let existing = self.orders.list_orders(student_id).await.map_err(storage)?;
        if existing.len() >= self.limits.max_orders_per_account {
            warn!(student_id, count = existing.len(), "Order limit reached");
            return Err(OrderError::LimitReached(self.limits.max_orders_per_account));
        }

        let quote = self.quote(draft, today).await?;
        let order = self
            .orders
            .create_order(&Order::from_quote(student_id, &quote))
            .await
            .map_err(storage)?;

        info!(order_id = order.id, student_id, price = order.price, "Order created");
        Ok(order)
    }

    /// Change date, time, persons and the student-selected options.
    ///
    /// Automatic options and the tutoring duration stay as they were when
    /// the order was created; the price is recomputed from the catalog.
    pub async fn update_order(
        &self,
        student_id: &str,
        order_id: u64,
        update: &OrderUpdate,
        today: NaiveDate,
    ) -> Result<Order, OrderError> {
        let mut order = self.get_order(student_id, order_id).await?;

        let date_start = validation::parse_date(&update.date_start)?;
        let time_start = validation::parse_time(&update.time_start)?;
        validation::check_start_time(&time_start)?;
        validation::check_persons(update.persons, &self.limits)?;

        let target = order.target().ok_or(OrderError::MissingTarget(order.id))?;
        let (offering, bookable) = self.resolve_offering(target, today).await?;
        validation::check_start_date(date_start, &bookable, today)?;
        let duration = offering.course_duration_hours().unwrap_or(order.duration);
        let options = update.apply_to(order.options);

        let request = PricingRequest::new(
            offering,
            date_start,
            time_start.clone(),
            update.persons,
            duration,
            options,
        );
        let price = pricing::quote(&request);

        order.date_start = date_start;
        order.time_start = time_start;
        order.persons = update.persons;
        order.duration = duration;
        order.options = options;
        order.price = price.total;
        order.updated_at = Utc::now();

        // Deleted between the read above and this write
        if !self.orders.update_order(&order).await.map_err(storage)? {
            return Err(OrderError::NotFound(order_id));
        }

        info!(order_id, student_id, price = order.price, "Order updated");
        Ok(order)
    }

    pub async fn delete_order(&self, student_id: &str, order_id: u64) -> Result<(), OrderError> {
        self.get_order(student_id, order_id).await?;

        if !self.orders.delete_order(order_id).await.map_err(storage)? {
            return Err(OrderError::NotFound(order_id));
        }

        info!(order_id, student_id, "Order deleted");
        Ok(())
    }

    /// Orders of other accounts are reported as missing
    pub async fn get_order(&self, student_id: &str, order_id: u64) -> Result<Order, OrderError> {
        self.orders
            .get_order(order_id)
            .await
            .map_err(storage)?
            .filter(|order| order.belongs_to(student_id))
            .ok_or(OrderError::NotFound(order_id))
    }

    pub async fn list_orders(&self, student_id: &str) -> Result<Vec<Order>, OrderError> {
        self.orders.list_orders(student_id).await.map_err(storage)
    }

    async fn resolve_offering(
        &self,
        target: OrderTarget,
        today: NaiveDate,
    ) -> Result<(ServiceOffering, BookableDates), OrderError> {
        match target {
            OrderTarget::Course(id) => self
                .catalog
                .get_course(id)
                .await
                .map_err(storage)?
                .map(|course| {
                    let dates = BookableDates::for_course(&course.start_dates, today);
                    (course.offering(), dates)
                })
                .ok_or(OrderError::CourseNotFound(id)),
            OrderTarget::Tutor(id) => self
                .catalog
                .get_tutor(id)
                .await
                .map_err(storage)?
                .map(|tutor| (tutor.offering(), BookableDates::for_tutor(today)))
                .ok_or(OrderError::TutorNotFound(id)),
        }
    }
}

fn storage(err: Box<dyn std::error::Error + Send + Sync>) -> OrderError {
    OrderError::Storage(err.to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(u64),

    #[error("Course not found: {0}")]
    CourseNotFound(u64),

    #[error("Tutor not found: {0}")]
    TutorNotFound(u64),

    #[error("Order {0} references neither a course nor a tutor")]
    MissingTarget(u64),

    #[error("Order limit reached: at most {0} orders per account")]
    LimitReached(usize),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(String),
}
