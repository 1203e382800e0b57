use chrono::{DateTime, NaiveDate, Utc};
use lingua_catalog::{OrderOptions, PriceQuote};
use serde::{Deserialize, Serialize};

/// What an order books: a course or a tutor, never both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum OrderTarget {
    Course(u64),
    Tutor(u64),
}

/// Order as submitted by a student, before validation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderDraft {
    #[serde(default)]
    pub course_id: Option<u64>,
    #[serde(default)]
    pub tutor_id: Option<u64>,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub date_start: String,
    /// `HH:MM`
    #[serde(default)]
    pub time_start: String,
    #[serde(default)]
    pub persons: u32,
    /// Hours of tutoring. Ignored for courses, whose duration comes from the catalog.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(flatten)]
    pub options: OrderOptions,
}

/// Fields a student may change on an existing order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    #[serde(default)]
    pub date_start: String,
    #[serde(default)]
    pub time_start: String,
    #[serde(default)]
    pub persons: u32,
    #[serde(default)]
    pub supplementary: bool,
    #[serde(default)]
    pub personalized: bool,
    #[serde(default)]
    pub excursions: bool,
    #[serde(default)]
    pub assessment: bool,
    #[serde(default)]
    pub interactive: bool,
}

impl OrderUpdate {
    /// Replaces the student-selected flags, keeping the automatic ones
    pub fn apply_to(&self, options: OrderOptions) -> OrderOptions {
        OrderOptions {
            supplementary: self.supplementary,
            personalized: self.personalized,
            excursions: self.excursions,
            assessment: self.assessment,
            interactive: self.interactive,
            ..options
        }
    }
}

/// A priced, not yet persisted order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderQuote {
    pub target: OrderTarget,
    pub date_start: NaiveDate,
    /// Last day of a course; tutoring has no fixed end
    pub end_date: Option<NaiveDate>,
    pub time_start: String,
    pub persons: u32,
    pub options: OrderOptions,
    pub price: PriceQuote,
}

/// Persisted order record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: u64,
    pub student_id: String,
    pub course_id: Option<u64>,
    pub tutor_id: Option<u64>,
    pub date_start: NaiveDate,
    pub time_start: String,
    /// Total hours booked
    pub duration: u32,
    pub persons: u32,
    pub price: u64,
    #[serde(flatten)]
    pub options: OrderOptions,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Build an unsaved order; the repository assigns the id
    pub fn from_quote(student_id: impl Into<String>, quote: &OrderQuote) -> Self {
        let (course_id, tutor_id) = match quote.target {
            OrderTarget::Course(id) => (Some(id), None),
            OrderTarget::Tutor(id) => (None, Some(id)),
        };
        let now = Utc::now();

        Self {
            id: 0,
            student_id: student_id.into(),
            course_id,
            tutor_id,
            date_start: quote.date_start,
            time_start: quote.time_start.clone(),
            duration: quote.price.duration_hours,
            persons: quote.persons,
            price: quote.price.total,
            options: quote.options,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn target(&self) -> Option<OrderTarget> {
        match (self.course_id, self.tutor_id) {
            (Some(id), None) => Some(OrderTarget::Course(id)),
            (None, Some(id)) => Some(OrderTarget::Tutor(id)),
            _ => None,
        }
    }

    pub fn belongs_to(&self, student_id: &str) -> bool {
        self.student_id == student_id
    }
}
