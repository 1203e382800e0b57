pub mod offering;
pub mod calendar;
pub mod pricing;
pub mod repository;

pub use offering::{Course, CourseFilter, ServiceOffering, Tutor, TutorFilter, DEFAULT_TUTOR_RATE};
pub use pricing::{compute_price, quote, Adjustment, AdjustmentKind, OrderOptions, PriceQuote, PricingRequest};
pub use repository::CatalogRepository;
