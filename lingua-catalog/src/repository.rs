use async_trait::async_trait;

use crate::offering::{Course, Tutor};

/// Read access to the course and tutor catalog
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_courses(&self) -> Result<Vec<Course>, Box<dyn std::error::Error + Send + Sync>>;

    async fn get_course(
        &self,
        id: u64,
    ) -> Result<Option<Course>, Box<dyn std::error::Error + Send + Sync>>;

    async fn list_tutors(&self) -> Result<Vec<Tutor>, Box<dyn std::error::Error + Send + Sync>>;

    async fn get_tutor(
        &self,
        id: u64,
    ) -> Result<Option<Tutor>, Box<dyn std::error::Error + Send + Sync>>;
}
