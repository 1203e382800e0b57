use async_trait::async_trait;
use lingua_catalog::{CatalogRepository, Course, Tutor};
use serde::Deserialize;
use tracing::info;

use crate::StoreError;

#[derive(Debug, Default, Deserialize)]
struct CatalogSeed {
    #[serde(default)]
    courses: Vec<Course>,
    #[serde(default)]
    tutors: Vec<Tutor>,
}

/// Read-only catalog held in memory, loaded once at startup
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    courses: Vec<Course>,
    tutors: Vec<Tutor>,
}

impl InMemoryCatalog {
    pub fn new(courses: Vec<Course>, tutors: Vec<Tutor>) -> Self {
        Self { courses, tutors }
    }

    pub fn from_json(data: &str) -> Result<Self, StoreError> {
        let seed: CatalogSeed = serde_json::from_str(data)?;
        Ok(Self::new(seed.courses, seed.tutors))
    }

    pub async fn load(path: &str) -> Result<Self, StoreError> {
        let data = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| StoreError::Io {
                path: path.to_string(),
                source,
            })?;

        let catalog = Self::from_json(&data)?;
        info!(
            path,
            courses = catalog.courses.len(),
            tutors = catalog.tutors.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn list_courses(&self) -> Result<Vec<Course>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.courses.clone())
    }

    async fn get_course(
        &self,
        id: u64,
    ) -> Result<Option<Course>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.courses.iter().find(|course| course.id == id).cloned())
    }

    async fn list_tutors(&self) -> Result<Vec<Tutor>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.tutors.clone())
    }

    async fn get_tutor(
        &self,
        id: u64,
    ) -> Result<Option<Tutor>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.tutors.iter().find(|tutor| tutor.id == id).cloned())
    }
}
