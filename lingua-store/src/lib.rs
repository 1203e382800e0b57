pub mod app_config;
pub mod catalog_repo;
pub mod order_repo;

pub use catalog_repo::InMemoryCatalog;
pub use order_repo::InMemoryOrderRepository;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog data: {0}")]
    InvalidData(#[from] serde_json::Error),
}
