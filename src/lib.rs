pub mod config;
pub mod error;
pub mod fetch;
pub mod ingest;
pub mod report;

pub use config::{CredentialConfig, CredentialSource};
pub use error::IngestError;
pub use ingest::{fetch_and_normalize, AliasTables, Ingestor, PerformanceRecord};
