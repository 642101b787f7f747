use crate::domain::errors::AggregatorError;

pub mod app;
pub mod sync;

/// The `Synchronizer` trait defines the reference-data synchronization loop.
///
/// Implementors repeatedly pull the upstream snapshot and forward its
/// records into the store until the shutdown signal fires.
#[async_trait::async_trait]
pub trait Synchronizer {
    async fn run(self) -> Result<(), AggregatorError>;
}
