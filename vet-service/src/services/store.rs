use crate::models::{Vet, VetPayload};
use async_trait::async_trait;
use service_core::error::AppError;

/// Persistence operations behind the `/vets` endpoints.
///
/// Identifiers are strings in the backing store's id format. A lookup with an
/// id the store cannot cast is an error; updates and deletes treat it as an
/// id with no record behind it.
#[async_trait]
pub trait VetStore: Send + Sync {
    /// All records in store order.
    async fn list(&self) -> Result<Vec<Vet>, AppError>;

    /// Fails when `id` is not in the store's id format.
    async fn find_by_id(&self, id: &str) -> Result<Option<Vet>, AppError>;

    /// Stores a new record under a freshly assigned id.
    async fn insert(&self, payload: VetPayload) -> Result<Vet, AppError>;

    /// Overwrites the fields present in `payload` and returns the record as
    /// it is after the update, or `None` when no record has this id.
    async fn update(&self, id: &str, payload: VetPayload) -> Result<Option<Vet>, AppError>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: &str) -> Result<bool, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
