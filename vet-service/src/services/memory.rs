use crate::models::{Vet, VetPayload};
use crate::services::VetStore;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use tokio::sync::RwLock;

/// Process-local store for running without a database.
///
/// Records keep insertion order. Ids have the same shape as MongoDB ids.
#[derive(Default)]
pub struct InMemoryVetStore {
    vets: RwLock<Vec<Vet>>,
}

impl InMemoryVetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VetStore for InMemoryVetStore {
    async fn list(&self) -> Result<Vec<Vet>, AppError> {
        Ok(self.vets.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Vet>, AppError> {
        // Same lookup rule as MongoDB: an id that is not an ObjectId fails to cast.
        ObjectId::parse_str(id).map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!(
                "Cast to ObjectId failed for value \"{}\": {}",
                id,
                e
            ))
        })?;

        let vets = self.vets.read().await;
        Ok(vets.iter().find(|vet| vet.id == id).cloned())
    }

    async fn insert(&self, payload: VetPayload) -> Result<Vet, AppError> {
        let vet = Vet::new(ObjectId::new().to_hex(), payload);
        self.vets.write().await.push(vet.clone());
        tracing::debug!(vet_id = %vet.id, "Inserted vet");
        Ok(vet)
    }

    async fn update(&self, id: &str, payload: VetPayload) -> Result<Option<Vet>, AppError> {
        let mut vets = self.vets.write().await;
        Ok(vets.iter_mut().find(|vet| vet.id == id).map(|vet| {
            vet.apply(payload);
            vet.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let mut vets = self.vets.write().await;
        let before = vets.len();
        vets.retain(|vet| vet.id != id);
        Ok(vets.len() < before)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
