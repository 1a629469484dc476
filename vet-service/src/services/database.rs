use crate::config::DEFAULT_DATABASE;
use crate::models::{Vet, VetDocument, VetPayload};
use crate::services::VetStore;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Client as MongoClient, Collection, Database,
};
use service_core::error::AppError;

pub const VETS_COLLECTION: &str = "vets";

#[derive(Clone)]
pub struct MongoVetStore {
    client: MongoClient,
    db: Database,
}

impl MongoVetStore {
    /// Builds the client. The driver connects lazily, so an unreachable
    /// server only shows up on the first operation.
    pub async fn connect(uri: &str, database: Option<&str>) -> Result<Self, AppError> {
        tracing::info!("Configuring MongoDB client");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Invalid MongoDB connection string: {}", e);
            AppError::from(e)
        })?;

        let db = match database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };
        tracing::info!(database = %db.name(), "Using MongoDB database");

        Ok(Self { client, db })
    }

    pub fn vets(&self) -> Collection<VetDocument> {
        self.db.collection(VETS_COLLECTION)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }
}

/// Lookup form of an id: a string that is not an ObjectId is a cast failure,
/// the same as the driver rejecting the query.
fn cast_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|e| {
        tracing::error!(vet_id = %id, "Cast to ObjectId failed: {}", e);
        AppError::DatabaseError(anyhow::anyhow!(
            "Cast to ObjectId failed for value \"{}\": {}",
            id,
            e
        ))
    })
}

/// Write form of an id: a string that is not an ObjectId matches no record.
fn parse_id(id: &str) -> Option<ObjectId> {
    match ObjectId::parse_str(id) {
        Ok(oid) => Some(oid),
        Err(_) => {
            tracing::debug!(vet_id = %id, "Identifier is not an ObjectId");
            None
        }
    }
}

#[async_trait]
impl VetStore for MongoVetStore {
    async fn list(&self) -> Result<Vec<Vet>, AppError> {
        let cursor = self.vets().find(None, None).await.map_err(|e| {
            tracing::error!("Failed to list vets: {}", e);
            AppError::from(e)
        })?;

        let documents: Vec<VetDocument> = cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect vets: {}", e);
            AppError::from(e)
        })?;

        tracing::debug!(count = documents.len(), "Listed vets");
        Ok(documents.into_iter().map(Vet::from).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Vet>, AppError> {
        let oid = cast_id(id)?;

        let document = self
            .vets()
            .find_one(doc! { "_id": oid }, None)
            .await
            .map_err(|e| {
                tracing::error!(vet_id = %id, "Failed to find vet: {}", e);
                AppError::from(e)
            })?;

        Ok(document.map(Vet::from))
    }

    async fn insert(&self, payload: VetPayload) -> Result<Vet, AppError> {
        let document = VetDocument::new(payload);

        self.vets().insert_one(&document, None).await.map_err(|e| {
            tracing::error!("Failed to insert vet: {}", e);
            AppError::from(e)
        })?;

        tracing::debug!(vet_id = %document.id, "Inserted vet");
        Ok(Vet::from(document))
    }

    async fn update(&self, id: &str, payload: VetPayload) -> Result<Option<Vet>, AppError> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };

        // `$set` must not be empty; nothing to change means a plain read.
        if payload.is_empty() {
            let document = self
                .vets()
                .find_one(doc! { "_id": oid }, None)
                .await
                .map_err(|e| {
                    tracing::error!(vet_id = %id, "Failed to find vet: {}", e);
                    AppError::from(e)
                })?;
            return Ok(document.map(Vet::from));
        }

        let changes = mongodb::bson::to_document(&payload).map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("Failed to encode vet update: {}", e))
        })?;

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let document = self
            .vets()
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": changes }, options)
            .await
            .map_err(|e| {
                tracing::error!(vet_id = %id, "Failed to update vet: {}", e);
                AppError::from(e)
            })?;

        Ok(document.map(Vet::from))
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let Some(oid) = parse_id(id) else {
            return Ok(false);
        };

        let result = self
            .vets()
            .delete_one(doc! { "_id": oid }, None)
            .await
            .map_err(|e| {
                tracing::error!(vet_id = %id, "Failed to delete vet: {}", e);
                AppError::from(e)
            })?;

        Ok(result.deleted_count > 0)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }
}
