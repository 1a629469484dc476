use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A veterinarian record as returned by the HTTP API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Vet {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
}

/// Request body for create and update. Absent fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VetPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialties: Option<Vec<String>>,
}

impl Vet {
    pub fn new(id: String, payload: VetPayload) -> Self {
        Self {
            id,
            first_name: payload.first_name,
            last_name: payload.last_name,
            specialties: payload.specialties.unwrap_or_default(),
        }
    }

    /// Overwrites the fields present in `payload`.
    pub fn apply(&mut self, payload: VetPayload) {
        if let Some(first_name) = payload.first_name {
            self.first_name = Some(first_name);
        }
        if let Some(last_name) = payload.last_name {
            self.last_name = Some(last_name);
        }
        if let Some(specialties) = payload.specialties {
            self.specialties = specialties;
        }
    }
}

impl VetPayload {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.specialties.is_none()
    }
}

/// Layout of a record in the `vets` collection.
///
/// Field names match documents written by other clients of the same
/// collection; unknown fields such as a version key are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VetDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
}

impl VetDocument {
    pub fn new(payload: VetPayload) -> Self {
        Self {
            id: ObjectId::new(),
            first_name: payload.first_name,
            last_name: payload.last_name,
            specialties: payload.specialties.unwrap_or_default(),
        }
    }
}

impl From<VetDocument> for Vet {
    fn from(doc: VetDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            first_name: doc.first_name,
            last_name: doc.last_name,
            specialties: doc.specialties,
        }
    }
}
