//! HTTP handlers for vet-service.

pub mod health;
pub mod vets;

pub use health::{health_check, readiness_check};
pub use vets::{create_vet, delete_vet, get_vet, list_vets, update_vet};
