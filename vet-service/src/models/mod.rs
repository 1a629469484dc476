pub mod vet;

pub use vet::{Vet, VetDocument, VetPayload};
