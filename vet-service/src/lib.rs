//! vet-service: HTTP record management for veterinarians.
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
