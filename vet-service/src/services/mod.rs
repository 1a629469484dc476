pub mod database;
pub mod memory;
pub mod store;

pub use database::MongoVetStore;
pub use memory::InMemoryVetStore;
pub use store::VetStore;
