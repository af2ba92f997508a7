//! # Storage Module
//!
//! Persistence for the two session flags that outlive a reload. Appointments
//! are held only in memory by the domain layer and are never written here.
//!
//! - **traits**: the `SessionStorage` interface the domain depends on
//! - **memory**: process-scoped storage, the default
//! - **yaml_session_repository**: single YAML file storage

pub mod memory;
pub mod traits;
pub mod yaml_session_repository;

#[cfg(test)]
pub mod test_utils;

pub use memory::InMemorySessionStorage;
pub use traits::SessionStorage;
pub use yaml_session_repository::YamlSessionRepository;
