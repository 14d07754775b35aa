//! Document store persistence adapters using the MongoDB driver.
//!
//! This module provides concrete implementations of the domain
//! [`UserRepository`](crate::domain::ports::UserRepository) port.
//!
//! # Architecture
//!
//! - **Thin adapters**: repository implementations only translate between
//!   BSON documents and domain types. No business logic resides here.
//! - **Internal documents**: the stored document shape (`documents.rs`) is an
//!   implementation detail, never exposed to the domain layer.
//! - **Driver-managed pooling**: the driver owns connection pooling and
//!   reconnection; a [`DocumentStore`] is cheap to clone and shared by
//!   handlers.
//! - **Strongly typed errors**: driver errors are mapped to
//!   `UserPersistenceError` before leaving the adapter.
//!
//! # Example
//!
//! ```no_run
//! use user_lookup::outbound::persistence::{DocumentStore, StoreConfig};
//!
//! # async fn run() -> Result<(), user_lookup::outbound::persistence::StoreError> {
//! let config = StoreConfig::new(Some("mongodb://localhost:27017/app".to_owned()));
//! let store = DocumentStore::connect(&config).await?;
//! store.ping().await?;
//! let users = store.users();
//! # let _ = users;
//! # Ok(())
//! # }
//! ```

mod disconnected_user_repository;
mod documents;
mod in_memory_user_repository;
mod mongo_user_repository;
mod store;

pub use disconnected_user_repository::DisconnectedUserRepository;
pub use in_memory_user_repository::InMemoryUserRepository;
pub use mongo_user_repository::MongoUserRepository;
pub use store::{
    DEFAULT_USERS_COLLECTION, DocumentStore, FALLBACK_DATABASE, StoreConfig, StoreError,
};
