//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod user_lookup_query;
mod user_repository;

#[cfg(test)]
pub use user_lookup_query::MockUserLookupQuery;
pub use user_lookup_query::UserLookupQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
