//! Port abstraction for the user record store and its errors.
//!
//! The store is an external collaborator: this service only ever asks it for
//! one record matching a [`UserLookup`] filter.

use async_trait::async_trait;

use crate::domain::{User, UserLookup};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// The store is unreachable or the client could not be built.
        Connection { message: String } => "user store connection failed: {message}",
        /// The query failed during execution or the record could not be decoded.
        Query { message: String } => "user store query failed: {message}",
    }
}

/// Read-only access to stored user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return the single record matching `lookup`, or `None` when nothing
    /// matches.
    async fn find_one(&self, lookup: &UserLookup) -> Result<Option<User>, UserPersistenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn connection_error_names_the_store() {
        let err = UserPersistenceError::connection("server selection timeout");
        assert_eq!(
            err.to_string(),
            "user store connection failed: server selection timeout"
        );
    }

    #[rstest]
    fn query_error_carries_message() {
        let err = UserPersistenceError::query("bad document");
        assert!(matches!(
            err,
            UserPersistenceError::Query { ref message } if message == "bad document"
        ));
    }
}
