//! Adult user lookup service.
//!
//! Implements [`UserLookupQuery`] over a [`UserRepository`]: builds the
//! identifier-plus-age filter, issues exactly one repository call, and maps
//! the outcome onto domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use super::ports::{UserLookupQuery, UserPersistenceError, UserRepository};
use super::{Error, User, UserId, UserLookup};

/// Message returned when no visible record matches.
///
/// Covers both an unknown identifier and a record whose age does not pass the
/// filter; callers cannot tell the two apart.
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found or underage";

/// Message returned when the identifier is malformed.
pub const INVALID_USER_ID_MESSAGE: &str = "Invalid user ID format";

/// Generic message returned for infrastructure failures.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Lookup service backed by a user repository.
#[derive(Clone)]
pub struct UserLookupService {
    users: Arc<dyn UserRepository>,
}

impl UserLookupService {
    /// Create a service backed by `users`.
    #[must_use]
    pub const fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

fn map_persistence_error(id: &UserId, err: &UserPersistenceError) -> Error {
    match err {
        UserPersistenceError::Connection { .. } => {
            error!(user_id = %id, error = %err, "user store unavailable");
        }
        UserPersistenceError::Query { .. } => {
            error!(user_id = %id, error = %err, "user store query failed");
        }
    }
    Error::internal(err.to_string())
}

#[async_trait]
impl UserLookupQuery for UserLookupService {
    async fn fetch_user(&self, id: &UserId) -> Result<User, Error> {
        let lookup = UserLookup::adult(*id);
        let found = self
            .users
            .find_one(&lookup)
            .await
            .map_err(|err| map_persistence_error(id, &err))?;

        found.ok_or_else(|| {
            debug!(user_id = %id, older_than = lookup.older_than(), "no visible user");
            Error::not_found(USER_NOT_FOUND_MESSAGE)
        })
    }
}
