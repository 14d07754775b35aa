//! Repository standing in for a store that could not be configured.

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserLookup};

/// Repository that fails every lookup with a connection error.
///
/// Used when the document store client cannot be built at startup so the
/// HTTP listener still serves requests, answering lookups with an internal
/// error instead of crashing.
#[derive(Debug, Clone)]
pub struct DisconnectedUserRepository {
    reason: String,
}

impl DisconnectedUserRepository {
    /// Create a repository reporting `reason` on every call.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl UserRepository for DisconnectedUserRepository {
    async fn find_one(&self, _lookup: &UserLookup) -> Result<Option<User>, UserPersistenceError> {
        Err(UserPersistenceError::connection(self.reason.clone()))
    }
}
