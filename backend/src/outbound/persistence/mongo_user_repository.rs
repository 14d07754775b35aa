//! MongoDB-backed `UserRepository` implementation.

use async_trait::async_trait;
use mongodb::Collection;
use mongodb::error::{Error as DriverError, ErrorKind};
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserLookup};

use super::documents::{UserDocument, lookup_filter};

/// Repository reading user documents from a MongoDB collection.
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    pub(crate) const fn new(collection: Collection<UserDocument>) -> Self {
        Self { collection }
    }
}

/// Map driver failures to domain persistence errors.
///
/// Failures to reach a server become `Connection`; everything else,
/// including documents that fail to decode, becomes `Query`.
fn map_driver_error(error: DriverError) -> UserPersistenceError {
    debug!(?error, "user store operation failed");
    let message = error.to_string();
    match *error.kind {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::DnsResolve { .. } => UserPersistenceError::connection(message),
        _ => UserPersistenceError::query(message),
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_one(&self, lookup: &UserLookup) -> Result<Option<User>, UserPersistenceError> {
        let found = self
            .collection
            .find_one(lookup_filter(lookup))
            .await
            .map_err(map_driver_error)?;
        Ok(found.map(User::from))
    }
}
