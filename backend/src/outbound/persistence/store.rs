//! Document store handle built on the MongoDB driver.
//!
//! The driver manages its own connection pool and reconnects on demand.
//! Building a [`DocumentStore`] parses the connection string and sets up the
//! client without contacting the server; [`DocumentStore::ping`] performs
//! the first round trip.

use mongodb::bson::doc;
use mongodb::{Client, Database};

use super::mongo_user_repository::MongoUserRepository;

/// Collection holding user records.
pub const DEFAULT_USERS_COLLECTION: &str = "users";

/// Database used when the connection string does not name one.
pub const FALLBACK_DATABASE: &str = "test";

/// Errors raised while building or probing the document store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No connection string was configured.
    #[error("document store connection string is not configured")]
    MissingUri,

    /// The driver rejected the connection string or failed to build a client.
    #[error("failed to build document store client: {message}")]
    Client { message: String },

    /// The server did not answer the connectivity check.
    #[error("document store ping failed: {message}")]
    Ping { message: String },
}

impl StoreError {
    /// Create a client construction error with the given message.
    #[must_use]
    pub fn client(message: impl Into<String>) -> Self {
        Self::Client {
            message: message.into(),
        }
    }

    /// Create a ping error with the given message.
    #[must_use]
    pub fn ping(message: impl Into<String>) -> Self {
        Self::Ping {
            message: message.into(),
        }
    }
}

/// Configuration for the document store handle.
///
/// # Example
///
/// ```
/// use user_lookup::outbound::persistence::StoreConfig;
///
/// let config = StoreConfig::new(Some("mongodb://localhost:27017/app".to_owned()))
///     .with_users_collection("people");
/// assert_eq!(config.users_collection(), "people");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    uri: Option<String>,
    users_collection: String,
}

impl StoreConfig {
    /// Create a configuration for `uri`, reading users from
    /// [`DEFAULT_USERS_COLLECTION`].
    #[must_use]
    pub fn new(uri: Option<String>) -> Self {
        Self {
            uri,
            users_collection: DEFAULT_USERS_COLLECTION.to_owned(),
        }
    }

    /// Override the users collection name.
    #[must_use]
    pub fn with_users_collection(mut self, name: impl Into<String>) -> Self {
        self.users_collection = name.into();
        self
    }

    /// Connection string, if configured.
    #[must_use]
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Users collection name.
    #[must_use]
    pub fn users_collection(&self) -> &str {
        &self.users_collection
    }
}

/// Shared, long-lived handle to the document store database.
#[derive(Clone)]
pub struct DocumentStore {
    database: Database,
    users_collection: String,
}

impl DocumentStore {
    /// Build a client for the configured connection string.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingUri`] when no connection string is set and
    /// [`StoreError::Client`] when the driver rejects it.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let uri = config.uri().ok_or(StoreError::MissingUri)?;
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|err| StoreError::client(err.to_string()))?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(FALLBACK_DATABASE));

        Ok(Self {
            database,
            users_collection: config.users_collection().to_owned(),
        })
    }

    /// Round-trip a `ping` command to confirm the server is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Ping`] when server selection or the command fails.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map(|_| ())
            .map_err(|err| StoreError::ping(err.to_string()))
    }

    /// Name of the database holding user records.
    #[must_use]
    pub fn database_name(&self) -> &str {
        self.database.name()
    }

    /// Repository reading the users collection.
    #[must_use]
    pub fn users(&self) -> MongoUserRepository {
        MongoUserRepository::new(self.database.collection(&self.users_collection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn store_config_defaults_to_users_collection() {
        let config = StoreConfig::new(None);
        assert_eq!(config.uri(), None);
        assert_eq!(config.users_collection(), DEFAULT_USERS_COLLECTION);
    }

    #[tokio::test]
    async fn connect_requires_a_uri() {
        let result = DocumentStore::connect(&StoreConfig::new(None)).await;
        assert!(matches!(result, Err(StoreError::MissingUri)));
    }

    #[rstest]
    #[case("")]
    #[case("http://localhost:27017")]
    #[case("not a connection string")]
    #[tokio::test]
    async fn connect_rejects_malformed_uris(#[case] uri: &str) {
        let result = DocumentStore::connect(&StoreConfig::new(Some(uri.to_owned()))).await;
        assert!(matches!(result, Err(StoreError::Client { .. })));
    }

    #[rstest]
    #[case("mongodb://127.0.0.1:27017/people", "people")]
    #[case("mongodb://127.0.0.1:27017", FALLBACK_DATABASE)]
    #[tokio::test]
    async fn connect_selects_database_from_uri(#[case] uri: &str, #[case] expected: &str) {
        let store = DocumentStore::connect(&StoreConfig::new(Some(uri.to_owned())))
            .await
            .expect("client builds without contacting the server");
        assert_eq!(store.database_name(), expected);
    }

    #[rstest]
    fn store_error_display() {
        assert!(StoreError::client("bad scheme").to_string().contains("bad scheme"));
        assert!(StoreError::ping("timed out").to_string().contains("timed out"));
    }
}
