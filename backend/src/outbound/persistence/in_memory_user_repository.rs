//! In-process `UserRepository` for local runs and tests.

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserLookup};

/// Repository holding users in memory and applying lookups by scanning.
///
/// # Example
///
/// ```
/// use user_lookup::domain::{Age, User, UserId};
/// use user_lookup::outbound::persistence::InMemoryUserRepository;
///
/// let id = UserId::new("507f1f77bcf86cd799439011").expect("valid id");
/// let repository = InMemoryUserRepository::default()
///     .with_user(User::new(id).with_age(Age::from_whole(30)));
/// assert_eq!(repository.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Vec<User>,
}

impl InMemoryUserRepository {
    /// Create a repository seeded with `users`.
    #[must_use]
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: users.into_iter().collect(),
        }
    }

    /// Add a user to the repository.
    #[must_use]
    pub fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    /// Number of stored users.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the repository holds no users.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_one(&self, lookup: &UserLookup) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.users.iter().find(|user| lookup.matches(user)).cloned())
    }
}
