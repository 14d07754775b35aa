//! Driving port for the adult user lookup use-case.
//!
//! Inbound adapters (HTTP handlers) call this port with an already validated
//! identifier and receive either the visible record or a domain [`Error`].

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for fetching one adult user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserLookupQuery: Send + Sync {
    /// Return the user with `id` if the record exists and passes the age
    /// filter.
    ///
    /// A missing record and a record filtered out by age produce the same
    /// not-found error.
    async fn fetch_user(&self, id: &UserId) -> Result<User, Error>;
}
