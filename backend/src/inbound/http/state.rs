//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::UserLookupQuery;

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use user_lookup::domain::UserLookupService;
/// use user_lookup::inbound::http::state::HttpState;
/// use user_lookup::outbound::persistence::InMemoryUserRepository;
///
/// let service = UserLookupService::new(Arc::new(InMemoryUserRepository::default()));
/// let state = HttpState::new(Arc::new(service));
/// let _users = state.users.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    /// Adult user lookup use-case.
    pub users: Arc<dyn UserLookupQuery>,
}

impl HttpState {
    /// Construct state from the lookup port.
    #[must_use]
    pub const fn new(users: Arc<dyn UserLookupQuery>) -> Self {
        Self { users }
    }
}
