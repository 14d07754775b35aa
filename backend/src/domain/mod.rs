//! Domain primitives, ports and the user lookup use-case.
//!
//! Purpose: define strongly typed domain entities and the boundary traits the
//! adapters plug into. Nothing here knows about HTTP or the document store
//! driver.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User / UserId / Age / UserLookup: the record model and its lookup filter.
//! - TraceId: request-scoped correlation identifier.
//! - UserLookupService: adult user lookup over a `UserRepository`.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_lookup;

pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    ADULT_AGE_THRESHOLD, Age, USER_ID_HEX_LEN, User, UserId, UserLookup, UserValidationError,
};
pub use self::user_lookup::{
    INTERNAL_ERROR_MESSAGE, INVALID_USER_ID_MESSAGE, USER_NOT_FOUND_MESSAGE, UserLookupService,
};
