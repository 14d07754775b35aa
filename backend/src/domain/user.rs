//! User record model.
//!
//! Records are owned by the document store; this service only reads them.
//! Identifiers follow the store's native key encoding: 12 bytes rendered as
//! 24 hexadecimal characters.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Number of hexadecimal characters in a textual [`UserId`].
pub const USER_ID_HEX_LEN: usize = 24;

/// Ages must be strictly greater than this value for a record to be visible.
pub const ADULT_AGE_THRESHOLD: i64 = 21;

/// Field names owned by [`User`] itself; never stored as extra fields.
const RESERVED_FIELDS: [&str; 4] = ["_id", "name", "email", "age"];

/// Largest magnitude at which every integer is exactly representable as `f64`.
const F64_EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Validation errors returned by [`UserId::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// The identifier was empty.
    #[error("user id must not be empty")]
    EmptyId,
    /// The identifier does not have exactly 24 characters.
    #[error("user id must be {USER_ID_HEX_LEN} characters, got {actual}")]
    InvalidIdLength { actual: usize },
    /// The identifier contains non-hexadecimal characters.
    #[error("user id must contain only hexadecimal characters")]
    InvalidIdCharacters,
}

/// Stable user identifier in the store's 12-byte key space.
///
/// # Examples
/// ```
/// use user_lookup::domain::UserId;
///
/// let id = UserId::new("507F1F77BCF86CD799439011").expect("valid id");
/// assert_eq!(id.to_string(), "507f1f77bcf86cd799439011");
/// assert!(UserId::new("bad-id").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId([u8; 12]);

impl UserId {
    /// Validate and construct a [`UserId`] from its hexadecimal form.
    ///
    /// Upper- and lower-case digits are accepted; the canonical rendering is
    /// lower case.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.len() != USER_ID_HEX_LEN {
            return Err(UserValidationError::InvalidIdLength {
                actual: raw.chars().count(),
            });
        }

        let mut bytes = [0_u8; 12];
        hex::decode_to_slice(raw, &mut bytes)
            .map_err(|_| UserValidationError::InvalidIdCharacters)?;
        Ok(Self(bytes))
    }

    /// Construct an identifier from raw key bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Raw key bytes.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 12] {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Numeric age as stored on the record.
///
/// Whole numbers serialise as JSON integers; fractional values stay floats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Age(Number);

impl Age {
    /// Age from a whole number of years.
    #[must_use]
    pub fn from_whole(years: i64) -> Self {
        Self(Number::from(years))
    }

    /// Age from a floating point value.
    ///
    /// Returns `None` for NaN or infinite input. Integral values within the
    /// exactly representable range are normalised to whole numbers.
    ///
    /// # Examples
    /// ```
    /// use user_lookup::domain::Age;
    ///
    /// assert_eq!(Age::from_fractional(25.0), Some(Age::from_whole(25)));
    /// assert!(Age::from_fractional(f64::NAN).is_none());
    /// ```
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "value is integral and bounded by F64_EXACT_INTEGER_LIMIT"
    )]
    pub fn from_fractional(years: f64) -> Option<Self> {
        if years.fract() == 0.0 && years.abs() <= F64_EXACT_INTEGER_LIMIT {
            return Some(Self::from_whole(years as i64));
        }
        Number::from_f64(years).map(Self)
    }

    /// Whether this age is strictly greater than `threshold` years.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "threshold is a small constant compared against float ages"
    )]
    pub fn exceeds(&self, threshold: i64) -> bool {
        if let Some(whole) = self.0.as_i64() {
            return whole > threshold;
        }
        self.0
            .as_f64()
            .is_some_and(|years| years > threshold as f64)
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User record as returned to clients.
///
/// Serialises with the store's identifier field name (`_id`); absent optional
/// fields are omitted. Any other stored fields (such as a version key) are
/// carried through unchanged after the known ones.
///
/// # Examples
/// ```
/// use user_lookup::domain::{Age, User, UserId};
///
/// let id = UserId::new("507f1f77bcf86cd799439011").expect("valid id");
/// let user = User::new(id).with_name("Ada").with_age(Age::from_whole(36));
/// let json = serde_json::to_value(&user).expect("serialise");
/// assert_eq!(json["_id"], "507f1f77bcf86cd799439011");
/// assert_eq!(json["age"], 36);
/// assert!(json.get("email").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    age: Option<Age>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl User {
    /// Build a record with only its identifier set.
    #[must_use]
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            name: None,
            email: None,
            age: None,
            extra: Map::new(),
        }
    }

    /// Set the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the age.
    #[must_use]
    pub fn with_age(mut self, age: Age) -> Self {
        self.age = Some(age);
        self
    }

    /// Attach an additional stored field.
    ///
    /// Names of the modelled fields (`_id`, `name`, `email`, `age`) are
    /// ignored so the serialised record never repeats a key.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use user_lookup::domain::{User, UserId};
    ///
    /// let id = UserId::new("507f1f77bcf86cd799439011").expect("valid id");
    /// let user = User::new(id).with_field("__v", json!(0)).with_field("name", json!("x"));
    /// assert_eq!(user.extra_fields().get("__v"), Some(&json!(0)));
    /// assert_eq!(user.name(), None);
    /// ```
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        let name = name.into();
        if !RESERVED_FIELDS.contains(&name.as_str()) {
            self.extra.insert(name, value);
        }
        self
    }

    /// Identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Name, if stored.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Email address, if stored.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Age, if stored.
    #[must_use]
    pub const fn age(&self) -> Option<&Age> {
        self.age.as_ref()
    }

    /// Stored fields beyond the modelled ones.
    #[must_use]
    pub const fn extra_fields(&self) -> &Map<String, Value> {
        &self.extra
    }
}

/// Filter for a single-record lookup: identifier match AND age above a bound.
///
/// # Examples
/// ```
/// use user_lookup::domain::{Age, User, UserId, UserLookup};
///
/// let id = UserId::new("507f1f77bcf86cd799439011").expect("valid id");
/// let lookup = UserLookup::adult(id);
/// assert!(lookup.matches(&User::new(id).with_age(Age::from_whole(25))));
/// assert!(!lookup.matches(&User::new(id).with_age(Age::from_whole(21))));
/// assert!(!lookup.matches(&User::new(id)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserLookup {
    id: UserId,
    older_than: i64,
}

impl UserLookup {
    /// Lookup for `id` restricted to ages above [`ADULT_AGE_THRESHOLD`].
    #[must_use]
    pub const fn adult(id: UserId) -> Self {
        Self {
            id,
            older_than: ADULT_AGE_THRESHOLD,
        }
    }

    /// Identifier to match.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Exclusive lower bound on age.
    #[must_use]
    pub const fn older_than(&self) -> i64 {
        self.older_than
    }

    /// Evaluate the filter against a record; records without an age never match.
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        user.id() == &self.id && user.age().is_some_and(|age| age.exceeds(self.older_than))
    }
}
