//! BSON document shapes and query filters for the users collection.
//!
//! These types are internal to the persistence adapter; the domain only sees
//! [`User`] and [`UserLookup`].

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document, doc};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::{Age, User, UserId, UserLookup};

/// Stored user record.
///
/// Only `_id` is typed strictly. The profile fields are schema-less in the
/// store, so they are decoded as raw BSON and converted leniently; every
/// other field is kept for the response body.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(default)]
    name: Option<Bson>,
    #[serde(default)]
    email: Option<Bson>,
    #[serde(default)]
    age: Option<Bson>,
    #[serde(flatten)]
    extra: Document,
}

/// Build the `_id` AND `age > n` filter for a lookup.
pub(crate) fn lookup_filter(lookup: &UserLookup) -> Document {
    doc! {
        "_id": ObjectId::from_bytes(lookup.id().to_bytes()),
        "age": { "$gt": lookup.older_than() },
    }
}

/// Render a scalar stored in a text field as a string.
///
/// Nested documents and arrays have no text form and are dropped.
fn text_from_bson(id: &ObjectId, field: &str, value: Bson) -> Option<String> {
    match value {
        Bson::String(text) => Some(text),
        Bson::Null | Bson::Undefined => None,
        Bson::Int32(number) => Some(number.to_string()),
        Bson::Int64(number) => Some(number.to_string()),
        Bson::Double(number) => Some(number.to_string()),
        Bson::Boolean(flag) => Some(flag.to_string()),
        Bson::ObjectId(oid) => Some(oid.to_hex()),
        Bson::Decimal128(_) => decimal_text(&value),
        Bson::DateTime(at) => at.try_to_rfc3339_string().ok(),
        other => {
            warn!(user_id = %id, field, element_type = ?other.element_type(), "ignoring non-scalar text field");
            None
        }
    }
}

/// Canonical string form of a `Decimal128` value.
fn decimal_text(value: &Bson) -> Option<String> {
    match value.clone().into_relaxed_extjson() {
        Value::Object(fields) => fields
            .get("$numberDecimal")
            .and_then(Value::as_str)
            .map(str::to_owned),
        _ => None,
    }
}

fn age_from_bson(id: &ObjectId, value: &Bson) -> Option<Age> {
    match value {
        Bson::Int32(years) => Some(Age::from_whole(i64::from(*years))),
        Bson::Int64(years) => Some(Age::from_whole(*years)),
        Bson::Double(years) => Age::from_fractional(*years),
        Bson::Decimal128(_) => decimal_text(value)
            .and_then(|text| text.parse::<f64>().ok())
            .and_then(Age::from_fractional),
        Bson::Null => None,
        other => {
            warn!(user_id = %id, element_type = ?other.element_type(), "ignoring non-numeric age");
            None
        }
    }
}

/// Convert an arbitrary stored value to JSON.
///
/// Identifiers render as hex strings and dates as RFC 3339 strings; other
/// values use relaxed extended JSON.
fn json_from_bson(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(at) => at
            .try_to_rfc3339_string()
            .map_or_else(|_| Bson::DateTime(at).into_relaxed_extjson(), Value::String),
        Bson::Document(fields) => Value::Object(json_map_from_document(fields)),
        Bson::Array(items) => Value::Array(items.into_iter().map(json_from_bson).collect()),
        other => other.into_relaxed_extjson(),
    }
}

fn json_map_from_document(document: Document) -> Map<String, Value> {
    document
        .into_iter()
        .map(|(name, value)| (name, json_from_bson(value)))
        .collect()
}

impl From<UserDocument> for User {
    fn from(document: UserDocument) -> Self {
        let UserDocument {
            id,
            name,
            email,
            age,
            extra,
        } = document;

        let mut user = User::new(UserId::from_bytes(id.bytes()));
        if let Some(text) = name.and_then(|value| text_from_bson(&id, "name", value)) {
            user = user.with_name(text);
        }
        if let Some(text) = email.and_then(|value| text_from_bson(&id, "email", value)) {
            user = user.with_email(text);
        }
        if let Some(years) = age.as_ref().and_then(|value| age_from_bson(&id, value)) {
            user = user.with_age(years);
        }
        for (field, value) in json_map_from_document(extra) {
            user = user.with_field(field, value);
        }
        user
    }
}
