//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their domain counterparts but live in the inbound
//! adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::User`].
///
/// Stored user record; optional fields are omitted when absent.
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Store identifier.
    #[schema(rename = "_id", example = "507f1f77bcf86cd799439011")]
    id: String,
    /// Name as stored.
    #[schema(example = "Ada Lovelace")]
    name: Option<String>,
    /// Email address as stored.
    #[schema(example = "ada@example.com")]
    email: Option<String>,
    /// Age in years; always greater than 21 in responses.
    #[schema(example = 25)]
    age: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn user_schema_uses_store_identifier_field() {
        let schema_json = schema_to_json::<UserSchema>();
        // utoipa replaces :: with . in schema names
        assert_eq!(UserSchema::name(), "crate.domain.User");
        assert!(schema_json.contains("\"_id\""), "schema should expose _id");
        assert!(schema_json.contains("\"age\""), "schema should expose age");
    }
}
