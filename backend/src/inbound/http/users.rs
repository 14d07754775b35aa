//! Users API handlers.
//!
//! ```text
//! GET /users/507f1f77bcf86cd799439011
//! ```

use actix_web::{get, web};

use crate::domain::{Error, INVALID_USER_ID_MESSAGE, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::schemas::UserSchema;
use crate::inbound::http::state::HttpState;

/// Fetch a user by identifier, visible only when older than 21.
///
/// The identifier is validated before the store is consulted; malformed
/// identifiers never reach the repository.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_lookup::inbound::http::users::get_user;
///
/// let app = App::new().service(get_user);
/// ```
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(
        ("id" = String, Path, description = "24-character hexadecimal user identifier", example = "507f1f77bcf86cd799439011")
    ),
    responses(
        (status = 200, description = "User record", body = UserSchema),
        (status = 400, description = "Invalid user ID format", body = ErrorBody),
        (status = 404, description = "User not found or underage", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id = UserId::new(path.into_inner())
        .map_err(|_| Error::invalid_request(INVALID_USER_ID_MESSAGE))?;
    let user = state.users.fetch_user(&id).await?;
    Ok(web::Json(user))
}
