//! Users API handlers.
//!
//! ```text
//! GET /users                        (header: email)
//! POST /users {"email":"..."}       (header: email)
//! GET /users/me                     (header: email)
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, NewUser, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::RequestContext;

/// Every known user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UsersResponse {
    /// Users ordered by id.
    pub users: Vec<User>,
}

/// A single user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// The requested user.
    pub user: User,
}

/// List known users.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use storefront::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/users",
    params(("email" = String, Header, description = "Caller identity")),
    responses(
        (status = 200, description = "Users", body = UsersResponse),
        (status = 422, description = "Missing or invalid email header", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(ctx: RequestContext) -> ApiResult<web::Json<UsersResponse>> {
    let users = ctx.services.users().list_users().await?;
    Ok(web::Json(UsersResponse { users }))
}

/// Register a user explicitly. Only `email` is kept from the body.
#[utoipa::path(
    post,
    path = "/users",
    params(("email" = String, Header, description = "Caller identity")),
    request_body = NewUser,
    responses(
        (status = 200, description = "User saved", body = UserResponse),
        (status = 422, description = "Missing or invalid email header", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    ctx: RequestContext,
    payload: Option<web::Json<NewUser>>,
) -> ApiResult<web::Json<UserResponse>> {
    let user = ctx
        .services
        .users()
        .save_user(payload.map(web::Json::into_inner))
        .await?;
    Ok(web::Json(UserResponse { user }))
}

/// The caller as resolved from the `email` header.
#[utoipa::path(
    get,
    path = "/users/me",
    params(("email" = String, Header, description = "Caller identity")),
    responses(
        (status = 200, description = "Caller", body = UserResponse),
        (status = 422, description = "Missing or invalid email header", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(ctx: RequestContext) -> web::Json<UserResponse> {
    web::Json(UserResponse { user: ctx.user })
}
