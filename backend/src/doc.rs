//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint plus the `email` header security
//! scheme. Swagger UI serves it at `/docs` in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, NewUser, Order, OrderRecord, Product, User};
use crate::inbound::http::home::Welcome;
use crate::inbound::http::orders::{
    CreateOrderRequest, OrderResponse, OrdersResponse, ValidationErrors,
};
use crate::inbound::http::users::{UserResponse, UsersResponse};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "EmailHeader",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "email",
                "Caller email; unseen addresses are registered on first use.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Storefront backend API",
        description = "Users and orders authenticated by an email header."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("EmailHeader" = [])),
    paths(
        crate::inbound::http::home::home,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::current_user,
        crate::inbound::http::orders::list_orders,
        crate::inbound::http::orders::create_order,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        NewUser,
        Order,
        OrderRecord,
        Product,
        Welcome,
        UsersResponse,
        UserResponse,
        OrdersResponse,
        OrderResponse,
        CreateOrderRequest,
        ValidationErrors,
    )),
    tags(
        (name = "home", description = "Unauthenticated landing endpoint"),
        (name = "users", description = "User registration and lookup"),
        (name = "orders", description = "Order placement and history"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
