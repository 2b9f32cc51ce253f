//! Orders API handlers.
//!
//! ```text
//! GET /orders                      (header: email)
//! POST /orders {"products":[...]}  (header: email)
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, Order, OrderDraft, OrderRecord, Product, SerializedProducts};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::RequestContext;
use crate::inbound::http::validation::{ErrorBag, validate, validation_response};

/// Orders placed by the caller.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrdersResponse {
    /// Orders with their product lists decoded.
    pub orders: Vec<Order>,
}

/// Order persisted by `POST /orders`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    /// Stored record; `products` stays in its serialised form.
    pub order: OrderRecord,
}

/// Request body for `POST /orders`.
///
/// `products` is stored exactly as sent, including fields beyond those of
/// [`Product`].
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    /// Product lines to store.
    #[schema(value_type = Vec<Product>)]
    pub products: Value,
}

/// Validation failure body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationErrors {
    /// One message per failed rule.
    #[schema(example = json!(["Please provide a list of products"]))]
    pub errors: Vec<String>,
}

/// List the caller's orders.
#[utoipa::path(
    get,
    path = "/orders",
    params(("email" = String, Header, description = "Caller identity")),
    responses(
        (status = 200, description = "Orders", body = OrdersResponse),
        (status = 422, description = "Missing or invalid email header", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["orders"],
    operation_id = "listOrders"
)]
#[get("/orders")]
pub async fn list_orders(ctx: RequestContext) -> ApiResult<web::Json<OrdersResponse>> {
    let orders = ctx.services.orders().list_orders(ctx.user.id()).await?;
    Ok(web::Json(OrdersResponse { orders }))
}

/// Place an order for the caller.
///
/// The product list is serialised verbatim; the response echoes the stored
/// record.
#[utoipa::path(
    post,
    path = "/orders",
    params(("email" = String, Header, description = "Caller identity")),
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order saved", body = OrderResponse),
        (status = 422, description = "Validation failure", body = ValidationErrors),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["orders"],
    operation_id = "createOrder"
)]
#[post("/orders")]
pub async fn create_order(
    ctx: RequestContext,
    body: Option<web::Json<Value>>,
) -> ApiResult<HttpResponse> {
    let body = body.map_or_else(|| Value::Object(Map::new()), web::Json::into_inner);
    let rules = validate("create")?;
    let bag = ErrorBag::check(&rules, &body);
    if !bag.is_empty() {
        return Ok(validation_response(&bag));
    }

    let products = SerializedProducts::encode(&body["products"]).map_err(|err| {
        error!(error = %err, "failed to serialise products");
        Error::internal("Failed to save order")
    })?;

    let order = ctx
        .services
        .orders()
        .save_order(Some(OrderDraft {
            userid: ctx.user.id(),
            products,
        }))
        .await?;
    Ok(HttpResponse::Ok().json(OrderResponse { order }))
}
