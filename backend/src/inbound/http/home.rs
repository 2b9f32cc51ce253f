//! Unauthenticated landing endpoint.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Greeting returned by `GET /api`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Welcome {
    /// Greeting for unauthenticated visitors.
    #[schema(example = "Welcome Stranger!")]
    pub welcome: String,
}

/// Greet anonymous callers.
#[utoipa::path(
    get,
    path = "/api",
    responses((status = 200, description = "Greeting", body = Welcome)),
    tags = ["home"],
    operation_id = "home",
    security([])
)]
#[get("/api")]
pub async fn home() -> web::Json<Welcome> {
    web::Json(Welcome {
        welcome: "Welcome Stranger!".to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn greets_without_authentication() {
        let app = test::init_service(App::new().service(home)).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/api").to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({ "welcome": "Welcome Stranger!" }));
    }
}
