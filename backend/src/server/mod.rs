//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use storefront::Trace;
#[cfg(debug_assertions)]
use storefront::doc::ApiDoc;
use storefront::domain::{OrdersServiceImpl, UsersServiceImpl};
use storefront::inbound::http::configure;
use storefront::inbound::http::health::HealthState;
use storefront::inbound::http::state::HttpState;
use storefront::outbound::memory::{InMemoryOrderRepository, InMemoryUserRepository};
use storefront::outbound::persistence::{DieselOrderRepository, DieselUserRepository};

/// Wire services over Diesel when a pool is configured, otherwise over the
/// in-memory stores.
fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => HttpState::new(
            Arc::new(UsersServiceImpl::new(Arc::new(DieselUserRepository::new(
                pool.clone(),
            )))),
            Arc::new(OrdersServiceImpl::new(Arc::new(
                DieselOrderRepository::new(pool.clone()),
            ))),
        ),
        None => {
            info!("no database configured; using in-memory storage");
            let users = Arc::new(InMemoryUserRepository::default());
            HttpState::new(
                Arc::new(UsersServiceImpl::new(users.clone())),
                Arc::new(OrdersServiceImpl::new(Arc::new(
                    InMemoryOrderRepository::new(users),
                ))),
            )
        }
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration. Marks the health state ready once the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    info!(addr = %config.bind_addr, "storefront listening");
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn memory_config() -> ServerConfig {
        ServerConfig::new(([127, 0, 0, 1], 0).into())
    }

    #[rstest]
    #[actix_web::test]
    async fn in_memory_app_serves_orders_end_to_end() {
        let app = test::init_service(build_app(
            web::Data::new(HealthState::new()),
            web::Data::new(build_http_state(&memory_config())),
        ))
        .await;

        let created = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/orders")
                .insert_header(("email", "ada@example.com"))
                .set_json(json!({ "products": [] }))
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::OK);
        assert!(created.headers().contains_key("trace-id"));

        let listed = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/orders")
                .insert_header(("email", "ada@example.com"))
                .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(listed).await;
        assert_eq!(
            body,
            json!({ "orders": [{ "id": 1, "userid": 1, "products": [] }] })
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_reflects_health_state() {
        let health = web::Data::new(HealthState::new());
        let app = test::init_service(build_app(
            health.clone(),
            web::Data::new(build_http_state(&memory_config())),
        ))
        .await;

        let before = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        health.mark_ready();
        let after = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;

        assert_eq!(before.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(after.status(), StatusCode::OK);
    }
}
