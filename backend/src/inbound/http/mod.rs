//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod home;
pub mod orders;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every endpoint. Callers supply `HttpState` and `HealthState` as
/// app data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use storefront::inbound::http::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(home::home)
        .service(users::current_user)
        .service(users::list_users)
        .service(users::create_user)
        .service(orders::list_orders)
        .service(orders::create_order)
        .service(health::ready)
        .service(health::live);
}
