//! Email-header authentication.
//!
//! Every authenticated route receives a [`RequestContext`]: the services
//! bundle plus the [`User`] resolved from the `email` request header. A
//! missing or malformed header is rejected before any service is called; a
//! well-formed address is resolved with `find_or_save`, so first contact
//! registers the user.

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::{EmailAddress, Error, User};
use crate::inbound::http::state::ServiceContext;

/// Header carrying the caller's identity.
pub const EMAIL_HEADER: &str = "email";

const INVALID_EMAIL_MESSAGE: &str = "Unprocessable Entity: header should contain a valid email";

/// Read and validate the `email` header.
pub fn email_from_request(req: &HttpRequest) -> Result<EmailAddress, Error> {
    let raw = req
        .headers()
        .get(EMAIL_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| Error::unprocessable(INVALID_EMAIL_MESSAGE))?;

    EmailAddress::new(raw).map_err(|reason| {
        debug!(%reason, "rejected email header");
        Error::unprocessable(INVALID_EMAIL_MESSAGE)
    })
}

/// Per-request context for authenticated handlers.
#[derive(Clone)]
pub struct RequestContext {
    /// Caller resolved from the `email` header.
    pub user: User,
    /// Services registered for the application.
    pub services: ServiceContext,
}

impl FromRequest for RequestContext {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let prepared = ServiceContext::from_http_request(req)
            .and_then(|services| email_from_request(req).map(|email| (services, email)));

        Box::pin(async move {
            let (services, email) = prepared?;
            let user = services.users().find_or_save(&email).await?;
            Ok(Self { user, services })
        })
    }
}
