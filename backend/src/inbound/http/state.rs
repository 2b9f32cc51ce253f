//! Shared HTTP adapter state.
//!
//! Handlers never construct services. `HttpState` is built once at startup,
//! registered as `web::Data`, and handed to handlers through the
//! [`ServiceContext`] extractor, so handlers depend only on driving ports and
//! stay testable without I/O.

use std::sync::Arc;

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::error;

use crate::domain::Error;
use crate::domain::ports::{OrdersService, UsersService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Users driving port.
    pub users: Arc<dyn UsersService>,
    /// Orders driving port.
    pub orders: Arc<dyn OrdersService>,
}

impl HttpState {
    /// Bundle the service ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use storefront::domain::{OrdersServiceImpl, UsersServiceImpl};
    /// use storefront::inbound::http::state::HttpState;
    /// use storefront::outbound::memory::{InMemoryOrderRepository, InMemoryUserRepository};
    ///
    /// let users = Arc::new(InMemoryUserRepository::default());
    /// let state = HttpState::new(
    ///     Arc::new(UsersServiceImpl::new(users.clone())),
    ///     Arc::new(OrdersServiceImpl::new(Arc::new(InMemoryOrderRepository::new(users)))),
    /// );
    /// let _users = state.users.clone();
    /// ```
    pub fn new(users: Arc<dyn UsersService>, orders: Arc<dyn OrdersService>) -> Self {
        Self { users, orders }
    }
}

/// Extractor exposing the registered [`HttpState`].
///
/// A missing registration is a wiring bug and surfaces as a 500.
#[derive(Clone)]
pub struct ServiceContext(web::Data<HttpState>);

impl ServiceContext {
    /// Users driving port.
    pub fn users(&self) -> &dyn UsersService {
        self.0.users.as_ref()
    }

    /// Orders driving port.
    pub fn orders(&self) -> &dyn OrdersService {
        self.0.orders.as_ref()
    }

    /// Fetch the registered state, or fail with an internal error.
    pub(crate) fn from_http_request(req: &HttpRequest) -> Result<Self, Error> {
        req.app_data::<web::Data<HttpState>>()
            .cloned()
            .map(Self)
            .ok_or_else(|| {
                error!(path = req.path(), "HttpState is not registered");
                Error::internal("Internal server error")
            })
    }
}

impl FromRequest for ServiceContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_http_request(req))
    }
}
