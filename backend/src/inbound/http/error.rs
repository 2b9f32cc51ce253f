//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers and extractors to turn domain failures into consistent JSON
//! responses and status codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use tracing::error;

use crate::domain::{Error, ErrorCode};
use crate::middleware::TRACE_ID_HEADER;
use crate::middleware::trace::TraceId;

/// Convenient result alias for HTTP handlers.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use storefront::domain::Error;
/// use storefront::inbound::http::ApiResult;
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unprocessable("Please provide a list of products"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Wire shape of an error: the domain payload plus the request trace id.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    #[serde(flatten)]
    error: &'a Error,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let trace_id = TraceId::current().map(|id| id.to_string());
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = &trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.as_str()));
        }

        builder.json(ErrorBody {
            error: self,
            trace_id,
        })
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Framework errors may describe internals; keep them in the logs.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}
