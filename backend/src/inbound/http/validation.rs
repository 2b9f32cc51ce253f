//! Request body validation for inbound HTTP adapters.
//!
//! Routes declare their rules through [`validate`], check a JSON body into an
//! [`ErrorBag`], and render a non-empty bag with [`validation_response`].

use actix_web::HttpResponse;
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::domain::Error;

/// Presence rule for a single body field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRule {
    /// Top-level body field that must be present and non-null.
    pub field: &'static str,
    /// Message reported when the field is missing.
    pub message: &'static str,
}

/// Raised when a route asks for rules under a name nobody defined.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationConfigError {
    #[error("Please provide a valid method name")]
    UnknownMethod { method: String },
}

impl From<ValidationConfigError> for Error {
    fn from(value: ValidationConfigError) -> Self {
        let ValidationConfigError::UnknownMethod { method } = &value;
        error!(method = method.as_str(), "validation rules requested for unknown method");
        Error::internal(value.to_string())
    }
}

const CREATE_ORDER_RULES: &[ValidationRule] = &[ValidationRule {
    field: "products",
    message: "Please provide a list of products",
}];

/// Rules for the named order route method.
///
/// # Examples
/// ```
/// use storefront::inbound::http::validation::validate;
///
/// let rules = validate("create").expect("known method");
/// assert_eq!(rules[0].field, "products");
/// assert!(validate("destroy").is_err());
/// ```
pub fn validate(method: &str) -> Result<Vec<ValidationRule>, ValidationConfigError> {
    match method {
        "create" => Ok(CREATE_ORDER_RULES.to_vec()),
        other => Err(ValidationConfigError::UnknownMethod {
            method: other.to_owned(),
        }),
    }
}

/// Validation messages collected for one request, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorBag {
    errors: Vec<String>,
}

impl ErrorBag {
    /// Apply `rules` to `body`. A field counts as present when it exists and
    /// is not `null`.
    pub fn check(rules: &[ValidationRule], body: &Value) -> Self {
        let errors = rules
            .iter()
            .filter(|rule| body.get(rule.field).is_none_or(Value::is_null))
            .map(|rule| rule.message.to_owned())
            .collect();
        Self { errors }
    }

    /// Whether every rule passed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Collected messages.
    pub fn messages(&self) -> &[String] {
        &self.errors
    }
}

/// Log the failure and render `422 {"errors": [...]}`.
pub fn validation_response(bag: &ErrorBag) -> HttpResponse {
    error!(errors = ?bag.messages(), "Validation failure");
    HttpResponse::UnprocessableEntity().json(bag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn create_requires_products() {
        let rules = validate("create").expect("known method");
        assert_eq!(
            rules,
            vec![ValidationRule {
                field: "products",
                message: "Please provide a list of products",
            }]
        );
    }

    #[rstest]
    #[case("")]
    #[case("update")]
    #[case("CREATE")]
    fn unknown_methods_are_rejected(#[case] method: &str) {
        let err = validate(method).expect_err("unknown method");
        assert_eq!(err.to_string(), "Please provide a valid method name");
        let domain: Error = err.into();
        assert_eq!(domain.message(), "Please provide a valid method name");
    }

    #[rstest]
    #[case(json!({}), vec!["Please provide a list of products"])]
    #[case(json!({ "products": null }), vec!["Please provide a list of products"])]
    #[case(json!([]), vec!["Please provide a list of products"])]
    #[case(json!({ "products": [] }), vec![])]
    #[case(json!({ "products": [{ "id": "1" }] }), vec![])]
    fn check_reports_missing_fields(#[case] body: Value, #[case] expected: Vec<&str>) {
        let rules = validate("create").expect("known method");
        let bag = ErrorBag::check(&rules, &body);
        assert_eq!(bag.messages(), expected.as_slice());
        assert_eq!(bag.is_empty(), expected.is_empty());
    }

    #[rstest]
    #[actix_web::test]
    async fn response_is_unprocessable_with_errors() {
        let rules = [
            ValidationRule {
                field: "first",
                message: "error1",
            },
            ValidationRule {
                field: "second",
                message: "error2",
            },
        ];
        let bag = ErrorBag::check(&rules, &json!({}));

        let response = validation_response(&bag);

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let bytes = to_bytes(response.into_body()).await.expect("body");
        let body: Value = serde_json::from_slice(&bytes).expect("json");
        assert_eq!(body, json!({ "errors": ["error1", "error2"] }));
    }
}
