//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// JSON body extractor that runs `validator` rules before the handler.
///
/// Malformed bodies and failed rules both surface as a 400 with the
/// collected messages.
///
/// ```rust,ignore
/// use serde::Deserialize;
/// use validator::Validate;
/// use diaspora_bridge::api::extractors::ValidatedJson;
///
/// #[derive(Deserialize, Validate)]
/// struct SendRequest {
///     #[validate(length(min = 1, message = "Message is required"))]
///     message: String,
/// }
///
/// async fn send(ValidatedJson(payload): ValidatedJson<SendRequest>) {
///     // payload.message is non-empty here
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Join rule messages, ordered by field name so responses are stable.
/// Fields sharing a message (login's "Email and password are required")
/// report it once.
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let mut messages: Vec<String> = Vec::new();
    for (field, errs) in fields {
        for e in errs {
            let message = e
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field));
            if !messages.contains(&message) {
                messages.push(message);
            }
        }
    }

    messages.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Credentials {
        #[validate(length(min = 1, message = "Email and password are required"))]
        email: String,
        #[validate(length(min = 1, message = "Email and password are required"))]
        password: String,
    }

    #[test]
    fn test_shared_messages_are_reported_once() {
        let creds = Credentials {
            email: String::new(),
            password: String::new(),
        };
        let errors = creds.validate().unwrap_err();

        assert_eq!(
            format_validation_errors(&errors),
            "Email and password are required"
        );
    }
}
