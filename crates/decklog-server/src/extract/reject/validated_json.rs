//! Validated JSON extractor.

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::Json;
use crate::TRACING_TARGET_VALIDATION;
use crate::handler::{Error, ErrorKind};

/// JSON extractor that also runs the `validator` rules of the body.
///
/// Both deserialization and validation failures reject with `400`.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    /// Creates a new instance of [`ValidateJson`].
    #[inline]
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Returns the inner validated value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;

        data.validate()?;
        Ok(Self::new(data))
    }
}

/// Formats a single field failure for the log.
fn format_validation_error(field: &str, error: &validator::ValidationError) -> String {
    if let Some(custom_message) = &error.message {
        return format!("Field '{}': {}", field, custom_message);
    }

    match (error.params.get("min"), error.params.get("max")) {
        (Some(min), Some(max)) => {
            format!("Field '{}' failed {}: expected {}..={}", field, error.code, min, max)
        }
        (Some(min), None) => format!("Field '{}' failed {}: expected >= {}", field, error.code, min),
        (None, Some(max)) => format!("Field '{}' failed {}: expected <= {}", field, error.code, max),
        (None, None) => format!("Field '{}' failed {}", field, error.code),
    }
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors
                    .iter()
                    .map(move |error| format_validation_error(field, error))
            })
            .collect::<Vec<_>>();
        messages.sort();

        tracing::debug!(
            target: TRACING_TARGET_VALIDATION,
            errors = messages.len(),
            "request validation failed",
        );

        let message = match messages.as_slice() {
            [] => "Validation failed".to_owned(),
            messages => messages.join(". "),
        };

        ErrorKind::BadRequest
            .with_message(message)
            .with_resource("request")
    }
}

impl<T> aide::OperationInput for ValidateJson<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        <Json<T> as aide::OperationInput>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        <Json<T> as aide::OperationInput>::inferred_early_responses(ctx, operation)
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[derive(Validate)]
    struct Body {
        #[validate(length(min = 1, max = 4))]
        name: String,
    }

    #[test]
    fn validation_errors_become_bad_request() {
        let body = Body {
            name: "too long".to_owned(),
        };

        let error: Error = body.validate().map_err(Error::from).err().unwrap_or_default();
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert!(error.message().is_some_and(|m| m.contains("name")));
    }
}
