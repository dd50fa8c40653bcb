//! # Custom Extractors & Validation
//!
//! Provides the [`Validate`] trait for request DTOs and helpers to extract
//! and validate JSON bodies in handlers. Validation converts the wire form
//! (strings, signed integers) into the typed values the core crates accept,
//! so handlers never see unchecked input.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use fort_core::FortError;

use crate::error::AppError;

/// Request types that decode into a validated form.
pub trait Validate {
    /// The checked request.
    type Validated;

    /// Decode and check every field.
    fn validate(self) -> Result<Self::Validated, FortError>;
}

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a JSON body and validate it.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T::Validated, AppError> {
    let value = extract_json(result)?;
    Ok(value.validate()?)
}
