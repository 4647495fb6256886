//! Request shape validation. Runs after the capability gate and before any
//! store access; every failure is a 400 listing the offending fields.

pub mod jobs;

pub use jobs::{validate_create, validate_filter, validate_update};

use std::collections::HashMap;
use validator::{ValidationError, ValidationErrors};

use crate::error::ApiError;

/// Flatten `validator` output into the field map carried by `ApiError`
pub fn from_validation_errors(message: &str, errors: &ValidationErrors) -> ApiError {
    let field_errors: HashMap<String, String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs.iter().map(describe).collect::<Vec<_>>().join("; ");
            (field.to_string(), messages)
        })
        .collect();

    ApiError::validation_error(message, Some(field_errors))
}

fn describe(error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => format!("failed {} check", error.code),
    }
}
