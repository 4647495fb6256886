use serde_json::Value;
use std::collections::{HashMap, HashSet};
use validator::Validate;

use super::from_validation_errors;
use crate::database::models::job::{validate_title, JobPatch, NewJob, IMMUTABLE_FIELDS};
use crate::error::ApiError;
use crate::filter::JobFilter;

/// Query keys `GET /jobs` understands
pub const FILTER_KEYS: &[&str] = &["title", "minSalary", "hasEquity"];

/// createJob: title and companyHandle required, salary/equity optional
pub fn validate_create(payload: Value) -> Result<NewJob, ApiError> {
    let job: NewJob = serde_json::from_value(payload)
        .map_err(|e| ApiError::validation_error(format!("Invalid job: {}", e), None))?;

    job.validate()
        .map_err(|errors| from_validation_errors("Invalid job", &errors))?;

    Ok(job)
}

/// updateJob: any subset of title/salary/equity; id and companyHandle are refused.
///
/// An empty object passes here; the update translator rejects it.
pub fn validate_update(payload: Value) -> Result<JobPatch, ApiError> {
    let Value::Object(fields) = &payload else {
        return Err(ApiError::validation_error("Job update must be a JSON object", None));
    };

    let immutable: HashMap<String, String> = IMMUTABLE_FIELDS
        .iter()
        .filter(|field| fields.contains_key(**field))
        .map(|field| (field.to_string(), format!("{} cannot be changed", field)))
        .collect();
    if !immutable.is_empty() {
        return Err(ApiError::validation_error("Invalid job update", Some(immutable)));
    }

    let patch: JobPatch = serde_json::from_value(payload)
        .map_err(|e| ApiError::validation_error(format!("Invalid job update: {}", e), None))?;

    patch
        .validate()
        .map_err(|errors| from_validation_errors("Invalid job update", &errors))?;

    Ok(patch)
}

/// filterJobs: only the keys in [`FILTER_KEYS`], each at most once; anything
/// else is an error rather than silently ignored.
pub fn validate_filter(params: &[(String, String)]) -> Result<JobFilter, ApiError> {
    let mut filter = JobFilter::default();
    let mut field_errors = HashMap::new();
    let mut seen = HashSet::new();

    for (key, value) in params {
        if !seen.insert(key.as_str()) {
            field_errors.insert(key.clone(), format!("{} given more than once", key));
            continue;
        }

        match key.as_str() {
            "title" => match validate_title(value) {
                Ok(()) => filter.title = Some(value.clone()),
                Err(_) => {
                    field_errors.insert(key.clone(), "title must not contain NUL characters".to_string());
                }
            },
            "minSalary" => match value.parse::<i32>() {
                Ok(min) if min >= 0 => filter.min_salary = Some(min),
                _ => {
                    field_errors.insert(key.clone(), "minSalary must be a non-negative integer".to_string());
                }
            },
            "hasEquity" => match value.as_str() {
                "true" => filter.has_equity = Some(true),
                "false" => filter.has_equity = Some(false),
                _ => {
                    field_errors.insert(key.clone(), "hasEquity must be true or false".to_string());
                }
            },
            _ => {
                field_errors.insert(
                    key.clone(),
                    format!("unrecognized filter '{}'; expected one of {}", key, FILTER_KEYS.join(", ")),
                );
            }
        }
    }

    if !field_errors.is_empty() {
        return Err(ApiError::validation_error("Invalid job filter", Some(field_errors)));
    }

    Ok(filter)
}
