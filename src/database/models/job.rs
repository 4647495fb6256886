use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::filter::SqlValue;

pub const JOBS_TABLE: &str = "jobs";

/// Columns returned by every job query, in `Job` field order
pub const JOB_SELECT: &str = "id, title, salary, equity, company_handle";

/// Logical field names whose column differs
pub const JOB_COLUMNS: &[(&str, &str)] = &[("companyHandle", "company_handle")];

/// Fields a patch may never touch
pub const IMMUTABLE_FIELDS: &[&str] = &["id", "companyHandle"];

/// A persisted job. Equity serializes as a decimal string ("0.1").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Body of `POST /jobs`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    #[validate(
        length(min = 1, message = "title must not be empty"),
        custom(function = "validate_title")
    )]
    pub title: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "salary must be a non-negative integer"))]
    pub salary: Option<i32>,
    #[serde(default, deserialize_with = "exact_decimal")]
    #[validate(custom(function = "validate_equity"))]
    pub equity: Option<Decimal>,
    #[validate(length(min = 1, max = 25, message = "companyHandle must be 1-25 characters"))]
    pub company_handle: String,
}

/// Body of `PATCH /jobs/:id`.
///
/// The outer `Option` records whether a field was sent at all; the inner one
/// carries an explicit `null`, which clears `salary` or `equity`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobPatch {
    #[serde(default, deserialize_with = "nullable")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub salary: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable_exact_decimal")]
    pub equity: Option<Option<Decimal>>,
}

impl JobPatch {
    /// Present fields as (logical name, value) pairs, in declaration order.
    pub fn changes(&self) -> Vec<(&'static str, SqlValue)> {
        let mut changes = Vec::new();
        if let Some(Some(title)) = &self.title {
            changes.push(("title", SqlValue::Text(title.clone())));
        }
        if let Some(salary) = self.salary {
            changes.push(("salary", SqlValue::Int(salary)));
        }
        if let Some(equity) = self.equity {
            changes.push(("equity", SqlValue::Decimal(equity)));
        }
        changes
    }
}

// Hand-written: the derive cannot see through the double Option.
impl Validate for JobPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        match &self.title {
            Some(None) => errors.add("title", field_error("required", "title cannot be null")),
            Some(Some(title)) if title.is_empty() => {
                errors.add("title", field_error("length", "title must not be empty"))
            }
            Some(Some(title)) => {
                if let Err(err) = validate_title(title) {
                    errors.add("title", err);
                }
            }
            None => {}
        }

        if let Some(Some(salary)) = self.salary {
            if salary < 0 {
                errors.add("salary", field_error("range", "salary must be a non-negative integer"));
            }
        }

        if let Some(Some(equity)) = &self.equity {
            if let Err(err) = validate_equity(equity) {
                errors.add("equity", err);
            }
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Postgres text cannot hold NUL
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.contains('\0') {
        return Err(field_error("characters", "title must not contain NUL characters"));
    }
    Ok(())
}

fn validate_equity(equity: &Decimal) -> Result<(), ValidationError> {
    if *equity < Decimal::ZERO || *equity > Decimal::ONE {
        return Err(field_error("range", "equity must be between 0 and 1"));
    }
    Ok(())
}

fn field_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Equity arrives as a JSON number or a numeric string
#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalInput {
    Text(String),
    Number(serde_json::Number),
}

/// Parse without rounding: digits beyond what `Decimal` holds are an error
fn parse_exact(input: DecimalInput) -> Result<Decimal, String> {
    match input {
        DecimalInput::Text(text) => Decimal::from_str_exact(text.trim())
            .map_err(|e| format!("invalid decimal \"{}\": {}", text, e)),
        DecimalInput::Number(number) => {
            let text = number.to_string();
            Decimal::from_str_exact(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .map_err(|e| format!("invalid decimal {}: {}", text, e))
        }
    }
}

fn exact_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<DecimalInput>::deserialize(deserializer)?
        .map(parse_exact)
        .transpose()
        .map_err(serde::de::Error::custom)
}

fn nullable_exact_decimal<'de, D>(deserializer: D) -> Result<Option<Option<Decimal>>, D::Error>
where
    D: Deserializer<'de>,
{
    exact_decimal(deserializer).map(Some)
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
