use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Optional listing constraints for `GET /jobs`. Absent fields add no predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFilter {
    /// Case-insensitive substring of the title
    pub title: Option<String>,
    /// Inclusive lower bound on salary
    pub min_salary: Option<i32>,
    /// `Some(true)` requires `equity > 0`; anything else leaves equity unconstrained
    pub has_equity: Option<bool>,
}

impl JobFilter {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.min_salary.is_none() && self.has_equity != Some(true)
    }
}

/// A value bound to a positional placeholder. Values never appear in SQL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Text(String),
    Int(Option<i32>),
    Decimal(Option<Decimal>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlValue>,
}

impl SqlResult {
    /// `WHERE <query>`, or an empty string when there are no predicates
    pub fn where_clause(&self) -> String {
        if self.query.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.query)
        }
    }
}
