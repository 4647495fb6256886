use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A partial update was requested with nothing to change
    #[error("No data")]
    NoData,

    #[error("Invalid column name: {0}")]
    InvalidColumn(String),
}
