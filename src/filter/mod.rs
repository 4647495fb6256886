pub mod error;
pub mod filter_where;
pub mod partial_update;
pub mod types;

pub use error::QueryError;
pub use filter_where::FilterWhere;
pub use partial_update::{sql_for_partial_update, PartialUpdate};
pub use types::*;
