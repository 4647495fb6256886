use super::error::QueryError;
use super::types::SqlValue;

/// SET fragment for a single-row UPDATE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialUpdate {
    /// `"col1"=$1, "col2"=$2, ...`
    pub set_cols: String,
    /// Bound values, parallel to the placeholders in `set_cols`
    pub values: Vec<SqlValue>,
    /// Placeholder index reserved for the row id in the caller's WHERE clause
    pub id_index: usize,
}

/// Build the SET clause for an UPDATE from a sparse set of changes.
///
/// `changes` pairs a logical field name with its new value; placeholders are
/// assigned in iteration order. `column_map` renames logical fields whose
/// column differs (`companyHandle` -> `company_handle`); unmapped fields are
/// used as column names unchanged.
///
/// Fails with [`QueryError::NoData`] when `changes` is empty.
pub fn sql_for_partial_update<'a, I>(
    changes: I,
    column_map: &[(&str, &str)],
) -> Result<PartialUpdate, QueryError>
where
    I: IntoIterator<Item = (&'a str, SqlValue)>,
{
    let mut cols = Vec::new();
    let mut values = Vec::new();

    for (field, value) in changes {
        let column = column_map
            .iter()
            .find(|(logical, _)| *logical == field)
            .map(|(_, column)| *column)
            .unwrap_or(field);
        validate_column(column)?;

        values.push(value);
        cols.push(format!("\"{}\"=${}", column, values.len()));
    }

    if values.is_empty() {
        return Err(QueryError::NoData);
    }

    Ok(PartialUpdate {
        set_cols: cols.join(", "),
        id_index: values.len() + 1,
        values,
    })
}

fn validate_column(column: &str) -> Result<(), QueryError> {
    let mut chars = column.chars();
    let valid_start = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(QueryError::InvalidColumn(column.to_string()));
    }
    Ok(())
}
