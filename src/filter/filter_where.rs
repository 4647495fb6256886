use super::types::{JobFilter, SqlResult, SqlValue};

/// Accumulates one predicate per present criterion and joins them with AND.
pub struct FilterWhere {
    param_values: Vec<SqlValue>,
    param_index: usize,
    conditions: Vec<String>,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
            conditions: vec![],
        }
    }

    /// Translate `filter` into a predicate string and its bound values.
    ///
    /// Placeholders are numbered from `starting_param_index + 1`. When no
    /// criterion is present the query is empty and the caller must omit
    /// `WHERE` altogether.
    pub fn generate(filter: &JobFilter, starting_param_index: usize) -> SqlResult {
        Self::new(starting_param_index).build(filter)
    }

    fn build(mut self, filter: &JobFilter) -> SqlResult {
        if let Some(title) = &filter.title {
            let placeholder = self.param(SqlValue::Text(format!("%{}%", escape_like(title))));
            self.conditions.push(format!("\"title\" ILIKE {}", placeholder));
        }

        if let Some(min_salary) = filter.min_salary {
            let placeholder = self.param(SqlValue::Int(Some(min_salary)));
            self.conditions.push(format!("\"salary\" >= {}", placeholder));
        }

        // NUMERIC comparison; NULL equity never matches
        if filter.has_equity == Some(true) {
            self.conditions.push("\"equity\" > 0".to_string());
        }

        tracing::debug!(conditions = ?self.conditions, "Built job filter");

        SqlResult {
            query: self.conditions.join(" AND "),
            params: self.param_values,
        }
    }

    fn param(&mut self, value: SqlValue) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}

/// Escape LIKE wildcards so user input matches literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_criteria_yields_no_where_clause() {
        let result = FilterWhere::generate(&JobFilter::default(), 0);
        assert_eq!(result.query, "");
        assert!(result.params.is_empty());
        assert_eq!(result.where_clause(), "");
    }

    #[test]
    fn has_equity_false_adds_nothing() {
        let filter = JobFilter { has_equity: Some(false), ..Default::default() };
        let result = FilterWhere::generate(&filter, 0);
        assert_eq!(result.where_clause(), "");
    }

    #[test]
    fn title_is_bound_as_substring_pattern() {
        let filter = JobFilter { title: Some("Engineer".into()), ..Default::default() };
        let result = FilterWhere::generate(&filter, 0);
        assert_eq!(result.query, "\"title\" ILIKE $1");
        assert_eq!(result.params, vec![SqlValue::Text("%Engineer%".into())]);
    }

    #[test]
    fn title_wildcards_are_escaped() {
        let filter = JobFilter { title: Some("100%_off\\".into()), ..Default::default() };
        let result = FilterWhere::generate(&filter, 0);
        assert_eq!(result.params, vec![SqlValue::Text("%100\\%\\_off\\\\%".into())]);
    }

    #[test]
    fn criteria_combine_with_and() {
        let filter = JobFilter {
            title: Some("dev".into()),
            min_salary: Some(20000),
            has_equity: Some(true),
        };
        let result = FilterWhere::generate(&filter, 0);
        assert_eq!(
            result.where_clause(),
            "WHERE \"title\" ILIKE $1 AND \"salary\" >= $2 AND \"equity\" > 0"
        );
        assert_eq!(
            result.params,
            vec![SqlValue::Text("%dev%".into()), SqlValue::Int(Some(20000))]
        );
    }

    #[test]
    fn placeholders_continue_from_starting_index() {
        let filter = JobFilter { min_salary: Some(1), ..Default::default() };
        let result = FilterWhere::generate(&filter, 3);
        assert_eq!(result.query, "\"salary\" >= $4");
    }

    #[test]
    fn hostile_title_never_reaches_sql_text() {
        let filter = JobFilter { title: Some("'; DROP TABLE jobs; --".into()), ..Default::default() };
        let result = FilterWhere::generate(&filter, 0);
        assert!(!result.query.contains("DROP"));
    }
}
