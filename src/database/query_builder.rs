use sqlx::{
    postgres::{PgArguments, PgRow},
    query::QueryAs,
    FromRow, PgPool, Postgres,
};

use crate::database::manager::DatabaseError;
use crate::filter::SqlValue;

/// Parameterized statement whose rows decode into `T`
pub struct QueryBuilder<T> {
    sql: String,
    params: Vec<SqlValue>,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> QueryBuilder<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: vec![],
            _phantom: std::marker::PhantomData,
        }
    }

    /// Bind the next positional parameter
    pub fn bind(mut self, value: SqlValue) -> Self {
        self.params.push(value);
        self
    }

    pub fn bind_all(mut self, values: impl IntoIterator<Item = SqlValue>) -> Self {
        self.params.extend(values);
        self
    }

    pub async fn fetch_all(&self, pool: &PgPool) -> Result<Vec<T>, DatabaseError> {
        let rows = self.query().fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn fetch_one(&self, pool: &PgPool) -> Result<T, DatabaseError> {
        let row = self.query().fetch_one(pool).await?;
        Ok(row)
    }

    pub async fn fetch_optional(&self, pool: &PgPool) -> Result<Option<T>, DatabaseError> {
        let row = self.query().fetch_optional(pool).await?;
        Ok(row)
    }

    fn query(&self) -> QueryAs<'_, Postgres, T, PgArguments> {
        tracing::debug!(sql = %self.sql, params = ?self.params, "Executing query");
        let mut q = sqlx::query_as::<_, T>(&self.sql);
        for p in self.params.iter() {
            q = bind_param_query_as(q, p);
        }
        q
    }
}

fn bind_param_query_as<'q, O>(
    q: QueryAs<'q, Postgres, O, PgArguments>,
    v: &'q SqlValue,
) -> QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    match v {
        SqlValue::Text(s) => q.bind(s.as_str()),
        SqlValue::Int(i) => q.bind(*i),
        SqlValue::Decimal(d) => q.bind(*d),
    }
}
