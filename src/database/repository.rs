use sqlx::PgPool;
use tracing::{debug, info};

use crate::database::manager::DatabaseError;
use crate::database::models::job::{Job, JobPatch, NewJob, JOBS_TABLE, JOB_COLUMNS, JOB_SELECT};
use crate::database::query_builder::QueryBuilder;
use crate::filter::{sql_for_partial_update, FilterWhere, JobFilter, SqlValue};

/// Job persistence. Every operation is a single statement against one row
/// (or one listing query); nothing here opens a transaction.
#[derive(Clone)]
pub struct JobRepository {
    pool: PgPool,
}

impl JobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Insert a job and return it with its generated id.
    ///
    /// A duplicate of an existing job, or a `company_handle` with no company,
    /// is rejected by the store and reported as a bad request.
    pub async fn create(&self, job: &NewJob) -> Result<Job, DatabaseError> {
        let sql = format!(
            "INSERT INTO {} (title, salary, equity, company_handle) VALUES ($1, $2, $3, $4) RETURNING {}",
            JOBS_TABLE, JOB_SELECT
        );

        let created = QueryBuilder::<Job>::new(sql)
            .bind(SqlValue::Text(job.title.clone()))
            .bind(SqlValue::Int(job.salary))
            .bind(SqlValue::Decimal(job.equity))
            .bind(SqlValue::Text(job.company_handle.clone()))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                DatabaseError::Duplicate(_) => {
                    DatabaseError::Duplicate(format!("Duplicate job: {}", job.title))
                }
                DatabaseError::InvalidReference(_) => {
                    DatabaseError::InvalidReference(format!("No company: {}", job.company_handle))
                }
                other => other,
            })?;

        info!(id = created.id, company = %created.company_handle, "Created job");
        Ok(created)
    }

    /// All jobs matching `filter`, ordered by title (id breaks ties).
    pub async fn find_all(&self, filter: &JobFilter) -> Result<Vec<Job>, DatabaseError> {
        let where_result = FilterWhere::generate(filter, 0);

        let sql = [
            format!("SELECT {} FROM {}", JOB_SELECT, JOBS_TABLE),
            where_result.where_clause(),
            "ORDER BY title, id".to_string(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        let jobs = QueryBuilder::<Job>::new(sql)
            .bind_all(where_result.params)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = jobs.len(), filtered = !filter.is_empty(), "Listed jobs");
        Ok(jobs)
    }

    pub async fn get(&self, id: i32) -> Result<Job, DatabaseError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", JOB_SELECT, JOBS_TABLE);

        QueryBuilder::<Job>::new(sql)
            .bind(SqlValue::Int(Some(id)))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No job: {}", id)))
    }

    /// Apply `patch` to job `id` and return the merged record.
    ///
    /// An empty patch fails before the store is touched, whatever the id.
    pub async fn update(&self, id: i32, patch: &JobPatch) -> Result<Job, DatabaseError> {
        let update = sql_for_partial_update(patch.changes(), JOB_COLUMNS)?;

        let sql = format!(
            "UPDATE {} SET {} WHERE id = ${} RETURNING {}",
            JOBS_TABLE, update.set_cols, update.id_index, JOB_SELECT
        );

        let updated = QueryBuilder::<Job>::new(sql)
            .bind_all(update.values)
            .bind(SqlValue::Int(Some(id)))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No job: {}", id)))?;

        info!(id, "Updated job");
        Ok(updated)
    }

    /// Delete job `id`. Removing an id that is already gone is NotFound.
    pub async fn remove(&self, id: i32) -> Result<(), DatabaseError> {
        let sql = format!("DELETE FROM {} WHERE id = $1 RETURNING id", JOBS_TABLE);

        sqlx::query_scalar::<_, i32>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No job: {}", id)))?;

        info!(id, "Removed job");
        Ok(())
    }
}
