//! Job repository.

use async_trait::async_trait;
use jobly_core::{Job, JobFilter, JobId, JobUpdate, NewJob};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::sql::{ColumnAliases, SqlValue, sql_for_partial_update};
use crate::{DbError, DbResult};

const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

/// Database row for jobs.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct JobRow {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Job {
            id: JobId::new(row.id),
            title: row.title,
            salary: row.salary,
            equity: row.equity,
            company_handle: row.company_handle,
        }
    }
}

#[async_trait]
pub trait JobRepo: Send + Sync {
    /// Insert a job. Fails with [`DbError::Duplicate`] when the company
    /// already has a job with this title.
    async fn create(&self, job: &NewJob) -> DbResult<Job>;
    /// Jobs matching every set filter, ordered by company handle then title.
    async fn find_all(&self, filter: &JobFilter) -> DbResult<Vec<Job>>;
    async fn get(&self, id: JobId) -> DbResult<Job>;
    /// Apply a partial update and return the resulting row.
    async fn update(&self, id: JobId, changes: &JobUpdate) -> DbResult<Job>;
    async fn remove(&self, id: JobId) -> DbResult<()>;
    /// Round-trip to the store.
    async fn ping(&self) -> DbResult<()>;
}

/// PostgreSQL implementation of JobRepo.
pub struct PgJobRepo {
    pool: PgPool,
}

impl PgJobRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepo for PgJobRepo {
    async fn create(&self, job: &NewJob) -> DbResult<Job> {
        // Not atomic with the insert below; concurrent creates can both pass.
        let existing = sqlx::query_scalar::<_, i32>(
            "SELECT 1 FROM jobs WHERE title = $1 AND company_handle = $2",
        )
        .bind(&job.title)
        .bind(&job.company_handle)
        .fetch_optional(&self.pool)
        .await?;

        if existing.is_some() {
            return Err(DbError::Duplicate(format!(
                "job with title {} at company {}",
                job.title, job.company_handle
            )));
        }

        let row = sqlx::query_as::<_, JobRow>(&format!(
            r#"
            INSERT INTO jobs (title, salary, equity, company_handle)
            VALUES ($1, $2, $3, $4)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(&job.title)
        .bind(job.salary)
        .bind(job.equity)
        .bind(&job.company_handle)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    async fn find_all(&self, filter: &JobFilter) -> DbResult<Vec<Job>> {
        let rows = select_jobs(filter)
            .build_query_as::<JobRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn get(&self, id: JobId) -> DbResult<Job> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(format!("job {}", id)))?;
        Ok(row.into())
    }

    async fn update(&self, id: JobId, changes: &JobUpdate) -> DbResult<Job> {
        let update = sql_for_partial_update(update_fields(changes), &ColumnAliases::new())?;
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {JOB_COLUMNS}",
            update.set_clause,
            update.next_placeholder()
        );

        let mut query = sqlx::query_as::<_, JobRow>(&sql);
        for value in update.values {
            query = value.bind_to(query);
        }

        let row = query
            .bind(id.as_i32())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound(format!("job {}", id)))?;
        Ok(row.into())
    }

    async fn remove(&self, id: JobId) -> DbResult<()> {
        sqlx::query_scalar::<_, i32>("DELETE FROM jobs WHERE id = $1 RETURNING id")
            .bind(id.as_i32())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound(format!("job {}", id)))?;
        Ok(())
    }

    async fn ping(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Build the listing query for `filter`. Every filter value is bound.
fn select_jobs(filter: &JobFilter) -> QueryBuilder<'static, Postgres> {
    let mut query_builder = QueryBuilder::new(format!("SELECT {JOB_COLUMNS} FROM jobs"));
    let mut conjunction = " WHERE ";

    if let Some(title) = &filter.title_like {
        query_builder
            .push(conjunction)
            .push("title ILIKE ")
            .push_bind(format!("%{}%", escape_like(title)));
        conjunction = " AND ";
    }
    if let Some(min_salary) = filter.min_salary {
        query_builder
            .push(conjunction)
            .push("salary >= ")
            .push_bind(min_salary);
        conjunction = " AND ";
    }
    if filter.has_equity == Some(true) {
        query_builder.push(conjunction).push("equity > 0");
    }

    query_builder.push(" ORDER BY company_handle, title");
    query_builder
}

/// Supplied fields of `changes`, in column order.
fn update_fields(changes: &JobUpdate) -> Vec<(&'static str, SqlValue)> {
    let mut fields = Vec::new();
    if let Some(title) = &changes.title {
        fields.push(("title", SqlValue::Text(Some(title.clone()))));
    }
    if let Some(salary) = changes.salary {
        fields.push(("salary", SqlValue::Int(salary)));
    }
    if let Some(equity) = changes.equity {
        fields.push(("equity", SqlValue::Numeric(equity)));
    }
    fields
}

/// Escape LIKE metacharacters so the pattern matches a literal substring.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
