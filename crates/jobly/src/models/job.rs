use super::log_sql;
use crate::client::GenericClient;
use crate::error::{JoblyError, JoblyResult};
use crate::row::{FromRow, RowExt, from_rows};
use crate::sql::{
    ColumnMap, FilterExpr, FilterMap, Fields, sql_for_filter, sql_for_partial_update,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// Fields a job update may touch. `id` and `companyHandle` are fixed at creation.
pub const JOB_COLUMNS: ColumnMap =
    ColumnMap::strict(&[("title", "title"), ("salary", "salary"), ("equity", "equity")]);

/// Search filters accepted by [`Job::find`].
pub const JOB_FILTERS: FilterMap = FilterMap::new(&[
    ("title", FilterExpr::Compare("LOWER(title) LIKE")),
    ("minSalary", FilterExpr::Compare("salary >=")),
    ("hasEquity", FilterExpr::Flag("equity != 0.0")),
]);

const JOB_SELECT: &str = "id, title, salary, equity, company_handle";

/// A job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// A job as listed under its company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

/// Input for [`Job::create`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl FromRow for Job {
    fn from_row(row: &Row) -> JoblyResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company_handle: row.try_get_column("company_handle")?,
        })
    }
}

impl FromRow for JobSummary {
    fn from_row(row: &Row) -> JoblyResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
        })
    }
}

impl Job {
    /// Insert a job. An unknown company handle is a foreign key violation.
    pub async fn create(conn: &impl GenericClient, job: &NewJob) -> JoblyResult<Job> {
        let sql = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {JOB_SELECT}"
        );
        log_sql("jobs.create", &sql, 4);
        let row = conn
            .query_one(
                &sql,
                &[&job.title, &job.salary, &job.equity, &job.company_handle],
            )
            .await?;
        Job::from_row(&row)
    }

    /// All jobs, ordered by title.
    pub async fn find_all(conn: &impl GenericClient) -> JoblyResult<Vec<Job>> {
        let sql = format!("SELECT {JOB_SELECT} FROM jobs ORDER BY title");
        log_sql("jobs.find_all", &sql, 0);
        let rows = conn.query(&sql, &[]).await?;
        from_rows(&rows)
    }

    /// Jobs posted by one company, ordered by id.
    pub async fn find_jobs_at_company(
        conn: &impl GenericClient,
        handle: &str,
    ) -> JoblyResult<Vec<JobSummary>> {
        let sql = "SELECT id, title, salary, equity FROM jobs WHERE company_handle = $1 ORDER BY id";
        log_sql("jobs.find_jobs_at_company", sql, 1);
        let rows = conn.query(sql, &[&handle]).await?;
        from_rows(&rows)
    }

    /// Jobs matching `filters` (see [`JOB_FILTERS`]), ordered by title.
    ///
    /// An empty filter set lists every job.
    pub async fn find(conn: &impl GenericClient, filters: &Fields) -> JoblyResult<Vec<Job>> {
        if filters.is_empty() {
            return Self::find_all(conn).await;
        }

        let filter = sql_for_filter(filters, &JOB_FILTERS)?;
        let sql = format!(
            "SELECT {JOB_SELECT} FROM jobs WHERE {} ORDER BY title",
            filter.clause
        );
        log_sql("jobs.find", &sql, filter.params.len());
        let rows = conn.query(&sql, &filter.param_refs()).await?;
        from_rows(&rows)
    }

    pub async fn get(conn: &impl GenericClient, id: i32) -> JoblyResult<Job> {
        let sql = format!("SELECT {JOB_SELECT} FROM jobs WHERE id = $1");
        log_sql("jobs.get", &sql, 1);
        match conn.query_opt(&sql, &[&id]).await? {
            Some(row) => Job::from_row(&row),
            None => Err(JoblyError::not_found(format!("No job: {id}"))),
        }
    }

    /// Partial update with any of `title`, `salary`, `equity`.
    pub async fn update(conn: &impl GenericClient, id: i32, data: &Fields) -> JoblyResult<Job> {
        let set = sql_for_partial_update(data, &JOB_COLUMNS)?;
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {JOB_SELECT}",
            set.clause,
            set.next_placeholder()
        );

        let mut params: Vec<&(dyn ToSql + Sync)> = set.param_refs();
        params.push(&id);

        log_sql("jobs.update", &sql, params.len());
        match conn.query_opt(&sql, &params).await? {
            Some(row) => Job::from_row(&row),
            None => Err(JoblyError::not_found(format!("No job: {id}"))),
        }
    }

    pub async fn remove(conn: &impl GenericClient, id: i32) -> JoblyResult<()> {
        let sql = "DELETE FROM jobs WHERE id = $1 RETURNING id";
        log_sql("jobs.remove", sql, 1);
        match conn.query_opt(sql, &[&id]).await? {
            Some(_) => Ok(()),
            None => Err(JoblyError::not_found(format!("No job: {id}"))),
        }
    }
}
