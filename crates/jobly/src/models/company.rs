use super::job::{Job, JobSummary};
use super::log_sql;
use crate::client::GenericClient;
use crate::error::{JoblyError, JoblyResult};
use crate::row::{FromRow, RowExt, from_rows};
use crate::sql::{
    ColumnMap, FilterExpr, FilterMap, Fields, sql_for_filter, sql_for_partial_update,
};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// Fields a company update may touch. The handle is the primary key and never changes.
pub const COMPANY_COLUMNS: ColumnMap = ColumnMap::strict(&[
    ("name", "name"),
    ("description", "description"),
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
]);

/// Search filters accepted by [`Company::find`].
pub const COMPANY_FILTERS: FilterMap = FilterMap::new(&[
    ("name", FilterExpr::Compare("LOWER(name) LIKE")),
    ("minEmployees", FilterExpr::Compare("num_employees >=")),
    ("maxEmployees", FilterExpr::Compare("num_employees <=")),
]);

const COMPANY_SELECT: &str = "handle, name, description, num_employees, logo_url";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A company together with the jobs it has posted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<JobSummary>,
}

/// Input for [`Company::create`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl FromRow for Company {
    fn from_row(row: &Row) -> JoblyResult<Self> {
        Ok(Self {
            handle: row.try_get_column("handle")?,
            name: row.try_get_column("name")?,
            description: row.try_get_column("description")?,
            num_employees: row.try_get_column("num_employees")?,
            logo_url: row.try_get_column("logo_url")?,
        })
    }
}

/// `minEmployees` must not exceed `maxEmployees`.
fn check_employee_range(filters: &Fields) -> JoblyResult<()> {
    let bound = |key: &str| -> JoblyResult<Option<i64>> {
        match filters.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_i64()
                .map(Some)
                .ok_or_else(|| JoblyError::invalid_input(format!("{key} must be an integer"))),
        }
    };

    if let (Some(min), Some(max)) = (bound("minEmployees")?, bound("maxEmployees")?) {
        if min > max {
            return Err(JoblyError::invalid_input(
                "minEmployees cannot be greater than maxEmployees",
            ));
        }
    }
    Ok(())
}

impl Company {
    /// Insert a company. A handle that is already taken is rejected.
    pub async fn create(conn: &impl GenericClient, company: &NewCompany) -> JoblyResult<Company> {
        let duplicate = conn
            .query_opt(
                "SELECT handle FROM companies WHERE handle = $1",
                &[&company.handle],
            )
            .await?;
        if duplicate.is_some() {
            return Err(JoblyError::invalid_input(format!(
                "Duplicate company: {}",
                company.handle
            )));
        }

        let sql = format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COMPANY_SELECT}"
        );
        log_sql("companies.create", &sql, 5);
        let row = conn
            .query_one(
                &sql,
                &[
                    &company.handle,
                    &company.name,
                    &company.description,
                    &company.num_employees,
                    &company.logo_url,
                ],
            )
            .await?;
        Company::from_row(&row)
    }

    /// All companies, ordered by name.
    pub async fn find_all(conn: &impl GenericClient) -> JoblyResult<Vec<Company>> {
        let sql = format!("SELECT {COMPANY_SELECT} FROM companies ORDER BY name");
        log_sql("companies.find_all", &sql, 0);
        let rows = conn.query(&sql, &[]).await?;
        from_rows(&rows)
    }

    /// Companies matching `filters` (see [`COMPANY_FILTERS`]), ordered by name.
    ///
    /// An empty filter set lists every company.
    pub async fn find(conn: &impl GenericClient, filters: &Fields) -> JoblyResult<Vec<Company>> {
        if filters.is_empty() {
            return Self::find_all(conn).await;
        }
        check_employee_range(filters)?;

        let filter = sql_for_filter(filters, &COMPANY_FILTERS)?;
        let sql = format!(
            "SELECT {COMPANY_SELECT} FROM companies WHERE {} ORDER BY name",
            filter.clause
        );
        log_sql("companies.find", &sql, filter.params.len());
        let rows = conn.query(&sql, &filter.param_refs()).await?;
        from_rows(&rows)
    }

    /// A company and its jobs.
    pub async fn get(conn: &impl GenericClient, handle: &str) -> JoblyResult<CompanyDetail> {
        let sql = format!("SELECT {COMPANY_SELECT} FROM companies WHERE handle = $1");
        log_sql("companies.get", &sql, 1);
        let row = conn
            .query_opt(&sql, &[&handle])
            .await?
            .ok_or_else(|| JoblyError::not_found(format!("No company: {handle}")))?;

        let company = Company::from_row(&row)?;
        let jobs = Job::find_jobs_at_company(conn, handle).await?;
        Ok(CompanyDetail { company, jobs })
    }

    /// Partial update with any of `name`, `description`, `numEmployees`, `logoUrl`.
    pub async fn update(
        conn: &impl GenericClient,
        handle: &str,
        data: &Fields,
    ) -> JoblyResult<Company> {
        let set = sql_for_partial_update(data, &COMPANY_COLUMNS)?;
        let sql = format!(
            "UPDATE companies SET {} WHERE handle = ${} RETURNING {COMPANY_SELECT}",
            set.clause,
            set.next_placeholder()
        );

        let mut params: Vec<&(dyn ToSql + Sync)> = set.param_refs();
        params.push(&handle);

        log_sql("companies.update", &sql, params.len());
        match conn.query_opt(&sql, &params).await? {
            Some(row) => Company::from_row(&row),
            None => Err(JoblyError::not_found(format!("No company: {handle}"))),
        }
    }

    pub async fn remove(conn: &impl GenericClient, handle: &str) -> JoblyResult<()> {
        let sql = "DELETE FROM companies WHERE handle = $1 RETURNING handle";
        log_sql("companies.remove", sql, 1);
        match conn.query_opt(sql, &[&handle]).await? {
            Some(_) => Ok(()),
            None => Err(JoblyError::not_found(format!("No company: {handle}"))),
        }
    }
}
