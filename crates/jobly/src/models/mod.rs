//! Company and job models.
//!
//! Every operation borrows a [`GenericClient`](crate::GenericClient), so callers can run
//! several of them inside one transaction.

mod company;
mod job;

pub use company::{COMPANY_COLUMNS, COMPANY_FILTERS, Company, CompanyDetail, NewCompany};
pub use job::{JOB_COLUMNS, JOB_FILTERS, Job, JobSummary, NewJob};

/// Emit the statement a model is about to run.
fn log_sql(tag: &str, sql: &str, param_count: usize) {
    tracing::debug!(target: "jobly.sql", tag, param_count, sql = %sql, "executing");
}
