//! # jobly
//!
//! Postgres data layer for a job board: companies and the jobs they post.
//!
//! ## Features
//!
//! - **Partial updates**: [`sql_for_partial_update`] turns a sparse payload into a safe
//!   `SET` list, translating JSON field names to column names
//! - **Search filters**: [`sql_for_filter`] turns query parameters into a `WHERE` condition
//!   with positional parameters
//! - **Models**: [`Company`] and [`Job`] run their statements on any [`GenericClient`]
//! - **Auth**: JWT verification plus the login / admin / self-or-admin guards a web layer
//!   runs before calling the models
//!
//! ## Example
//!
//! ```ignore
//! use jobly::{Company, Config, Fields, create_pool_from_config};
//!
//! let config = Config::from_env()?;
//! let pool = create_pool_from_config(&config)?;
//! let client = pool.get().await?;
//!
//! let filters = Fields::from_pairs([("name", "net"), ("minEmployees", "100")]);
//! let companies = Company::find(&client, &filters).await?;
//!
//! let patch = Fields::new().with("numEmployees", 250);
//! let updated = Company::update(&client, "c1", &patch).await?;
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod ident;
pub mod models;
pub mod row;
pub mod sql;

pub use auth::{
    AuthContext, AuthOutcome, Claims, TokenKeys, authenticate, require_admin, require_logged_in,
    require_self_or_admin,
};
pub use client::GenericClient;
pub use config::Config;
pub use error::{JoblyError, JoblyResult};
pub use ident::Ident;
pub use models::{
    COMPANY_COLUMNS, COMPANY_FILTERS, Company, CompanyDetail, JOB_COLUMNS, JOB_FILTERS, Job,
    JobSummary, NewCompany, NewJob,
};
pub use row::{FromRow, RowExt};
pub use sql::{
    ClauseResult, ColumnMap, FieldValue, Fields, FilterExpr, FilterMap, UnknownField,
    sql_for_filter, sql_for_partial_update,
};

#[cfg(feature = "pool")]
pub mod pool;
#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_from_config};
