//! Process-wide configuration, read once at startup.
//!
//! | variable             | default                     |
//! |----------------------|-----------------------------|
//! | `SECRET_KEY`         | `secret-dev`                |
//! | `PORT`               | `3001`                      |
//! | `JOBLY_ENV`          | unset (`test` selects the test database) |
//! | `DATABASE_URL`       | `postgresql:///jobly`       |
//! | `TEST_DATABASE_URL`  | `postgresql:///jobly_test`  |
//! | `DATABASE_POOL_SIZE` | `16`                        |

use crate::error::{JoblyError, JoblyResult};
use std::fmt;

const DEFAULT_SECRET_KEY: &str = "secret-dev";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_DATABASE_URL: &str = "postgresql:///jobly";
const DEFAULT_TEST_DATABASE_URL: &str = "postgresql:///jobly_test";
const DEFAULT_POOL_SIZE: usize = 16;

#[derive(Clone)]
pub struct Config {
    /// HMAC secret for signing and verifying tokens.
    pub secret_key: String,
    pub port: u16,
    pub database_url: String,
    pub pool_size: usize,
    pub is_test: bool,
}

impl Config {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> JoblyResult<Self> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        tracing::debug!(
            target: "jobly.config",
            port = config.port,
            database_url = %config.database_url,
            pool_size = config.pool_size,
            is_test = config.is_test,
            "configuration loaded"
        );
        if config.uses_default_secret() && !config.is_test {
            tracing::warn!(target: "jobly.config", "SECRET_KEY not set, using the development secret");
        }
        Ok(config)
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> JoblyResult<Self> {
        let is_test = lookup("JOBLY_ENV").is_some_and(|env| env == "test");

        let secret_key = lookup("SECRET_KEY").unwrap_or_else(|| DEFAULT_SECRET_KEY.to_string());
        if secret_key.is_empty() {
            return Err(JoblyError::Config("SECRET_KEY cannot be empty".into()));
        }

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| JoblyError::Config(format!("invalid PORT '{raw}': {e}")))?,
            None => DEFAULT_PORT,
        };

        let database_url = if is_test {
            lookup("TEST_DATABASE_URL").unwrap_or_else(|| DEFAULT_TEST_DATABASE_URL.to_string())
        } else {
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
        };

        let pool_size = match lookup("DATABASE_POOL_SIZE") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(0) | Err(_) => {
                    return Err(JoblyError::Config(format!(
                        "invalid DATABASE_POOL_SIZE '{raw}'"
                    )));
                }
                Ok(n) => n,
            },
            None => DEFAULT_POOL_SIZE,
        };

        Ok(Self {
            secret_key,
            port,
            database_url,
            pool_size,
            is_test,
        })
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("secret_key", &"[REDACTED]")
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("pool_size", &self.pool_size)
            .field("is_test", &self.is_test)
            .finish()
    }
}
