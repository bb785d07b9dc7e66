use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbConfigError {
    #[error("DATABASE_URL must start with postgres:// or postgresql://")]
    BadScheme,
    #[error("DB_PORT '{0}' is not a valid port")]
    BadPort(String),
    #[error("invalid connection string: {0}")]
    Invalid(#[from] sqlx::Error),
}

/// Where to connect: either a full `DATABASE_URL` or the discrete `DB_*` variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbConfig {
    Url(String),
    Parts {
        host: String,
        port: u16,
        user: String,
        password: String,
        database: String,
        ssl: bool,
    },
}

impl DbConfig {
    pub fn from_env() -> Result<Self, DbConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DbConfigError> {
        if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.trim().is_empty()) {
            let url = url.trim().to_string();
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                return Err(DbConfigError::BadScheme);
            }
            return Ok(DbConfig::Url(url));
        }

        let port = match lookup("DB_PORT") {
            Some(p) => p.trim().parse().map_err(|_| DbConfigError::BadPort(p))?,
            None => 5432,
        };
        let ssl = lookup("DB_SSL")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "require"))
            .unwrap_or(false);

        Ok(DbConfig::Parts {
            host: lookup("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
            port,
            user: lookup("DB_USER").unwrap_or_else(|| "postgres".to_string()),
            password: lookup("DB_PASSWORD").unwrap_or_default(),
            database: lookup("DB_NAME").unwrap_or_else(|| "quizbox".to_string()),
            ssl,
        })
    }

    pub fn connect_options(&self) -> Result<PgConnectOptions, DbConfigError> {
        match self {
            DbConfig::Url(url) => Ok(PgConnectOptions::from_str(url)?),
            DbConfig::Parts {
                host,
                port,
                user,
                password,
                database,
                ssl,
            } => Ok(PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(user)
                .password(password)
                .database(database)
                .ssl_mode(if *ssl { PgSslMode::Require } else { PgSslMode::Prefer })),
        }
    }

    /// Connection target with the password masked, safe to log.
    pub fn display_target(&self) -> String {
        match self {
            DbConfig::Url(url) => redact_url(url),
            DbConfig::Parts {
                host,
                port,
                user,
                database,
                ..
            } => format!("postgres://{}@{}:{}/{}", user, host, port, database),
        }
    }
}

fn redact_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    let rest = &url[scheme_end + 3..];
    let Some(at) = rest.rfind('@') else {
        return url.to_string();
    };
    let userinfo = &rest[..at];
    let user = userinfo.split(':').next().unwrap_or("");
    if user.len() == userinfo.len() {
        return url.to_string();
    }
    format!("{}{}:***@{}", &url[..scheme_end + 3], user, &rest[at + 1..])
}

/// Opens a pool without touching the schema.
pub async fn connect(config: &DbConfig, max_connections: u32) -> Result<PgPool> {
    let options = config.connect_options()?;

    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to connect to PostgreSQL at {}", config.display_target()))
}

pub async fn init_db(config: &DbConfig, max_connections: u32) -> Result<PgPool> {
    let pool = connect(config, max_connections).await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    tracing::debug!("Schema migrations applied on {}", config.display_target());
    Ok(pool)
}
