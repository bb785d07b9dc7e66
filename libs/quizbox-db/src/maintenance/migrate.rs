use anyhow::{Context, Result};
use sqlx::PgPool;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrationFileError {
    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{0} contains no SQL")]
    Empty(PathBuf),
}

pub fn read_migration(path: &Path) -> Result<String, MigrationFileError> {
    let sql = std::fs::read_to_string(path).map_err(|source| MigrationFileError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    if sql.trim().is_empty() {
        return Err(MigrationFileError::Empty(path.to_path_buf()));
    }
    Ok(sql)
}

/// Executes `sql` verbatim inside one transaction. Any failing statement rolls back the lot.
pub async fn run_sql(pool: &PgPool, sql: &str) -> Result<()> {
    let mut tx = pool.begin().await.context("Failed to open migration transaction")?;

    match sqlx::raw_sql(sql).execute(&mut *tx).await {
        Ok(_) => {
            tx.commit().await.context("Failed to commit migration")?;
            Ok(())
        }
        Err(e) => {
            tracing::warn!("Migration failed, rolling back: {}", e);
            tx.rollback().await.context("Failed to roll back migration")?;
            Err(e).context("Migration statement failed")
        }
    }
}
