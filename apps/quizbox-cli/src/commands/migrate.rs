use super::open_pool;
use crate::error::CliError;
use console::style;
use quizbox_db::DbConfig;
use quizbox_db::maintenance::migrate::{read_migration, run_sql};
use std::path::Path;

pub async fn run(config: &DbConfig, file: &Path) -> Result<(), CliError> {
    let sql = read_migration(file)?;
    println!("Applying {} ({} bytes)", style(file.display()).bold(), sql.len());

    let pool = open_pool(config, false).await?;
    let result = run_sql(&pool, &sql).await;
    pool.close().await;

    match result {
        Ok(()) => {
            println!("{}", style("Migration committed.").green());
            Ok(())
        }
        Err(e) => {
            println!("{}", style("Migration rolled back.").red());
            Err(e.into())
        }
    }
}
