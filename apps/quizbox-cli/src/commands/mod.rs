pub mod cleanup;
pub mod migrate;
pub mod populate;
pub mod seed;
pub mod smoke;
pub mod wipe;

use crate::error::CliError;
use console::style;
use quizbox_db::{DbConfig, sqlx::PgPool};

/// Scripts work one statement at a time; a couple of connections is plenty.
const SCRIPT_POOL_SIZE: u32 = 2;

/// Opens the script pool. `with_schema` applies the embedded migrations first.
pub async fn open_pool(config: &DbConfig, with_schema: bool) -> Result<PgPool, CliError> {
    println!("Database: {}", style(config.display_target()).cyan());
    let pool = if with_schema {
        quizbox_db::init_db(config, SCRIPT_POOL_SIZE).await
    } else {
        quizbox_db::connect(config, SCRIPT_POOL_SIZE).await
    };
    pool.map_err(CliError::from_connect)
}

pub fn pass(label: &str) {
    println!("  {} {}", style("PASS").green().bold(), label);
}

pub fn fail(label: &str, detail: &str) {
    println!("  {} {} ({})", style("FAIL").red().bold(), label, detail);
}
