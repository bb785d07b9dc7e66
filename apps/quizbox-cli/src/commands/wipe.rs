use super::open_pool;
use crate::error::CliError;
use console::style;
use quizbox_db::DbConfig;
use quizbox_db::maintenance::wipe::{check_wipe_allowed, export_and_wipe};
use std::path::Path;

pub async fn run(config: &DbConfig, out_dir: &Path, confirm: Option<&str>) -> Result<(), CliError> {
    check_wipe_allowed(&config.display_target(), confirm)?;

    let pool = open_pool(config, true).await?;
    let result = export_and_wipe(&pool, out_dir).await;
    pool.close().await;
    let report = result?;

    println!("{}", style("Backup written:").bold());
    println!("  {} ({} rows)", report.ads_file.display(), report.ads_count);
    println!("  {} ({} rows)", report.quizzes_file.display(), report.quizzes_count);
    println!("{}", style("ads and quizzes truncated.").green());
    Ok(())
}
