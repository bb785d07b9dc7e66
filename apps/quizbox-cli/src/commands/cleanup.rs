use super::open_pool;
use crate::error::CliError;
use console::style;
use quizbox_db::DbConfig;
use quizbox_db::maintenance::cleanup::{delete_ads, find_bloated_ads};

pub async fn run(config: &DbConfig, threshold: usize, delete: bool) -> Result<(), CliError> {
    let pool = open_pool(config, true).await?;
    let result = scan_and_delete(&pool, threshold, delete).await;
    pool.close().await;
    result
}

async fn scan_and_delete(
    pool: &quizbox_db::sqlx::PgPool,
    threshold: usize,
    delete: bool,
) -> Result<(), CliError> {
    let bloated = find_bloated_ads(pool, threshold).await?;
    if bloated.is_empty() {
        println!("{}", style("No ads with inline or oversized URLs.").green());
        return Ok(());
    }

    println!(
        "Found {} ads with inline data URLs or URLs over {} characters:",
        style(bloated.len()).yellow().bold(),
        threshold
    );
    for ad in &bloated {
        println!(
            "  #{:<6} {:<32} slot={:<20} url_length={:<8} {}",
            ad.id,
            ad.name,
            ad.slot,
            ad.url_length,
            ad.reason()
        );
    }

    if !delete {
        println!("Re-run with {} to remove them.", style("--delete").bold());
        return Ok(());
    }

    let ids: Vec<i32> = bloated.iter().map(|ad| ad.id).collect();
    let removed = delete_ads(pool, &ids).await?;
    println!("{}", style(format!("Deleted {} ads.", removed)).green());
    Ok(())
}
