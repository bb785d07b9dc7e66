use super::open_pool;
use crate::error::CliError;
use console::style;
use quizbox_db::DbConfig;
use quizbox_db::maintenance::seed::seed_quizzes;

pub async fn run(config: &DbConfig) -> Result<(), CliError> {
    let pool = open_pool(config, true).await?;
    let result = seed_quizzes(&pool).await;
    pool.close().await;

    let slugs = result?;
    println!("{}", style(format!("Seeded {} quizzes:", slugs.len())).green());
    for slug in slugs {
        println!("  /quiz/{}", slug);
    }
    Ok(())
}
