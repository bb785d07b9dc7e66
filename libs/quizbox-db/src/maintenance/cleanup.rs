use anyhow::{Context, Result};
use quizbox_shared::ads::MAX_AD_URL_LEN;
use sqlx::PgPool;
use crate::models::ad::BloatedAd;

pub const DEFAULT_THRESHOLD: usize = MAX_AD_URL_LEN;

/// Ads whose `content.url` is an inline `data:` URL or longer than `threshold` characters.
pub async fn find_bloated_ads(pool: &PgPool, threshold: usize) -> Result<Vec<BloatedAd>> {
    let threshold = i32::try_from(threshold).context("Threshold does not fit in a Postgres integer")?;

    sqlx::query_as::<_, BloatedAd>(
        r#"
        SELECT id,
               name,
               slot,
               COALESCE(length(content->>'url'), 0) AS url_length,
               COALESCE(content->>'url' LIKE 'data:%', FALSE) AS is_data_url
        FROM ads
        WHERE content->>'url' LIKE 'data:%'
           OR length(content->>'url') > $1
        ORDER BY id ASC
        "#,
    )
    .bind(threshold)
    .fetch_all(pool)
    .await
    .context("Failed to scan ads for bloated URLs")
}

/// Deletes exactly the given ids and returns how many rows went away.
pub async fn delete_ads(pool: &PgPool, ids: &[i32]) -> Result<u64> {
    if ids.is_empty() {
        return Ok(0);
    }

    let result = sqlx::query("DELETE FROM ads WHERE id = ANY($1)")
        .bind(ids)
        .execute(pool)
        .await
        .context("Failed to delete bloated ads")?;

    tracing::info!("Deleted {} of {} bloated ads", result.rows_affected(), ids.len());
    Ok(result.rows_affected())
}
