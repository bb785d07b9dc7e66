use sqlx::PgPool;
use sqlx::types::Json;
use anyhow::{Context, Result};
use quizbox_shared::ads::{AdStatus, NewAd};
use crate::models::ad::Ad;

#[derive(Debug, Clone)]
pub struct AdRepository {
    pool: PgPool,
}

impl AdRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists ads, optionally narrowed to one slot and/or one status.
    pub async fn list(&self, slot: Option<&str>, status: Option<AdStatus>) -> Result<Vec<Ad>> {
        sqlx::query_as::<_, Ad>(
            r#"
            SELECT id, name, brand, status, slot, content, impressions, clicks, ctr, created_at, updated_at
            FROM ads
            WHERE ($1::text IS NULL OR slot = $1)
              AND ($2::text IS NULL OR status = $2)
            ORDER BY id ASC
            "#
        )
        .bind(slot)
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list ads")
    }

    pub async fn get(&self, id: i32) -> Result<Option<Ad>> {
        sqlx::query_as::<_, Ad>(
            r#"
            SELECT id, name, brand, status, slot, content, impressions, clicks, ctr, created_at, updated_at
            FROM ads
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch ad by ID")
    }

    pub async fn create(&self, ad: &NewAd) -> Result<Ad> {
        sqlx::query_as::<_, Ad>(
            r#"
            INSERT INTO ads (name, brand, status, slot, content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, brand, status, slot, content, impressions, clicks, ctr, created_at, updated_at
            "#
        )
        .bind(ad.name.trim())
        .bind(ad.brand.trim())
        .bind(ad.status.as_str())
        .bind(ad.slot.trim())
        .bind(Json(&ad.content))
        .fetch_one(&self.pool)
        .await
        .context("Failed to create ad")
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM ads WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete ad")?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn record_impression(&self, id: i32) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE ads
            SET impressions = impressions + 1,
                ctr = round(clicks::numeric * 100 / (impressions + 1), 2)::float8,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to record ad impression")?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn record_click(&self, id: i32) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE ads
            SET clicks = clicks + 1,
                ctr = COALESCE(round((clicks + 1)::numeric * 100 / NULLIF(impressions, 0), 2)::float8, 0),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to record ad click")?;

        Ok(result.rows_affected() > 0)
    }
}
