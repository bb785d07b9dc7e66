//! Shared setup for the tests that need a live database.
//!
//! Each helper returns `None` unless `TEST_DATABASE_URL` is set, and the tests return early.

#![allow(dead_code)]

use quizbox_db::{DbConfig, init_db};
use quizbox_shared::ads::{AdContent, AdStatus, NewAd};
use sqlx::PgPool;

pub async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = init_db(&DbConfig::Url(url), 2)
        .await
        .expect("TEST_DATABASE_URL should be reachable");
    Some(pool)
}

pub fn unique(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}_{}", prefix, nanos)
}

pub fn ad(name: &str, url: &str) -> NewAd {
    NewAd {
        name: name.to_string(),
        brand: "Test".into(),
        status: AdStatus::Active,
        slot: "sidebar".into(),
        content: AdContent {
            kind: "image".into(),
            url: url.to_string(),
            link: "https://example.com".into(),
            headline: None,
            description: None,
        },
    }
}
