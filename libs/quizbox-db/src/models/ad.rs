use chrono::{DateTime, Utc};
use quizbox_shared::ads::AdContent;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ad {
    pub id: i32,
    pub name: String,
    pub brand: String,
    pub status: String, // 'active' | 'inactive'
    pub slot: String,
    pub content: Json<AdContent>,
    pub impressions: i64,
    pub clicks: i64,
    pub ctr: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row reported by the cleanup scan.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BloatedAd {
    pub id: i32,
    pub name: String,
    pub slot: String,
    pub url_length: i32,
    pub is_data_url: bool,
}

impl BloatedAd {
    pub fn reason(&self) -> &'static str {
        if self.is_data_url {
            "inline data URL"
        } else {
            "oversized URL"
        }
    }
}
