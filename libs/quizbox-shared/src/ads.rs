use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Longest `content.url` an ad may carry before it is treated as bloated.
pub const MAX_AD_URL_LEN: usize = 10_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("content.url must not be an inline data URL")]
    InlineData,
    #[error("content.url is {0} characters, limit is 10000")]
    UrlTooLong(usize),
    #[error("unknown status '{0}'")]
    UnknownStatus(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AdStatus {
    #[default]
    Active,
    Inactive,
}

impl AdStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdStatus::Active => "active",
            AdStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for AdStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(AdStatus::Active),
            "inactive" => Ok(AdStatus::Inactive),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// Creative stored in the `content` JSON column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAd {
    pub name: String,
    pub brand: String,
    #[serde(default)]
    pub status: AdStatus,
    pub slot: String,
    pub content: AdContent,
}

impl NewAd {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Empty("name"));
        }
        if self.brand.trim().is_empty() {
            return Err(ValidationError::Empty("brand"));
        }
        if self.slot.trim().is_empty() {
            return Err(ValidationError::Empty("slot"));
        }
        if self.content.url.trim().is_empty() {
            return Err(ValidationError::Empty("content.url"));
        }
        if is_inline_data_url(&self.content.url) {
            return Err(ValidationError::InlineData);
        }
        if is_oversized_url(&self.content.url, MAX_AD_URL_LEN) {
            return Err(ValidationError::UrlTooLong(self.content.url.chars().count()));
        }
        Ok(())
    }
}

pub fn is_inline_data_url(url: &str) -> bool {
    url.starts_with("data:")
}

/// Length is counted in characters, which is what Postgres `length()` reports.
pub fn is_oversized_url(url: &str, threshold: usize) -> bool {
    url.chars().count() > threshold
}
