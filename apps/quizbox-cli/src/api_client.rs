use anyhow::{Context, Result};
use quizbox_db::models::ad::Ad;
use quizbox_shared::ads::NewAd;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issues a GET and reports only the status code.
    pub async fn get_status(&self, path: &str, with_token: bool) -> Result<StatusCode> {
        let mut req = self.client.get(self.url(path));
        if with_token {
            if let Some(token) = &self.token {
                req = req.bearer_auth(token);
            }
        }
        let resp = req
            .send()
            .await
            .with_context(|| format!("GET {} failed", path))?;
        Ok(resp.status())
    }

    pub async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T> {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .with_context(|| format!("GET {} failed", path))?;

        if !resp.status().is_success() {
            return Err(anyhow::anyhow!("GET {} returned {}", path, resp.status()));
        }

        Ok(resp.json().await?)
    }

    pub async fn create_ad(&self, ad: &NewAd) -> Result<Ad> {
        let mut req = self.client.post(self.url("/api/ads")).json(ad);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req.send().await.context("POST /api/ads failed")?;

        if resp.status() != StatusCode::CREATED {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("POST /api/ads returned {}: {}", status, body.trim()));
        }

        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:3000/", Some("  ".into()));
        assert_eq!(client.url("/health"), "http://localhost:3000/health");
        assert!(!client.has_token());
    }
}
