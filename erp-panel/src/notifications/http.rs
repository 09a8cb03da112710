//! HTTP notification backend.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::backend::NotificationBackend;
use super::model::{Notification, UnreadCount};
use crate::error::ApiError;

const NOTIFICATIONS_PATH: &str = "api/notifications/";

/// Talks to `/api/notifications/*` with a bearer token.
#[derive(Debug, Clone)]
pub struct HttpNotificationBackend {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl HttpNotificationBackend {
    /// `base_url` is the API root, e.g. `https://erp.example.com`.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url).map_err(|_| ApiError::InvalidUrl(base_url.to_string()))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let base = base
            .join(NOTIFICATIONS_PATH)
            .map_err(|_| ApiError::InvalidUrl(base_url.to_string()))?;

        Ok(Self {
            client: Client::new(),
            base,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// Endpoint under `/api/notifications/`.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|_| ApiError::InvalidUrl(format!("{}{path}", self.base)))
    }

    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let token = self.token.as_deref().ok_or(ApiError::Unauthenticated)?;
        Ok(request.bearer_auth(token))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = self.authorize(request)?.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = if body.is_empty() {
            status.canonical_reason().unwrap_or("request failed").to_string()
        } else {
            body
        };
        Err(ApiError::http(status.as_u16(), message))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        log::debug!("GET {url}");
        let response = self.send(self.client.get(url)).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::parse_with_body(e.to_string(), body))
    }

    async fn post(&self, url: Url) -> Result<(), ApiError> {
        log::debug!("POST {url}");
        self.send(self.client.post(url)).await.map(|_| ())
    }
}

#[async_trait]
impl NotificationBackend for HttpNotificationBackend {
    fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    async fn unread_count(&self) -> Result<u64, ApiError> {
        let url = self.endpoint("unread-count")?;
        let count: UnreadCount = self.get_json(url).await?;
        Ok(count.count)
    }

    async fn list(&self, limit: usize) -> Result<Vec<Notification>, ApiError> {
        let mut url = self.base.clone();
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        self.get_json(url).await
    }

    async fn mark_read(&self, id: i64) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("{id}/read"))?;
        self.post(url).await
    }

    async fn mark_all_read(&self) -> Result<(), ApiError> {
        let url = self.endpoint("read-all")?;
        self.post(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let backend = HttpNotificationBackend::new("https://erp.example.com/painel", Some("t".into())).unwrap();
        assert_eq!(
            backend.endpoint("unread-count").unwrap().as_str(),
            "https://erp.example.com/painel/api/notifications/unread-count"
        );
        assert_eq!(
            backend.endpoint("7/read").unwrap().as_str(),
            "https://erp.example.com/painel/api/notifications/7/read"
        );
    }

    #[test]
    fn test_empty_token_is_unauthenticated() {
        let backend = HttpNotificationBackend::new("http://localhost:8000", Some(String::new())).unwrap();
        assert!(!backend.is_authenticated());
        assert!(HttpNotificationBackend::new("not a url", None).is_err());
    }
}
