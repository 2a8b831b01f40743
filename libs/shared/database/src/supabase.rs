use anyhow::{anyhow, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use shared_config::AppConfig;

/// Thin client over the hosted PostgREST store. One instance per service,
/// built from the injected config; all requests use the service key.
#[derive(Clone)]
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.supabase_url.clone(),
            service_key: config.supabase_service_key.clone(),
        }
    }

    fn get_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        if let Ok(key) = HeaderValue::from_str(&self.service_key) {
            headers.insert("apikey", key);
        }
        if let Ok(bearer) = HeaderValue::from_str(&format!("Bearer {}", self.service_key)) {
            headers.insert(AUTHORIZATION, bearer);
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        headers
    }

    pub async fn request<T>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.request_with_headers(method, path, body, None).await
    }

    pub async fn request_with_headers<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        extra_headers: Option<HeaderMap>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("Making request to {}", url);

        let mut headers = self.get_headers();
        if let Some(extra) = extra_headers {
            headers.extend(extra);
        }

        let mut req = self.client.request(method, &url).headers(headers);

        if let Some(body_data) = body {
            req = req.json(&body_data);
        }

        let response = req.send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            error!("Store error ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 | 403 => anyhow!("Store authentication error: {}", error_text),
                404 => anyhow!("Resource not found: {}", error_text),
                _ => anyhow!("Store error ({}): {}", status, error_text),
            });
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }

    /// Fetch rows from a table with a raw PostgREST query string
    /// (exact-match filters, e.g. `email=eq.a%40x.com`).
    pub async fn select(&self, table: &str, query: &str) -> Result<Vec<Value>> {
        let path = if query.is_empty() {
            format!("/rest/v1/{}", table)
        } else {
            format!("/rest/v1/{}?{}", table, query)
        };
        self.request(Method::GET, &path, None).await
    }

    /// Insert a row and return its stored representation.
    pub async fn insert(&self, table: &str, row: Value) -> Result<Vec<Value>> {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let path = format!("/rest/v1/{}", table);
        self.request_with_headers(Method::POST, &path, Some(row), Some(headers))
            .await
    }

    /// Conditional insert keyed on a unique column set. The store resolves
    /// duplicates atomically; an empty result means the row already existed
    /// and nothing was written.
    pub async fn insert_unique(
        &self,
        table: &str,
        on_conflict: &str,
        row: Value,
    ) -> Result<Option<Value>> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Prefer",
            HeaderValue::from_static("return=representation,resolution=ignore-duplicates"),
        );

        let path = format!("/rest/v1/{}?on_conflict={}", table, on_conflict);
        let result: Vec<Value> = self
            .request_with_headers(Method::POST, &path, Some(row), Some(headers))
            .await?;

        Ok(result.into_iter().next())
    }

    /// Insert-or-update keyed on a unique column set, returning the stored row.
    pub async fn upsert(&self, table: &str, on_conflict: &str, row: Value) -> Result<Vec<Value>> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Prefer",
            HeaderValue::from_static("return=representation,resolution=merge-duplicates"),
        );

        let path = format!("/rest/v1/{}?on_conflict={}", table, on_conflict);
        self.request_with_headers(Method::POST, &path, Some(row), Some(headers))
            .await
    }

    /// Patch rows matching a filter, returning the updated rows.
    pub async fn update(&self, table: &str, query: &str, patch: Value) -> Result<Vec<Value>> {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let path = format!("/rest/v1/{}?{}", table, query);
        self.request_with_headers(Method::PATCH, &path, Some(patch), Some(headers))
            .await
    }

    /// Delete rows matching a filter, returning the deleted rows.
    pub async fn delete(&self, table: &str, query: &str) -> Result<Vec<Value>> {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let path = format!("/rest/v1/{}?{}", table, query);
        self.request_with_headers(Method::DELETE, &path, None, Some(headers))
            .await
    }
}
