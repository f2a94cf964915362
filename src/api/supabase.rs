//! Supabase (PostgREST) client for the `poses` table

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;

use super::{FetchError, PoseSource, SCHEMA_MISSING_CODES, require};
use crate::config::Config;
use crate::models::Pose;

/// Supabase REST client
pub struct SupabaseClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    /// Create a new client for a project URL and its anon key
    pub fn new(base_url: &str, anon_key: &str) -> Self {
        Self::with_client(Client::new(), base_url, anon_key)
    }

    /// Create a client on top of an existing `reqwest` client
    pub fn with_client(client: Client, base_url: &str, anon_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }

    /// Create a client from the configured project settings
    pub fn from_config(config: &Config) -> Result<Self> {
        let url = config
            .supabase_url
            .as_deref()
            .filter(|s| !s.is_empty())
            .context("Supabase URL is not configured (set supabase_url or POSESTUDIO_SUPABASE_URL)")?;
        let key = config
            .supabase_anon_key
            .as_deref()
            .filter(|s| !s.is_empty())
            .context(
                "Supabase anon key is not configured (set supabase_anon_key or POSESTUDIO_SUPABASE_ANON_KEY)",
            )?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_client(client, url, key))
    }

    /// Build the URL for a query against the `poses` table
    fn table_url(&self, query: &str) -> String {
        format!("{}/rest/v1/poses?{}", self.base_url, query)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
    }

    /// Turn a non-success response into a typed error
    async fn check(response: Response) -> Result<Response, FetchError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(classify_error(status, &body))
    }
}

impl PoseSource for SupabaseClient {
    async fn fetch_by_category(&self, category: &str) -> Result<Vec<Pose>, FetchError> {
        require(category, "Category is required")?;

        let url = self.table_url(&format!(
            "select=*&category=eq.{}&order=created_at.desc",
            urlencoding::encode(category)
        ));

        let response = self.request(Method::GET, &url).send().await?;
        let rows: Vec<PoseRow> = Self::check(response).await?.json().await?;

        Ok(rows.into_iter().map(PoseRow::into_pose).collect())
    }

    async fn fetch_by_id(&self, id: &str, category: &str) -> Result<Option<Pose>, FetchError> {
        require(id, "Pose ID and category are required")?;
        require(category, "Pose ID and category are required")?;

        let url = self.table_url(&format!(
            "select=*&id=eq.{}&category=eq.{}&limit=1",
            urlencoding::encode(id),
            urlencoding::encode(category)
        ));

        let response = self.request(Method::GET, &url).send().await?;
        let rows: Vec<PoseRow> = Self::check(response).await?.json().await?;

        Ok(rows.into_iter().next().map(PoseRow::into_pose))
    }

    async fn count_by_category(&self, category: &str) -> Result<usize, FetchError> {
        require(category, "Category is required")?;

        let url = self.table_url(&format!(
            "select=id&category=eq.{}",
            urlencoding::encode(category)
        ));

        let response = self
            .request(Method::HEAD, &url)
            .header("Prefer", "count=exact")
            .send()
            .await?;
        let response = Self::check(response).await?;

        response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range)
            .ok_or_else(|| FetchError::Decode("missing or invalid Content-Range header".to_string()))
    }
}

/// Error body returned by PostgREST
#[derive(Debug, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
}

/// Map an error status and body to a [`FetchError`]
fn classify_error(status: StatusCode, body: &str) -> FetchError {
    let parsed: Option<PostgrestError> = serde_json::from_str(body).ok();
    let (code, message) = parsed.map_or((None, None), |e| (e.code, e.message));

    if let Some(code) = code.filter(|c| SCHEMA_MISSING_CODES.contains(&c.as_str())) {
        return FetchError::SchemaMissing { code };
    }

    let message = message
        .filter(|m| !m.is_empty())
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| "Failed to fetch poses".to_string());

    if status == StatusCode::NOT_FOUND {
        FetchError::NotFound(message)
    } else {
        FetchError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

/// Total from a PostgREST `Content-Range` header (`0-24/3573` or `*/0`)
fn parse_content_range(value: &str) -> Option<usize> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}

/// Row identifiers may be UUIDs or serial integers
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RowId {
    Text(String),
    Number(i64),
}

impl RowId {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

/// A row of the `poses` table
#[derive(Debug, Deserialize)]
struct PoseRow {
    id: RowId,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "imageUrl", default)]
    image_url: Option<String>,
    category: String,
}

impl PoseRow {
    fn into_pose(self) -> Pose {
        Pose {
            id: self.id.into_string(),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            image_url: self.image_url.unwrap_or_default(),
            category: self.category,
        }
    }
}
