//! Supabase / PostgREST store.
//!
//! Maps each store operation to one HTTP round trip against
//! `{supabase_url}/rest/v1/{table}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use tracing::debug;

use super::ScheduleStore;
use crate::config::RatibaConfig;
use crate::error::{RatibaError, RatibaResult};
use crate::schedule::{Schedule, ScheduleDraft, ScheduleId, SchedulePatch};

const USER_AGENT: &str = concat!("ratiba/", env!("CARGO_PKG_VERSION"));

pub struct PostgrestStore {
    http: reqwest::Client,
    table_url: String,
    api_key: String,
}

/// Error body PostgREST sends with non-2xx responses.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

impl PostgrestStore {
    pub fn new(config: &RatibaConfig) -> RatibaResult<Self> {
        let (url, key) = config.credentials()?;

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(PostgrestStore {
            http,
            table_url: table_url(url, &config.table),
            api_key: key.to_string(),
        })
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.http
            .request(method, &self.table_url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

#[async_trait]
impl ScheduleStore for PostgrestStore {
    async fn list(&self) -> RatibaResult<Vec<Schedule>> {
        debug!("GET {}", self.table_url);
        let resp = self
            .request(Method::GET)
            .query(&[("select", "*"), ("order", "start_time.asc")])
            .send()
            .await?;

        Ok(check(resp).await?.json().await?)
    }

    async fn insert(&self, draft: &ScheduleDraft) -> RatibaResult<Schedule> {
        debug!("POST {} ({})", self.table_url, draft.title);
        let resp = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(&[draft])
            .send()
            .await?;

        let rows: Vec<Schedule> = check(resp).await?.json().await?;
        rows.into_iter().next().ok_or(RatibaError::EmptyInsert)
    }

    async fn update(&self, id: &ScheduleId, patch: &SchedulePatch) -> RatibaResult<()> {
        debug!("PATCH {} id={}", self.table_url, id);
        let resp = self
            .request(Method::PATCH)
            .query(&[("id", id_filter(id))])
            .json(patch)
            .send()
            .await?;

        check(resp).await?;
        Ok(())
    }

    async fn delete(&self, id: &ScheduleId) -> RatibaResult<()> {
        debug!("DELETE {} id={}", self.table_url, id);
        let resp = self
            .request(Method::DELETE)
            .query(&[("id", id_filter(id))])
            .send()
            .await?;

        check(resp).await?;
        Ok(())
    }
}

fn table_url(base: &str, table: &str) -> String {
    format!("{}/rest/v1/{}", base.trim_end_matches('/'), table)
}

fn id_filter(id: &ScheduleId) -> String {
    format!("eq.{}", id)
}

/// Turn a non-2xx response into `RatibaError::Store`.
async fn check(resp: Response) -> RatibaResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(RatibaError::Store {
        status: status.as_u16(),
        message: error_message(&body, status.canonical_reason()),
    })
}

fn error_message(body: &str, reason: Option<&str>) -> String {
    match serde_json::from_str::<PostgrestError>(body) {
        Ok(err) => {
            let mut message = err.message;
            if let Some(code) = err.code {
                message = format!("{} [{}]", message, code);
            }
            if let Some(details) = err.details.filter(|d| !d.is_empty()) {
                message = format!("{} ({})", message, details);
            }
            if let Some(hint) = err.hint.filter(|h| !h.is_empty()) {
                message = format!("{}. Hint: {}", message, hint);
            }
            message
        }
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => reason.unwrap_or("unknown error").to_string(),
    }
}
