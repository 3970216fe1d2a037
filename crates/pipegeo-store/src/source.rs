use crate::pipe_store::{validate_new_pipe, PipeStore};
use anyhow::{anyhow, Context, Result};
use pipegeo_config::RemoteConfig;
use pipegeo_core::{Coordinate, NewPipe, Pipe, PipeId, PipeQuery};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Where pipes come from: the local store or a remote pipe API.
pub trait PipeSource {
    fn list_pipes(&self, query: &PipeQuery) -> Result<Vec<Pipe>>;
    fn create_pipe(&self, new_pipe: NewPipe) -> Result<Pipe>;
}

impl PipeSource for PipeStore {
    fn list_pipes(&self, query: &PipeQuery) -> Result<Vec<Pipe>> {
        PipeStore::list_pipes(self, query)
    }

    fn create_pipe(&self, new_pipe: NewPipe) -> Result<Pipe> {
        PipeStore::create_pipe(self, new_pipe)
    }
}

/// Client for a pipe API serving `GET /pipes` and `POST /pipes`.
pub struct HttpPipeSource {
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: String,
}

/// Stored row as echoed back by `POST /pipes`: `[lat, lng]` pairs and the
/// tags as a JSON-encoded string.
#[derive(Debug, Deserialize)]
struct PipeRow {
    id: PipeId,
    name: String,
    start: [f64; 2],
    end: [f64; 2],
    color: String,
    #[serde(default)]
    tags: String,
}

impl PipeRow {
    fn into_pipe(self) -> Result<Pipe> {
        let tags = if self.tags.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&self.tags)
                .with_context(|| format!("pipe {} has malformed tags", self.id))?
        };
        Ok(Pipe {
            id: self.id,
            name: self.name,
            start_point: Coordinate::new(self.start[0], self.start[1]),
            end_point: Coordinate::new(self.end[0], self.end[1]),
            color: self.color,
            tags,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PipeBody {
    Wire(Pipe),
    Row(PipeRow),
}

impl PipeBody {
    fn into_pipe(self) -> Result<Pipe> {
        match self {
            PipeBody::Wire(pipe) => Ok(pipe),
            PipeBody::Row(row) => row.into_pipe(),
        }
    }
}

/// Decode a `GET /pipes` body, applying the query limit locally.
fn decode_pipe_list(body: &str, query: &PipeQuery) -> Result<Vec<Pipe>> {
    let mut pipes: Vec<Pipe> =
        serde_json::from_str(body).context("unexpected pipe API response")?;
    // Tag lookups on the server ignore the limit.
    if let Some(limit) = query.effective_limit() {
        pipes.truncate(limit);
    }
    Ok(pipes)
}

/// Decode a `POST /pipes` body in either the wire or the stored-row shape.
fn decode_created_pipe(body: &str) -> Result<Pipe> {
    serde_json::from_str::<PipeBody>(body)
        .context("unexpected pipe API response")?
        .into_pipe()
}

/// Error for a non-success reply, preferring the `{"error": ...}` message.
fn api_error(status: StatusCode, body: &str) -> anyhow::Error {
    let message = serde_json::from_str::<ApiError>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| body.trim().to_string());
    anyhow!("pipe API error {}: {}", status, message)
}

impl HttpPipeSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// `None` when no API base is configured.
    pub fn from_config(config: &RemoteConfig) -> Result<Option<Self>> {
        config
            .api_base
            .as_deref()
            .map(|base| Self::new(base, Duration::from_secs(config.timeout_secs)))
            .transpose()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn pipes_url(&self) -> String {
        format!("{}/pipes", self.base_url.trim_end_matches('/'))
    }

    fn list_url(&self, query: &PipeQuery) -> Result<Url> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(tag) = &query.tag {
            params.push(("tag", tag.clone()));
        }
        if let Some(limit) = query.effective_limit() {
            params.push(("limit", limit.to_string()));
        }
        Url::parse_with_params(&self.pipes_url(), params)
            .with_context(|| format!("invalid pipe API base '{}'", self.base_url))
    }

    /// Status and body text of a reply.
    fn read(resp: reqwest::blocking::Response) -> Result<(StatusCode, String)> {
        let status = resp.status();
        let body = resp.text().context("failed to read pipe API response")?;
        Ok((status, body))
    }
}

impl PipeSource for HttpPipeSource {
    fn list_pipes(&self, query: &PipeQuery) -> Result<Vec<Pipe>> {
        let url = self.list_url(query)?;
        debug!(%url, "fetching pipes");

        let resp = self
            .client
            .get(url)
            .send()
            .context("failed to reach pipe API")?;
        let (status, body) = Self::read(resp)?;
        if !status.is_success() {
            return Err(api_error(status, &body));
        }
        decode_pipe_list(&body, query)
    }

    fn create_pipe(&self, new_pipe: NewPipe) -> Result<Pipe> {
        validate_new_pipe(&new_pipe)?;

        let resp = self
            .client
            .post(self.pipes_url())
            .json(&new_pipe)
            .send()
            .context("failed to reach pipe API")?;
        let (status, body) = Self::read(resp)?;
        if !status.is_success() {
            return Err(api_error(status, &body));
        }
        decode_created_pipe(&body)
    }
}
