use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use std::{fmt::Debug, path::PathBuf};

use crate::{Config, ForecastError, ForecastResponse, Result};

/// Somewhere a [`ForecastResponse`] can be obtained from.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch(&self) -> Result<ForecastResponse>;
}

/// HTTP client for the open-data forecast dataset.
#[derive(Debug, Clone)]
pub struct CwaClient {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl CwaClient {
    pub fn new(api_key: String, endpoint: String) -> Self {
        Self { api_key, endpoint, http: Client::new() }
    }
}

#[async_trait]
impl ForecastSource for CwaClient {
    async fn fetch(&self) -> Result<ForecastResponse> {
        log::debug!("GET {}?Authorization=<redacted>", self.endpoint);

        let request =
            self.http.get(&self.endpoint).query(&[("Authorization", self.api_key.as_str())]);

        send_and_decode(request).await
    }
}

/// Fetch and decode a forecast from a complete URL (key already embedded).
///
/// One attempt, transport default timeout.
pub async fn fetch(url: &str) -> Result<ForecastResponse> {
    send_and_decode(Client::new().get(url)).await
}

async fn send_and_decode(request: RequestBuilder) -> Result<ForecastResponse> {
    // The request URL carries the API key; keep it out of error messages.
    let res = request.send().await.map_err(reqwest::Error::without_url)?;

    let status = res.status();
    let body = res.text().await.map_err(reqwest::Error::without_url)?;

    log::info!("Forecast endpoint answered {} ({} bytes)", status, body.len());

    if !status.is_success() {
        return Err(ForecastError::HttpStatus {
            status: status.as_u16(),
            body: truncate_body(&body),
        });
    }

    ForecastResponse::from_json(&body)
}

/// Reads a previously saved payload from disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ForecastSource for FileSource {
    async fn fetch(&self) -> Result<ForecastResponse> {
        log::debug!("Reading forecast from {}", self.path.display());

        let body = tokio::fs::read_to_string(&self.path).await?;
        ForecastResponse::from_json(&body)
    }
}

/// Construct the HTTP source from config.
pub fn source_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastSource>> {
    let api_key = config.api_key()?;

    Ok(Box::new(CwaClient::new(api_key.to_owned(), config.endpoint().to_owned())))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_bodies() {
        assert_eq!(truncate_body("Unauthorized"), "Unauthorized");
    }

    #[test]
    fn truncate_cuts_on_char_boundary() {
        // 3-byte characters: 200 is not a boundary for 67 of them.
        let body = "資".repeat(100);
        let out = truncate_body(&body);

        assert!(out.ends_with("..."));
        assert_eq!(out.trim_end_matches("...").chars().count(), 66);
    }

    #[test]
    fn source_from_config_errors_when_missing_api_key() {
        let err = source_from_config(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn source_from_config_works_when_key_set() {
        let cfg = Config { api_key: Some("KEY".into()), endpoint: None };
        assert!(source_from_config(&cfg).is_ok());
    }

    #[tokio::test]
    async fn file_source_reports_missing_file_as_io() {
        let source = FileSource::new("/definitely/not/here.json");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, ForecastError::Io(_)));
    }

    #[tokio::test]
    async fn file_source_decodes_saved_payload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("forecast.json");
        std::fs::write(
            &path,
            r#"{"records":{"location":[{"locationName":"金門縣","weatherElement":[]}]}}"#,
        )
        .expect("write");

        let resp = FileSource::new(&path).fetch().await.expect("decode");
        assert_eq!(resp.records.locations[0].name, "金門縣");
    }

    #[tokio::test]
    async fn file_source_rejects_non_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("forecast.json");
        std::fs::write(&path, "not json").expect("write");

        let err = FileSource::new(&path).fetch().await.unwrap_err();
        assert!(matches!(err, ForecastError::Format(_)));
    }
}
