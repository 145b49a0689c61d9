use std::path::PathBuf;
use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

pub const COURSES_WITH_DIFFICULTY: &str = "courses_with_hardness.json";
pub const CS_REQUIREMENTS: &str = "BSCS.json";
pub const MAJORS: &str = "Majors.json";
pub const MAJOR_REQUIREMENTS: &str = "major_requirements.json";
pub const COURSE_CATALOG: &str = "all_courses_structured.json";

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {0} for {1}")]
    Status(u16, String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error in {0}: {1}")]
    Parse(String, serde_json::Error),

    #[error("Invalid resource {0}")]
    InvalidResource(String),
}

/// Where the static reference files live.
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch(&self, resource: &str) -> Result<Vec<u8>, SourceError>;
}

pub async fn fetch_json<T: DeserializeOwned>(
    source: &dyn DataSource,
    resource: &str,
) -> Result<T, SourceError> {
    let bytes = source.fetch(resource).await?;

    serde_json::from_slice(&bytes).map_err(|e| SourceError::Parse(resource.to_owned(), e))
}

/// Static files served over HTTP, resolved against a base URL.
pub struct HttpSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let mut base = base_url.to_owned();
        if !base.ends_with('/') {
            base.push('/');
        }

        let base_url = Url::parse(&base).map_err(|e| SourceError::InvalidResource(e.to_string()))?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("plant/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Network(e.to_string()))?;

        Ok(Self { client, base_url })
    }
}

#[async_trait::async_trait]
impl DataSource for HttpSource {
    async fn fetch(&self, resource: &str) -> Result<Vec<u8>, SourceError> {
        let url = self
            .base_url
            .join(resource)
            .map_err(|_| SourceError::InvalidResource(resource.to_owned()))?;

        tracing::debug!(url = %url, "fetching reference data");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16(), url.to_string()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

/// Static files read from a local directory.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait::async_trait]
impl DataSource for DirSource {
    async fn fetch(&self, resource: &str) -> Result<Vec<u8>, SourceError> {
        if resource.contains("..") || resource.starts_with('/') {
            return Err(SourceError::InvalidResource(resource.to_owned()));
        }

        let path = self.root.join(resource);
        tracing::debug!(path = %path.display(), "reading reference data");

        Ok(tokio::fs::read(path).await?)
    }
}
