use crate::config::SourceConfig;
use reqwest::{Client, StatusCode};
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tokio::fs;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("booked-dates request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("booked-dates source answered {0}")]
    Status(StatusCode),
    #[error("booked-dates payload is not a list of date strings: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("failed to read booked-dates file: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the current user's booked dates come from. Each fetch returns the
/// raw date strings; turning them into calendar days is up to the caller.
pub trait BookedDatesSource {
    fn fetch(&self) -> impl Future<Output = Result<Vec<String>, SourceError>> + Send;
}

/// JSON array of date strings served over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

impl BookedDatesSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<String>, SourceError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// JSON array of date strings on disk. A missing file means no bookings.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BookedDatesSource for FileSource {
    async fn fetch(&self) -> Result<Vec<String>, SourceError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticSource(pub Vec<String>);

impl BookedDatesSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<String>, SourceError> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Clone)]
pub enum Source {
    Http(HttpSource),
    File(FileSource),
    Static(StaticSource),
}

impl Source {
    pub fn from_config(config: &SourceConfig) -> Result<Self, SourceError> {
        Ok(match config {
            SourceConfig::Url(url) => Source::Http(HttpSource::new(url.clone())?),
            SourceConfig::Path(path) => Source::File(FileSource::new(path.clone())),
        })
    }
}

impl BookedDatesSource for Source {
    async fn fetch(&self) -> Result<Vec<String>, SourceError> {
        match self {
            Source::Http(source) => source.fetch().await,
            Source::File(source) => source.fetch().await,
            Source::Static(source) => source.fetch().await,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Http(source) => write!(f, "{}", source.url),
            Source::File(source) => write!(f, "{}", source.path.display()),
            Source::Static(source) => write!(f, "{} static dates", source.0.len()),
        }
    }
}
