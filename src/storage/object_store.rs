// thumbnailer/src/storage/object_store.rs
use super::{check_response, content_type_for, StorageError, StorageResult, StorageSink};
use reqwest::blocking::{Client, Request};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use std::time::Duration;

/// Cloud object storage reached through a plain HTTP `PUT` per object
/// (GCS XML API, S3-compatible gateways).
#[derive(Debug, Clone)]
pub struct ObjectStoreConfig {
    pub endpoint: String,
    pub bucket: Option<String>,
    pub prefix: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ObjectStoreConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://storage.googleapis.com".to_string(),
            bucket: None,
            prefix: "thumbnails/".to_string(),
            token: None,
            timeout_secs: 30,
        }
    }
}

impl ObjectStoreConfig {
    /// `{endpoint}/{bucket}/{prefix}{name}` with every path segment percent-encoded.
    pub fn object_url(&self, bucket: &str, name: &str) -> StorageResult<Url> {
        let mut url = Url::parse(&self.endpoint).map_err(|e| {
            StorageError::Config(format!("invalid object storage endpoint {}: {}", self.endpoint, e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                StorageError::Config(format!("object storage endpoint cannot hold a path: {}", self.endpoint))
            })?
            .pop_if_empty()
            .push(bucket)
            .extend(self.prefix.split('/').filter(|segment| !segment.is_empty()))
            .push(name);

        Ok(url)
    }
}

pub struct ObjectStoreSink {
    config: ObjectStoreConfig,
    bucket: String,
    client: Client,
}

impl ObjectStoreSink {
    pub fn new(config: ObjectStoreConfig) -> StorageResult<Self> {
        let bucket = config
            .bucket
            .clone()
            .filter(|b| !b.trim().is_empty())
            .ok_or_else(|| StorageError::Config("object storage requires a bucket".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            bucket,
            client,
        })
    }

    fn build_request(&self, name: &str, bytes: &[u8]) -> StorageResult<Request> {
        let mut request = self
            .client
            .put(self.config.object_url(&self.bucket, name)?)
            .header(CONTENT_TYPE, content_type_for(name))
            .body(bytes.to_vec());

        if let Some(token) = &self.config.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        Ok(request.build()?)
    }
}

impl StorageSink for ObjectStoreSink {
    fn backend(&self) -> &'static str {
        "object-store"
    }

    fn write(&self, name: &str, bytes: &[u8]) -> StorageResult<()> {
        let request = self.build_request(name, bytes)?;
        log::debug!("PUT {}", request.url());

        let response = self.client.execute(request)?;
        check_response(response)
    }
}
