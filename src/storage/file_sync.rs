// thumbnailer/src/storage/file_sync.rs
use super::{check_response, StorageError, StorageResult, StorageSink};
use reqwest::blocking::{Client, Request};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use std::time::Duration;

/// Dropbox-style file sync storage using the content upload endpoint.
#[derive(Debug, Clone)]
pub struct FileSyncConfig {
    pub endpoint: String,
    pub token: Option<String>,
    pub folder: String,
    pub timeout_secs: u64,
}

impl Default for FileSyncConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://content.dropboxapi.com".to_string(),
            token: None,
            folder: "/thumbnails".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Serialize)]
struct UploadArg<'a> {
    path: String,
    mode: &'a str,
    autorename: bool,
    mute: bool,
}

pub struct FileSyncSink {
    config: FileSyncConfig,
    token: String,
    client: Client,
}

impl FileSyncSink {
    pub fn new(config: FileSyncConfig) -> StorageResult<Self> {
        let token = config
            .token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| StorageError::Config("file sync storage requires an access token".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            token,
            client,
        })
    }

    pub fn remote_path(&self, name: &str) -> String {
        let folder = self.config.folder.trim_end_matches('/');
        if folder.starts_with('/') || folder.is_empty() {
            format!("{}/{}", folder, name)
        } else {
            format!("/{}/{}", folder, name)
        }
    }

    fn build_request(&self, name: &str, bytes: &[u8]) -> StorageResult<Request> {
        let arg = UploadArg {
            path: self.remote_path(name),
            mode: "overwrite",
            autorename: false,
            mute: true,
        };
        let arg = serde_json::to_string(&arg)
            .map(|json| escape_non_ascii(&json))
            .map_err(|e| StorageError::Config(format!("cannot encode upload argument: {}", e)))?;

        let url = format!("{}/2/files/upload", self.config.endpoint.trim_end_matches('/'));
        let request = self
            .client
            .post(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(CONTENT_TYPE, "application/octet-stream")
            .header("Dropbox-API-Arg", arg)
            .body(bytes.to_vec())
            .build()?;

        Ok(request)
    }
}

// Header values must be ASCII; the API accepts JSON `\uXXXX` escapes.
fn escape_non_ascii(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{:04x}", unit));
            }
        }
    }
    out
}

impl StorageSink for FileSyncSink {
    fn backend(&self) -> &'static str {
        "file-sync"
    }

    fn write(&self, name: &str, bytes: &[u8]) -> StorageResult<()> {
        let request = self.build_request(name, bytes)?;
        log::debug!("Uploading {} to {}", name, self.remote_path(name));

        let response = self.client.execute(request)?;
        check_response(response)
    }
}
