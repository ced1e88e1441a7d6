use log::{debug, info};
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

use super::gltf::{load_gltf_model, model_from_document, Model};
use crate::error::ModelLoadError;

/// Where the character asset lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    File(PathBuf),
    Http(String),
}

impl AssetSource {
    /// `http://` and `https://` strings become URLs, anything else a file path
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http://") || source.starts_with("https://") {
            AssetSource::Http(source.to_string())
        } else {
            AssetSource::File(PathBuf::from(source))
        }
    }
}

impl std::fmt::Display for AssetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetSource::File(path) => write!(f, "{}", path.display()),
            AssetSource::Http(url) => f.write_str(url),
        }
    }
}

/// Single-shot asynchronous character loader.
///
/// No progress reporting and no cancellation: a caller that no longer wants
/// the result simply drops it.
#[derive(Clone)]
pub struct ModelLoader {
    http: reqwest::Client,
    scale: f32,
}

impl ModelLoader {
    pub fn new(scale: f32) -> Result<Self, ModelLoadError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ModelLoadError::HttpClient(e.to_string()))?;
        Ok(Self { http, scale })
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub async fn load(&self, source: &AssetSource) -> Result<Model, ModelLoadError> {
        info!("Loading character model from {}", source);

        let model = match source {
            AssetSource::File(path) => {
                let path = path.clone();
                tokio::task::spawn_blocking(move || load_gltf_model(path))
                    .await
                    .map_err(|e| ModelLoadError::Task(e.to_string()))??
            }
            AssetSource::Http(url) => self.download(url).await?,
        };

        Ok(model.with_scale(self.scale))
    }

    /// Fetches a glTF document plus every external buffer it references
    async fn download(&self, url: &str) -> Result<Model, ModelLoadError> {
        let base = Url::parse(url).map_err(|e| ModelLoadError::Unsupported(format!("{url}: {e}")))?;
        let bytes = self.fetch(&base).await?;

        let asset = gltf::Gltf::from_slice(&bytes).map_err(|source| ModelLoadError::Import {
            path: url.to_string(),
            source,
        })?;

        let mut buffers = Vec::new();
        for buffer in asset.document.buffers() {
            let data = match buffer.source() {
                gltf::buffer::Source::Bin => asset
                    .blob
                    .clone()
                    .ok_or_else(|| ModelLoadError::Unsupported(format!("{url}: missing binary chunk")))?,
                gltf::buffer::Source::Uri(uri) if uri.starts_with("data:") => {
                    return Err(ModelLoadError::Unsupported(format!(
                        "{url}: embedded data URIs are only supported for local files"
                    )));
                }
                gltf::buffer::Source::Uri(uri) => {
                    let buffer_url = base
                        .join(uri)
                        .map_err(|e| ModelLoadError::Unsupported(format!("{uri}: {e}")))?;
                    self.fetch(&buffer_url).await?
                }
            };
            buffers.push(gltf::buffer::Data(data));
        }

        model_from_document(&asset.document, &buffers, url)
    }

    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, ModelLoadError> {
        debug!("GET {}", url);
        let download_error = |e: reqwest::Error| ModelLoadError::Download {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(download_error)?
            .error_for_status()
            .map_err(download_error)?;

        Ok(response.bytes().await.map_err(download_error)?.to_vec())
    }
}
