//! Photo upload sequencing
//!
//! Reads a locally picked image, uploads it to blob storage under a name
//! derived from the entity kind and the submission time, and resolves the
//! public download URL. The steps run strictly one after another; the URL is
//! what ends up in the persisted record.

use chrono::{DateTime, Utc};
use futures::future::{BoxFuture, FutureExt};
use thiserror::Error;
use url::Url;

use crate::kind::EntityDescriptor;

/// Errors that can occur while moving a photo to blob storage
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("could not read image {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("blob storage is not configured")]
    NotConfigured,

    #[error("upload of {name} failed: {message}")]
    Upload { name: String, message: String },

    #[error("could not resolve download URL for {name}: {message}")]
    Url { name: String, message: String },
}

/// Reads the raw bytes behind a local image reference
pub trait ImageSource: Send + Sync {
    fn read<'a>(&'a self, local_ref: &'a str) -> BoxFuture<'a, Result<Vec<u8>, UploadError>>;
}

/// Key-addressed binary object store returning resolvable URLs
pub trait BlobStore: Send + Sync {
    /// Saves the given bytes under the given name.
    fn put<'a>(&'a self, name: &'a str, bytes: Vec<u8>) -> BoxFuture<'a, Result<(), UploadError>>;

    /// Gets the public URL for an uploaded object.
    fn download_url<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<Url, UploadError>>;
}

/// Reads images straight from the local filesystem.
///
/// Accepts plain paths as well as `file://` URIs as returned by pickers.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageSource;

impl ImageSource for FsImageSource {
    fn read<'a>(&'a self, local_ref: &'a str) -> BoxFuture<'a, Result<Vec<u8>, UploadError>> {
        async move {
            let path = local_ref.strip_prefix("file://").unwrap_or(local_ref);
            std::fs::read(path).map_err(|source| UploadError::Read {
                path: local_ref.to_string(),
                source,
            })
        }
        .boxed()
    }
}

/// Remote object name for a photo: `images/<prefix>-<unix millis>.jpg`.
///
/// Two submissions of the same kind within one millisecond collide.
pub fn remote_name(prefix: &str, at: DateTime<Utc>) -> String {
    format!("images/{}-{}.jpg", prefix, at.timestamp_millis())
}

pub struct ImageUploadSequencer<I, B> {
    source: I,
    store: B,
}

impl<I: ImageSource, B: BlobStore> ImageUploadSequencer<I, B> {
    pub fn new(source: I, store: B) -> Self {
        Self { source, store }
    }

    pub fn source(&self) -> &I {
        &self.source
    }

    pub fn store(&self) -> &B {
        &self.store
    }

    /// Uploads the image if there is one; `Ok(None)` means "no photo"
    pub async fn run(
        &self,
        descriptor: &EntityDescriptor,
        local_ref: Option<&str>,
        at: DateTime<Utc>,
    ) -> Result<Option<Url>, UploadError> {
        match local_ref {
            Some(local_ref) => self.upload(descriptor, local_ref, at).await.map(Some),
            None => Ok(None),
        }
    }

    /// fetch → put → resolve URL
    pub async fn upload(
        &self,
        descriptor: &EntityDescriptor,
        local_ref: &str,
        at: DateTime<Utc>,
    ) -> Result<Url, UploadError> {
        let bytes = self.source.read(local_ref).await?;
        let size = bytes.len();

        let name = remote_name(descriptor.image_prefix, at);
        log::debug!("Uploading {} ({} bytes) as {}", local_ref, size, name);

        self.store.put(&name, bytes).await?;
        let url = self.store.download_url(&name).await?;

        log::info!("Uploaded photo {} ({} bytes) to {}", name, size, url);
        Ok(url)
    }
}
