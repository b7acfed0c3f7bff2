//! Product image uploads.

use thiserror::Error;

use crate::appwrite::{AppwriteClient, AppwriteError};

/// Errors from image uploads.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Upload failed and no local reference was available to fall back to.
    #[error("image upload failed: {0}")]
    UploadFailed(#[source] AppwriteError),
}

/// Result of an upload attempt.
#[derive(Debug, Clone, serde::Serialize)]
pub struct UploadOutcome {
    /// URL to store on the product: the hosted file's public URL, or the
    /// caller's local reference when the upload fell back.
    pub image_url: String,
    /// False when the fallback was taken.
    pub stored: bool,
}

/// Upload service over the product-image bucket.
pub struct UploadService<'a> {
    client: &'a AppwriteClient,
    bucket_id: &'a str,
}

impl<'a> UploadService<'a> {
    /// Create a new upload service.
    #[must_use]
    pub const fn new(client: &'a AppwriteClient, bucket_id: &'a str) -> Self {
        Self { client, bucket_id }
    }

    /// Upload an image and return its public URL.
    ///
    /// On upload failure the caller's original local reference is used as
    /// the stored URL instead — a deliberate degradation so a flaky upload
    /// never blocks the surrounding write. The failure is logged, not
    /// swallowed. Nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns `UploadFailed` only when the upload fails *and* no fallback
    /// reference was supplied.
    pub async fn upload_image(
        &self,
        filename: &str,
        bytes: Vec<u8>,
        fallback_ref: Option<&str>,
    ) -> Result<UploadOutcome, UploadError> {
        match self.client.create_file(self.bucket_id, filename, bytes).await {
            Ok(file) => Ok(UploadOutcome {
                image_url: self.client.file_view_url(self.bucket_id, &file.id),
                stored: true,
            }),
            Err(e) => match fallback_ref {
                Some(local_ref) => {
                    tracing::warn!(
                        error = %e,
                        filename = %filename,
                        "image upload failed; falling back to local reference"
                    );
                    Ok(UploadOutcome {
                        image_url: local_ref.to_owned(),
                        stored: false,
                    })
                }
                None => Err(UploadError::UploadFailed(e)),
            },
        }
    }
}
