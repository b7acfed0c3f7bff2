//! File storage operations.

use reqwest::Method;
use reqwest::multipart::{Form, Part};
use tracing::instrument;

use super::types::{StorageFile, UNIQUE_ID};
use super::{AppwriteClient, AppwriteError, Auth};

impl AppwriteClient {
    /// Upload a file to a bucket.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload is rejected or the request fails.
    /// Callers that can degrade (e.g. keep a local image reference) handle
    /// the error themselves; nothing is retried here.
    #[instrument(skip(self, bytes), fields(bucket = %bucket_id, filename = %filename, size = bytes.len()))]
    pub async fn create_file(
        &self,
        bucket_id: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<StorageFile, AppwriteError> {
        let part = Part::bytes(bytes).file_name(filename.to_owned());
        let form = Form::new()
            .text("fileId", UNIQUE_ID)
            .part("file", part);

        let path = format!("/storage/buckets/{bucket_id}/files");
        let request = self
            .request(Method::POST, &path, Auth::ServerKey)
            .multipart(form);

        self.execute(request).await
    }

    /// Publicly dereferenceable URL for viewing a stored file.
    #[must_use]
    pub fn file_view_url(&self, bucket_id: &str, file_id: &str) -> String {
        format!(
            "{}/storage/buckets/{bucket_id}/files/{file_id}/view?project={}",
            self.endpoint(),
            self.project_id()
        )
    }
}
