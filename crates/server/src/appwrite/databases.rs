//! Document database operations.
//!
//! The directory pushes no geo filter down to the backend: the shops
//! collection has no geospatial index, so nearby queries list the full
//! collection and rank client-side. See `geo::LinearScanLocator` for where
//! that ceiling is isolated.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use super::types::{CreateDocumentBody, Document, DocumentList, Query, UNIQUE_ID};
use super::{AppwriteClient, AppwriteError, Auth};

impl AppwriteClient {
    /// Create a document with a backend-assigned ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection rejects the payload or the request
    /// fails. There is no idempotency key; a repeated call after a timeout
    /// creates a duplicate document.
    #[instrument(skip(self, data, auth), fields(collection = %collection_id))]
    pub async fn create_document<T, R>(
        &self,
        database_id: &str,
        collection_id: &str,
        data: T,
        auth: Auth<'_>,
    ) -> Result<Document<R>, AppwriteError>
    where
        T: Serialize + Send + Sync,
        R: DeserializeOwned,
    {
        let path =
            format!("/databases/{database_id}/collections/{collection_id}/documents");
        let body = CreateDocumentBody {
            document_id: UNIQUE_ID.to_string(),
            data,
        };
        let request = self.request(Method::POST, &path, auth).json(&body);
        self.execute(request).await
    }

    /// Get a single document by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the document does not exist.
    #[instrument(skip(self, auth), fields(collection = %collection_id, document = %document_id))]
    pub async fn get_document<R>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        auth: Auth<'_>,
    ) -> Result<Document<R>, AppwriteError>
    where
        R: DeserializeOwned,
    {
        let path = format!(
            "/databases/{database_id}/collections/{collection_id}/documents/{document_id}"
        );
        let request = self.request(Method::GET, &path, auth);
        self.execute(request).await
    }

    /// List documents matching the given query operators.
    ///
    /// One round trip; the result is a single page whose size is bounded by
    /// any `Query::Limit` supplied.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; never a partial result.
    #[instrument(skip(self, queries, auth), fields(collection = %collection_id))]
    pub async fn list_documents<R>(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
        auth: Auth<'_>,
    ) -> Result<DocumentList<R>, AppwriteError>
    where
        R: DeserializeOwned,
    {
        let path =
            format!("/databases/{database_id}/collections/{collection_id}/documents");
        let mut request = self.request(Method::GET, &path, auth);
        for query in queries {
            request = request.query(&[("queries[]", query.encode())]);
        }
        self.execute(request).await
    }

    /// Patch fields on an existing document.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the document does not exist.
    #[instrument(skip(self, data, auth), fields(collection = %collection_id, document = %document_id))]
    pub async fn update_document<T, R>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: T,
        auth: Auth<'_>,
    ) -> Result<Document<R>, AppwriteError>
    where
        T: Serialize + Send + Sync,
        R: DeserializeOwned,
    {
        let path = format!(
            "/databases/{database_id}/collections/{collection_id}/documents/{document_id}"
        );
        let request = self
            .request(Method::PATCH, &path, auth)
            .json(&serde_json::json!({ "data": data }));
        self.execute(request).await
    }
}
