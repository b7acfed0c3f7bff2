//! Wire types for the hosted backend's REST API.
//!
//! Documents carry their payload fields at the top level next to
//! `$`-prefixed metadata, so payloads are flattened in and out.

use serde::{Deserialize, Serialize};

/// A stored document with its metadata and typed payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Document<T> {
    /// Backend-assigned document ID.
    #[serde(rename = "$id")]
    pub id: String,
    /// Creation timestamp (ISO 8601).
    #[serde(rename = "$createdAt", default)]
    pub created_at: Option<String>,
    /// Payload fields, flattened alongside the metadata.
    #[serde(flatten)]
    pub data: T,
}

/// A page of documents.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentList<T> {
    /// Total matching documents, which may exceed the page size.
    pub total: u64,
    pub documents: Vec<Document<T>>,
}

/// An authenticated account as returned by the accounts API.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountUser {
    #[serde(rename = "$id")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    /// Role labels granted in the backend console (e.g. `admin`).
    #[serde(default)]
    pub labels: Vec<String>,
}

impl AccountUser {
    /// Label granted to directory admins.
    pub const ADMIN_LABEL: &'static str = "admin";

    /// True when the account carries the admin label.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.labels.iter().any(|l| l == Self::ADMIN_LABEL)
    }
}

/// A session issued by the accounts API.
///
/// The `secret` is only populated on the creation response; subsequent reads
/// return the session without it.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub secret: String,
    /// Expiry timestamp (ISO 8601).
    #[serde(default)]
    pub expire: Option<String>,
}

/// A stored file as returned by the storage API.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageFile {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "mimeType", default)]
    pub mime_type: Option<String>,
}

/// Error body returned by the backend on non-success responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    /// Machine-readable error type, e.g. `user_already_exists`.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub code: u16,
}

/// Typed query operators for document listing.
///
/// Serialized to the JSON operator form the backend expects in the
/// `queries[]` parameter.
#[derive(Debug, Clone)]
pub enum Query {
    /// `attribute == value` (string values).
    Equal(&'static str, String),
    /// Page size cap.
    Limit(u32),
    /// Ascending order on an attribute.
    OrderAsc(&'static str),
}

impl Query {
    /// Encode the operator as the backend's JSON query string.
    #[must_use]
    pub fn encode(&self) -> String {
        let value = match self {
            Self::Equal(attribute, v) => serde_json::json!({
                "method": "equal",
                "attribute": attribute,
                "values": [v],
            }),
            Self::Limit(n) => serde_json::json!({
                "method": "limit",
                "values": [n],
            }),
            Self::OrderAsc(attribute) => serde_json::json!({
                "method": "orderAsc",
                "attribute": attribute,
            }),
        };
        value.to_string()
    }
}

/// Request body for document creation.
#[derive(Debug, Serialize)]
pub struct CreateDocumentBody<T: Serialize> {
    #[serde(rename = "documentId")]
    pub document_id: String,
    pub data: T,
}

/// Marker for "let the backend pick a unique ID".
pub const UNIQUE_ID: &str = "unique()";

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_document_flattens_payload() {
        #[derive(Debug, Deserialize)]
        struct Fields {
            #[serde(rename = "shopName")]
            shop_name: String,
        }

        let json = r#"{
            "$id": "64f1c2",
            "$createdAt": "2024-01-15T09:30:00.000+00:00",
            "shopName": "Sai Kirana Stores"
        }"#;

        let doc: Document<Fields> = serde_json::from_str(json).unwrap();
        assert_eq!(doc.id, "64f1c2");
        assert_eq!(doc.data.shop_name, "Sai Kirana Stores");
    }

    #[test]
    fn test_query_equal_encoding() {
        let q = Query::Equal("shopId", "64f1c2".to_string());
        let encoded = q.encode();
        assert!(encoded.contains("\"method\":\"equal\""));
        assert!(encoded.contains("\"shopId\""));
        assert!(encoded.contains("\"64f1c2\""));
    }

    #[test]
    fn test_account_admin_label() {
        let account = AccountUser {
            id: "u1".to_string(),
            email: "admin@example.com".to_string(),
            name: "Admin".to_string(),
            labels: vec!["admin".to_string()],
        };
        assert!(account.is_admin());

        let account = AccountUser {
            labels: vec![],
            ..account
        };
        assert!(!account.is_admin());
    }

    #[test]
    fn test_session_secret_defaults_empty() {
        let json = r#"{"$id": "s1", "userId": "u1"}"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert!(session.secret.is_empty());
        assert!(session.expire.is_none());
    }
}
