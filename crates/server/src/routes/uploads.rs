//! Upload route handlers.

use axum::{
    Json,
    extract::{Multipart, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::middleware::RequireSession;
use crate::services::uploads::UploadService;
use crate::state::AppState;

/// Upload a product image.
///
/// Multipart fields:
/// - `file` (required): the image bytes, with the client's filename
/// - `localRef` (optional): the device-local image reference to store if
///   the upload fails
///
/// The stored filename is always generated server-side; the client filename
/// only contributes its extension.
pub async fn upload_image(
    State(state): State<AppState>,
    RequireSession(_secret): RequireSession,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut local_ref: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().map(ToOwned::to_owned);
        match name.as_deref() {
            Some("file") => {
                let client_name = field.file_name().unwrap_or("image").to_owned();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("failed to read file: {e}")))?;
                file = Some((client_name, bytes.to_vec()));
            }
            Some("localRef") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("failed to read localRef: {e}")))?;
                if !value.is_empty() {
                    local_ref = Some(value);
                }
            }
            _ => {}
        }
    }

    let (client_name, bytes) =
        file.ok_or_else(|| AppError::BadRequest("missing 'file' field".to_string()))?;

    let filename = generated_filename(&client_name);
    let service = UploadService::new(state.appwrite(), &state.config().appwrite.images_bucket_id);
    let outcome = service
        .upload_image(&filename, bytes, local_ref.as_deref())
        .await?;

    Ok(Json(outcome))
}

/// Generated storage filename: a UUID keeping the client extension.
fn generated_filename(client_name: &str) -> String {
    let id = Uuid::new_v4();
    match client_name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && ext.len() <= 5 => format!("{id}.{ext}"),
        _ => id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_filename_keeps_extension() {
        let name = generated_filename("photo.jpeg");
        assert!(name.ends_with(".jpeg"));
        assert!(name.len() > ".jpeg".len());
    }

    #[test]
    fn test_generated_filename_without_extension() {
        let name = generated_filename("photo");
        assert!(!name.contains('.'));
    }

    #[test]
    fn test_generated_filename_ignores_oversized_extension() {
        let name = generated_filename("archive.backupcopy");
        assert!(!name.contains('.'));
    }

    #[test]
    fn test_generated_filenames_are_unique() {
        assert_ne!(generated_filename("a.png"), generated_filename("a.png"));
    }
}
