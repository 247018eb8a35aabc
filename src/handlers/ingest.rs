use axum::extract::Multipart;
use thiserror::Error;

use crate::models::UploadedImage;

pub const IMAGE_FIELD: &str = "image";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("no image provided")]
    MissingImage,
}

/// Pulls the first `image` file part out of an upload.
///
/// Decode failures, a missing part, a part without a filename and an empty
/// file all come back as [`IngestError::MissingImage`]; the reason is only
/// logged. The part is buffered in memory, nothing is written to disk.
pub async fn ingest(mut multipart: Multipart) -> Result<UploadedImage, IngestError> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                log::warn!("⚠️ Upload has no '{}' field", IMAGE_FIELD);
                return Err(IngestError::MissingImage);
            }
            Err(e) => {
                log::warn!("⚠️ Failed to decode multipart upload: {}", e);
                return Err(IngestError::MissingImage);
            }
        };

        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let Some(filename) = field.file_name().map(str::to_string) else {
            log::warn!("⚠️ '{}' field is a plain value, not a file", IMAGE_FIELD);
            return Err(IngestError::MissingImage);
        };

        let bytes = field.bytes().await.map_err(|e| {
            log::warn!("⚠️ Failed to read '{}' field: {}", IMAGE_FIELD, e);
            IngestError::MissingImage
        })?;

        if bytes.is_empty() {
            log::warn!("⚠️ '{}' field is empty", IMAGE_FIELD);
            return Err(IngestError::MissingImage);
        }

        log::debug!("📦 Ingested {} ({} bytes)", filename, bytes.len());
        return Ok(UploadedImage {
            bytes: bytes.to_vec(),
            filename,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{multipart_body, multipart_request, BOUNDARY};
    use axum::extract::FromRequest;

    async fn ingest_body(body: Vec<u8>) -> Result<UploadedImage, IngestError> {
        let multipart = Multipart::from_request(multipart_request("/upload", body), &())
            .await
            .unwrap();
        ingest(multipart).await
    }

    #[tokio::test]
    async fn test_ingest_reads_image_file_part() {
        let image = ingest_body(multipart_body("image", Some("meal.jpg"), b"jpeg-bytes"))
            .await
            .unwrap();

        assert_eq!(image.filename, "meal.jpg");
        assert_eq!(image.bytes, b"jpeg-bytes".to_vec());
    }

    #[tokio::test]
    async fn test_ingest_skips_other_fields() {
        let mut body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"caption\"\r\n\r\nlunch\r\n",
            b = BOUNDARY
        )
        .into_bytes();
        let image_part = multipart_body("image", Some("plate.png"), b"png");
        body.extend_from_slice(&image_part);

        let image = ingest_body(body).await.unwrap();
        assert_eq!(image.filename, "plate.png");
    }

    #[tokio::test]
    async fn test_ingest_rejects_missing_empty_and_plain_fields() {
        assert_eq!(
            ingest_body(multipart_body("photo", Some("a.png"), b"png")).await,
            Err(IngestError::MissingImage)
        );
        assert_eq!(
            ingest_body(multipart_body("image", Some("a.png"), b"")).await,
            Err(IngestError::MissingImage)
        );
        assert_eq!(
            ingest_body(multipart_body("image", None, b"not a file")).await,
            Err(IngestError::MissingImage)
        );
    }

    #[tokio::test]
    async fn test_ingest_truncated_body_is_missing_image() {
        let mut body = multipart_body("image", Some("a.png"), b"png-bytes");
        body.truncate(body.len() - 12);

        assert_eq!(ingest_body(body).await, Err(IngestError::MissingImage));
    }
}
