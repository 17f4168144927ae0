use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    response::Json,
};
use log::info;
use std::sync::Arc;

use super::AppState;
use crate::api::models::UploadResponse;
use crate::api::{ApiError, ApiResult};
use crate::services::IngestionService;

const FILE_FIELD: &str = "file";
const CSV_EXTENSION: &str = ".csv";

struct UploadedFile {
    file_name: String,
    contents: Bytes,
}

pub async fn upload_csv(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<UploadResponse>> {
    let upload = match multipart {
        Ok(mut multipart) => find_file_field(&mut multipart).await?,
        Err(rejection) => {
            info!("Upload without multipart body: {}", rejection);
            None
        }
    };

    let upload = upload.ok_or_else(|| ApiError::bad_request("No file sent."))?;
    validate_file_name(&upload.file_name)?;

    info!("Processing uploaded file {} ({} bytes)", upload.file_name, upload.contents.len());
    let service = IngestionService::new(state.pool.clone(), &state.config.ingestion);
    let report = service.ingest_bytes(&upload.contents)?;

    Ok(Json(UploadResponse::from(&report)))
}

/// Parts without a filename are plain form values, not files.
async fn find_file_field(multipart: &mut Multipart) -> ApiResult<Option<UploadedFile>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let contents = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read uploaded file: {}", e)))?;
        return Ok(Some(UploadedFile { file_name, contents }));
    }

    Ok(None)
}

fn validate_file_name(file_name: &str) -> ApiResult<()> {
    if file_name.is_empty() {
        return Err(ApiError::bad_request("No file selected."));
    }
    if !file_name.ends_with(CSV_EXTENSION) {
        return Err(ApiError::bad_request(
            "Invalid file format. Please upload a .csv file.",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_validation() {
        assert!(validate_file_name("scores.csv").is_ok());
        assert!(matches!(validate_file_name(""), Err(ApiError::BadRequest(m)) if m == "No file selected."));
        assert!(matches!(validate_file_name("scores.txt"), Err(ApiError::BadRequest(_))));
        assert!(matches!(validate_file_name("scores.CSV"), Err(ApiError::BadRequest(_))));
    }
}
