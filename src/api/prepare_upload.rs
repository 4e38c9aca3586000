use super::HttpClient;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const PREPARE_UPLOAD_PATH: &str = "/prepare-upload";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepareUploadRequest {
    pub file_names: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PrepareUploadResponse {
    pub urls: Vec<String>,
}

/// Asks the backend for one pre-signed URL per file name, in the same order.
pub async fn prepare_upload(
    client: &HttpClient,
    file_names: &[String],
) -> Result<Vec<String>, ApiError> {
    let request = PrepareUploadRequest {
        file_names: file_names.to_vec(),
    };

    let response: PrepareUploadResponse = client.post_json(PREPARE_UPLOAD_PATH, &request).await?;
    debug!(
        "Received {} upload URLs for {} files",
        response.urls.len(),
        file_names.len()
    );

    Ok(response.urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_uses_camel_case_field() {
        let request = PrepareUploadRequest {
            file_names: vec!["a.png".to_string(), "b.png".to_string()],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "fileNames": ["a.png", "b.png"] })
        );
    }

    #[test]
    fn response_reads_urls() {
        let response: PrepareUploadResponse =
            serde_json::from_value(json!({ "urls": ["https://x/a"] })).unwrap();
        assert_eq!(response.urls, vec!["https://x/a".to_string()]);
    }
}
