use super::ProgressCallback;
use crate::error::ApiError;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Body, Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Upload bodies are streamed in chunks of this size; progress is reported per chunk.
pub const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Thin wrapper over `reqwest` that resolves API paths against a base URL.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url_for(path);
        let response = self.client.post(&url).json(body).send().await?;
        let response = check_status(response, &url)?;

        Ok(response.json::<R>().await?)
    }

    /// PUTs raw bytes to an absolute URL, calling `on_progress` as chunks are handed to the transport.
    ///
    /// Progress tracks what the transport has pulled, not what the server accepted: a rejected
    /// upload can report 100 before the error status arrives.
    pub async fn put_bytes(
        &self,
        url: &str,
        bytes: Arc<[u8]>,
        content_type: &str,
        on_progress: Option<ProgressCallback>,
    ) -> Result<(), ApiError> {
        let total = bytes.len();
        let progress = on_progress.clone();

        let chunks = (0..total).step_by(UPLOAD_CHUNK_SIZE).map(move |start| {
            let end = (start + UPLOAD_CHUNK_SIZE).min(total);
            let chunk = bytes[start..end].to_vec();
            if let Some(callback) = &progress {
                callback(percentage(end as u64, total as u64));
            }
            Ok::<_, std::io::Error>(chunk)
        });

        let response = self
            .client
            .put(url)
            .header(CONTENT_TYPE, content_type)
            .header(CONTENT_LENGTH, total)
            .body(Body::wrap_stream(futures::stream::iter(chunks)))
            .send()
            .await?;
        check_status(response, url)?;

        if total == 0 {
            if let Some(callback) = &on_progress {
                callback(100);
            }
        }

        Ok(())
    }
}

fn check_status(response: Response, url: &str) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

/// Whole-number percentage of `loaded` over `total`, rounded and capped at 100.
pub fn percentage(loaded: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let rounded = (loaded.saturating_mul(100) + total / 2) / total;
    rounded.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_and_path_join_with_one_slash() {
        let client = HttpClient::new("http://localhost:3333/");
        assert_eq!(client.base_url(), "http://localhost:3333");
        assert_eq!(
            client.url_for("/prepare-upload"),
            "http://localhost:3333/prepare-upload"
        );
        assert_eq!(
            client.url_for("prepare-upload"),
            "http://localhost:3333/prepare-upload"
        );
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        assert_eq!(percentage(0, 200), 0);
        assert_eq!(percentage(1, 200), 1);
        assert_eq!(percentage(99, 200), 50);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(200, 200), 100);
    }

    #[test]
    fn percentage_handles_edges() {
        assert_eq!(percentage(0, 0), 100);
        assert_eq!(percentage(500, 200), 100);
    }
}
