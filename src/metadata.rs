//! Video metadata lookup through the YouTube Data API v3.

use crate::error::{QuizError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// Title, description and tags of a video.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category_id: String,
}

impl VideoMetadata {
    /// Render as the plain-text block handed to the quiz prompt.
    pub fn to_text(&self) -> String {
        format!(
            "Title: {}\nDescription: {}\nTags: {}",
            self.title,
            self.description,
            self.tags.join(", ")
        )
    }
}

#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Fetch metadata for a video. Every failure is reported as
    /// `MetadataUnavailable` carrying a user-facing message.
    async fn fetch_metadata(&self, video_id: &str) -> Result<VideoMetadata>;
    fn name(&self) -> &'static str;
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(rename = "categoryId", default)]
    category_id: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// YouTube Data API client.
pub struct YouTubeDataApi {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl YouTubeDataApi {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, "https://www.googleapis.com/youtube/v3")
    }

    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn request(&self, video_id: &str, api_key: &str) -> Result<VideoMetadata> {
        let url = format!("{}/videos", self.base_url);
        debug!("Fetching metadata for {} from {}", video_id, url);

        let response = self
            .client
            .get(&url)
            .query(&[("part", "snippet"), ("id", video_id), ("key", api_key)])
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(QuizError::MetadataUnavailable(format!(
                "YouTube API error: {} {}",
                status, detail
            )));
        }

        let parsed: VideoListResponse =
            serde_json::from_str(&body).map_err(|e| fetch_error(e.to_string()))?;

        let snippet = parsed
            .items
            .into_iter()
            .next()
            .and_then(|item| item.snippet)
            .ok_or_else(|| {
                QuizError::MetadataUnavailable("No metadata available for this video.".to_string())
            })?;

        Ok(VideoMetadata {
            title: snippet.title,
            description: snippet.description,
            tags: snippet.tags,
            category_id: snippet.category_id,
        })
    }
}

#[async_trait]
impl MetadataSource for YouTubeDataApi {
    async fn fetch_metadata(&self, video_id: &str) -> Result<VideoMetadata> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| fetch_error("YOUTUBE_API_KEY is not configured".to_string()))?;

        self.request(video_id, api_key).await
    }

    fn name(&self) -> &'static str {
        "YouTube Data API"
    }
}

fn fetch_error(detail: String) -> QuizError {
    QuizError::MetadataUnavailable(format!("Error fetching metadata: {}", detail))
}
