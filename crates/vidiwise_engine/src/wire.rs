//! Request and response bodies of the processing service.

use serde::{Deserialize, Serialize};

use crate::JobStatus;

#[derive(Debug, Serialize)]
pub(crate) struct ProcessVideoRequest<'a> {
    pub url: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProcessVideoResponse {
    pub video_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoStatusResponse {
    pub status: JobStatus,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub message: &'a str,
    #[serde(rename = "videoId")]
    pub video_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HealthResponse {
    pub status: String,
}
