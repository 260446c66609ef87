use std::time::Duration;

use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use vidiwise_logging::{vidiwise_debug, vidiwise_warn};

use crate::wire::{
    ChatRequest, ChatResponse, HealthResponse, ProcessVideoRequest, ProcessVideoResponse,
    VideoStatusResponse,
};
use crate::{FailureKind, JobStatus, ServiceError};

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            connect_timeout: Duration::from_secs(10),
            // Chat answers come from a language model and can be slow.
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// The external video processing and chat service.
#[async_trait::async_trait]
pub trait ProcessingService: Send + Sync {
    /// Starts processing `url`; returns the video id assigned by the service.
    async fn submit_video(&self, url: &str) -> Result<String, ServiceError>;

    async fn video_status(&self, video_id: &str) -> Result<JobStatus, ServiceError>;

    /// Asks one question about a processed video; returns the raw answer text.
    async fn send_chat(&self, video_id: &str, message: &str) -> Result<String, ServiceError>;

    async fn health(&self) -> Result<String, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestService {
    settings: ServiceSettings,
    client: reqwest::Client,
}

impl ReqwestService {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ServiceError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ServiceError> {
        let mut url = Url::parse(&self.settings.base_url)
            .map_err(|err| ServiceError::new(FailureKind::InvalidUrl, err.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ServiceError::new(FailureKind::InvalidUrl, "base url cannot hold a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ServiceError> {
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = response.text().await.map_err(map_reqwest_error)?;
        serde_json::from_str(&body)
            .map_err(|err| ServiceError::new(FailureKind::Decode, err.to_string()))
    }
}

#[async_trait::async_trait]
impl ProcessingService for ReqwestService {
    async fn submit_video(&self, url: &str) -> Result<String, ServiceError> {
        let endpoint = self.endpoint(&["process-video"])?;
        vidiwise_debug!("POST {} url={}", endpoint, url);
        let response: ProcessVideoResponse = self
            .send_json(self.client.post(endpoint).json(&ProcessVideoRequest { url }))
            .await?;

        if response.video_id.trim().is_empty() {
            return Err(ServiceError::new(FailureKind::Decode, "empty video_id"));
        }
        Ok(response.video_id)
    }

    async fn video_status(&self, video_id: &str) -> Result<JobStatus, ServiceError> {
        let endpoint = self.endpoint(&["video-status", video_id])?;
        vidiwise_debug!("GET {}", endpoint);
        let response: VideoStatusResponse = self.send_json(self.client.get(endpoint)).await?;
        Ok(response.status)
    }

    async fn send_chat(&self, video_id: &str, message: &str) -> Result<String, ServiceError> {
        let endpoint = self.endpoint(&["start-chat"])?;
        vidiwise_debug!("POST {} video_id={} message_len={}", endpoint, video_id, message.len());
        let response: ChatResponse = self
            .send_json(
                self.client
                    .post(endpoint)
                    .json(&ChatRequest { message, video_id }),
            )
            .await?;
        Ok(response.message)
    }

    async fn health(&self) -> Result<String, ServiceError> {
        let endpoint = self.endpoint(&["health"])?;
        let response: HealthResponse = self.send_json(self.client.get(endpoint)).await?;
        if response.status != "OK" {
            vidiwise_warn!("Service health reported {:?}", response.status);
        }
        Ok(response.status)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ServiceError::new(FailureKind::Decode, err.to_string());
    }
    ServiceError::new(FailureKind::Network, err.to_string())
}
