//! Planner HTTP Client
//!
//! Native [`PlannerApi`] implementation over reqwest.

use async_trait::async_trait;
use reqwest::Client;

use super::{endpoint_url, ApiError, ApiResult, ChatReply, ChatRequest, PlannerApi, Profile};
use super::{CHAT_PATH, PROFILE_PATH};
use crate::config::ApiConfig;

/// reqwest-backed planner API client
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    /// Create a client for the server described by `config`
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_send_error(e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Network("request timed out".to_string())
        } else if e.is_connect() {
            ApiError::Network(format!("server unavailable: {}", e))
        } else {
            ApiError::from(e)
        }
    }
}

#[async_trait(?Send)]
impl PlannerApi for HttpApi {
    async fn fetch_profile(&self) -> ApiResult<Profile> {
        let url = endpoint_url(&self.base_url, PROFILE_PATH);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        if !response.status().is_success() {
            return Err(ApiError::Status {
                status: response.status().as_u16(),
            });
        }

        response
            .json::<Profile>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_chat(&self, message: &str) -> ApiResult<ChatReply> {
        let url = endpoint_url(&self.base_url, CHAT_PATH);

        let response = self
            .client
            .post(&url)
            .json(&ChatRequest {
                message: message.to_string(),
            })
            .send()
            .await
            .map_err(Self::map_send_error)?;

        if !response.status().is_success() {
            return Err(ApiError::Status {
                status: response.status().as_u16(),
            });
        }

        response
            .json::<ChatReply>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}
