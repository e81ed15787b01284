//! Planner API over `fetch`
//!
//! Same-origin calls to the planner server via gloo-net.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};

use study_planner::api::{endpoint_url, CHAT_PATH, PROFILE_PATH};
use study_planner::{ApiError, ApiResult, ChatReply, ChatRequest, PlannerApi, Profile};

/// gloo-net backed [`PlannerApi`]
#[derive(Debug, Clone)]
pub struct BrowserApi {
    base_url: String,
}

impl BrowserApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Talk to the server that served the page
    pub fn same_origin() -> Self {
        let origin = web_sys::window()
            .and_then(|window| window.location().origin().ok())
            .unwrap_or_default();
        Self::new(&origin)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn network_error(e: gloo_net::Error) -> ApiError {
    ApiError::Network(format!("{}", e))
}

fn check_status(response: &Response) -> ApiResult<()> {
    if response.ok() {
        Ok(())
    } else {
        Err(ApiError::Status {
            status: response.status(),
        })
    }
}

#[async_trait(?Send)]
impl PlannerApi for BrowserApi {
    async fn fetch_profile(&self) -> ApiResult<Profile> {
        let response = Request::get(&endpoint_url(&self.base_url, PROFILE_PATH))
            .send()
            .await
            .map_err(network_error)?;

        check_status(&response)?;

        response
            .json::<Profile>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_chat(&self, message: &str) -> ApiResult<ChatReply> {
        let body = ChatRequest {
            message: message.to_string(),
        };

        let response = Request::post(&endpoint_url(&self.base_url, CHAT_PATH))
            .json(&body)
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(network_error)?;

        check_status(&response)?;

        response
            .json::<ChatReply>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}
