//! Planner Server API
//!
//! The two calls the UI makes to the planner backend.
//!
//! # Endpoints
//!
//! - `GET /api/profile` - Current level and XP
//! - `POST /api/chat` - Send a chat message, receive the assistant's reply
//!
//! Both calls resolve to a `Result`: the widgets decide how each outcome is
//! rendered, and a non-2xx status is an ordinary [`ApiError::Status`] value
//! rather than an exceptional path.

pub mod dto;
pub mod error;

#[cfg(feature = "native")]
mod client;
#[cfg(test)]
pub(crate) mod stub;

pub use dto::{ChatReply, ChatRequest, Profile};
pub use error::{ApiError, ApiResult};

#[cfg(feature = "native")]
pub use client::HttpApi;

use async_trait::async_trait;

/// Profile endpoint path
pub const PROFILE_PATH: &str = "/api/profile";

/// Chat endpoint path
pub const CHAT_PATH: &str = "/api/chat";

/// Join a base URL and an endpoint path without doubling the slash
pub fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Server calls used by the profile and chat widgets.
///
/// Futures are `!Send`: implementations run on the UI's single thread.
#[async_trait(?Send)]
pub trait PlannerApi {
    /// `GET /api/profile`
    async fn fetch_profile(&self) -> ApiResult<Profile>;

    /// `POST /api/chat` with `{"message": message}`
    async fn send_chat(&self, message: &str) -> ApiResult<ChatReply>;
}
