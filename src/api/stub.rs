//! Canned [`PlannerApi`] for widget tests.

use async_trait::async_trait;
use std::cell::RefCell;
use std::collections::VecDeque;

use super::{ApiError, ApiResult, ChatReply, PlannerApi, Profile};

/// Replays queued responses and records every request.
///
/// When a queue runs dry the last response is repeated, so a single
/// `with_profile` covers any number of refreshes.
#[derive(Default)]
pub struct StubApi {
    profiles: RefCell<VecDeque<ApiResult<Profile>>>,
    last_profile: RefCell<Option<ApiResult<Profile>>>,
    replies: RefCell<VecDeque<ApiResult<ChatReply>>>,
    last_reply: RefCell<Option<ApiResult<ChatReply>>>,
    pub profile_calls: RefCell<usize>,
    pub chat_messages: RefCell<Vec<String>>,
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(self, response: ApiResult<Profile>) -> Self {
        self.profiles.borrow_mut().push_back(response);
        self
    }

    pub fn with_reply(self, response: ApiResult<ChatReply>) -> Self {
        self.replies.borrow_mut().push_back(response);
        self
    }

    fn next<T: Clone>(
        queue: &RefCell<VecDeque<ApiResult<T>>>,
        last: &RefCell<Option<ApiResult<T>>>,
    ) -> ApiResult<T> {
        if let Some(response) = queue.borrow_mut().pop_front() {
            *last.borrow_mut() = Some(response.clone());
            return response;
        }
        last.borrow()
            .clone()
            .unwrap_or_else(|| Err(ApiError::Network("no stubbed response".to_string())))
    }
}

#[async_trait(?Send)]
impl PlannerApi for StubApi {
    async fn fetch_profile(&self) -> ApiResult<Profile> {
        *self.profile_calls.borrow_mut() += 1;
        Self::next(&self.profiles, &self.last_profile)
    }

    async fn send_chat(&self, message: &str) -> ApiResult<ChatReply> {
        self.chat_messages.borrow_mut().push(message.to_string());
        Self::next(&self.replies, &self.last_reply)
    }
}
