//! Chat Widget
//!
//! Floating assistant window. A send appends the user's message and a
//! "thinking" placeholder, posts to `/api/chat`, then swaps the placeholder
//! for the reply (or an apology when the call fails).

use std::rc::Rc;

use crate::api::{ApiResult, ChatReply, PlannerApi};
use crate::dom::{element_with_class, ids, ElementRef, Page};
use crate::ui::clock::WallClock;

/// Shown in place of a reply when the chat call fails
pub const APOLOGY: &str = "Sorry, I'm having trouble connecting to the server.";

/// Placeholder bubble text while a reply is pending
pub const THINKING: &str = "Thinking...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sender {
    User,
    Assistant,
}

#[derive(Clone)]
pub struct ChatWidget {
    page: Rc<dyn Page>,
    api: Rc<dyn PlannerApi>,
    wall_clock: Rc<dyn WallClock>,
    window: ElementRef,
    input: Option<ElementRef>,
    send_button: Option<ElementRef>,
    messages: Option<ElementRef>,
}

impl ChatWidget {
    /// Resolve the chat elements; `None` unless both the toggle button and
    /// the window exist
    pub fn bind(
        page: Rc<dyn Page>,
        api: Rc<dyn PlannerApi>,
        wall_clock: Rc<dyn WallClock>,
    ) -> Option<Self> {
        page.element_by_id(ids::CHATBOT_TOGGLE)?;
        let window = page.element_by_id(ids::CHATBOT_WINDOW)?;

        Some(Self {
            input: page.element_by_id(ids::CHAT_INPUT),
            send_button: page.element_by_id(ids::CHAT_SEND),
            messages: page.element_by_id(ids::CHATBOT_MESSAGES),
            page,
            api,
            wall_clock,
            window,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.has_class(ids::ACTIVE_CLASS)
    }

    /// `#chatbotToggle` click; focuses the input when opening
    pub fn toggle(&self) {
        if self.window.toggle_class(ids::ACTIVE_CLASS) {
            if let Some(input) = &self.input {
                input.focus();
            }
        }
    }

    /// `#chatbotClose` click
    pub fn close(&self) {
        self.window.remove_class(ids::ACTIVE_CLASS);
    }

    /// Send the input's trimmed text.
    ///
    /// Returns `None` without doing anything when there is nothing to send,
    /// otherwise the outcome of the chat call after the transcript is updated.
    pub async fn send(&self) -> Option<ApiResult<ChatReply>> {
        let input = self.input.as_ref()?;
        let text = input.value().trim().to_string();
        if text.is_empty() {
            return None;
        }

        self.append_message(Sender::User, &text);
        input.set_value("");
        self.set_busy(true);

        let placeholder = self.append_placeholder();

        let outcome = self.api.send_chat(&text).await;

        if let Some(placeholder) = &placeholder {
            placeholder.remove();
        }
        match &outcome {
            Ok(reply) => {
                self.append_message(Sender::Assistant, &reply.reply);
            }
            Err(e) => {
                tracing::warn!("Chat request failed: {}", e);
                self.append_message(Sender::Assistant, APOLOGY);
            }
        }

        self.set_busy(false);
        input.focus();

        Some(outcome)
    }

    fn set_busy(&self, busy: bool) {
        for control in [&self.input, &self.send_button].into_iter().flatten() {
            control.set_disabled(busy);
        }
    }

    fn avatar(&self) -> ElementRef {
        let page = self.page.as_ref();
        let avatar = element_with_class(page, "div", "msg-avatar");
        avatar.append_child(&element_with_class(page, "i", "fas fa-robot"));
        avatar
    }

    fn append_to_transcript(&self, node: &ElementRef) -> bool {
        let Some(messages) = &self.messages else {
            return false;
        };
        messages.append_child(node);
        messages.scroll_to_bottom();
        true
    }

    fn append_message(&self, sender: Sender, text: &str) -> Option<ElementRef> {
        let page = self.page.as_ref();
        let class = match sender {
            Sender::User => "chat-msg user",
            Sender::Assistant => "chat-msg ai",
        };

        let message = element_with_class(page, "div", class);
        if sender == Sender::Assistant {
            message.append_child(&self.avatar());
        }
        let bubble = element_with_class(page, "div", "msg-bubble");
        bubble.set_text(text);
        message.append_child(&bubble);

        self.append_to_transcript(&message).then_some(message)
    }

    fn append_placeholder(&self) -> Option<ElementRef> {
        let page = self.page.as_ref();
        let stamp = self.wall_clock.now().and_utc().timestamp_millis();

        let placeholder = element_with_class(page, "div", "chat-msg ai");
        placeholder.set_id(&format!("typing-{}", stamp));
        placeholder.append_child(&self.avatar());

        let bubble = element_with_class(page, "div", "msg-bubble");
        bubble.append_child(&element_with_class(page, "i", "fas fa-ellipsis-h fa-fade"));
        let label = page.create_element("span");
        label.set_text(THINKING);
        bubble.append_child(&label);
        placeholder.append_child(&bubble);

        self.append_to_transcript(&placeholder).then_some(placeholder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::stub::StubApi;
    use crate::api::ApiError;
    use crate::dom::{MemoryPage, UiElement};
    use crate::ui::clock::FixedClock;
    use chrono::NaiveDate;

    fn clock() -> Rc<FixedClock> {
        Rc::new(FixedClock(
            NaiveDate::from_ymd_opt(2024, 3, 5)
                .unwrap()
                .and_hms_milli_opt(14, 7, 9, 250)
                .unwrap(),
        ))
    }

    fn setup(api: StubApi) -> (Rc<MemoryPage>, Rc<StubApi>, ChatWidget) {
        let page = Rc::new(MemoryPage::planner_shell());
        let api = Rc::new(api);
        let chat = ChatWidget::bind(page.clone(), api.clone(), clock()).unwrap();
        (page, api, chat)
    }

    fn transcript(page: &MemoryPage) -> Vec<(String, String)> {
        page.find(ids::CHATBOT_MESSAGES)
            .unwrap()
            .children()
            .iter()
            .map(|m| {
                let role = if m.has_class("user") { "user" } else { "ai" };
                (role.to_string(), m.text())
            })
            .collect()
    }

    #[test]
    fn test_bind_requires_toggle_and_window() {
        let page = Rc::new(MemoryPage::new());
        let api = Rc::new(StubApi::new());
        assert!(ChatWidget::bind(page.clone(), api.clone(), clock()).is_none());

        let body = page.body();
        page.append(&body, "div", ids::CHATBOT_WINDOW, "chatbot-window");
        assert!(ChatWidget::bind(page.clone(), api.clone(), clock()).is_none());

        page.append(&body, "button", ids::CHATBOT_TOGGLE, "");
        assert!(ChatWidget::bind(page, api, clock()).is_some());
    }

    #[test]
    fn test_toggle_focuses_input_when_opening() {
        let (page, _api, chat) = setup(StubApi::new());

        chat.toggle();
        assert!(chat.is_open());
        assert_eq!(page.focused_id().as_deref(), Some(ids::CHAT_INPUT));

        page.find(ids::CHAT_SEND).unwrap().focus();
        chat.toggle();
        assert!(!chat.is_open());
        assert_eq!(page.focused_id().as_deref(), Some(ids::CHAT_SEND));

        chat.toggle();
        chat.close();
        assert!(!chat.is_open());
    }

    #[tokio::test]
    async fn test_send_renders_reply() {
        let (page, api, chat) = setup(StubApi::new().with_reply(Ok(ChatReply {
            reply: "Hi there!".to_string(),
        })));
        let input = page.find(ids::CHAT_INPUT).unwrap();
        input.set_value("  hello ");

        let outcome = chat.send().await.unwrap();
        assert!(outcome.is_ok());
        assert_eq!(*api.chat_messages.borrow(), vec!["hello".to_string()]);

        assert_eq!(
            transcript(&page),
            vec![
                ("user".to_string(), "hello".to_string()),
                ("ai".to_string(), "Hi there!".to_string()),
            ]
        );
        // Placeholder is gone; only the reply carries an avatar
        assert_eq!(page.find_all("i.fas.fa-robot").len(), 1);
        assert!(page.find_all("i.fa-ellipsis-h").is_empty());

        assert_eq!(input.value(), "");
        assert!(!input.is_disabled());
        assert!(!page.find(ids::CHAT_SEND).unwrap().is_disabled());
        assert!(input.is_focused());

        let messages = page.find(ids::CHATBOT_MESSAGES).unwrap();
        assert_eq!(messages.scroll_top(), messages.child_count());
    }

    #[tokio::test]
    async fn test_failure_shows_apology() {
        let (page, _api, chat) =
            setup(StubApi::new().with_reply(Err(ApiError::Network("refused".to_string()))));
        page.find(ids::CHAT_INPUT).unwrap().set_value("hello");

        let outcome = chat.send().await.unwrap();
        assert!(outcome.is_err());
        assert_eq!(
            transcript(&page),
            vec![
                ("user".to_string(), "hello".to_string()),
                ("ai".to_string(), APOLOGY.to_string()),
            ]
        );
        assert!(page.find_all("i.fa-ellipsis-h").is_empty());
        assert!(page.find(ids::CHAT_INPUT).unwrap().is_focused());
    }

    #[tokio::test]
    async fn test_status_error_also_apologises() {
        let (page, _api, chat) =
            setup(StubApi::new().with_reply(Err(ApiError::Status { status: 502 })));
        page.find(ids::CHAT_INPUT).unwrap().set_value("hello");

        chat.send().await;
        assert_eq!(transcript(&page).last().unwrap().1, APOLOGY);
    }

    #[tokio::test]
    async fn test_empty_input_is_noop() {
        let (page, api, chat) = setup(StubApi::new());
        page.find(ids::CHAT_INPUT).unwrap().set_value("   ");

        assert!(chat.send().await.is_none());
        assert!(transcript(&page).is_empty());
        assert!(api.chat_messages.borrow().is_empty());
        assert!(!page.find(ids::CHAT_INPUT).unwrap().is_disabled());
    }

    #[test]
    fn test_placeholder_shape() {
        let (page, _api, chat) = setup(StubApi::new());

        let placeholder = chat.append_placeholder().unwrap();
        let expected = format!("typing-{}", clock().0.and_utc().timestamp_millis());
        assert_eq!(placeholder.id(), expected);
        assert!(placeholder.has_class("chat-msg"));
        assert!(placeholder.has_class("ai"));
        assert_eq!(placeholder.text(), THINKING);
        assert_eq!(page.find_all("i.fas.fa-ellipsis-h.fa-fade").len(), 1);
        assert_eq!(page.find_all("div.msg-avatar").len(), 1);
    }

    #[test]
    fn test_reply_is_text_not_markup() {
        let (page, _api, chat) = setup(StubApi::new());
        chat.append_message(Sender::Assistant, "<img src=x>");

        assert_eq!(transcript(&page), vec![("ai".to_string(), "<img src=x>".to_string())]);
        assert!(page.find_all("img").is_empty());
    }
}
