//! Markup Integration Surface
//!
//! Element ids and CSS selectors shared with the planner's HTML templates.

pub const CURRENT_TIME: &str = "currentTime";

pub const SIDEBAR: &str = "sidebar";
pub const MENU_TOGGLE: &str = "menuToggle";
pub const SIDEBAR_CLOSE: &str = "sidebarClose";

pub const MODAL_OVERLAY: &str = "modalOverlay";
pub const TOAST_CONTAINER: &str = "toastContainer";

pub const NAV_LEVEL: &str = "navLevel";
pub const NAV_XP: &str = "navXp";
pub const NAV_XP_FILL: &str = "navXpFill";

pub const CHATBOT_TOGGLE: &str = "chatbotToggle";
pub const CHATBOT_CLOSE: &str = "chatbotClose";
pub const CHATBOT_WINDOW: &str = "chatbotWindow";
pub const CHAT_SEND: &str = "chatSend";
pub const CHAT_INPUT: &str = "chatInput";
pub const CHATBOT_MESSAGES: &str = "chatbotMessages";

/// Summary cards on the dashboard header
pub const STAT_CARD_SELECTOR: &str = ".stat-card";

/// Every other content card that fades in on load
pub const CONTENT_CARD_SELECTOR: &str = ".card, .subject-card, .note-card, .suggestion-card";

pub const ACTIVE_MODAL_SELECTOR: &str = ".modal.active";

/// Class toggled on the sidebar
pub const OPEN_CLASS: &str = "open";

/// Class toggled on modals, the overlay and the chat window
pub const ACTIVE_CLASS: &str = "active";
