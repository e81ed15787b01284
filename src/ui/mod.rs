//! Planner UI Controllers
//!
//! One controller per widget, plus [`PlannerUi`], which resolves every element
//! once and exposes the operations the page's event handlers call.
//!
//! # Widgets
//!
//! - `clock` - Header date/time, ticking on an interval
//! - `sidebar` - Collapsible navigation with outside-click dismissal on mobile
//! - `modal` - Generic modals sharing one overlay
//! - `toast` - Auto-dismissing notifications
//! - `animation` - Staggered fade-in of cards at start-up
//! - `profile` - Level / XP display fed by `GET /api/profile`
//! - `chat` - Assistant window fed by `POST /api/chat`

pub mod animation;
pub mod chat;
pub mod clock;
pub mod modal;
pub mod profile;
pub mod sidebar;
pub mod toast;

pub use animation::{EntranceAnimation, StaggerGroup};
pub use chat::ChatWidget;
pub use clock::{format_clock, ClockWidget, FixedClock, SystemClock, WallClock};
pub use modal::ModalSystem;
pub use profile::ProfileWidget;
pub use sidebar::Sidebar;
pub use toast::{ToastKind, Toaster};

use std::rc::Rc;

use crate::api::{ApiResult, ChatReply, PlannerApi, Profile};
use crate::config::UiConfig;
use crate::dom::{ids, ElementRef, Page, UiElement};
use crate::scheduler::Scheduler;

/// Everything the controllers need from the host
#[derive(Clone)]
pub struct UiContext {
    pub page: Rc<dyn Page>,
    pub api: Rc<dyn PlannerApi>,
    pub scheduler: Rc<dyn Scheduler>,
    pub wall_clock: Rc<dyn WallClock>,
    pub config: UiConfig,
}

struct Widgets {
    ctx: UiContext,
    clock: ClockWidget,
    sidebar: Sidebar,
    modals: ModalSystem,
    toaster: Toaster,
    profile: ProfileWidget,
    chat: Option<ChatWidget>,
}

/// The whole page's UI glue.
///
/// Cheap to clone; clones share the same widgets, so event handlers can each
/// hold one.
#[derive(Clone)]
pub struct PlannerUi {
    inner: Rc<Widgets>,
}

impl PlannerUi {
    /// Resolve every element the widgets bind to
    pub fn new(ctx: UiContext) -> Self {
        let page = Rc::clone(&ctx.page);
        let config = &ctx.config;

        let clock = ClockWidget::new(page.element_by_id(ids::CURRENT_TIME));
        let sidebar = Sidebar::new(
            page.element_by_id(ids::SIDEBAR),
            page.element_by_id(ids::MENU_TOGGLE),
            config.mobile_breakpoint_px,
        );
        let modals = ModalSystem::new(Rc::clone(&page), page.element_by_id(ids::MODAL_OVERLAY));
        let toaster = Toaster::new(
            Rc::clone(&page),
            page.element_by_id(ids::TOAST_CONTAINER),
            Rc::clone(&ctx.scheduler),
            config.toast_visible(),
            config.toast_fade(),
        );
        let profile = ProfileWidget::new(
            Rc::clone(&ctx.api),
            page.element_by_id(ids::NAV_LEVEL),
            page.element_by_id(ids::NAV_XP),
            page.element_by_id(ids::NAV_XP_FILL),
            config.xp_per_level,
        );
        let chat = ChatWidget::bind(
            Rc::clone(&page),
            Rc::clone(&ctx.api),
            Rc::clone(&ctx.wall_clock),
        );
        if chat.is_none() {
            tracing::debug!("Chat widget not present on this page");
        }

        Self {
            inner: Rc::new(Widgets {
                ctx,
                clock,
                sidebar,
                modals,
                toaster,
                profile,
                chat,
            }),
        }
    }

    pub fn config(&self) -> &UiConfig {
        &self.inner.ctx.config
    }

    pub fn has_chat(&self) -> bool {
        self.inner.chat.is_some()
    }

    /// Start-up: clock tick plus interval, entrance animation and a
    /// background profile refresh
    pub fn start(&self) {
        let ctx = &self.inner.ctx;

        self.tick_clock();
        let ui = self.clone();
        ctx.scheduler
            .set_interval(ctx.config.clock_interval(), Box::new(move || ui.tick_clock()));

        let animated = EntranceAnimation::default().run(ctx.page.as_ref(), &ctx.scheduler);

        self.refresh_profile_in_background();

        tracing::info!(
            "Planner UI started ({} animated cards, chat {})",
            animated,
            if self.has_chat() { "on" } else { "off" }
        );
    }

    pub fn tick_clock(&self) {
        self.inner.clock.tick(&self.inner.ctx.wall_clock.now());
    }

    pub fn toggle_sidebar(&self) {
        self.inner.sidebar.toggle();
    }

    pub fn close_sidebar(&self) {
        self.inner.sidebar.close();
    }

    /// Document click: mobile sidebar dismissal, then overlay dismissal
    pub fn on_document_click(&self, target: &dyn UiElement, viewport_width: f64) {
        self.inner.sidebar.on_document_click(target, viewport_width);
        self.inner.modals.on_document_click(target);
    }

    pub fn on_keydown(&self, key: &str) {
        self.inner.modals.on_keydown(key);
    }

    pub fn open_modal(&self, id: &str) {
        self.inner.modals.open(id);
    }

    pub fn close_modal(&self, id: &str) {
        self.inner.modals.close(id);
    }

    pub fn show_toast(&self, message: &str, kind: ToastKind) -> Option<ElementRef> {
        self.inner.toaster.show(message, kind)
    }

    /// Fetch and render the profile
    pub async fn update_profile(&self) -> ApiResult<Profile> {
        self.inner.profile.refresh().await
    }

    fn refresh_profile_in_background(&self) {
        let ui = self.clone();
        self.inner.ctx.scheduler.spawn(Box::pin(async move {
            // Outcome is already logged by the widget
            let _ = ui.update_profile().await;
        }));
    }

    /// Congratulate on `xp` gained and refresh the profile.
    /// Returns `false` (doing nothing) unless `xp` is positive.
    pub fn show_xp_toast(&self, xp: i64) -> bool {
        if xp <= 0 {
            return false;
        }
        self.show_toast(&format!("+{} XP Earned! 🌟", xp), ToastKind::Success);
        self.refresh_profile_in_background();
        true
    }

    pub fn toggle_chat(&self) {
        if let Some(chat) = &self.inner.chat {
            chat.toggle();
        }
    }

    pub fn close_chat(&self) {
        if let Some(chat) = &self.inner.chat {
            chat.close();
        }
    }

    /// Send the chat input now; `None` if there was nothing to send
    pub async fn send_chat(&self) -> Option<ApiResult<ChatReply>> {
        match &self.inner.chat {
            Some(chat) => chat.send().await,
            None => None,
        }
    }

    fn send_chat_in_background(&self) {
        let ui = self.clone();
        self.inner.ctx.scheduler.spawn(Box::pin(async move {
            ui.send_chat().await;
        }));
    }

    /// Keypress in `#chatInput`; `Enter` sends
    pub fn on_chat_key(&self, key: &str) -> bool {
        if key != "Enter" {
            return false;
        }
        self.send_chat_in_background();
        true
    }

    /// `#chatSend` click
    pub fn on_chat_send_click(&self) {
        self.send_chat_in_background();
    }
}
