//! # Study Planner
//!
//! Client-side UI glue for the study planner: header clock, collapsible
//! sidebar, modals, toasts, entrance animation, the XP/level widget and the
//! assistant chat window.
//!
//! The controllers are written against small abstractions so the same code
//! drives the browser (see the `planner-ui` crate) and headless runs:
//!
//! - [`dom`]: `UiElement` / `Page` traits and an in-memory page
//! - [`scheduler`]: timers and background tasks
//! - [`api`]: the profile and chat calls to the planner server
//! - [`ui`]: one controller per widget and the aggregate [`PlannerUi`]
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use study_planner::*;
//!
//! let page = Rc::new(MemoryPage::planner_shell());
//! let scheduler = Rc::new(ManualScheduler::new());
//! # struct Offline;
//! # #[async_trait::async_trait(?Send)]
//! # impl PlannerApi for Offline {
//! #     async fn fetch_profile(&self) -> ApiResult<Profile> { Err(ApiError::Status { status: 503 }) }
//! #     async fn send_chat(&self, _: &str) -> ApiResult<ChatReply> { Err(ApiError::Status { status: 503 }) }
//! # }
//!
//! let ui = PlannerUi::new(UiContext {
//!     page: page.clone(),
//!     api: Rc::new(Offline),
//!     scheduler: scheduler.clone(),
//!     wall_clock: Rc::new(SystemClock),
//!     config: UiConfig::default(),
//! });
//!
//! ui.start();
//! ui.show_toast("Welcome back", ToastKind::Info);
//! scheduler.advance(std::time::Duration::from_secs(4));
//! ```

pub mod api;
pub mod config;
pub mod dom;
pub mod scheduler;
pub mod ui;

// Re-export top-level types for convenience
pub use api::{ApiError, ApiResult, ChatReply, ChatRequest, PlannerApi, Profile};

#[cfg(feature = "native")]
pub use api::HttpApi;

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, UiConfig};

pub use dom::{ElementRef, MemoryElement, MemoryPage, Page, UiElement};

pub use scheduler::{ManualScheduler, Scheduler};

#[cfg(feature = "native")]
pub use scheduler::TokioScheduler;

pub use ui::{
    ChatWidget, ClockWidget, EntranceAnimation, FixedClock, ModalSystem, PlannerUi,
    ProfileWidget, Sidebar, SystemClock, ToastKind, Toaster, UiContext, WallClock,
};
