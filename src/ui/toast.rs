//! Toast Notifications
//!
//! Transient messages appended to `#toastContainer`. Each toast stays for the
//! visible period, slides out over the fade period, then is removed.

use std::rc::Rc;
use std::time::Duration;

use crate::dom::{element_with_class, ElementRef, Page};
use crate::scheduler::Scheduler;

/// Toast variant; also the CSS modifier class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    Success,
    #[default]
    Info,
    Error,
    Warning,
}

impl ToastKind {
    /// Parse a kind name; anything unrecognized is `Info`
    pub fn from_name(name: &str) -> Self {
        match name {
            "success" => ToastKind::Success,
            "error" => ToastKind::Error,
            "warning" => ToastKind::Warning,
            _ => ToastKind::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Info => "info",
            ToastKind::Error => "error",
            ToastKind::Warning => "warning",
        }
    }

    /// Font Awesome icon class
    pub fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "fa-check-circle",
            ToastKind::Info => "fa-info-circle",
            ToastKind::Error => "fa-exclamation-circle",
            ToastKind::Warning => "fa-exclamation-triangle",
        }
    }
}

/// Creates toasts and runs their lifecycle
#[derive(Clone)]
pub struct Toaster {
    page: Rc<dyn Page>,
    container: Option<ElementRef>,
    scheduler: Rc<dyn Scheduler>,
    visible: Duration,
    fade: Duration,
}

impl Toaster {
    pub fn new(
        page: Rc<dyn Page>,
        container: Option<ElementRef>,
        scheduler: Rc<dyn Scheduler>,
        visible: Duration,
        fade: Duration,
    ) -> Self {
        Self {
            page,
            container,
            scheduler,
            visible,
            fade,
        }
    }

    /// Show `message`; returns the toast node, or `None` without a container
    pub fn show(&self, message: &str, kind: ToastKind) -> Option<ElementRef> {
        let container = self.container.as_ref()?;
        let page = self.page.as_ref();

        let toast = element_with_class(page, "div", &format!("toast {}", kind.as_str()));
        let icon = element_with_class(page, "i", &format!("fas {}", kind.icon()));
        let label = page.create_element("span");
        label.set_text(message);
        toast.append_child(&icon);
        toast.append_child(&label);
        container.append_child(&toast);

        let node = Rc::clone(&toast);
        let scheduler = Rc::clone(&self.scheduler);
        let fade = self.fade;
        self.scheduler.set_timeout(
            self.visible,
            Box::new(move || {
                node.set_style("opacity", "0");
                node.set_style("transform", "translateX(100px)");
                node.set_style("transition", &format!("all {}s ease", fade.as_secs_f64()));
                scheduler.set_timeout(fade, Box::new(move || node.remove()));
            }),
        );

        Some(toast)
    }
}
