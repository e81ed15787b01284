//! Sidebar Controller
//!
//! Open/close state lives in the `open` class on `#sidebar`.

use crate::dom::{ids, ElementRef, UiElement};

#[derive(Clone)]
pub struct Sidebar {
    panel: Option<ElementRef>,
    toggle: Option<ElementRef>,
    mobile_breakpoint_px: f64,
}

impl Sidebar {
    pub fn new(
        panel: Option<ElementRef>,
        toggle: Option<ElementRef>,
        mobile_breakpoint_px: f64,
    ) -> Self {
        Self {
            panel,
            toggle,
            mobile_breakpoint_px,
        }
    }

    /// `#menuToggle` click
    pub fn toggle(&self) {
        if let Some(panel) = &self.panel {
            panel.toggle_class(ids::OPEN_CLASS);
        }
    }

    /// `#sidebarClose` click
    pub fn close(&self) {
        if let Some(panel) = &self.panel {
            panel.remove_class(ids::OPEN_CLASS);
        }
    }

    pub fn is_open(&self) -> bool {
        self.panel
            .as_ref()
            .map(|p| p.has_class(ids::OPEN_CLASS))
            .unwrap_or(false)
    }

    /// Document-level click: on narrow viewports, a click outside both the
    /// sidebar and its toggle closes an open sidebar. Returns whether it closed.
    pub fn on_document_click(&self, target: &dyn UiElement, viewport_width: f64) -> bool {
        if viewport_width > self.mobile_breakpoint_px || !self.is_open() {
            return false;
        }
        let Some(panel) = &self.panel else {
            return false;
        };

        let inside_toggle = self
            .toggle
            .as_ref()
            .map(|t| t.contains(target))
            .unwrap_or(false);

        if panel.contains(target) || inside_toggle {
            return false;
        }

        panel.remove_class(ids::OPEN_CLASS);
        true
    }
}
