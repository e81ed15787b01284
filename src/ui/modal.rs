//! Modal System
//!
//! Any element with class `modal` can be opened by id. All modals share
//! `#modalOverlay` as backdrop. Each modal's `active` class is independent,
//! so several can be open at once; dismissal closes all of them.

use std::rc::Rc;

use crate::dom::{ids, ElementRef, Page, UiElement};

#[derive(Clone)]
pub struct ModalSystem {
    page: Rc<dyn Page>,
    overlay: Option<ElementRef>,
}

impl ModalSystem {
    pub fn new(page: Rc<dyn Page>, overlay: Option<ElementRef>) -> Self {
        Self { page, overlay }
    }

    /// Activate modal `id` and the overlay
    pub fn open(&self, id: &str) {
        if let Some(modal) = self.page.element_by_id(id) {
            modal.add_class(ids::ACTIVE_CLASS);
        }
        if let Some(overlay) = &self.overlay {
            overlay.add_class(ids::ACTIVE_CLASS);
        }
    }

    /// Deactivate modal `id` and the overlay
    pub fn close(&self, id: &str) {
        if let Some(modal) = self.page.element_by_id(id) {
            modal.remove_class(ids::ACTIVE_CLASS);
        }
        if let Some(overlay) = &self.overlay {
            overlay.remove_class(ids::ACTIVE_CLASS);
        }
    }

    /// Close every active modal and the overlay
    pub fn dismiss_all(&self) {
        for modal in self.active_modals() {
            modal.remove_class(ids::ACTIVE_CLASS);
        }
        if let Some(overlay) = &self.overlay {
            overlay.remove_class(ids::ACTIVE_CLASS);
        }
    }

    pub fn active_modals(&self) -> Vec<ElementRef> {
        self.page.query_all(ids::ACTIVE_MODAL_SELECTOR)
    }

    /// Document click: only a click on the overlay itself dismisses
    pub fn on_document_click(&self, target: &dyn UiElement) -> bool {
        if target.id() != ids::MODAL_OVERLAY {
            return false;
        }
        self.dismiss_all();
        true
    }

    /// Document keydown: `Escape` dismisses regardless of focus
    pub fn on_keydown(&self, key: &str) -> bool {
        if key != "Escape" {
            return false;
        }
        self.dismiss_all();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryPage;

    fn setup() -> (Rc<MemoryPage>, ModalSystem) {
        let page = Rc::new(MemoryPage::planner_shell());
        let body = page.body();
        page.append(&body, "div", "addTaskModal", "modal");
        let subject = page.append(&body, "div", "addSubjectModal", "modal");
        page.append(&subject, "button", "saveSubject", "btn");

        let overlay = page.element_by_id(ids::MODAL_OVERLAY);
        let modals = ModalSystem::new(page.clone(), overlay);
        (page, modals)
    }

    fn is_active(page: &MemoryPage, id: &str) -> bool {
        page.find(id).unwrap().has_class(ids::ACTIVE_CLASS)
    }

    #[test]
    fn test_open_then_close() {
        let (page, modals) = setup();

        modals.open("addTaskModal");
        assert!(is_active(&page, "addTaskModal"));
        assert!(is_active(&page, ids::MODAL_OVERLAY));

        modals.close("addTaskModal");
        assert!(!is_active(&page, "addTaskModal"));
        assert!(!is_active(&page, ids::MODAL_OVERLAY));
    }

    #[test]
    fn test_multiple_modals_can_be_active() {
        let (page, modals) = setup();

        modals.open("addTaskModal");
        modals.open("addSubjectModal");
        assert_eq!(modals.active_modals().len(), 2);

        // Closing one also hides the shared overlay, leaving the other active
        modals.close("addTaskModal");
        assert!(is_active(&page, "addSubjectModal"));
        assert!(!is_active(&page, ids::MODAL_OVERLAY));
    }

    #[test]
    fn test_escape_dismisses_everything() {
        let (page, modals) = setup();
        modals.open("addTaskModal");
        modals.open("addSubjectModal");

        assert!(!modals.on_keydown("Enter"));
        assert_eq!(modals.active_modals().len(), 2);

        assert!(modals.on_keydown("Escape"));
        assert!(modals.active_modals().is_empty());
        assert!(!is_active(&page, ids::MODAL_OVERLAY));
    }

    #[test]
    fn test_only_overlay_click_dismisses() {
        let (page, modals) = setup();
        modals.open("addSubjectModal");

        let inside = page.find("saveSubject").unwrap();
        assert!(!modals.on_document_click(inside.as_ref()));
        assert!(is_active(&page, "addSubjectModal"));

        let overlay = page.find(ids::MODAL_OVERLAY).unwrap();
        assert!(modals.on_document_click(overlay.as_ref()));
        assert!(!is_active(&page, "addSubjectModal"));
        assert!(!is_active(&page, ids::MODAL_OVERLAY));
    }

    #[test]
    fn test_unknown_id_still_toggles_overlay() {
        let (page, modals) = setup();
        modals.open("nope");
        assert!(is_active(&page, ids::MODAL_OVERLAY));
        modals.close("nope");
        assert!(!is_active(&page, ids::MODAL_OVERLAY));
    }
}
