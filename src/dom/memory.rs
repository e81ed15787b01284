//! In-Memory Page
//!
//! A small DOM tree that implements [`Page`] and [`UiElement`] without a
//! browser. Used by the unit tests and by the CLI, which drives the same
//! controllers the browser does and then reads the resulting tree.

use std::any::Any;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use super::ids;
use super::selector::SelectorList;
use super::{ElementRef, Page, UiElement};

type FocusSlot = Rc<RefCell<Weak<MemoryElement>>>;

/// Mutable per-node state
#[derive(Debug, Default)]
struct NodeState {
    id: String,
    classes: Vec<String>,
    text: String,
    styles: BTreeMap<String, String>,
    value: String,
    disabled: bool,
    scroll_top: usize,
}

/// One element in a [`MemoryPage`]
pub struct MemoryElement {
    tag: String,
    state: RefCell<NodeState>,
    parent: RefCell<Weak<MemoryElement>>,
    children: RefCell<Vec<Rc<MemoryElement>>>,
    self_ref: Weak<MemoryElement>,
    focus: FocusSlot,
}

impl MemoryElement {
    fn new(tag: &str, focus: FocusSlot) -> Rc<Self> {
        Rc::new_cyclic(|self_ref| Self {
            tag: tag.to_ascii_lowercase(),
            state: RefCell::new(NodeState::default()),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
            self_ref: self_ref.clone(),
            focus,
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn classes(&self) -> Vec<String> {
        self.state.borrow().classes.clone()
    }

    pub fn children(&self) -> Vec<Rc<MemoryElement>> {
        self.children.borrow().clone()
    }

    pub fn child_count(&self) -> usize {
        self.children.borrow().len()
    }

    pub fn parent(&self) -> Option<Rc<MemoryElement>> {
        self.parent.borrow().upgrade()
    }

    pub fn is_focused(&self) -> bool {
        self.focus
            .borrow()
            .upgrade()
            .map(|f| std::ptr::eq(Rc::as_ptr(&f), self))
            .unwrap_or(false)
    }

    /// Scroll offset, counted in child rows
    pub fn scroll_top(&self) -> usize {
        self.state.borrow().scroll_top
    }

    fn detach_child(&self, child: &MemoryElement) {
        self.children
            .borrow_mut()
            .retain(|c| !std::ptr::eq(Rc::as_ptr(c), child));
    }

    fn matches(&self, selector: &SelectorList) -> bool {
        let state = self.state.borrow();
        selector.matches(&self.tag, &state.id, &state.classes)
    }
}

/// Preorder walk including `node`
fn walk(node: &Rc<MemoryElement>, visit: &mut dyn FnMut(&Rc<MemoryElement>)) {
    visit(node);
    for child in node.children() {
        walk(&child, visit);
    }
}

impl std::fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("MemoryElement")
            .field("tag", &self.tag)
            .field("id", &state.id)
            .field("classes", &state.classes)
            .field("children", &self.children.borrow().len())
            .finish()
    }
}

impl UiElement for MemoryElement {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn id(&self) -> String {
        self.state.borrow().id.clone()
    }

    fn set_id(&self, id: &str) {
        self.state.borrow_mut().id = id.to_string();
    }

    fn has_class(&self, class: &str) -> bool {
        self.state.borrow().classes.iter().any(|c| c == class)
    }

    fn add_class(&self, class: &str) {
        let mut state = self.state.borrow_mut();
        if !state.classes.iter().any(|c| c == class) {
            state.classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.state.borrow_mut().classes.retain(|c| c != class);
    }

    fn toggle_class(&self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    fn set_class_name(&self, classes: &str) {
        let mut state = self.state.borrow_mut();
        state.classes.clear();
        for class in classes.split_whitespace() {
            if !state.classes.iter().any(|c| c == class) {
                state.classes.push(class.to_string());
            }
        }
    }

    fn text(&self) -> String {
        let mut text = self.state.borrow().text.clone();
        for child in self.children.borrow().iter() {
            text.push_str(&child.text());
        }
        text
    }

    fn set_text(&self, text: &str) {
        let removed: Vec<_> = self.children.borrow_mut().drain(..).collect();
        for child in removed {
            *child.parent.borrow_mut() = Weak::new();
        }
        self.state.borrow_mut().text = text.to_string();
    }

    fn style(&self, property: &str) -> Option<String> {
        self.state.borrow().styles.get(property).cloned()
    }

    fn set_style(&self, property: &str, value: &str) {
        self.state
            .borrow_mut()
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn value(&self) -> String {
        self.state.borrow().value.clone()
    }

    fn set_value(&self, value: &str) {
        self.state.borrow_mut().value = value.to_string();
    }

    fn is_disabled(&self) -> bool {
        self.state.borrow().disabled
    }

    fn set_disabled(&self, disabled: bool) {
        self.state.borrow_mut().disabled = disabled;
    }

    fn focus(&self) {
        *self.focus.borrow_mut() = self.self_ref.clone();
    }

    fn append_child(&self, child: &ElementRef) {
        let Some(child) = child
            .as_any()
            .downcast_ref::<MemoryElement>()
            .and_then(|c| c.self_ref.upgrade())
        else {
            tracing::warn!("append_child: foreign element ignored");
            return;
        };

        // Appending an ancestor would create a cycle
        if child.contains(self) {
            tracing::warn!("append_child: refusing to append an ancestor");
            return;
        }

        child.remove();
        *child.parent.borrow_mut() = self.self_ref.clone();
        self.children.borrow_mut().push(child);
    }

    fn remove(&self) {
        let parent = self.parent.borrow().upgrade();
        if let Some(parent) = parent {
            parent.detach_child(self);
        }
        *self.parent.borrow_mut() = Weak::new();
    }

    fn contains(&self, other: &dyn UiElement) -> bool {
        let Some(other) = other.as_any().downcast_ref::<MemoryElement>() else {
            return false;
        };

        if std::ptr::eq(other, self) {
            return true;
        }
        let mut current = other.parent();
        while let Some(node) = current {
            if std::ptr::eq(Rc::as_ptr(&node), self) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    fn scroll_to_bottom(&self) {
        let height = self.children.borrow().len();
        self.state.borrow_mut().scroll_top = height;
    }
}

/// In-memory document rooted at a `<body>` element
pub struct MemoryPage {
    body: Rc<MemoryElement>,
    focus: FocusSlot,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    /// Empty page with just a body
    pub fn new() -> Self {
        let focus: FocusSlot = Rc::new(RefCell::new(Weak::new()));
        let body = MemoryElement::new("body", Rc::clone(&focus));
        Self { body, focus }
    }

    pub fn body(&self) -> Rc<MemoryElement> {
        Rc::clone(&self.body)
    }

    /// Create `<tag id=.. class=..>` and append it under `parent`
    pub fn append(
        &self,
        parent: &Rc<MemoryElement>,
        tag: &str,
        id: &str,
        classes: &str,
    ) -> Rc<MemoryElement> {
        let element = MemoryElement::new(tag, Rc::clone(&self.focus));
        element.set_id(id);
        element.set_class_name(classes);
        let as_ref: ElementRef = element.clone();
        parent.append_child(&as_ref);
        element
    }

    /// Concrete lookup, for assertions that need [`MemoryElement`] accessors
    pub fn find(&self, id: &str) -> Option<Rc<MemoryElement>> {
        if id.is_empty() {
            return None;
        }
        let mut found = None;
        walk(&self.body, &mut |node| {
            if found.is_none() && node.state.borrow().id == id {
                found = Some(Rc::clone(node));
            }
        });
        found
    }

    /// Concrete selector query
    pub fn find_all(&self, selector: &str) -> Vec<Rc<MemoryElement>> {
        let list = match SelectorList::parse(selector) {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!("{}", e);
                return Vec::new();
            }
        };

        let mut matched = Vec::new();
        walk(&self.body, &mut |node| {
            if node.matches(&list) {
                matched.push(Rc::clone(node));
            }
        });
        matched
    }

    /// Id of the focused element, if any
    pub fn focused_id(&self) -> Option<String> {
        self.focus.borrow().upgrade().map(|f| f.id())
    }

    /// Page skeleton carrying every id the planner widgets bind to
    pub fn planner_shell() -> Self {
        let page = Self::new();
        let body = page.body();

        let header = page.append(&body, "header", "", "topbar");
        page.append(&header, "button", ids::MENU_TOGGLE, "menu-toggle");
        page.append(&header, "span", ids::CURRENT_TIME, "current-time");
        let nav_profile = page.append(&header, "div", "", "nav-profile");
        page.append(&nav_profile, "span", ids::NAV_LEVEL, "nav-level");
        page.append(&nav_profile, "span", ids::NAV_XP, "nav-xp");
        let bar = page.append(&nav_profile, "div", "", "nav-xp-bar");
        page.append(&bar, "div", ids::NAV_XP_FILL, "nav-xp-fill");

        let sidebar = page.append(&body, "aside", ids::SIDEBAR, "sidebar");
        page.append(&sidebar, "button", ids::SIDEBAR_CLOSE, "sidebar-close");
        page.append(&sidebar, "nav", "", "sidebar-nav");

        page.append(&body, "main", "", "main-content");
        page.append(&body, "div", ids::MODAL_OVERLAY, "modal-overlay");
        page.append(&body, "div", ids::TOAST_CONTAINER, "toast-container");

        page.append(&body, "button", ids::CHATBOT_TOGGLE, "chatbot-toggle");
        let window = page.append(&body, "div", ids::CHATBOT_WINDOW, "chatbot-window");
        page.append(&window, "button", ids::CHATBOT_CLOSE, "chatbot-close");
        page.append(&window, "div", ids::CHATBOT_MESSAGES, "chatbot-messages");
        let input_row = page.append(&window, "div", "", "chatbot-input");
        page.append(&input_row, "input", ids::CHAT_INPUT, "");
        page.append(&input_row, "button", ids::CHAT_SEND, "");

        page
    }

    /// `<main>` of a [`MemoryPage::planner_shell`] page
    pub fn main_content(&self) -> Option<Rc<MemoryElement>> {
        self.find_all("main").into_iter().next()
    }
}

impl Page for MemoryPage {
    fn element_by_id(&self, id: &str) -> Option<ElementRef> {
        self.find(id).map(|e| e as ElementRef)
    }

    fn query_all(&self, selector: &str) -> Vec<ElementRef> {
        self.find_all(selector)
            .into_iter()
            .map(|e| e as ElementRef)
            .collect()
    }

    fn create_element(&self, tag: &str) -> ElementRef {
        MemoryElement::new(tag, Rc::clone(&self.focus))
    }
}
