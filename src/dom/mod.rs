//! Element Abstraction
//!
//! The controllers never touch a concrete DOM. They work against [`UiElement`]
//! and [`Page`], which the browser front-end implements over `web-sys` and
//! [`MemoryPage`] implements in memory for tests and headless runs.
//!
//! Everything here is single-threaded: elements are shared through `Rc` and
//! mutate through `&self`, the same way DOM handles behave in the browser.

pub mod ids;
mod memory;
mod selector;

pub use memory::{MemoryElement, MemoryPage};
pub use selector::{CompoundSelector, SelectorList};

use std::any::Any;
use std::rc::Rc;

/// Shared handle to an element
pub type ElementRef = Rc<dyn UiElement>;

/// The subset of DOM element behaviour the planner widgets rely on
pub trait UiElement {
    /// Concrete type access, used by [`UiElement::contains`] and `append_child`
    fn as_any(&self) -> &dyn Any;

    fn id(&self) -> String;
    fn set_id(&self, id: &str);

    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    /// Flip `class`, returning whether it is now present
    fn toggle_class(&self, class: &str) -> bool;
    /// Replace the whole class list with a space-separated string
    fn set_class_name(&self, classes: &str);

    /// `textContent` semantics: own text followed by every descendant's text
    fn text(&self) -> String;
    /// Replaces own text and drops all children
    fn set_text(&self, text: &str);

    /// Inline style lookup by CSS property name (`opacity`, `width`, ...)
    fn style(&self, property: &str) -> Option<String>;
    fn set_style(&self, property: &str, value: &str);

    /// Form control value; empty for non-form elements
    fn value(&self) -> String;
    fn set_value(&self, value: &str);

    fn is_disabled(&self) -> bool;
    fn set_disabled(&self, disabled: bool);

    fn focus(&self);

    fn append_child(&self, child: &ElementRef);
    /// Detach from the parent, if any
    fn remove(&self);

    /// Inclusive descendant test, like `Node.contains`
    fn contains(&self, other: &dyn UiElement) -> bool;

    fn scroll_to_bottom(&self);
}

/// Document-level lookups
pub trait Page {
    fn element_by_id(&self, id: &str) -> Option<ElementRef>;

    /// Every attached element matching `selector`, in document order
    fn query_all(&self, selector: &str) -> Vec<ElementRef>;

    /// New detached element
    fn create_element(&self, tag: &str) -> ElementRef;
}

/// Build `<tag class="classes">` in one step
pub fn element_with_class(page: &dyn Page, tag: &str, classes: &str) -> ElementRef {
    let element = page.create_element(tag);
    element.set_class_name(classes);
    element
}
