//! Browser DOM
//!
//! [`UiElement`] and [`Page`] over `web-sys`.

use std::any::Any;
use std::rc::Rc;

use study_planner::dom::{ElementRef, Page, UiElement};
use wasm_bindgen::{JsCast, UnwrapThrowExt};
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement};

/// A live DOM element
#[derive(Debug, Clone)]
pub struct WebElement {
    element: Element,
}

impl WebElement {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    pub fn shared(element: Element) -> ElementRef {
        Rc::new(Self::new(element))
    }

    fn html(&self) -> Option<&HtmlElement> {
        self.element.dyn_ref::<HtmlElement>()
    }
}

impl UiElement for WebElement {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn id(&self) -> String {
        self.element.id()
    }

    fn set_id(&self, id: &str) {
        self.element.set_id(id);
    }

    fn has_class(&self, class: &str) -> bool {
        self.element.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        let _ = self.element.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.element.class_list().remove_1(class);
    }

    fn toggle_class(&self, class: &str) -> bool {
        self.element.class_list().toggle(class).unwrap_or(false)
    }

    fn set_class_name(&self, classes: &str) {
        self.element.set_class_name(classes);
    }

    fn text(&self) -> String {
        self.element.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.element.set_text_content(Some(text));
    }

    fn style(&self, property: &str) -> Option<String> {
        self.html()
            .and_then(|el| el.style().get_property_value(property).ok())
            .filter(|value| !value.is_empty())
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Some(el) = self.html() {
            let _ = el.style().set_property(property, value);
        }
    }

    fn value(&self) -> String {
        self.element
            .dyn_ref::<HtmlInputElement>()
            .map(|input| input.value())
            .unwrap_or_default()
    }

    fn set_value(&self, value: &str) {
        if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        }
    }

    fn is_disabled(&self) -> bool {
        if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
            return input.disabled();
        }
        if let Some(button) = self.element.dyn_ref::<HtmlButtonElement>() {
            return button.disabled();
        }
        self.element.has_attribute("disabled")
    }

    fn set_disabled(&self, disabled: bool) {
        if let Some(input) = self.element.dyn_ref::<HtmlInputElement>() {
            input.set_disabled(disabled);
        } else if let Some(button) = self.element.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if disabled {
            let _ = self.element.set_attribute("disabled", "");
        } else {
            let _ = self.element.remove_attribute("disabled");
        }
    }

    fn focus(&self) {
        if let Some(el) = self.html() {
            let _ = el.focus();
        }
    }

    fn append_child(&self, child: &ElementRef) {
        match child.as_any().downcast_ref::<WebElement>() {
            Some(child) => {
                let _ = self.element.append_child(&child.element);
            }
            None => tracing::warn!("append_child: foreign element ignored"),
        }
    }

    fn remove(&self) {
        self.element.remove();
    }

    fn contains(&self, other: &dyn UiElement) -> bool {
        other
            .as_any()
            .downcast_ref::<WebElement>()
            .map(|other| self.element.contains(Some(&other.element)))
            .unwrap_or(false)
    }

    fn scroll_to_bottom(&self) {
        self.element.set_scroll_top(self.element.scroll_height());
    }
}

/// The current document
#[derive(Debug, Clone)]
pub struct WebPage {
    document: Document,
}

impl WebPage {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl Page for WebPage {
    fn element_by_id(&self, id: &str) -> Option<ElementRef> {
        self.document.get_element_by_id(id).map(WebElement::shared)
    }

    fn query_all(&self, selector: &str) -> Vec<ElementRef> {
        let nodes = match self.document.query_selector_all(selector) {
            Ok(nodes) => nodes,
            Err(e) => {
                tracing::warn!("Invalid selector {:?}: {:?}", selector, e);
                return Vec::new();
            }
        };

        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(WebElement::shared)
            .collect()
    }

    fn create_element(&self, tag: &str) -> ElementRef {
        // Widgets only create fixed, valid tag names
        WebElement::shared(self.document.create_element(tag).unwrap_throw())
    }
}
