//! Small helpers over `web_sys` lookups that turn missing globals into errors.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, NodeList, Window};

use crate::error::{Result, SiteError};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(SiteError::MissingWindow)
}

pub fn document() -> Result<Document> {
    window()?.document().ok_or(SiteError::MissingDocument)
}

pub fn body(document: &Document) -> Result<HtmlElement> {
    document.body().ok_or(SiteError::MissingBody)
}

/// Collects a `querySelectorAll` result into elements, skipping non-element nodes.
pub fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Injects a `<style>` block into `<head>` unless one with `id` already exists.
pub fn ensure_style(document: &Document, id: &str, css: &str) -> Result<()> {
    if document.get_element_by_id(id).is_some() {
        return Ok(());
    }
    let style = document.create_element("style")?;
    style.set_id(id);
    style.set_text_content(Some(css));
    match document.head() {
        Some(head) => head.append_child(&style)?,
        None => body(document)?.append_child(&style)?,
    };
    Ok(())
}

/// Window width in CSS pixels, `0.0` if the browser refuses to say.
pub fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or_default()
}
