use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, MouseEvent, ScrollBehavior, ScrollToOptions, Window};

use crate::config::SiteConfig;
use crate::dom;
use crate::error::Result;

const HASH_LINK_SELECTOR: &str = "a[href^=\"#\"]";

/// The selector a hash link points at, or `None` for `#` and empty hrefs.
pub fn hash_target(href: &str) -> Option<&str> {
    (href.len() > 1 && href.starts_with('#')).then_some(href)
}

/// Scroll position that puts `element_top` just below the fixed header.
pub fn scroll_top_for(element_top: f64, header_height: f64) -> f64 {
    element_top - header_height
}

pub fn smooth_scroll_to(window: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

fn handle_click(document: &Document, window: &Window, link: &Element, e: &MouseEvent, header_height: f64) {
    let Some(href) = link.get_attribute("href") else {
        return;
    };
    let Some(selector) = hash_target(&href) else {
        return;
    };
    // Fragments that are not valid selectors simply have no target.
    let target = document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    if let Some(target) = target {
        e.prevent_default();
        smooth_scroll_to(window, scroll_top_for(f64::from(target.offset_top()), header_height));
    }
}

pub fn bind(document: &Document, config: &SiteConfig) -> Result<()> {
    let links = dom::elements(document.query_selector_all(HASH_LINK_SELECTOR)?);
    if links.is_empty() {
        return Ok(());
    }
    let window = dom::window()?;

    for link in links {
        let document = document.clone();
        let window = window.clone();
        let header_height = config.header_height;
        let element = link.clone();
        let on_click = Closure::wrap(Box::new(move |e: MouseEvent| {
            handle_click(&document, &window, &element, &e, header_height);
        }) as Box<dyn FnMut(MouseEvent)>);
        link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}
