use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use super::debounce::Debouncer;
use crate::config::SiteConfig;
use crate::dom;
use crate::error::Result;

const SECTION_SELECTOR: &str = "[id]";
const NAV_LINK_SELECTOR: &str = ".nav-link, .c-nav__link";
const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl Section {
    fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Later sections win, so a nested `[id]` beats the section around it.
pub fn active_section(line: f64, sections: &[Section]) -> Option<&str> {
    sections
        .iter()
        .filter(|s| s.contains(line))
        .last()
        .map(|s| s.id.as_str())
}

pub fn link_points_to(href: &str, section_id: &str) -> bool {
    href.contains(&format!("#{}", section_id))
}

struct ScrollSpy {
    window: Window,
    sections: Vec<HtmlElement>,
    links: Vec<Element>,
    config: SiteConfig,
}

impl ScrollSpy {
    fn measure(&self) -> Vec<Section> {
        self.sections
            .iter()
            .map(|el| Section {
                id: el.id(),
                top: f64::from(el.offset_top()),
                height: f64::from(el.offset_height()),
            })
            .collect()
    }

    fn update(&self) -> Result<()> {
        let line = self.config.scroll_spy_line(self.window.scroll_y()?);
        let sections = self.measure();
        let current = active_section(line, &sections);

        for link in &self.links {
            link.class_list().remove_1(ACTIVE_CLASS)?;
            link.remove_attribute("aria-current")?;
            let matches = match (current, link.get_attribute("href")) {
                (Some(id), Some(href)) => link_points_to(&href, id),
                _ => false,
            };
            if matches {
                link.class_list().add_1(ACTIVE_CLASS)?;
                link.set_attribute("aria-current", "page")?;
            }
        }
        Ok(())
    }
}

pub fn bind(document: &Document, config: &SiteConfig) -> Result<()> {
    let sections: Vec<HtmlElement> = dom::elements(document.query_selector_all(SECTION_SELECTOR)?)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();
    let links = dom::elements(document.query_selector_all(NAV_LINK_SELECTOR)?);
    if sections.is_empty() || links.is_empty() {
        return Ok(());
    }

    let window = dom::window()?;
    let spy = Rc::new(ScrollSpy {
        window: window.clone(),
        sections,
        links,
        config: config.clone(),
    });

    let debouncer = {
        let spy = spy.clone();
        Debouncer::new(config.debounce_delay, move || {
            if let Err(e) = spy.update() {
                log::error!("Scroll spy: {}", e);
            }
        })
    };
    let on_scroll = Closure::wrap(Box::new(move || debouncer.call()) as Box<dyn FnMut()>);
    window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
    on_scroll.forget();

    spy.update()?;
    log::debug!("Scroll spy tracking {} sections", spy.sections.len());
    Ok(())
}
