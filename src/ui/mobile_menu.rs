use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, Node};

use crate::config::SiteConfig;
use crate::dom;
use crate::error::Result;

const TOGGLER_SELECTOR: &str = ".navbar-toggler, .c-nav__toggle";
const COLLAPSE_SELECTOR: &str = ".navbar-collapse";
const LINK_SELECTOR: &str = ".nav-link, .c-nav__link, .c-nav__item a";

pub const OPEN_CLASS: &str = "show";
pub const NO_SCROLL_CLASS: &str = "u-no-scroll";

/// Clicks outside an open menu close it, but only on narrow screens.
pub fn closes_on_outside_click(viewport_width: f64, breakpoint: f64, is_open: bool, inside_menu: bool) -> bool {
    viewport_width < breakpoint && is_open && !inside_menu
}

#[derive(Clone)]
struct MobileMenu {
    toggler: Element,
    collapse: Element,
    body: HtmlElement,
}

impl MobileMenu {
    fn is_expanded(&self) -> bool {
        self.toggler.get_attribute("aria-expanded").as_deref() == Some("true")
    }

    fn is_open(&self) -> bool {
        self.collapse.class_list().contains(OPEN_CLASS)
    }

    fn open(&self) -> Result<()> {
        self.collapse.class_list().add_1(OPEN_CLASS)?;
        self.toggler.set_attribute("aria-expanded", "true")?;
        self.body.class_list().add_1(NO_SCROLL_CLASS)?;
        Ok(())
    }

    fn close(&self) -> Result<()> {
        self.collapse.class_list().remove_1(OPEN_CLASS)?;
        self.toggler.set_attribute("aria-expanded", "false")?;
        self.body.class_list().remove_1(NO_SCROLL_CLASS)?;
        Ok(())
    }

    fn toggle(&self) -> Result<()> {
        if self.is_expanded() {
            self.close()
        } else {
            self.open()
        }
    }

    fn contains(&self, target: Option<&Node>) -> bool {
        self.collapse.contains(target) || self.toggler.contains(target)
    }
}

fn report(result: Result<()>) {
    if let Err(e) = result {
        log::error!("Mobile menu: {}", e);
    }
}

pub fn bind(document: &Document, config: &SiteConfig) -> Result<()> {
    let (Some(toggler), Some(collapse)) = (
        document.query_selector(TOGGLER_SELECTOR)?,
        document.query_selector(COLLAPSE_SELECTOR)?,
    ) else {
        return Ok(());
    };
    let menu = MobileMenu {
        toggler,
        collapse,
        body: dom::body(document)?,
    };
    let window = dom::window()?;
    let breakpoint = config.mobile_breakpoint;

    let on_toggle = {
        let menu = menu.clone();
        Closure::wrap(Box::new(move || report(menu.toggle())) as Box<dyn FnMut()>)
    };
    menu.toggler
        .add_event_listener_with_callback("click", on_toggle.as_ref().unchecked_ref())?;
    on_toggle.forget();

    for link in dom::elements(menu.collapse.query_selector_all(LINK_SELECTOR)?) {
        let menu = menu.clone();
        let window = window.clone();
        let on_link = Closure::wrap(Box::new(move || {
            if dom::viewport_width(&window) < breakpoint {
                report(menu.close());
            }
        }) as Box<dyn FnMut()>);
        link.add_event_listener_with_callback("click", on_link.as_ref().unchecked_ref())?;
        on_link.forget();
    }

    let on_document_click = {
        let menu = menu.clone();
        Closure::wrap(Box::new(move |e: Event| {
            let target = e.target().and_then(|t| t.dyn_into::<Node>().ok());
            let inside = menu.contains(target.as_ref());
            if closes_on_outside_click(dom::viewport_width(&window), breakpoint, menu.is_open(), inside) {
                report(menu.close());
            }
        }) as Box<dyn FnMut(Event)>)
    };
    document.add_event_listener_with_callback("click", on_document_click.as_ref().unchecked_ref())?;
    on_document_click.forget();

    log::debug!("Mobile menu bound");
    Ok(())
}
