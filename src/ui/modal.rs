use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, Node};

use crate::dom;
use crate::error::Result;

const MODAL_SELECTOR: &str = ".modal";
const TRIGGER_SELECTOR: &str = "[data-bs-toggle=\"modal\"]";
const DISMISS_SELECTOR: &str = "[data-bs-dismiss=\"modal\"], .btn-close";
const BACKDROP_CLASS: &str = "modal-backdrop";
const STYLE_ID: &str = "modal-backdrop-styles";
const STYLES: &str = r#"
.modal-backdrop {
    position: fixed;
    top: 0;
    left: 0;
    width: 100%;
    height: 100%;
    background-color: rgba(0, 0, 0, 0.5);
    z-index: 1999;
}
.modal {
    display: none;
    position: fixed;
    top: 0;
    left: 0;
    width: 100%;
    height: 100%;
    z-index: 2000;
    overflow-y: auto;
    align-items: center;
    justify-content: center;
}
.modal.show {
    display: flex;
}
"#;

struct ModalManager {
    document: Document,
    body: HtmlElement,
}

impl ModalManager {
    fn open(&self, modal: &HtmlElement) -> Result<()> {
        modal.class_list().add_1("show")?;
        modal.style().set_property("display", "block")?;
        modal.set_attribute("aria-hidden", "false")?;
        self.body.class_list().add_1("u-no-scroll")?;
        self.ensure_backdrop()
    }

    fn close(&self, modal: &HtmlElement) -> Result<()> {
        modal.class_list().remove_1("show")?;
        modal.style().set_property("display", "none")?;
        modal.set_attribute("aria-hidden", "true")?;
        self.body.class_list().remove_1("u-no-scroll")?;
        self.remove_backdrop()
    }

    fn ensure_backdrop(&self) -> Result<()> {
        let selector = format!(".{}", BACKDROP_CLASS);
        if self.document.query_selector(&selector)?.is_some() {
            return Ok(());
        }
        let backdrop = self.document.create_element("div")?;
        backdrop.set_class_name(BACKDROP_CLASS);
        self.body.append_child(&backdrop)?;
        dom::ensure_style(&self.document, STYLE_ID, STYLES)
    }

    fn remove_backdrop(&self) -> Result<()> {
        let selector = format!(".{}", BACKDROP_CLASS);
        if let Some(backdrop) = self.document.query_selector(&selector)? {
            backdrop.remove();
        }
        Ok(())
    }
}

fn report(result: Result<()>) {
    if let Err(e) = result {
        log::error!("Modal: {}", e);
    }
}

fn as_html(element: Element) -> Option<HtmlElement> {
    element.dyn_into::<HtmlElement>().ok()
}

pub fn bind(document: &Document) -> Result<()> {
    let modals: Vec<HtmlElement> = dom::elements(document.query_selector_all(MODAL_SELECTOR)?)
        .into_iter()
        .filter_map(as_html)
        .collect();
    let triggers = dom::elements(document.query_selector_all(TRIGGER_SELECTOR)?);
    if modals.is_empty() && triggers.is_empty() {
        return Ok(());
    }

    let manager = Rc::new(ModalManager {
        document: document.clone(),
        body: dom::body(document)?,
    });

    for trigger in triggers {
        let manager = manager.clone();
        let target = trigger.get_attribute("data-bs-target");
        let on_click = Closure::wrap(Box::new(move |e: Event| {
            e.prevent_default();
            let modal = target
                .as_deref()
                .and_then(|selector| manager.document.query_selector(selector).ok().flatten())
                .and_then(as_html);
            if let Some(modal) = modal {
                report(manager.open(&modal));
            }
        }) as Box<dyn FnMut(Event)>);
        trigger.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    for modal in modals {
        for button in dom::elements(modal.query_selector_all(DISMISS_SELECTOR)?) {
            let manager = manager.clone();
            let modal = modal.clone();
            let on_dismiss = Closure::wrap(Box::new(move || report(manager.close(&modal))) as Box<dyn FnMut()>);
            button.add_event_listener_with_callback("click", on_dismiss.as_ref().unchecked_ref())?;
            on_dismiss.forget();
        }

        // Clicks on the overlay itself, not on its content, dismiss it.
        let on_overlay = {
            let manager = manager.clone();
            let modal_el = modal.clone();
            Closure::wrap(Box::new(move |e: Event| {
                let target = e.target().and_then(|t| t.dyn_into::<Node>().ok());
                let on_overlay = target.is_some() && modal_el.is_same_node(target.as_ref());
                if on_overlay {
                    report(manager.close(&modal_el));
                }
            }) as Box<dyn FnMut(Event)>)
        };
        modal.add_event_listener_with_callback("click", on_overlay.as_ref().unchecked_ref())?;
        on_overlay.forget();
    }
    log::debug!("Modal manager bound");
    Ok(())
}
