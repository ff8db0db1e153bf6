use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

use crate::config::SiteConfig;
use crate::dom;
use crate::error::Result;
use crate::forms;
use crate::ui::{
    count_up, mobile_menu, modal, portfolio_filter, ripple, scroll_spy, scroll_to_top, smooth_scroll,
};

/// Starts every page behaviour once the document has been parsed.
pub struct App;

impl App {
    pub fn start() -> Result<()> {
        let document = dom::document()?;
        if document.ready_state() == "loading" {
            let ready = document.clone();
            let on_ready = Closure::once(move || Self::setup(&ready));
            document.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
            on_ready.forget();
        } else {
            Self::setup(&document);
        }
        Ok(())
    }

    fn setup(document: &Document) {
        let config = SiteConfig::load(document);
        log::debug!("Site config: {:?}", config);

        // Independent of each other: one failing must not stop the rest.
        let modules: [(&str, Result<()>); 9] = [
            ("mobile menu", mobile_menu::bind(document, &config)),
            ("scroll spy", scroll_spy::bind(document, &config)),
            ("smooth scroll", smooth_scroll::bind(document, &config)),
            ("form validator", forms::bind(document, &config)),
            ("scroll to top", scroll_to_top::mount(document, &config)),
            ("modal manager", modal::bind(document)),
            ("portfolio filter", portfolio_filter::bind(document)),
            ("count up", count_up::bind(document, &config)),
            ("button ripples", ripple::bind(document, &config)),
        ];
        for (name, result) in modules {
            if let Err(e) = result {
                log::error!("Failed to start {}: {}", name, e);
            }
        }
        log::info!("Page behaviours ready");
    }
}
