use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use crate::dom;
use crate::error::Result;

const FILTER_SELECTOR: &str = "[data-filter]";
const ITEM_SELECTOR: &str = ".c-card, .card";
const ACTIVE_CLASS: &str = "is-active";
const HIDDEN_CLASS: &str = "u-hidden";

pub const SHOW_ALL: &str = "all";

pub fn is_shown(filter: &str, item_category: Option<&str>) -> bool {
    filter == SHOW_ALL || item_category == Some(filter)
}

struct PortfolioFilter {
    filters: Vec<Element>,
    items: Vec<Element>,
}

impl PortfolioFilter {
    fn select(&self, chosen: &Element) -> Result<()> {
        for filter in &self.filters {
            filter.class_list().remove_1(ACTIVE_CLASS)?;
        }
        chosen.class_list().add_1(ACTIVE_CLASS)?;

        let category = chosen.get_attribute("data-filter").unwrap_or_default();
        for item in &self.items {
            let item_category = item.get_attribute("data-category");
            if is_shown(&category, item_category.as_deref()) {
                item.class_list().remove_1(HIDDEN_CLASS)?;
            } else {
                item.class_list().add_1(HIDDEN_CLASS)?;
            }
        }
        Ok(())
    }
}

pub fn bind(document: &Document) -> Result<()> {
    let filters = dom::elements(document.query_selector_all(FILTER_SELECTOR)?);
    let items = dom::elements(document.query_selector_all(ITEM_SELECTOR)?);
    if filters.is_empty() || items.is_empty() {
        return Ok(());
    }

    let portfolio = Rc::new(PortfolioFilter { filters, items });
    for filter in &portfolio.filters {
        let portfolio = portfolio.clone();
        let chosen = filter.clone();
        let on_click = Closure::wrap(Box::new(move || {
            if let Err(e) = portfolio.select(&chosen) {
                log::error!("Portfolio filter: {}", e);
            }
        }) as Box<dyn FnMut()>);
        filter.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    log::debug!(
        "Portfolio filter: {} filters over {} items",
        portfolio.filters.len(),
        portfolio.items.len()
    );
    Ok(())
}
