use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use crate::config::SiteConfig;
use crate::dom;
use crate::error::Result;

const BUTTON_SELECTOR: &str = ".btn, .c-button";
const RIPPLE_CLASS: &str = "ripple-effect";
const STYLE_ID: &str = "ripple-styles";
const STYLES: &str = r#"
.ripple-effect {
    position: absolute;
    border-radius: 50%;
    background-color: rgba(255, 255, 255, 0.6);
    pointer-events: none;
    transform: scale(0);
    animation: ripple-animation 0.6s ease-out;
}
@keyframes ripple-animation {
    to {
        transform: scale(2);
        opacity: 0;
    }
}
"#;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// A square ripple centred on the click, big enough to cover the button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub size: f64,
    pub x: f64,
    pub y: f64,
}

impl Ripple {
    pub fn at(button: Rect, client_x: f64, client_y: f64) -> Self {
        let size = button.width.max(button.height);
        Self {
            size,
            x: client_x - button.left - size / 2.0,
            y: client_y - button.top - size / 2.0,
        }
    }
}

fn spawn_ripple(document: &Document, button: &Element, e: &MouseEvent, lifetime_ms: u32) -> Result<()> {
    let bounds = button.get_bounding_client_rect();
    let ripple = Ripple::at(
        Rect {
            left: bounds.left(),
            top: bounds.top(),
            width: bounds.width(),
            height: bounds.height(),
        },
        f64::from(e.client_x()),
        f64::from(e.client_y()),
    );

    let span: HtmlElement = document.create_element("span")?.unchecked_into();
    let style = span.style();
    let size = format!("{}px", ripple.size);
    style.set_property("width", &size)?;
    style.set_property("height", &size)?;
    style.set_property("left", &format!("{}px", ripple.x))?;
    style.set_property("top", &format!("{}px", ripple.y))?;
    span.set_class_name(RIPPLE_CLASS);
    button.append_child(&span)?;

    Timeout::new(lifetime_ms, move || span.remove()).forget();
    Ok(())
}

pub fn bind(document: &Document, config: &SiteConfig) -> Result<()> {
    let buttons = dom::elements(document.query_selector_all(BUTTON_SELECTOR)?);
    if buttons.is_empty() {
        return Ok(());
    }

    for button in buttons {
        let document = document.clone();
        let element = button.clone();
        let lifetime = config.ripple_lifetime;
        let on_click = Closure::wrap(Box::new(move |e: MouseEvent| {
            if let Err(err) = spawn_ripple(&document, &element, &e, lifetime) {
                log::error!("Ripple: {}", err);
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    dom::ensure_style(document, STYLE_ID, STYLES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ripple_is_centred_on_click() {
        let button = Rect {
            left: 100.0,
            top: 50.0,
            width: 120.0,
            height: 40.0,
        };
        let ripple = Ripple::at(button, 160.0, 70.0);
        assert_eq!(ripple.size, 120.0);
        assert_eq!(ripple.x, 0.0);
        assert_eq!(ripple.y, -40.0);
    }

    #[test]
    fn tall_buttons_use_height() {
        let button = Rect {
            left: 0.0,
            top: 0.0,
            width: 30.0,
            height: 90.0,
        };
        assert_eq!(Ripple::at(button, 0.0, 0.0).size, 90.0);
    }
}
