use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, MouseEvent};
use yew::prelude::*;

use super::debounce::Debouncer;
use super::smooth_scroll::smooth_scroll_to;
use crate::config::SiteConfig;
use crate::dom;
use crate::error::Result;

const STYLE_ID: &str = "scroll-to-top-styles";
const STYLES: &str = r#"
.c-scroll-to-top {
    position: fixed;
    bottom: 2rem;
    right: 2rem;
    width: 48px;
    height: 48px;
    background-color: var(--color-primary);
    color: var(--color-bg);
    border: none;
    border-radius: var(--border-radius-full);
    cursor: pointer;
    opacity: 0;
    visibility: hidden;
    transition: all var(--transition-base);
    z-index: 999;
    font-size: 1.5rem;
    display: flex;
    align-items: center;
    justify-content: center;
    box-shadow: var(--shadow-md);
}
.c-scroll-to-top.is-visible {
    opacity: 1;
    visibility: visible;
}
.c-scroll-to-top:hover {
    background-color: var(--color-primary-dark);
    transform: translateY(-4px);
}
"#;

pub fn is_past_offset(scroll_y: f64, offset: f64) -> bool {
    scroll_y > offset
}

#[derive(Properties, PartialEq)]
pub struct ScrollToTopProps {
    pub offset: f64,
    pub debounce_ms: u32,
}

#[function_component(ScrollToTop)]
pub fn scroll_to_top(props: &ScrollToTopProps) -> Html {
    let visible = use_state(|| false);

    {
        let visible = visible.clone();
        use_effect_with_deps(
            move |(offset, wait)| {
                let offset = *offset;
                let listener = web_sys::window().map(|window| {
                    let debouncer = {
                        let window = window.clone();
                        Debouncer::new(*wait, move || {
                            let scroll_y = window.scroll_y().unwrap_or_default();
                            visible.set(is_past_offset(scroll_y, offset));
                        })
                    };
                    let on_scroll = Closure::wrap(Box::new(move || debouncer.call()) as Box<dyn FnMut()>);
                    if let Err(e) =
                        window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())
                    {
                        log::error!("Scroll to top: could not listen for scroll: {:?}", e);
                    }
                    (window, on_scroll)
                });

                move || {
                    if let Some((window, on_scroll)) = listener {
                        let _ = window
                            .remove_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref());
                    }
                }
            },
            (props.offset, props.debounce_ms),
        );
    }

    let onclick = Callback::from(|_: MouseEvent| {
        if let Some(window) = web_sys::window() {
            smooth_scroll_to(&window, 0.0);
        }
    });

    html! {
        <button
            class={classes!("c-scroll-to-top", (*visible).then(|| "is-visible"))}
            aria-label="Scroll naar boven"
            {onclick}
        >
            {"↑"}
        </button>
    }
}

/// Installs the button styles once, appends a host element to `<body>`
/// and renders the button into it.
pub fn mount(document: &Document, config: &SiteConfig) -> Result<()> {
    dom::ensure_style(document, STYLE_ID, STYLES)?;
    let host = document.create_element("div")?;
    dom::body(document)?.append_child(&host)?;
    let props = ScrollToTopProps {
        offset: config.scroll_offset,
        debounce_ms: config.debounce_delay,
    };
    yew::Renderer::<ScrollToTop>::with_root_and_props(host, props).render();
    Ok(())
}
