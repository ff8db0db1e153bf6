//! Stand-alone page behaviours. Each one wires itself only when its
//! elements are on the page.

pub mod count_up;
pub mod debounce;
pub mod mobile_menu;
pub mod modal;
pub mod portfolio_filter;
pub mod ripple;
pub mod scroll_spy;
pub mod scroll_to_top;
pub mod smooth_scroll;
