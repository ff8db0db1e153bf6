use serde::Deserialize;
use web_sys::Document;

use crate::error::Result;

/// Id of the optional inline JSON block that overrides the defaults.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// Timings and layout constants shared by the page behaviours.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub header_height: f64,
    pub scroll_offset: f64,
    pub debounce_delay: u32,
    pub form_submit_delay: u32,
    pub mobile_breakpoint: f64,
    pub counter_duration: u32,
    pub counter_frame: u32,
    pub ripple_lifetime: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            header_height: 80.0,
            scroll_offset: 100.0,
            debounce_delay: 150,
            form_submit_delay: 1_000,
            mobile_breakpoint: 1024.0,
            counter_duration: 2_000,
            counter_frame: 16,
            ripple_lifetime: 600,
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads `<script type="application/json" id="site-config">` if the page
    /// has one. Broken JSON is logged and the defaults are used instead.
    pub fn load(document: &Document) -> Self {
        let raw = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
            .filter(|text| !text.trim().is_empty());

        match raw {
            Some(raw) => Self::from_json(&raw).unwrap_or_else(|e| {
                log::warn!("Ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Reference line used by the scroll spy, a little below the fixed header.
    pub fn scroll_spy_line(&self, scroll_y: f64) -> f64 {
        scroll_y + self.header_height + 50.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = SiteConfig::from_json(r#"{"headerHeight": 64, "formSubmitDelay": 250}"#).unwrap();
        assert_eq!(config.header_height, 64.0);
        assert_eq!(config.form_submit_delay, 250);
        assert_eq!(config.debounce_delay, 150);
        assert_eq!(config.mobile_breakpoint, 1024.0);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(SiteConfig::from_json("{}").unwrap(), SiteConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SiteConfig::from_json("{headerHeight: }").is_err());
    }

    #[test]
    fn spy_line_sits_below_header() {
        let config = SiteConfig::default();
        assert_eq!(config.scroll_spy_line(0.0), 130.0);
        assert_eq!(config.scroll_spy_line(400.0), 530.0);
    }
}
