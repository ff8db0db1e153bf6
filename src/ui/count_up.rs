use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element};

use crate::config::SiteConfig;
use crate::dom;
use crate::error::Result;

const COUNTER_SELECTOR: &str = ".c-stats__number";

/// Number and decoration parsed out of a statistic like `"250+"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterText {
    pub target: u64,
    pub suffix: String,
}

/// All digits form the target and everything else is the suffix.
/// Returns `None` when there is nothing to count up to.
pub fn parse_counter(text: &str) -> Option<CounterText> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    let target = digits.parse::<u64>().ok().filter(|t| *t > 0)?;
    let suffix = text.chars().filter(|c| !c.is_ascii_digit()).collect();
    Some(CounterText { target, suffix })
}

#[derive(Debug, Clone)]
pub struct CountUp {
    counter: CounterText,
    increment: f64,
    current: f64,
}

impl CountUp {
    pub fn new(counter: CounterText, duration_ms: u32, frame_ms: u32) -> Self {
        let frames = f64::from(duration_ms) / f64::from(frame_ms.max(1));
        Self {
            increment: counter.target as f64 / frames,
            counter,
            current: 0.0,
        }
    }

    /// Advances one frame and returns the text to show and whether the
    /// count has reached its target.
    pub fn step(&mut self) -> (String, bool) {
        self.current += self.increment;
        if self.current < self.counter.target as f64 {
            (format!("{}{}", self.current.floor() as u64, self.counter.suffix), false)
        } else {
            (format!("{}{}", self.counter.target, self.counter.suffix), true)
        }
    }
}

fn start(element: Element, counter: CounterText, config: &SiteConfig) -> Result<()> {
    element.set_attribute("data-target", &counter.target.to_string())?;
    element.set_attribute("data-suffix", &counter.suffix)?;
    element.set_text_content(Some(&format!("0{}", counter.suffix)));

    let frame = config.counter_frame;
    let mut count = CountUp::new(counter, config.counter_duration, frame);
    spawn_local(async move {
        loop {
            let (text, done) = count.step();
            element.set_text_content(Some(&text));
            if done {
                break;
            }
            TimeoutFuture::new(frame).await;
        }
    });
    Ok(())
}

pub fn bind(document: &Document, config: &SiteConfig) -> Result<()> {
    let counters = dom::elements(document.query_selector_all(COUNTER_SELECTOR)?);
    for element in counters {
        let parsed = element.text_content().as_deref().and_then(parse_counter);
        if let Some(counter) = parsed {
            start(element, counter, config)?;
        }
    }
    Ok(())
}
