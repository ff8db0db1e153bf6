//! Binds the validator to real `<form>` elements on the page.

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, Event, HtmlButtonElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, Window,
};

use super::feedback::{FeedbackSink, FEEDBACK_CLASS, INVALID_CLASS};
use super::rules::FieldKind;
use super::submission::{SubmissionController, SubmitEffects};
use super::validator::{Field, FieldValue, Form};
use crate::config::SiteConfig;
use crate::dom;
use crate::error::Result;

pub const FORM_SELECTOR: &str = "form.c-form, form.needs-validation";

enum Control {
    Input(HtmlInputElement),
    Select(HtmlSelectElement),
    TextArea(HtmlTextAreaElement),
    Radios(Vec<HtmlInputElement>),
}

impl Control {
    fn from_element(element: Element) -> Option<Self> {
        let element = match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => return Some(Control::Input(input)),
            Err(element) => element,
        };
        let element = match element.dyn_into::<HtmlSelectElement>() {
            Ok(select) => return Some(Control::Select(select)),
            Err(element) => element,
        };
        element.dyn_into::<HtmlTextAreaElement>().ok().map(Control::TextArea)
    }

    /// Element that carries the invalid flag; the first radio for a group.
    fn anchor(&self) -> Option<&Element> {
        let element: &Element = match self {
            Control::Input(input) => input,
            Control::Select(select) => select,
            Control::TextArea(area) => area,
            Control::Radios(radios) => radios.first()?,
        };
        Some(element)
    }

    fn value(&self) -> FieldValue {
        match self {
            Control::Input(input) => match input.type_().as_str() {
                "checkbox" | "radio" => FieldValue::Checked(input.checked()),
                _ => FieldValue::Text(input.value()),
            },
            Control::Select(select) => FieldValue::Text(select.value()),
            Control::TextArea(area) => FieldValue::Text(area.value()),
            Control::Radios(radios) => FieldValue::Choices(radios.iter().map(|r| r.checked()).collect()),
        }
    }
}

struct BoundField {
    kind: FieldKind,
    control: Control,
}

/// The recognised fields of one form, discovered once at start-up.
pub struct PageForm {
    document: Document,
    element: HtmlFormElement,
    fields: Vec<BoundField>,
}

impl PageForm {
    pub fn discover(document: Document, element: HtmlFormElement) -> Result<Self> {
        let mut fields = Vec::new();
        for kind in FieldKind::ALL {
            let control = if kind == FieldKind::Challenge {
                let radios: Vec<HtmlInputElement> =
                    dom::elements(element.query_selector_all(&kind.selector())?)
                        .into_iter()
                        .filter_map(|el| el.dyn_into::<HtmlInputElement>().ok())
                        .collect();
                (!radios.is_empty()).then(|| Control::Radios(radios))
            } else {
                element
                    .query_selector(&kind.selector())?
                    .and_then(Control::from_element)
            };
            if let Some(control) = control {
                fields.push(BoundField { kind, control });
            }
        }
        log::debug!(
            "Form #{} has {} recognised field(s)",
            element.id(),
            fields.len()
        );
        Ok(Self {
            document,
            element,
            fields,
        })
    }

    /// Current values, read fresh from the inputs.
    pub fn snapshot(&self) -> Form {
        let mut form = Form::new();
        for bound in &self.fields {
            let required = bound
                .control
                .anchor()
                .map(|el| el.has_attribute("required"))
                .unwrap_or(false);
            form.insert(Field {
                kind: bound.kind,
                value: bound.control.value(),
                required,
            });
        }
        form
    }

    fn anchor(&self, kind: FieldKind) -> Option<&Element> {
        self.fields
            .iter()
            .find(|f| f.kind == kind)
            .and_then(|f| f.control.anchor())
    }

    fn feedback_element(&self, field: &Element, create: bool) -> Result<Option<Element>> {
        let Some(parent) = field.parent_element() else {
            return Ok(None);
        };
        let selector = format!(".{}", FEEDBACK_CLASS);
        if let Some(existing) = parent.query_selector(&selector)? {
            return Ok(Some(existing));
        }
        if !create {
            return Ok(None);
        }
        let created = self.document.create_element("div")?;
        created.set_class_name(FEEDBACK_CLASS);
        parent.append_child(&created)?;
        Ok(Some(created))
    }
}

impl FeedbackSink for PageForm {
    fn show_error(&self, kind: FieldKind, message: &str) -> Result<()> {
        let Some(field) = self.anchor(kind) else {
            return Ok(());
        };
        field.class_list().add_1(INVALID_CLASS)?;
        if let Some(feedback) = self.feedback_element(field, true)? {
            feedback.set_text_content(Some(message));
        }
        Ok(())
    }

    fn clear_error(&self, kind: FieldKind) -> Result<()> {
        let Some(field) = self.anchor(kind) else {
            return Ok(());
        };
        field.class_list().remove_1(INVALID_CLASS)?;
        if let Some(feedback) = self.feedback_element(field, false)? {
            feedback.set_text_content(Some(""));
        }
        Ok(())
    }
}

struct PageEffects {
    window: Window,
    form: HtmlFormElement,
}

impl SubmitEffects for PageEffects {
    fn lock_submit_button(&self, label: &str) -> Result<bool> {
        let button = self
            .form
            .query_selector("button[type=\"submit\"]")?
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
        match button {
            Some(button) => {
                button.set_disabled(true);
                button.set_text_content(Some(label));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn redirect_after(&self, target: &str, delay_ms: u32) -> Result<()> {
        let window = self.window.clone();
        let target = target.to_string();
        spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            if let Err(e) = window.location().set_href(&target) {
                log::error!("Redirect to {} failed: {:?}", target, e);
            }
        });
        Ok(())
    }

    fn redirect_now(&self, target: &str) -> Result<()> {
        self.window.location().set_href(target)?;
        Ok(())
    }
}

/// Wires submit handling on every validating form of the page.
pub fn bind(document: &Document, config: &SiteConfig) -> Result<()> {
    let forms = dom::elements(document.query_selector_all(FORM_SELECTOR)?);
    if forms.is_empty() {
        return Ok(());
    }
    let window = dom::window()?;

    for element in forms {
        let Ok(element) = element.dyn_into::<HtmlFormElement>() else {
            continue;
        };
        let page_form = match PageForm::discover(document.clone(), element.clone()) {
            Ok(page_form) => page_form,
            Err(e) => {
                log::error!("Skipping form #{}: {}", element.id(), e);
                continue;
            }
        };
        let effects = PageEffects {
            window: window.clone(),
            form: element.clone(),
        };
        let mut controller = SubmissionController::new(config.form_submit_delay);

        let on_submit = Closure::wrap(Box::new(move |e: Event| {
            e.prevent_default();
            let form = page_form.snapshot();
            let result = controller.submit(&form, &page_form, &effects);
            if let Err(err) = result {
                log::error!("Form submission failed: {}", err);
            }
        }) as Box<dyn FnMut(Event)>);

        if let Err(e) = element.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref()) {
            log::error!("Skipping form #{}: {:?}", element.id(), e);
            continue;
        }
        on_submit.forget();
    }
    Ok(())
}
