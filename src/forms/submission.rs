//! Validate-then-submit flow for a single form.
//!
//! ```text
//! Idle ──submit──▶ Validating ──invalid──▶ Rejected ──submit──▶ Validating ...
//!                      │
//!                      └──valid──▶ Submitting (terminal, later submits ignored)
//! ```

use super::feedback::{self, FeedbackSink};
use super::validator::{validate, Form, FormReport};
use crate::error::Result;

pub const THANK_YOU_PAGE: &str = "thank_you.html";
pub const SENDING_LABEL: &str = "Verzenden...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Rejected,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission is already underway.
    Ignored,
    Rejected(FormReport),
    Submitting(FormReport),
}

/// Side effects of an accepted submission.
pub trait SubmitEffects {
    /// Disables the form's submit button and shows `label` on it. Returns
    /// `false` when the form has no submit button.
    fn lock_submit_button(&self, label: &str) -> Result<bool>;
    fn redirect_after(&self, target: &str, delay_ms: u32) -> Result<()>;
    fn redirect_now(&self, target: &str) -> Result<()>;
}

#[derive(Debug)]
pub struct SubmissionController {
    state: SubmissionState,
    delay_ms: u32,
}

impl SubmissionController {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            state: SubmissionState::Idle,
            delay_ms,
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> SubmissionState {
        self.state
    }

    /// State transition only: validates `form` unless a submission is
    /// already running.
    pub fn begin(&mut self, form: &Form) -> SubmitOutcome {
        if self.state == SubmissionState::Submitting {
            return SubmitOutcome::Ignored;
        }
        self.state = SubmissionState::Validating;
        let report = validate(form);
        if report.is_valid() {
            self.state = SubmissionState::Submitting;
            SubmitOutcome::Submitting(report)
        } else {
            self.state = SubmissionState::Rejected;
            SubmitOutcome::Rejected(report)
        }
    }

    /// Full submit handling: transition, show the report, and on success
    /// lock the button and schedule the redirect.
    pub fn submit<F, E>(&mut self, form: &Form, feedback: &F, effects: &E) -> Result<SubmitOutcome>
    where
        F: FeedbackSink + ?Sized,
        E: SubmitEffects + ?Sized,
    {
        let outcome = self.begin(form);
        match &outcome {
            SubmitOutcome::Ignored => {}
            SubmitOutcome::Rejected(report) => {
                log::debug!("Form rejected with {} invalid field(s)", report.invalid().count());
                feedback::apply(report, feedback)?;
            }
            SubmitOutcome::Submitting(report) => {
                if let Err(e) = self.start_sending(form, report, feedback, effects) {
                    self.state = SubmissionState::Idle;
                    return Err(e);
                }
            }
        }
        Ok(outcome)
    }

    fn start_sending<F, E>(&self, form: &Form, report: &FormReport, feedback: &F, effects: &E) -> Result<()>
    where
        F: FeedbackSink + ?Sized,
        E: SubmitEffects + ?Sized,
    {
        feedback::apply(report, feedback)?;
        if effects.lock_submit_button(SENDING_LABEL)? {
            log::info!("Form valid, redirecting to {} in {}ms", form.action(), self.delay_ms);
            effects.redirect_after(form.action(), self.delay_ms)
        } else {
            effects.redirect_now(form.action())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::SiteError;
    use crate::forms::feedback::testing::FakeFeedback;
    use crate::forms::rules::FieldKind;
    use crate::forms::validator::{Field, FieldValue};

    #[derive(Debug, Clone, PartialEq)]
    enum Effect {
        Lock(String),
        RedirectAfter(String, u32),
        RedirectNow(String),
    }

    struct FakeEffects {
        has_button: bool,
        fail_lock: bool,
        log: RefCell<Vec<Effect>>,
    }

    impl FakeEffects {
        fn with_button() -> Self {
            Self {
                has_button: true,
                fail_lock: false,
                log: RefCell::new(Vec::new()),
            }
        }

        fn effects(&self) -> Vec<Effect> {
            self.log.borrow().clone()
        }
    }

    impl SubmitEffects for FakeEffects {
        fn lock_submit_button(&self, label: &str) -> Result<bool> {
            if self.fail_lock {
                return Err(SiteError::Js("button is gone".into()));
            }
            if self.has_button {
                self.log.borrow_mut().push(Effect::Lock(label.to_string()));
            }
            Ok(self.has_button)
        }

        fn redirect_after(&self, target: &str, delay_ms: u32) -> Result<()> {
            self.log
                .borrow_mut()
                .push(Effect::RedirectAfter(target.to_string(), delay_ms));
            Ok(())
        }

        fn redirect_now(&self, target: &str) -> Result<()> {
            self.log.borrow_mut().push(Effect::RedirectNow(target.to_string()));
            Ok(())
        }
    }

    fn jane() -> Form {
        Form::new()
            .with(Field::text(FieldKind::FirstName, "Jane Doe"))
            .with(Field::text(FieldKind::Email, "jane@example.com"))
            .with(Field::text(FieldKind::Phone, "+31 6 12345678"))
            .with(Field::text(FieldKind::Message, "Hello world!"))
            .with(Field::checkbox(FieldKind::Privacy, true))
    }

    #[test]
    fn valid_form_locks_button_and_redirects_after_delay() {
        let mut controller = SubmissionController::new(1_000);
        let feedback = FakeFeedback::default();
        let effects = FakeEffects::with_button();

        let outcome = controller.submit(&jane(), &feedback, &effects).unwrap();

        assert!(matches!(outcome, SubmitOutcome::Submitting(ref r) if r.is_valid()));
        assert_eq!(controller.state(), SubmissionState::Submitting);
        assert_eq!(
            effects.effects(),
            vec![
                Effect::Lock("Verzenden...".into()),
                Effect::RedirectAfter("thank_you.html".into(), 1_000),
            ]
        );
        assert!(FieldKind::ALL.iter().all(|k| !feedback.is_invalid(*k)));
    }

    #[test]
    fn unchecked_consent_rejects_without_redirect() {
        let mut controller = SubmissionController::new(1_000);
        let feedback = FakeFeedback::default();
        let effects = FakeEffects::with_button();
        let mut form = jane();
        form.insert(Field::checkbox(FieldKind::Privacy, false));

        let outcome = controller.submit(&form, &feedback, &effects).unwrap();

        assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
        assert_eq!(controller.state(), SubmissionState::Rejected);
        assert!(effects.effects().is_empty());
        assert!(feedback.is_invalid(FieldKind::Privacy));
        assert_eq!(
            feedback.message(FieldKind::Privacy).as_deref(),
            Some("U moet akkoord gaan met het privacybeleid")
        );
        for kind in [FieldKind::FirstName, FieldKind::Email, FieldKind::Phone, FieldKind::Message] {
            assert!(!feedback.is_invalid(kind));
            assert_eq!(feedback.message(kind), None);
        }
    }

    #[test]
    fn rejected_form_can_be_corrected_and_resubmitted() {
        let mut controller = SubmissionController::new(500);
        let feedback = FakeFeedback::default();
        let effects = FakeEffects::with_button();
        let mut form = jane();
        if let Some(field) = form.field_mut(FieldKind::Email) {
            field.value = FieldValue::Text("jane@example".into());
        }

        controller.submit(&form, &feedback, &effects).unwrap();
        assert!(feedback.is_invalid(FieldKind::Email));

        form.insert(Field::text(FieldKind::Email, "jane@example.com"));
        controller.submit(&form, &feedback, &effects).unwrap();
        assert!(!feedback.is_invalid(FieldKind::Email));
        assert_eq!(feedback.message(FieldKind::Email).as_deref(), Some(""));
        assert_eq!(controller.state(), SubmissionState::Submitting);
    }

    #[test]
    fn second_submit_while_sending_is_ignored() {
        let mut controller = SubmissionController::new(1_000);
        let feedback = FakeFeedback::default();
        let effects = FakeEffects::with_button();

        controller.submit(&jane(), &feedback, &effects).unwrap();
        let again = controller.submit(&jane(), &feedback, &effects).unwrap();

        assert_eq!(again, SubmitOutcome::Ignored);
        assert_eq!(effects.effects().len(), 2);
    }

    #[test]
    fn no_submit_button_redirects_immediately() {
        let mut controller = SubmissionController::new(1_000);
        let effects = FakeEffects {
            has_button: false,
            ..FakeEffects::with_button()
        };
        controller
            .submit(&jane(), &FakeFeedback::default(), &effects)
            .unwrap();
        assert_eq!(effects.effects(), vec![Effect::RedirectNow("thank_you.html".into())]);
    }

    #[test]
    fn failed_effects_return_to_idle() {
        let mut controller = SubmissionController::new(1_000);
        let effects = FakeEffects {
            fail_lock: true,
            ..FakeEffects::with_button()
        };
        let result = controller.submit(&jane(), &FakeFeedback::default(), &effects);
        assert!(result.is_err());
        assert_eq!(controller.state(), SubmissionState::Idle);
    }

    #[test]
    fn revalidating_valid_form_gives_same_report() {
        let mut first = SubmissionController::new(0);
        let mut second = SubmissionController::new(0);
        assert_eq!(first.begin(&jane()), second.begin(&jane()));
    }
}
