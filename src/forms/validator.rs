//! Pure form validation. A [`Form`] is a snapshot of field values; running
//! [`validate`] over it yields a [`FormReport`] without touching the page.

use super::rules::{self, FieldKind, Rule};
use super::submission::THANK_YOU_PAGE;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
    /// Checked state of every radio in a group.
    Choices(Vec<bool>),
}

impl FieldValue {
    fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(text) => text,
            _ => "",
        }
    }

    fn any_checked(&self) -> bool {
        match self {
            FieldValue::Checked(checked) => *checked,
            FieldValue::Choices(choices) => choices.iter().any(|c| *c),
            FieldValue::Text(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub kind: FieldKind,
    pub value: FieldValue,
    pub required: bool,
}

impl Field {
    pub fn text(kind: FieldKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: FieldValue::Text(value.into()),
            required: false,
        }
    }

    pub fn checkbox(kind: FieldKind, checked: bool) -> Self {
        Self {
            kind,
            value: FieldValue::Checked(checked),
            required: false,
        }
    }

    pub fn choices(kind: FieldKind, choices: Vec<bool>) -> Self {
        Self {
            kind,
            value: FieldValue::Choices(choices),
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    fields: Vec<Field>,
    action: String,
}

impl Default for Form {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            action: THANK_YOU_PAGE.to_string(),
        }
    }
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing any earlier field of the same kind in place.
    pub fn with(mut self, field: Field) -> Self {
        self.insert(field);
        self
    }

    pub fn insert(&mut self, field: Field) {
        match self.fields.iter_mut().find(|f| f.kind == field.kind) {
            Some(existing) => *existing = field,
            None => self.fields.push(field),
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, kind: FieldKind) -> Option<&Field> {
        self.fields.iter().find(|f| f.kind == kind)
    }

    #[cfg(test)]
    pub(crate) fn field_mut(&mut self, kind: FieldKind) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.kind == kind)
    }

    /// Where a successful submission sends the visitor.
    pub fn action(&self) -> &str {
        &self.action
    }
}

/// Outcome for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldReport {
    pub kind: FieldKind,
    pub valid: bool,
}

impl FieldReport {
    /// Text to show next to the field, `None` when it passed.
    pub fn message(&self) -> Option<&'static str> {
        (!self.valid).then(|| self.kind.message())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormReport {
    reports: Vec<FieldReport>,
}

impl FormReport {
    pub fn is_valid(&self) -> bool {
        self.reports.iter().all(|r| r.valid)
    }

    pub fn get(&self, kind: FieldKind) -> Option<&FieldReport> {
        self.reports.iter().find(|r| r.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldReport> {
        self.reports.iter()
    }

    pub fn invalid(&self) -> impl Iterator<Item = &FieldReport> {
        self.reports.iter().filter(|r| !r.valid)
    }
}

/// Checks a single field. Optional selection fields are not applicable and
/// produce no report.
pub fn check(field: &Field) -> Option<FieldReport> {
    let valid = match field.kind.rule() {
        Rule::Name => rules::is_valid_name(field.value.as_text()),
        Rule::Email => rules::is_valid_email(field.value.as_text()),
        Rule::Phone => rules::is_valid_phone(field.value.as_text()),
        Rule::MinLength(min) => rules::has_min_length(field.value.as_text(), min),
        Rule::Selection if !field.required => return None,
        Rule::Selection => !field.value.as_text().is_empty(),
        Rule::ChoiceGroup | Rule::Consent => field.value.any_checked(),
    };
    Some(FieldReport {
        kind: field.kind,
        valid,
    })
}

pub fn validate(form: &Form) -> FormReport {
    FormReport {
        reports: form.fields.iter().filter_map(check).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact_form() -> Form {
        Form::new()
            .with(Field::text(FieldKind::FirstName, "Jane"))
            .with(Field::text(FieldKind::LastName, "Doe"))
            .with(Field::text(FieldKind::Email, "jane@example.com"))
            .with(Field::text(FieldKind::Phone, "+31 6 12345678"))
            .with(Field::text(FieldKind::Message, "Hello there!"))
            .with(Field::checkbox(FieldKind::Privacy, true))
    }

    #[test]
    fn complete_contact_form_is_valid() {
        let report = validate(&contact_form());
        assert!(report.is_valid());
        assert_eq!(report.iter().count(), 6);
        assert_eq!(report.invalid().count(), 0);
    }

    #[test]
    fn missing_consent_only_flags_privacy() {
        let mut form = contact_form();
        form.insert(Field::checkbox(FieldKind::Privacy, false));
        let report = validate(&form);

        assert!(!report.is_valid());
        let invalid: Vec<_> = report.invalid().map(|r| r.kind).collect();
        assert_eq!(invalid, vec![FieldKind::Privacy]);
        assert_eq!(
            report.get(FieldKind::Privacy).and_then(|r| r.message()),
            Some("U moet akkoord gaan met het privacybeleid")
        );
    }

    #[test]
    fn absent_fields_are_skipped() {
        let form = Form::new().with(Field::text(FieldKind::Email, "jane@example.com"));
        let report = validate(&form);
        assert!(report.is_valid());
        assert!(report.get(FieldKind::FirstName).is_none());
        assert!(validate(&Form::new()).is_valid());
    }

    #[test]
    fn selection_only_enforced_when_required() {
        let optional = Form::new().with(Field::text(FieldKind::Service, ""));
        let report = validate(&optional);
        assert!(report.is_valid());
        assert!(report.get(FieldKind::Service).is_none());

        let required = Form::new().with(Field::text(FieldKind::Date, "").required());
        let report = validate(&required);
        assert!(!report.is_valid());
        assert_eq!(
            report.get(FieldKind::Date).and_then(|r| r.message()),
            Some("Selecteer een datum")
        );

        let chosen = Form::new().with(Field::text(FieldKind::Service, "consult").required());
        assert!(validate(&chosen).is_valid());
    }

    #[test]
    fn choice_group_needs_one_checked_radio() {
        let none = Form::new().with(Field::choices(FieldKind::Challenge, vec![false, false, false]));
        assert!(!validate(&none).is_valid());

        let one = Form::new().with(Field::choices(FieldKind::Challenge, vec![false, true, false]));
        assert!(validate(&one).is_valid());
    }

    #[test]
    fn report_follows_field_order() {
        let form = Form::new()
            .with(Field::checkbox(FieldKind::Privacy, false))
            .with(Field::text(FieldKind::FirstName, "x"));
        let kinds: Vec<_> = validate(&form).iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![FieldKind::Privacy, FieldKind::FirstName]);
    }

    #[test]
    fn insert_replaces_same_kind() {
        let mut form = contact_form();
        form.insert(Field::text(FieldKind::Email, "nope"));
        assert_eq!(form.fields().len(), 6);
        assert_eq!(
            form.field(FieldKind::Email).map(|f| &f.value),
            Some(&FieldValue::Text("nope".into()))
        );
    }

    #[test]
    fn revalidation_is_stable() {
        let form = contact_form();
        assert_eq!(validate(&form), validate(&form));
    }

    #[test]
    fn default_action_is_thank_you_page() {
        assert_eq!(Form::new().action(), "thank_you.html");
    }
}
