//! Field categories recognised in contact and booking forms, together with
//! the fixed rule and message that belongs to each of them.

use once_cell::sync::Lazy;
use regex::Regex;

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{M}\s'-]{2,50}$").unwrap());
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9 +\-()\[\]]{10,20}$").unwrap());

pub const MIN_MESSAGE_CHARS: usize = 10;

/// Radios sharing this `name` form the exclusive-choice group.
pub const CHOICE_GROUP_NAME: &str = "challenge";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    FirstName,
    LastName,
    Email,
    Phone,
    Message,
    Service,
    Date,
    Challenge,
    Privacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Name,
    Email,
    Phone,
    MinLength(usize),
    /// Only enforced when the field is marked required.
    Selection,
    ChoiceGroup,
    Consent,
}

impl FieldKind {
    /// Validation order.
    pub const ALL: [FieldKind; 9] = [
        FieldKind::FirstName,
        FieldKind::LastName,
        FieldKind::Email,
        FieldKind::Phone,
        FieldKind::Message,
        FieldKind::Service,
        FieldKind::Date,
        FieldKind::Challenge,
        FieldKind::Privacy,
    ];

    /// Element ids this category is recognised by. The choice group is
    /// found by name instead and has none.
    pub fn ids(self) -> &'static [&'static str] {
        match self {
            FieldKind::FirstName => &["firstName", "bookingFirstName", "brochureName"],
            FieldKind::LastName => &["lastName", "bookingLastName"],
            FieldKind::Email => &["email", "bookingEmail", "brochureEmail"],
            FieldKind::Phone => &["phone", "bookingPhone"],
            FieldKind::Message => &["message", "bookingMessage"],
            FieldKind::Service => &["service", "bookingService"],
            FieldKind::Date => &["bookingDate"],
            FieldKind::Challenge => &[],
            FieldKind::Privacy => &["privacy", "bookingPrivacy", "brochurePrivacy"],
        }
    }

    /// CSS selector matching any of [`FieldKind::ids`].
    pub fn selector(self) -> String {
        if self == FieldKind::Challenge {
            return format!("[name=\"{}\"]", CHOICE_GROUP_NAME);
        }
        self.ids()
            .iter()
            .map(|id| format!("#{}", id))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn rule(self) -> Rule {
        match self {
            FieldKind::FirstName | FieldKind::LastName => Rule::Name,
            FieldKind::Email => Rule::Email,
            FieldKind::Phone => Rule::Phone,
            FieldKind::Message => Rule::MinLength(MIN_MESSAGE_CHARS),
            FieldKind::Service | FieldKind::Date => Rule::Selection,
            FieldKind::Challenge => Rule::ChoiceGroup,
            FieldKind::Privacy => Rule::Consent,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            FieldKind::FirstName => "Voer een geldige naam in (minimaal 2 tekens)",
            FieldKind::LastName => "Voer een geldige achternaam in (minimaal 2 tekens)",
            FieldKind::Email => "Voer een geldig e-mailadres in",
            FieldKind::Phone => "Voer een geldig telefoonnummer in",
            FieldKind::Message => "Bericht moet minimaal 10 tekens bevatten",
            FieldKind::Service => "Selecteer een service",
            FieldKind::Date => "Selecteer een datum",
            FieldKind::Challenge => "Selecteer een optie",
            FieldKind::Privacy => "U moet akkoord gaan met het privacybeleid",
        }
    }
}

pub fn is_valid_name(value: &str) -> bool {
    NAME_PATTERN.is_match(value.trim())
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value.trim())
}

/// Spaces between digit groups ("+31 6 12345678") are accepted and count
/// towards the length like any other character.
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value.trim())
}

pub fn has_min_length(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_accept_letters_spaces_hyphens_apostrophes() {
        for name in ["Jane Doe", "Jo", "  Anne-Marie  ", "D'Artagnan", "Zoë Ørsted", "José Núñez"] {
            assert!(is_valid_name(name), "{name:?} should be accepted");
        }
    }

    #[test]
    fn names_reject_short_long_and_foreign_characters() {
        let too_long = "a".repeat(51);
        for name in ["J", " J ", "", "Jane1", "jane@doe", "R2-D2", too_long.as_str()] {
            assert!(!is_valid_name(name), "{name:?} should be rejected");
        }
        assert!(is_valid_name(&"a".repeat(50)));
    }

    #[test]
    fn email_requires_at_and_dot_after_it() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email(" jane.doe+news@mail.example.nl "));
        assert!(!is_valid_email("jane.example.com"));
        assert!(!is_valid_email("jane@example"));
        assert!(!is_valid_email("jane.doe@"));
        assert!(!is_valid_email("ja ne@example.com"));
        assert!(!is_valid_email("jane@@example.com"));
    }

    #[test]
    fn phone_length_and_alphabet() {
        assert!(is_valid_phone("0612345678"));
        assert!(is_valid_phone("+31 6 12345678"));
        assert!(is_valid_phone("(020)-[123]-4567"));
        assert!(is_valid_phone(&"1".repeat(20)));
        assert!(!is_valid_phone("061234567"));
        assert!(!is_valid_phone(&"1".repeat(21)));
        assert!(!is_valid_phone("06-1234-567x"));
        assert!(!is_valid_phone("06.12.34.56.78"));
    }

    #[test]
    fn phone_spaces_count_towards_length() {
        assert!(is_valid_phone("  06 12 34 56 78  "));
        assert!(!is_valid_phone("+31 6 1234 5678 9012 3456"));
        assert!(!is_valid_phone("0 6 1 2 3 4 5 6 7 8 9"));
    }

    #[test]
    fn phone_rejects_line_breaks_and_tabs() {
        assert!(!is_valid_phone("0612\n345678"));
        assert!(!is_valid_phone("0612\t345678"));
    }

    #[test]
    fn names_accept_decomposed_accents() {
        assert!(is_valid_name("Zoe\u{0308} Doe"));
        assert!(is_valid_name("Jose\u{0301} Nun\u{0303}ez"));
    }

    #[test]
    fn message_length_is_trimmed_char_count() {
        assert!(!has_min_length("   short   ", MIN_MESSAGE_CHARS));
        assert!(!has_min_length("123456789", MIN_MESSAGE_CHARS));
        assert!(has_min_length("1234567890", MIN_MESSAGE_CHARS));
        assert!(has_min_length("éééééééééé", MIN_MESSAGE_CHARS));
    }

    #[test]
    fn selectors_cover_every_id() {
        assert_eq!(
            FieldKind::FirstName.selector(),
            "#firstName, #bookingFirstName, #brochureName"
        );
        assert_eq!(FieldKind::Date.selector(), "#bookingDate");
        assert_eq!(FieldKind::Challenge.selector(), "[name=\"challenge\"]");
    }

    #[test]
    fn every_kind_has_a_distinct_message() {
        let mut messages: Vec<_> = FieldKind::ALL.iter().map(|k| k.message()).collect();
        messages.sort_unstable();
        messages.dedup();
        assert_eq!(messages.len(), FieldKind::ALL.len());
    }
}
