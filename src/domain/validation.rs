//! Field checks for the details step of the booking wizard.
//!
//! Validation never fails as an operation: it always produces a
//! [`ValidationErrors`] map, and an empty map means the draft may move on.

use crate::domain::booking::{BookingDraft, Field};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("valid phone pattern"));

static PHONE_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-()]").expect("valid separator pattern"));

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationKind {
    RequiredField,
    InvalidFormat,
    PastDateTime,
    PastDate,
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct FieldError {
    pub kind: ValidationKind,
    pub message: String,
}

impl FieldError {
    fn new(kind: ValidationKind, message: &str) -> Self {
        Self {
            kind,
            message: message.to_string(),
        }
    }
}

/// Errors keyed by the field they belong to.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Default)]
pub struct ValidationErrors(BTreeMap<Field, FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.0.get(&field)
    }

    pub fn kind(&self, field: Field) -> Option<ValidationKind> {
        self.0.get(&field).map(|e| e.kind)
    }

    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, error);
    }

    /// Drops the error for `field`, returning whether there was one.
    pub fn clear(&mut self, field: Field) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Field, &FieldError)> {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {}", error.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Validates `draft` against the local wall clock.
pub fn validate(draft: &BookingDraft) -> ValidationErrors {
    validate_at(draft, Local::now().naive_local())
}

/// Validates `draft` as if the current instant were `now`.
pub fn validate_at(draft: &BookingDraft, now: NaiveDateTime) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if draft.name.trim().is_empty() {
        errors.insert(
            Field::Name,
            FieldError::new(ValidationKind::RequiredField, "Name is required"),
        );
    }

    let email = draft.email.trim();
    if email.is_empty() {
        errors.insert(
            Field::Email,
            FieldError::new(ValidationKind::RequiredField, "Email is required"),
        );
    } else if !EMAIL_PATTERN.is_match(email) {
        errors.insert(
            Field::Email,
            FieldError::new(
                ValidationKind::InvalidFormat,
                "Please enter a valid email address",
            ),
        );
    }

    if draft.phone.trim().is_empty() {
        errors.insert(
            Field::Phone,
            FieldError::new(ValidationKind::RequiredField, "Phone number is required"),
        );
    } else if !is_valid_phone(&draft.phone) {
        errors.insert(
            Field::Phone,
            FieldError::new(
                ValidationKind::InvalidFormat,
                "Please enter a valid phone number",
            ),
        );
    }

    let date = parse_field(&mut errors, Field::Date, &draft.date, parse_date);
    let time = parse_field(&mut errors, Field::Time, &draft.time, parse_time);

    match (date, time) {
        (Some(date), Some(time)) => {
            if date.and_time(time) <= now {
                let message = "Please choose a date and time in the future";
                errors.insert(
                    Field::Date,
                    FieldError::new(ValidationKind::PastDateTime, message),
                );
                errors.insert(
                    Field::Time,
                    FieldError::new(ValidationKind::PastDateTime, message),
                );
            }
        }
        (Some(date), None) => {
            if date < now.date() {
                errors.insert(
                    Field::Date,
                    FieldError::new(ValidationKind::PastDate, "Please choose a future date"),
                );
            }
        }
        _ => {}
    }

    errors
}

fn parse_field<T>(
    errors: &mut ValidationErrors,
    field: Field,
    raw: &str,
    parse: fn(&str) -> Option<T>,
) -> Option<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        let message = match field {
            Field::Date => "Please select a date",
            _ => "Please select a time",
        };
        errors.insert(field, FieldError::new(ValidationKind::RequiredField, message));
        return None;
    }
    let parsed = parse(raw);
    if parsed.is_none() {
        errors.insert(
            field,
            FieldError::new(ValidationKind::InvalidFormat, "Unrecognised format"),
        );
    }
    parsed
}

/// Strips spaces, dashes and parentheses, then expects an optional `+` and 7-15 digits.
pub fn is_valid_phone(phone: &str) -> bool {
    let compact = PHONE_SEPARATORS.replace_all(phone, "");
    PHONE_PATTERN.is_match(&compact)
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn valid_draft() -> BookingDraft {
        BookingDraft {
            name: "Chikondi Banda".to_string(),
            email: "chikondi@example.com".to_string(),
            phone: "+265 (999) 123-456".to_string(),
            date: "2026-03-11".to_string(),
            time: "09:30".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_draft_has_no_errors() {
        assert!(validate_at(&valid_draft(), now()).is_empty());
    }

    #[test]
    fn test_blank_fields_are_required() {
        let draft = BookingDraft {
            name: "   ".to_string(),
            ..Default::default()
        };
        let errors = validate_at(&draft, now());
        for field in [Field::Name, Field::Email, Field::Phone, Field::Date, Field::Time] {
            assert_eq!(errors.kind(field), Some(ValidationKind::RequiredField), "{field}");
        }
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_email_without_at_is_invalid() {
        for email in ["chikondi.example.com", "chikondi", "a@b", "a b@c.com"] {
            let draft = BookingDraft {
                email: email.to_string(),
                ..valid_draft()
            };
            let errors = validate_at(&draft, now());
            assert_eq!(errors.kind(Field::Email), Some(ValidationKind::InvalidFormat), "{email}");
        }
    }

    #[test]
    fn test_phone_length_bounds() {
        let short = BookingDraft {
            phone: "123".to_string(),
            ..valid_draft()
        };
        assert_eq!(
            validate_at(&short, now()).kind(Field::Phone),
            Some(ValidationKind::InvalidFormat)
        );

        let eight = BookingDraft {
            phone: "+12345678".to_string(),
            ..valid_draft()
        };
        assert!(validate_at(&eight, now()).get(Field::Phone).is_none());

        assert!(is_valid_phone("0999-123-456"));
        assert!(!is_valid_phone("1234567890123456"));
        assert!(!is_valid_phone("++1234567"));
        assert!(!is_valid_phone("0999 12x 456"));
    }

    #[test]
    fn test_past_time_today_marks_date_and_time() {
        let draft = BookingDraft {
            date: "2026-03-10".to_string(),
            time: "08:00".to_string(),
            ..valid_draft()
        };
        let errors = validate_at(&draft, now());
        assert_eq!(errors.kind(Field::Date), Some(ValidationKind::PastDateTime));
        assert_eq!(errors.kind(Field::Time), Some(ValidationKind::PastDateTime));
        assert_eq!(
            errors.get(Field::Date).unwrap().message,
            errors.get(Field::Time).unwrap().message
        );
    }

    #[test]
    fn test_exactly_now_is_not_in_future() {
        let draft = BookingDraft {
            date: "2026-03-10".to_string(),
            time: "12:00".to_string(),
            ..valid_draft()
        };
        assert_eq!(
            validate_at(&draft, now()).kind(Field::Date),
            Some(ValidationKind::PastDateTime)
        );
    }

    #[test]
    fn test_date_only_uses_day_check() {
        let today = BookingDraft {
            date: "2026-03-10".to_string(),
            time: String::new(),
            ..valid_draft()
        };
        let errors = validate_at(&today, now());
        assert!(errors.get(Field::Date).is_none());
        assert_eq!(errors.kind(Field::Time), Some(ValidationKind::RequiredField));

        let yesterday = BookingDraft {
            date: "2026-03-09".to_string(),
            time: String::new(),
            ..valid_draft()
        };
        assert_eq!(
            validate_at(&yesterday, now()).kind(Field::Date),
            Some(ValidationKind::PastDate)
        );
    }

    #[test]
    fn test_malformed_date_and_time() {
        let draft = BookingDraft {
            date: "11/03/2026".to_string(),
            time: "half nine".to_string(),
            ..valid_draft()
        };
        let errors = validate_at(&draft, now());
        assert_eq!(errors.kind(Field::Date), Some(ValidationKind::InvalidFormat));
        assert_eq!(errors.kind(Field::Time), Some(ValidationKind::InvalidFormat));
    }

    #[test]
    fn test_clear_removes_single_field() {
        let mut errors = validate_at(&BookingDraft::default(), now());
        assert!(errors.clear(Field::Email));
        assert!(!errors.clear(Field::Email));
        assert!(errors.get(Field::Name).is_some());
    }

    #[test]
    fn test_display_lists_fields() {
        let draft = BookingDraft {
            email: "nope".to_string(),
            ..valid_draft()
        };
        let errors = validate_at(&draft, now());
        assert_eq!(errors.to_string(), "email: Please enter a valid email address");
    }
}
