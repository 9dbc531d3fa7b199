//! Id checks for path parameters, and the rules a [`StudentDraft`] must pass before it is saved.

use crate::data::student::StudentDraft;
use serde::Serialize;
use std::collections::BTreeMap;

pub const REGISTRATION_NUMBER_LENGTH: usize = 6;
pub const MAX_STRING_LENGTH: usize = 50;

/// `true` only for one or more ASCII digits, with no sign or whitespace.
pub fn valid_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

/// Ids that pass [`valid_id`] but overflow an `i32` can never exist, so they yield `None` too.
pub fn parse_id(id: &str) -> Option<i32> {
    if valid_id(id) { id.parse().ok() } else { None }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    RegistrationNumber,
    Name,
    LastName,
    Status,
}

impl Field {
    pub const fn name(self) -> &'static str {
        match self {
            Self::RegistrationNumber => "registration_number",
            Self::Name => "name",
            Self::LastName => "last_name",
            Self::Status => "status",
        }
    }

    fn value(self, draft: &StudentDraft) -> Option<&str> {
        match self {
            Self::RegistrationNumber => draft.registration_number.as_deref(),
            Self::Name => draft.name.as_deref(),
            Self::LastName => draft.last_name.as_deref(),
            Self::Status => draft.status.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Present and not just whitespace.
    Required,
    /// Parses as an `i32`, if present.
    Integer,
    /// The parsed integer has exactly this many characters in decimal form.
    Length(usize),
    /// At most this many characters, if present.
    MaxLength(usize),
}

impl Rule {
    fn holds(self, value: Option<&str>) -> bool {
        match self {
            Self::Required => value.is_some_and(|value| !value.trim().is_empty()),
            Self::Integer => value.is_none_or(|value| value.parse::<i32>().is_ok()),
            Self::Length(expected) => value
                .and_then(|value| value.parse::<i32>().ok())
                .is_none_or(|number| number.to_string().len() == expected),
            Self::MaxLength(max) => value.is_none_or(|value| value.chars().count() <= max),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: Field,
    pub rule: Rule,
    pub message: &'static str,
}

pub const STUDENT_RULES: &[FieldRule] = &[
    FieldRule {
        field: Field::RegistrationNumber,
        rule: Rule::Required,
        message: "Registration number must not be blank",
    },
    FieldRule {
        field: Field::RegistrationNumber,
        rule: Rule::Integer,
        message: "Registration number must be an integer",
    },
    FieldRule {
        field: Field::RegistrationNumber,
        rule: Rule::Length(REGISTRATION_NUMBER_LENGTH),
        message: "Registration number has an incorrect length",
    },
    FieldRule {
        field: Field::Name,
        rule: Rule::Required,
        message: "Name must not be blank",
    },
    FieldRule {
        field: Field::Name,
        rule: Rule::MaxLength(MAX_STRING_LENGTH),
        message: "Name must be at most 50 characters long",
    },
    FieldRule {
        field: Field::LastName,
        rule: Rule::Required,
        message: "Last name must not be blank",
    },
    FieldRule {
        field: Field::LastName,
        rule: Rule::MaxLength(MAX_STRING_LENGTH),
        message: "Last name must be at most 50 characters long",
    },
    FieldRule {
        field: Field::Status,
        rule: Rule::MaxLength(MAX_STRING_LENGTH),
        message: "Status must be at most 50 characters long",
    },
];

/// Field name to messages, serialised as a JSON object.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<&'static str>>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, field: Field) -> Option<&[&'static str]> {
        self.0.get(field.name()).map(Vec::as_slice)
    }
}

/// Runs `rules` in order. Once a rule fails for a field, that field's later rules are skipped.
pub fn check(draft: &StudentDraft, rules: &[FieldRule]) -> FieldErrors {
    let mut errors = FieldErrors::default();

    for FieldRule {
        field,
        rule,
        message,
    } in rules.iter().copied()
    {
        if errors.0.contains_key(field.name()) {
            continue;
        }
        if !rule.holds(field.value(draft)) {
            errors.0.insert(field.name(), vec![message]);
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(registration_number: Option<&str>, name: Option<&str>) -> StudentDraft {
        StudentDraft {
            registration_number: registration_number.map(str::to_string),
            name: name.map(str::to_string),
            last_name: Some("Lovelace".to_string()),
            status: None,
        }
    }

    #[test]
    fn digit_strings_are_valid_ids() {
        for id in ["0", "7", "42", "000123", "99999999999999999999"] {
            assert!(valid_id(id), "{id:?} should be valid");
        }
    }

    #[test]
    fn everything_else_is_an_invalid_id() {
        for id in ["", "abc", "1a", "-1", "+1", "1.5", " 1", "1 ", "1\n", "١٢"] {
            assert!(!valid_id(id), "{id:?} should be invalid");
        }
    }

    #[test]
    fn overflowing_ids_do_not_parse() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id("2147483648"), None);
        assert_eq!(parse_id("abc"), None);
    }

    #[test]
    fn complete_draft_passes() {
        let errors = check(&draft(Some("123456"), Some("Ada")), STUDENT_RULES);
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn blank_values_are_missing() {
        let errors = check(&draft(None, Some("  ")), STUDENT_RULES);
        assert_eq!(
            errors.get(Field::RegistrationNumber),
            Some(&["Registration number must not be blank"][..])
        );
        assert_eq!(errors.get(Field::Name), Some(&["Name must not be blank"][..]));
        assert_eq!(errors.get(Field::LastName), None);
    }

    #[test]
    fn registration_number_format() {
        let errors = check(&draft(Some("12345"), Some("Ada")), STUDENT_RULES);
        assert_eq!(
            errors.get(Field::RegistrationNumber),
            Some(&["Registration number has an incorrect length"][..])
        );

        let errors = check(&draft(Some("1234567"), Some("Ada")), STUDENT_RULES);
        assert!(errors.get(Field::RegistrationNumber).is_some());

        // parses to 12345
        let errors = check(&draft(Some("012345"), Some("Ada")), STUDENT_RULES);
        assert!(errors.get(Field::RegistrationNumber).is_some());

        let errors = check(&draft(Some("12e456"), Some("Ada")), STUDENT_RULES);
        assert_eq!(
            errors.get(Field::RegistrationNumber),
            Some(&["Registration number must be an integer"][..])
        );
    }

    #[test]
    fn long_strings_are_rejected() {
        let long = "x".repeat(MAX_STRING_LENGTH + 1);
        let errors = check(&draft(Some("123456"), Some(&long)), STUDENT_RULES);
        assert_eq!(
            errors.get(Field::Name),
            Some(&["Name must be at most 50 characters long"][..])
        );
    }

    #[test]
    fn errors_serialise_as_object_of_arrays() {
        let errors = check(&draft(None, Some("Ada")), STUDENT_RULES);
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({"registration_number": ["Registration number must not be blank"]})
        );
    }
}
