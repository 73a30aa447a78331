//! Field validators for the registration form.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

pub const NAME_REQUIRED: &str = "Name is required.";
pub const EMAIL_REQUIRED: &str = "Email is required.";
pub const EMAIL_INVALID: &str = "Email is invalid.";
pub const COURSE_REQUIRED: &str = "Please select a course.";

/// Minimal structural email check. Unanchored: the shape may appear anywhere
/// in the value.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("Invalid email regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Email,
    Course,
}

impl FormField {
    pub fn key(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Course => "course",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(Vec<FieldError>),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    pub fn errors(&self) -> &[FieldError] {
        match self {
            Validation::Valid => &[],
            Validation::Invalid(errors) => errors,
        }
    }
}

/// Current values of the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationFields {
    pub name: String,
    pub email: String,
    pub selected_course_id: String,
}

impl RegistrationFields {
    /// Raw value of `field`; the course field holds the selected identifier.
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Course => &self.selected_course_id,
        }
    }
}

pub fn validate_name(name: &str) -> Option<&'static str> {
    name.trim().is_empty().then_some(NAME_REQUIRED)
}

pub fn validate_email(email: &str) -> Option<&'static str> {
    if email.trim().is_empty() {
        Some(EMAIL_REQUIRED)
    } else if !EMAIL_SHAPE.is_match(email) {
        Some(EMAIL_INVALID)
    } else {
        None
    }
}

pub fn validate_course(course_id: &str) -> Option<&'static str> {
    course_id.is_empty().then_some(COURSE_REQUIRED)
}

/// Runs every field validator, collecting failures in field order.
///
/// # Examples
///
/// ```
/// use coursedeck::domain::{validate, FormField, RegistrationFields, Validation};
///
/// let fields = RegistrationFields {
///     name: "Ada".to_string(),
///     email: "not-an-email".to_string(),
///     selected_course_id: "c-1".to_string(),
/// };
/// let result = validate(&fields);
/// assert_eq!(result.errors().len(), 1);
/// assert_eq!(result.errors()[0].field, FormField::Email);
/// assert_ne!(result, Validation::Valid);
/// ```
pub fn validate(fields: &RegistrationFields) -> Validation {
    let checks = [
        (FormField::Name, validate_name(&fields.name)),
        (FormField::Email, validate_email(&fields.email)),
        (FormField::Course, validate_course(&fields.selected_course_id)),
    ];

    let errors: Vec<FieldError> = checks
        .into_iter()
        .filter_map(|(field, message)| message.map(|message| FieldError { field, message }))
        .collect();

    if errors.is_empty() {
        Validation::Valid
    } else {
        Validation::Invalid(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, email: &str, course: &str) -> RegistrationFields {
        RegistrationFields {
            name: name.to_string(),
            email: email.to_string(),
            selected_course_id: course.to_string(),
        }
    }

    #[test]
    fn test_all_fields_missing() {
        let result = validate(&fields("", "", ""));
        assert_eq!(
            result.errors(),
            &[
                FieldError { field: FormField::Name, message: "Name is required." },
                FieldError { field: FormField::Email, message: "Email is required." },
                FieldError { field: FormField::Course, message: "Please select a course." },
            ]
        );
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let result = validate(&fields("   ", "\t ", "c1"));
        let failed: Vec<FormField> = result.errors().iter().map(|e| e.field).collect();
        assert_eq!(failed, vec![FormField::Name, FormField::Email]);
        assert_eq!(result.errors()[1].message, EMAIL_REQUIRED);
    }

    #[test]
    fn test_invalid_email_only() {
        let result = validate(&fields("Ada", "not-an-email", "c1"));
        assert_eq!(
            result,
            Validation::Invalid(vec![FieldError {
                field: FormField::Email,
                message: "Email is invalid.",
            }])
        );
    }

    #[test]
    fn test_email_shapes() {
        assert_eq!(validate_email("ada@example.com"), None);
        assert_eq!(validate_email("a@b.c"), None);
        assert_eq!(validate_email("ada@example"), Some(EMAIL_INVALID));
        assert_eq!(validate_email("@example.com"), Some(EMAIL_INVALID));
        assert_eq!(validate_email("ada@.com"), Some(EMAIL_INVALID));
        assert_eq!(validate_email("ada@example."), Some(EMAIL_INVALID));
        assert_eq!(validate_email("ada @example.com"), Some(EMAIL_INVALID));
        // The shape only has to appear somewhere in the value.
        assert_eq!(validate_email("contact: ada@example.com"), None);
    }

    #[test]
    fn test_valid_form() {
        let result = validate(&fields("Ada Lovelace", "ada@example.com", "c1"));
        assert!(result.is_valid());
        assert!(result.errors().is_empty());
    }

    #[test]
    fn test_value_reads_each_field() {
        let fields = fields("Ada", "ada@example.com", "c7");
        assert_eq!(fields.value(FormField::Name), "Ada");
        assert_eq!(fields.value(FormField::Email), "ada@example.com");
        assert_eq!(fields.value(FormField::Course), "c7");
    }

    #[test]
    fn test_field_keys() {
        assert_eq!(FormField::Name.key(), "name");
        assert_eq!(FormField::Email.to_string(), "email");
        assert_eq!(FormField::Course.key(), "course");
    }
}
