//! Declarative field rules for the record form.
//!
//! Each [`FormField`] maps to an ordered list of [`Rule`]s. A field is checked
//! in isolation; the first failing rule decides its [`FieldError`]. There are
//! no cross-field rules, so evaluation order between fields is irrelevant.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use super::form::FormValues;

/// One editable slot of the record form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    /// Username; accepts `name` or `username`.
    Name,
    /// E-mail address.
    Email,
    /// Age in whole years.
    Age,
    /// Phone number.
    Phone,
    /// City of residence.
    City,
    /// Identity document number; accepts `idNumber` or `id_number`.
    IdNumber,
}

impl FormField {
    /// Every form field in display order.
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Email,
        Self::Age,
        Self::Phone,
        Self::City,
        Self::IdNumber,
    ];

    /// Wire and command-line name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Age => "age",
            Self::Phone => "phone",
            Self::City => "city",
            Self::IdNumber => "idNumber",
        }
    }

    /// Human-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Username",
            Self::Email => "Email",
            Self::Age => "Age",
            Self::Phone => "Phone",
            Self::City => "City",
            Self::IdNumber => "ID Number",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Email => 1,
            Self::Age => 2,
            Self::Phone => 3,
            Self::City => 4,
            Self::IdNumber => 5,
        }
    }

    fn rules(self) -> &'static [Rule] {
        match self {
            Self::Name | Self::Phone | Self::City | Self::IdNumber => &[Rule::Required],
            Self::Email => &[Rule::Required, Rule::Email],
            Self::Age => &[Rule::Required, Rule::PositiveInteger],
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldError(String);

impl fmt::Display for UnknownFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown field `{}`; expected one of name, email, age, phone, city, idNumber",
            self.0
        )
    }
}

impl std::error::Error for UnknownFieldError {}

impl FromStr for FormField {
    type Err = UnknownFieldError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalised = raw.trim().to_ascii_lowercase().replace(['_', '-'], "");
        match normalised.as_str() {
            "name" | "username" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "age" => Ok(Self::Age),
            "phone" => Ok(Self::Phone),
            "city" => Ok(Self::City),
            "idnumber" => Ok(Self::IdNumber),
            _ => Err(UnknownFieldError(raw.to_owned())),
        }
    }
}

/// Why a single field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// The value is empty or blank.
    Required,
    /// The value is not a syntactically valid e-mail address.
    Format,
    /// The value is not numeric.
    Type,
    /// The number is not positive (or does not fit the age range).
    Range,
    /// The number has a fractional part.
    Precision,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "Required"),
            Self::Format => write!(f, "Invalid email address"),
            Self::Type => write!(f, "Must be a number"),
            Self::Range => write!(f, "Must be a positive number"),
            Self::Precision => write!(f, "Must be an integer"),
        }
    }
}

impl std::error::Error for FieldError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Required,
    Email,
    PositiveInteger,
}

impl Rule {
    fn check(self, value: &str) -> Result<(), FieldError> {
        match self {
            Self::Required if value.trim().is_empty() => Err(FieldError::Required),
            Self::Required => Ok(()),
            Self::Email if is_valid_email(value) => Ok(()),
            Self::Email => Err(FieldError::Format),
            Self::PositiveInteger => parse_age(value).map(|_| ()),
        }
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // WHATWG "valid e-mail address" production.
        let pattern = concat!(
            r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+",
            r"@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?",
            r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
        );
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("e-mail regex failed to compile: {error}"))
    })
}

/// Return whether `value` is a syntactically valid e-mail address.
pub(crate) fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Parse an age slot into a positive whole number.
///
/// Surrounding whitespace is ignored. Values that parse as numbers but are
/// not finite count as non-numeric.
pub(crate) fn parse_age(raw: &str) -> Result<u32, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Required);
    }
    let number = trimmed.parse::<f64>().map_err(|_| FieldError::Type)?;
    if !number.is_finite() {
        return Err(FieldError::Type);
    }
    if number <= 0.0 {
        return Err(FieldError::Range);
    }
    if number.fract() != 0.0 {
        return Err(FieldError::Precision);
    }
    if number > f64::from(u32::MAX) {
        return Err(FieldError::Range);
    }
    // Whole, positive and within range, so the text is an integer literal
    // unless it used exponent notation.
    trimmed
        .parse::<u32>()
        .or_else(|_| format!("{number:.0}").parse::<u32>())
        .map_err(|_| FieldError::Range)
}

/// Validate a single field value.
///
/// # Examples
/// ```
/// use records_console::domain::{FieldError, FormField};
/// use records_console::domain::validation::validate_field;
///
/// assert_eq!(validate_field(FormField::Age, "-3"), Some(FieldError::Range));
/// assert_eq!(validate_field(FormField::City, "Lima"), None);
/// ```
pub fn validate_field(field: FormField, value: &str) -> Option<FieldError> {
    field
        .rules()
        .iter()
        .find_map(|rule| rule.check(value).err())
}

/// Validate every field of a form.
pub fn validate(values: &FormValues) -> ValidationReport {
    let errors = FormField::ALL
        .into_iter()
        .filter_map(|field| validate_field(field, values.get(field)).map(|error| (field, error)))
        .collect();
    ValidationReport { errors }
}

/// Per-field outcome of validating a whole form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<FormField, FieldError>,
}

impl ValidationReport {
    /// True when no field has an error.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error for one field, if any.
    pub fn error(&self, field: FormField) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    /// Fields with errors, in display order.
    pub fn invalid_fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.errors.keys().copied()
    }

    /// Iterate over `(field, error)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, FieldError)> + '_ {
        self.errors.iter().map(|(field, error)| (*field, *error))
    }

    /// Number of invalid fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// True when no field has an error.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {error}")?;
            first = false;
        }
        Ok(())
    }
}
