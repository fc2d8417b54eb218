//! Person record data model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`RecordId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// The identifier was empty or blank.
    EmptyId,
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "record id must not be empty"),
        }
    }
}

impl std::error::Error for RecordValidationError {}

/// Opaque, server-assigned record identifier.
///
/// The console never interprets the identifier; it only echoes it back in
/// update and delete paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Validate and construct a [`RecordId`].
    ///
    /// # Examples
    /// ```
    /// use records_console::domain::RecordId;
    ///
    /// let id = RecordId::new("42").unwrap();
    /// assert_eq!(id.as_ref(), "42");
    /// assert!(RecordId::new("  ").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, RecordValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(RecordValidationError::EmptyId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl TryFrom<String> for RecordId {
    type Error = RecordValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// The six user-editable record attributes.
///
/// This is also the JSON body sent on create and update, so the serialised
/// keys are camelCase (`idNumber`) and `age` is a JSON integer. Values are
/// produced from form input by
/// [`FormValues::to_record_fields`](crate::domain::FormValues::to_record_fields),
/// which refuses to build one unless every rule passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFields {
    /// Person's display name.
    pub name: String,
    /// Contact e-mail address.
    pub email: String,
    /// Age in whole years, always positive.
    pub age: u32,
    /// Contact phone number.
    pub phone: String,
    /// City of residence.
    pub city: String,
    /// National identity document number.
    pub id_number: String,
}

/// A person record as returned by the remote store.
///
/// ## Invariants
/// - `id` is assigned by the server and never edited locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: RecordId,
    fields: RecordFields,
}

impl Record {
    /// Build a record from its identifier and attribute values.
    pub fn new(id: RecordId, fields: RecordFields) -> Self {
        Self { id, fields }
    }

    /// Server-assigned identifier.
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Editable attributes.
    pub fn fields(&self) -> &RecordFields {
        &self.fields
    }
}
