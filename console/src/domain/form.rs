//! Editable working copy of a record.

use super::record::{Record, RecordFields};
use super::validation::{self, FieldError, FormField, ValidationReport, parse_age};

/// Raw text held by each form slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    /// Username text.
    pub name: String,
    /// E-mail text.
    pub email: String,
    /// Age as typed; parsed only on validation.
    pub age: String,
    /// Phone text.
    pub phone: String,
    /// City text.
    pub city: String,
    /// Identity document number text.
    pub id_number: String,
}

impl FormValues {
    /// Raw value of one field.
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Age => &self.age,
            FormField::Phone => &self.phone,
            FormField::City => &self.city,
            FormField::IdNumber => &self.id_number,
        }
    }

    /// Overwrite one field.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Age => &mut self.age,
            FormField::Phone => &mut self.phone,
            FormField::City => &mut self.city,
            FormField::IdNumber => &mut self.id_number,
        };
        *slot = value.into();
    }

    /// Text rendering of a stored record, used when entering edit mode.
    pub fn from_record(record: &Record) -> Self {
        let fields = record.fields();
        Self {
            name: fields.name.clone(),
            email: fields.email.clone(),
            age: fields.age.to_string(),
            phone: fields.phone.clone(),
            city: fields.city.clone(),
            id_number: fields.id_number.clone(),
        }
    }

    /// Validate and convert into the request body.
    ///
    /// # Examples
    /// ```
    /// use records_console::domain::{FieldError, FormField, FormValues};
    ///
    /// let mut values = FormValues::default();
    /// values.set(FormField::Name, "Ana");
    /// let report = values.to_record_fields().unwrap_err();
    /// assert_eq!(report.error(FormField::Email), Some(FieldError::Required));
    /// assert_eq!(report.error(FormField::Name), None);
    /// ```
    pub fn to_record_fields(&self) -> Result<RecordFields, ValidationReport> {
        let report = validation::validate(self);
        if !report.is_valid() {
            return Err(report);
        }
        let age = parse_age(&self.age).map_err(|_| report.clone())?;
        Ok(RecordFields {
            name: self.name.clone(),
            email: self.email.clone(),
            age,
            phone: self.phone.clone(),
            city: self.city.clone(),
            id_number: self.id_number.clone(),
        })
    }
}

/// Per-slot metadata: whether the user has visited the field and its current
/// validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSlot {
    touched: bool,
    error: Option<FieldError>,
}

impl FieldSlot {
    fn untouched(field: FormField, value: &str) -> Self {
        Self {
            touched: false,
            error: validation::validate_field(field, value),
        }
    }

    /// Whether the user has interacted with this slot.
    pub fn touched(&self) -> bool {
        self.touched
    }

    /// Current error, regardless of visibility.
    pub fn error(&self) -> Option<FieldError> {
        self.error
    }
}

/// The live, user-editable draft of a record.
///
/// ## Invariants
/// - Every slot's `error` reflects its current value.
/// - Errors are only reported as visible for touched slots; a submission
///   attempt touches every slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    values: FormValues,
    slots: [FieldSlot; 6],
}

impl Default for FormState {
    fn default() -> Self {
        Self::with_values(FormValues::default())
    }
}

impl FormState {
    fn with_values(values: FormValues) -> Self {
        let slots = FormField::ALL.map(|field| FieldSlot::untouched(field, values.get(field)));
        Self { values, slots }
    }

    fn slot_mut(&mut self, field: FormField) -> &mut FieldSlot {
        &mut self.slots[field.index()]
    }

    /// Slot metadata for one field.
    pub fn slot(&self, field: FormField) -> &FieldSlot {
        &self.slots[field.index()]
    }

    /// Current raw values.
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Update one slot, mark it touched and re-run its rule.
    pub fn set_value(&mut self, field: FormField, value: impl Into<String>) -> Option<FieldError> {
        self.values.set(field, value);
        let error = validation::validate_field(field, self.values.get(field));
        let slot = self.slot_mut(field);
        slot.touched = true;
        slot.error = error;
        error
    }

    /// Mark a slot as visited without changing its value.
    pub fn touch(&mut self, field: FormField) {
        self.slot_mut(field).touched = true;
    }

    /// Mark every slot as visited, as a submission attempt does.
    pub fn touch_all(&mut self) {
        for slot in &mut self.slots {
            slot.touched = true;
        }
    }

    /// Overwrite every slot from a stored record; all slots become untouched.
    pub fn populate(&mut self, record: &Record) {
        *self = Self::with_values(FormValues::from_record(record));
    }

    /// Reset every slot to empty and untouched.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Re-run every rule and refresh slot errors.
    pub fn validate(&mut self) -> ValidationReport {
        let report = validation::validate(&self.values);
        for field in FormField::ALL {
            self.slot_mut(field).error = report.error(field);
        }
        report
    }

    /// Error to show for a slot: only once it has been touched.
    pub fn visible_error(&self, field: FormField) -> Option<FieldError> {
        let slot = self.slot(field);
        if slot.touched { slot.error } else { None }
    }

    /// True when every slot is empty and untouched.
    pub fn is_pristine(&self) -> bool {
        self.values == FormValues::default() && self.slots.iter().all(|slot| !slot.touched)
    }
}
