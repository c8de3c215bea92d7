//! Intake form controller.
//!
//! Owns the mutable draft of the user's identity data during the intake
//! phase. Field updates replace exactly one field; `try_submit` enforces
//! the required-field constraints and produces an immutable snapshot
//! without clearing the draft (clearing is the flow controller's call).
//! No network or persistence side effects.

use chrono::NaiveDate;
use thiserror::Error;

use crate::types::UserInput;

/// Date format produced by the intake mechanism (ISO-8601 calendar date).
const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

/// One draft field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeField {
    FullName,
    BirthDate,
    Intention,
}

/// Why a submit attempt was refused.
///
/// Never surfaced as a user-facing alert: the input mechanism itself
/// blocks submission until the required fields are corrected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid birth date {value:?}: expected YYYY-MM-DD")]
    InvalidBirthDate { value: String },
}

/// Mutable intake draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeForm {
    full_name: String,
    birth_date: String,
    intention: String,
}

impl IntakeForm {
    /// Create an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace exactly one field, leaving the others unchanged.
    pub fn update(&mut self, field: IntakeField, value: &str) {
        match field {
            IntakeField::FullName => self.full_name = value.to_string(),
            IntakeField::BirthDate => self.birth_date = value.to_string(),
            IntakeField::Intention => self.intention = value.to_string(),
        }
    }

    /// Current draft full name.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Current draft birth date (raw, as entered).
    pub fn birth_date(&self) -> &str {
        &self.birth_date
    }

    /// Current draft intention.
    pub fn intention(&self) -> &str {
        &self.intention
    }

    /// Clear the draft back to empty.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate the draft and produce an immutable snapshot.
    ///
    /// Fails when the full name or birth date is empty, or when the birth
    /// date is not a calendar date. The intention has no constraint; a
    /// blank intention becomes `None`. The draft itself is left intact.
    pub fn try_submit(&self) -> Result<UserInput, ValidationError> {
        if self.full_name.is_empty() {
            return Err(ValidationError::MissingField { field: "full_name" });
        }
        if self.birth_date.is_empty() {
            return Err(ValidationError::MissingField {
                field: "birth_date",
            });
        }

        let birth_date = NaiveDate::parse_from_str(&self.birth_date, BIRTH_DATE_FORMAT)
            .map_err(|_| ValidationError::InvalidBirthDate {
                value: self.birth_date.clone(),
            })?;

        let intention = if self.intention.trim().is_empty() {
            None
        } else {
            Some(self.intention.clone())
        };

        Ok(UserInput {
            full_name: self.full_name.clone(),
            birth_date,
            intention,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> IntakeForm {
        let mut form = IntakeForm::new();
        form.update(IntakeField::FullName, "Nguyen Van A");
        form.update(IntakeField::BirthDate, "1990-05-01");
        form
    }

    // ── Field updates ────────────────────────────────────────────────

    #[test]
    fn update_replaces_only_the_named_field() {
        let mut form = filled_form();
        form.update(IntakeField::Intention, "clarity");

        assert_eq!(form.full_name(), "Nguyen Van A");
        assert_eq!(form.birth_date(), "1990-05-01");
        assert_eq!(form.intention(), "clarity");

        form.update(IntakeField::FullName, "Tran Thi B");
        assert_eq!(form.full_name(), "Tran Thi B");
        assert_eq!(form.intention(), "clarity");
    }

    #[test]
    fn reset_clears_all_fields() {
        let mut form = filled_form();
        form.update(IntakeField::Intention, "peace");
        form.reset();
        assert_eq!(form, IntakeForm::new());
    }

    // ── Validation gate ──────────────────────────────────────────────

    #[test]
    fn empty_name_fails() {
        let mut form = IntakeForm::new();
        form.update(IntakeField::BirthDate, "2020-01-01");
        assert_eq!(
            form.try_submit(),
            Err(ValidationError::MissingField { field: "full_name" })
        );
    }

    #[test]
    fn empty_birth_date_fails() {
        let mut form = IntakeForm::new();
        form.update(IntakeField::FullName, "A");
        assert_eq!(
            form.try_submit(),
            Err(ValidationError::MissingField {
                field: "birth_date"
            })
        );
    }

    #[test]
    fn non_date_birth_date_fails() {
        let mut form = filled_form();
        form.update(IntakeField::BirthDate, "first of May");
        assert!(matches!(
            form.try_submit(),
            Err(ValidationError::InvalidBirthDate { .. })
        ));
    }

    #[test]
    fn both_required_fields_present_succeeds() {
        let input = filled_form().try_submit().unwrap();
        assert_eq!(input.full_name, "Nguyen Van A");
        assert_eq!(
            input.birth_date,
            NaiveDate::from_ymd_opt(1990, 5, 1).unwrap()
        );
        assert_eq!(input.intention, None);
    }

    #[test]
    fn succeeds_regardless_of_intention() {
        let mut form = filled_form();
        assert!(form.try_submit().is_ok());

        form.update(IntakeField::Intention, "what is my path?");
        let input = form.try_submit().unwrap();
        assert_eq!(input.intention.as_deref(), Some("what is my path?"));
    }

    #[test]
    fn blank_intention_becomes_none() {
        let mut form = filled_form();
        form.update(IntakeField::Intention, "   ");
        let input = form.try_submit().unwrap();
        assert_eq!(input.intention, None);
    }

    #[test]
    fn submit_does_not_clear_the_draft() {
        let form = filled_form();
        let _ = form.try_submit().unwrap();
        assert_eq!(form.full_name(), "Nguyen Van A");
        assert_eq!(form.birth_date(), "1990-05-01");
    }
}
