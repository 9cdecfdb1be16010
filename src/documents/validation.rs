//! Input validation for direct document requests.
//!
//! Errors carry the offending field, an Italian message and an optional
//! hint, and are collected so a caller sees every problem at once.

use std::fmt;

use rust_decimal::Decimal;

/// Validation error with a user-facing message.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} non può essere vuoto", label))
            .with_suggestion(format!("Inserire {}", label.to_lowercase()))
    }

    pub fn not_positive(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} deve essere maggiore di zero", label))
    }

    pub fn negative(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} non può essere negativo", label))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Numbered list of every error, one per line.
    pub fn to_message(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }

        let mut parts = vec![format!(
            "Validazione non riuscita: {} errori trovati",
            self.errors.len()
        )];
        for (i, error) in self.errors.iter().enumerate() {
            parts.push(format!("{}. {}", i + 1, error));
        }
        parts.join("\n")
    }

    pub fn into_result(self) -> Result<(), String> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.to_message())
        }
    }
}

pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}

/// Loan amount: present and not negative.
pub fn validate_amount(value: Option<Decimal>, field: &str, errors: &mut ValidationErrors) {
    match value {
        None => errors.add(ValidationError::empty_field(field, "Importo")),
        Some(amount) if amount < Decimal::ZERO => {
            errors.add(ValidationError::negative(field, "Importo"))
        }
        Some(_) => {}
    }
}

/// Duration in months: present and at least one.
pub fn validate_duration(value: Option<u32>, field: &str, errors: &mut ValidationErrors) {
    match value {
        None => errors.add(ValidationError::empty_field(field, "Durata")),
        Some(0) => errors.add(ValidationError::not_positive(field, "Durata")),
        Some(_) => {}
    }
}

/// Optional percentage; a missing rate falls back to the configured default.
pub fn validate_rate(value: Option<Decimal>, field: &str, label: &str, errors: &mut ValidationErrors) {
    if matches!(value, Some(rate) if rate < Decimal::ZERO) {
        errors.add(
            ValidationError::negative(field, label)
                .with_suggestion("Usare un valore percentuale, ad esempio 7.86"),
        );
    }
}
