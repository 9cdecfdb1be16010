//! Common utilities for document generation.
//!
//! Date formatting and filename helpers shared by the composer, the
//! document service and the HTTP layer.

use chrono::{Datelike, Local, NaiveDate};

const ITALIAN_MONTHS: [&str; 12] = [
    "gennaio",
    "febbraio",
    "marzo",
    "aprile",
    "maggio",
    "giugno",
    "luglio",
    "agosto",
    "settembre",
    "ottobre",
    "novembre",
    "dicembre",
];

/// Source of the date printed on documents.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always returns the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Numeric date as printed on the place/date line (e.g., "19/10/2026").
pub fn format_numeric_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Long Italian date (e.g., "19 ottobre 2026").
pub fn format_italian_date(date: NaiveDate) -> String {
    let month = ITALIAN_MONTHS[(date.month0() as usize).min(ITALIAN_MONTHS.len() - 1)];
    format!("{} {} {}", date.day(), month, date.year())
}

/// Make a client-supplied name safe to embed in a filename.
///
/// Unlike a slug this keeps case and inner spaces, so "Mario Rossi" stays
/// readable; only path separators, reserved names and control characters go.
pub fn sanitize_filename(name: &str, fallback: &str) -> String {
    let cleaned = sanitize_filename::sanitize(name.trim());
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return fallback.to_string();
    }

    cleaned.to_string()
}
