//! Direct document request used by the HTTP API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::DocumentConfig;

use super::application::{DocumentKind, LoanApplication};
use super::traits::Validator;

/// Every field a document can need, supplied in one call. Loan terms are
/// only required for the contract and the card letter; rates and place
/// fall back to the configured defaults.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentRequest {
    pub kind: DocumentKind,
    #[schema(example = "Mario Rossi")]
    pub client_name: String,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "5000")]
    pub amount: Option<Decimal>,
    #[serde(default)]
    #[schema(example = 36)]
    pub duration_months: Option<u32>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "7.86")]
    pub tan: Option<Decimal>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "8.30")]
    pub taeg: Option<Decimal>,
    #[serde(default)]
    #[schema(example = "Milano")]
    pub place: Option<String>,
    /// Date printed on the document; today when omitted.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl Validator for DocumentRequest {
    fn validate(&self) -> Result<(), String> {
        use super::validation::*;

        let mut errors = ValidationErrors::new();
        validate_required(&self.client_name, "client_name", "Nome del cliente", &mut errors);

        if self.kind.needs_loan_terms() {
            validate_amount(self.amount, "amount", &mut errors);
            validate_duration(self.duration_months, "duration_months", &mut errors);
            validate_rate(self.tan, "tan", "TAN", &mut errors);
            validate_rate(self.taeg, "taeg", "TAEG", &mut errors);
        }

        errors.into_result()
    }
}

impl DocumentRequest {
    /// Application with defaults filled in. The installment is not yet
    /// computed.
    pub fn into_application(self, config: &DocumentConfig) -> LoanApplication {
        let needs_terms = self.kind.needs_loan_terms();
        let mut application = LoanApplication::for_kind(self.kind);
        application.client_name = Some(self.client_name.trim().to_string());
        application.amount = self.amount.filter(|_| needs_terms);
        application.duration_months = self.duration_months.filter(|_| needs_terms);
        application.tan = needs_terms.then(|| self.tan.unwrap_or(config.default_tan));
        application.taeg = needs_terms.then(|| self.taeg.unwrap_or(config.default_taeg));
        application.place = self
            .place
            .map(|place| place.trim().to_string())
            .filter(|place| !place.is_empty());
        application
    }
}
