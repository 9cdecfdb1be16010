//! The loan application collected during a conversation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::common::sanitize_filename;
use super::finance::{monthly_payment, FinanceError};

/// The three printable document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Contract,
    GuaranteeLetter,
    CardLetter,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::Contract,
        DocumentKind::GuaranteeLetter,
        DocumentKind::CardLetter,
    ];

    /// Chat token selecting this kind.
    pub fn token(self) -> &'static str {
        match self {
            DocumentKind::Contract => "/contratto",
            DocumentKind::GuaranteeLetter => "/garanzia",
            DocumentKind::CardLetter => "/carta",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.token() == token)
    }

    /// Prefix of the suggested filename.
    pub fn file_prefix(self) -> &'static str {
        match self {
            DocumentKind::Contract => "Contratto",
            DocumentKind::GuaranteeLetter => "Garanzia",
            DocumentKind::CardLetter => "Carta",
        }
    }

    /// Whether the kind needs amount, duration and rates.
    pub fn needs_loan_terms(self) -> bool {
        !matches!(self, DocumentKind::GuaranteeLetter)
    }

    pub fn title(self) -> &'static str {
        match self {
            DocumentKind::Contract => "Contratto di finanziamento",
            DocumentKind::GuaranteeLetter => "Lettera di garanzia",
            DocumentKind::CardLetter => "Lettera di emissione carta",
        }
    }
}

/// `"<Prefix>_<client name>.pdf"`, with path separators and control
/// characters stripped from the name.
pub fn suggested_filename(kind: DocumentKind, client_name: &str) -> String {
    let name = sanitize_filename(client_name, "cliente");
    format!("{}_{}.pdf", kind.file_prefix(), name)
}

/// Completed numeric terms of a loan. Only obtainable through
/// [`LoanApplication::terms`], so the installment is always the one derived
/// from the amount, duration and TAN it sits next to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanTerms {
    pub amount: Decimal,
    pub duration_months: u32,
    pub tan: Decimal,
    pub taeg: Decimal,
    pub monthly_payment: Decimal,
}

/// Field the application is still missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Kind,
    ClientName,
    Amount,
    Duration,
    Tan,
    Taeg,
    MonthlyPayment,
}

impl std::fmt::Display for MissingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MissingField::Kind => "document kind",
            MissingField::ClientName => "client name",
            MissingField::Amount => "amount",
            MissingField::Duration => "duration",
            MissingField::Tan => "TAN",
            MissingField::Taeg => "TAEG",
            MissingField::MonthlyPayment => "monthly payment",
        };
        f.write_str(name)
    }
}

/// Session-scoped application, filled in one field at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoanApplication {
    pub kind: Option<DocumentKind>,
    pub client_name: Option<String>,
    pub amount: Option<Decimal>,
    pub duration_months: Option<u32>,
    pub tan: Option<Decimal>,
    pub taeg: Option<Decimal>,
    pub place: Option<String>,
    monthly_payment: Option<Decimal>,
}

impl LoanApplication {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty application with only the document kind chosen.
    pub fn for_kind(kind: DocumentKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn monthly_payment(&self) -> Option<Decimal> {
        self.monthly_payment
    }

    /// Derive the installment from amount, duration and TAN. The first
    /// successful call fixes the value; later calls return it unchanged.
    pub fn compute_monthly_payment(&mut self) -> Result<Decimal, ApplicationError> {
        if let Some(payment) = self.monthly_payment {
            return Ok(payment);
        }
        let amount = self.amount.ok_or(ApplicationError::Missing(MissingField::Amount))?;
        let months = self
            .duration_months
            .ok_or(ApplicationError::Missing(MissingField::Duration))?;
        let tan = self.tan.ok_or(ApplicationError::Missing(MissingField::Tan))?;

        let payment = monthly_payment(amount, months, tan)?;
        self.monthly_payment = Some(payment);
        Ok(payment)
    }

    pub fn client_name(&self) -> Result<&str, ApplicationError> {
        self.client_name
            .as_deref()
            .ok_or(ApplicationError::Missing(MissingField::ClientName))
    }

    pub fn kind(&self) -> Result<DocumentKind, ApplicationError> {
        self.kind.ok_or(ApplicationError::Missing(MissingField::Kind))
    }

    /// Snapshot of the loan terms; fails until every numeric field,
    /// including the derived installment, is present.
    pub fn terms(&self) -> Result<LoanTerms, ApplicationError> {
        let missing = |field| ApplicationError::Missing(field);
        Ok(LoanTerms {
            amount: self.amount.ok_or_else(|| missing(MissingField::Amount))?,
            duration_months: self
                .duration_months
                .ok_or_else(|| missing(MissingField::Duration))?,
            tan: self.tan.ok_or_else(|| missing(MissingField::Tan))?,
            taeg: self.taeg.ok_or_else(|| missing(MissingField::Taeg))?,
            monthly_payment: self
                .monthly_payment
                .ok_or_else(|| missing(MissingField::MonthlyPayment))?,
        })
    }
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("application is missing the {0}")]
    Missing(MissingField),
    #[error(transparent)]
    Finance(#[from] FinanceError),
}
