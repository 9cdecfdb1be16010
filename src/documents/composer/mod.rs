//! Composer - one fixed template per document kind.
//!
//! Each builder turns a completed application into an ordered node list.
//! Builders only substitute data; the shape of the list never depends on it.
//! The date is an input so the same application always yields the same tree.

mod card;
mod contract;
mod guarantee;

use chrono::NaiveDate;

use crate::config::DocumentConfig;

use super::application::{ApplicationError, DocumentKind, LoanApplication, LoanTerms};
use super::model::ContentNode;

/// Data a contract or card letter is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanLetterData<'a> {
    pub client_name: &'a str,
    pub place: &'a str,
    pub terms: &'a LoanTerms,
}

#[derive(Debug, Clone)]
pub struct Composer {
    config: DocumentConfig,
}

impl Composer {
    pub fn new(config: DocumentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    /// Build the node list for whatever kind the application selected.
    pub fn compose(
        &self,
        application: &LoanApplication,
        today: NaiveDate,
    ) -> Result<Vec<ContentNode>, ApplicationError> {
        let kind = application.kind()?;
        let client_name = application.client_name()?;

        if !kind.needs_loan_terms() {
            return Ok(self.guarantee_letter(client_name));
        }

        let terms = application.terms()?;
        let data = LoanLetterData {
            client_name,
            place: application
                .place
                .as_deref()
                .unwrap_or(&self.config.default_place),
            terms: &terms,
        };

        Ok(match kind {
            DocumentKind::Contract => self.contract(&data, today),
            DocumentKind::CardLetter => self.card_letter(&data),
            DocumentKind::GuaranteeLetter => self.guarantee_letter(client_name),
        })
    }

    pub fn contract(&self, data: &LoanLetterData<'_>, today: NaiveDate) -> Vec<ContentNode> {
        contract::build(&self.config, data, today)
    }

    pub fn guarantee_letter(&self, client_name: &str) -> Vec<ContentNode> {
        guarantee::build(&self.config, client_name)
    }

    pub fn card_letter(&self, data: &LoanLetterData<'_>) -> Vec<ContentNode> {
        card::build(&self.config, data)
    }
}
