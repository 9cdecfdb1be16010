//! Document service - composes an application and renders it to PDF.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::DocumentConfig;

use super::application::{suggested_filename, LoanApplication};
use super::common::{format_italian_date, Clock, SystemClock};
use super::composer::Composer;
use super::renderer::Renderer;
use super::request::DocumentRequest;
use super::traits::{Generator, Validator};
use super::{DocumentError, RenderedDocument};

pub struct DocumentService {
    composer: Composer,
    renderer: Renderer,
    clock: Arc<dyn Clock>,
}

impl DocumentService {
    pub fn new(config: DocumentConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: DocumentConfig, clock: Arc<dyn Clock>) -> Self {
        let renderer = Renderer::new(config.assets.clone());
        Self {
            composer: Composer::new(config),
            renderer,
            clock,
        }
    }

    pub fn config(&self) -> &DocumentConfig {
        self.composer.config()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Render a completed application. The installment must already be
    /// computed for kinds that print loan terms.
    pub fn render(
        &self,
        application: &LoanApplication,
        date: NaiveDate,
    ) -> Result<RenderedDocument, DocumentError> {
        let kind = application.kind()?;
        let client_name = application.client_name()?;
        let nodes = self.composer.compose(application, date)?;
        let pdf = self.renderer.render_titled(Some(kind.title()), &nodes, &[])?;

        let filename = suggested_filename(kind, client_name);
        log::info!(
            "Generated {} ({} page(s), {} bytes)",
            filename,
            pdf.page_count,
            pdf.bytes.len()
        );

        Ok(RenderedDocument {
            filename,
            pdf: pdf.bytes,
            kind,
            page_count: pdf.page_count,
            date: format_italian_date(date),
        })
    }
}

impl Generator<DocumentRequest> for DocumentService {
    fn generate(&self, request: DocumentRequest) -> Result<RenderedDocument, DocumentError> {
        request.validate().map_err(DocumentError::Invalid)?;

        let date = request.date.unwrap_or_else(|| self.today());
        let mut application = request.into_application(self.config());
        if application.kind()?.needs_loan_terms() {
            application.compute_monthly_payment()?;
        }
        self.render(&application, date)
    }
}
