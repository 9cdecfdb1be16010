//! InputCollector - the per-session question/answer state machine.
//!
//! The collector owns one `LoanApplication` and moves through a fixed
//! sequence of questions. Every input yields the next state plus at most one
//! prompt; a completed flow also yields the rendered document.

use std::mem;
use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::documents::application::{DocumentKind, LoanApplication};
use crate::documents::finance::format_percent_localized;
use crate::documents::{DocumentError, DocumentService, RenderedDocument};

use super::command::{parse_amount, parse_duration, parse_rate, Command};

const WELCOME: &str = "Benvenuto! Scegli documento:";
const CANCELLED: &str = "Operazione annullata.";
const FAILURE: &str = "Errore durante la generazione del documento. Riprova più tardi.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    ChoosingDocument,
    AskName,
    AskAmount,
    AskDuration,
    AskTan,
    AskTaeg,
}

/// Outbound text plus an optional reply keyboard of tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Prompt {
    pub text: String,
    pub keyboard: Vec<String>,
}

impl Prompt {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: Vec::new(),
        }
    }

    fn welcome(prefix: Option<&str>) -> Self {
        let text = match prefix {
            Some(prefix) => format!("{prefix}\n{WELCOME}"),
            None => WELCOME.to_string(),
        };
        Self {
            text,
            keyboard: DocumentKind::ALL
                .iter()
                .map(|kind| kind.token().to_string())
                .collect(),
        }
    }
}

/// Result of feeding one input to the collector.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub state: ConversationState,
    pub prompt: Option<Prompt>,
    pub document: Option<RenderedDocument>,
}

pub struct InputCollector {
    service: Arc<DocumentService>,
    state: ConversationState,
    application: LoanApplication,
}

impl InputCollector {
    pub fn new(service: Arc<DocumentService>) -> Self {
        Self {
            service,
            state: ConversationState::ChoosingDocument,
            application: LoanApplication::new(),
        }
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    /// Fields collected so far in the current flow.
    pub fn application(&self) -> &LoanApplication {
        &self.application
    }

    pub fn handle(&mut self, input: &str) -> Outcome {
        let command = match Command::parse(input) {
            Ok(command) => command,
            Err(err) => {
                log::debug!("Rejected input in {:?}: {}", self.state, err);
                return self.stay(self.prompt_for(self.state));
            }
        };

        match command {
            Command::Start => self.reset(None),
            Command::Cancel => self.reset(Some(CANCELLED)),
            other => self.transition(other),
        }
    }

    fn transition(&mut self, command: Command) -> Outcome {
        use ConversationState::*;

        match (self.state, command) {
            (ChoosingDocument, Command::Choose(kind)) => {
                self.application = LoanApplication::for_kind(kind);
                self.advance(AskName)
            }
            (AskName, Command::Text(name)) if !name.is_empty() => {
                self.application.client_name = Some(name);
                if self.application.kind == Some(DocumentKind::GuaranteeLetter) {
                    self.complete()
                } else {
                    self.advance(AskAmount)
                }
            }
            (AskAmount, Command::Text(text)) => match parse_amount(&text) {
                Ok(amount) => {
                    self.application.amount = Some(amount);
                    self.advance(AskDuration)
                }
                Err(_) => self.stay(Prompt::text("Importo non valido, riprova:")),
            },
            (AskDuration, Command::Text(text)) => match parse_duration(&text) {
                Ok(months) => {
                    self.application.duration_months = Some(months);
                    self.advance(AskTan)
                }
                Err(_) => self.stay(Prompt::text("Durata non valida, riprova:")),
            },
            (AskTan, Command::Text(text)) => {
                match parse_rate(&text, self.service.config().default_tan) {
                    Ok(tan) => {
                        self.application.tan = Some(tan);
                        self.advance(AskTaeg)
                    }
                    Err(_) => self.stay(Prompt::text("TAN non valido, riprova:")),
                }
            }
            (AskTaeg, Command::Text(text)) => {
                match parse_rate(&text, self.service.config().default_taeg) {
                    Ok(taeg) => {
                        self.application.taeg = Some(taeg);
                        self.complete()
                    }
                    Err(_) => self.stay(Prompt::text("TAEG non valido, riprova:")),
                }
            }
            (state, _) => self.stay(self.prompt_for(state)),
        }
    }

    fn prompt_for(&self, state: ConversationState) -> Prompt {
        let config = self.service.config();
        match state {
            ConversationState::ChoosingDocument => Prompt::welcome(None),
            ConversationState::AskName => Prompt::text("Inserisci nome e cognome del cliente:"),
            ConversationState::AskAmount => Prompt::text("Inserisci importo (€):"),
            ConversationState::AskDuration => Prompt::text("Inserisci durata (mesi):"),
            ConversationState::AskTan => Prompt::text(format!(
                "Inserisci TAN (%), invio per {}%:",
                format_percent_localized(config.default_tan)
            )),
            ConversationState::AskTaeg => Prompt::text(format!(
                "Inserisci TAEG (%), invio per {}%:",
                format_percent_localized(config.default_taeg)
            )),
        }
    }

    fn advance(&mut self, next: ConversationState) -> Outcome {
        log::debug!("Conversation {:?} -> {:?}", self.state, next);
        self.state = next;
        Outcome {
            state: next,
            prompt: Some(self.prompt_for(next)),
            document: None,
        }
    }

    fn stay(&self, prompt: Prompt) -> Outcome {
        Outcome {
            state: self.state,
            prompt: Some(prompt),
            document: None,
        }
    }

    /// Back to the document choice with every collected field discarded.
    fn reset(&mut self, notice: Option<&str>) -> Outcome {
        log::debug!("Conversation {:?} reset", self.state);
        self.application = LoanApplication::new();
        self.state = ConversationState::ChoosingDocument;
        Outcome {
            state: self.state,
            prompt: Some(Prompt::welcome(notice)),
            document: None,
        }
    }

    /// Render the collected application. Success or failure, the flow
    /// starts over.
    fn complete(&mut self) -> Outcome {
        let application = mem::take(&mut self.application);
        self.state = ConversationState::ChoosingDocument;

        match self.render(application) {
            Ok(document) => {
                log::info!(
                    "Conversation produced {} ({} page(s), {} bytes)",
                    document.filename,
                    document.page_count,
                    document.pdf.len()
                );
                Outcome {
                    state: self.state,
                    prompt: Some(Prompt::welcome(None)),
                    document: Some(document),
                }
            }
            Err(err) => {
                log::error!("Document generation failed: {}", err);
                Outcome {
                    state: self.state,
                    prompt: Some(Prompt::welcome(Some(FAILURE))),
                    document: None,
                }
            }
        }
    }

    fn render(&self, mut application: LoanApplication) -> Result<RenderedDocument, DocumentError> {
        if application.kind()?.needs_loan_terms() {
            application.compute_monthly_payment()?;
        }
        self.service.render(&application, self.service.today())
    }
}
