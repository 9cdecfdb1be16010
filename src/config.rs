//! Process and document configuration.
//!
//! `AppConfig` is read once from the environment (a `.env` file is honoured).
//! `DocumentConfig` is the immutable part handed to the composer and the
//! renderer when they are constructed.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use crate::documents::model::AssetSlot;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {name} has invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Identity printed in letterheads and signature labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Institution {
    pub name: String,
    pub short_name: String,
    pub office: String,
    pub legal_address: String,
    pub registration: String,
}

impl Default for Institution {
    fn default() -> Self {
        Self {
            name: "Banca Esempio S.p.A.".to_string(),
            short_name: "Banca Esempio".to_string(),
            office: "Ufficio Crediti Clientela Privata".to_string(),
            legal_address: "Sede legale: Via dell'Esempio 1 - 20100 Milano".to_string(),
            registration: "Capitale sociale € 1.000.000,00 - P.IVA 00000000000 - Registro Imprese di Milano"
                .to_string(),
        }
    }
}

/// File paths behind the two logical asset slots. Existence is checked
/// only when a document is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    pub institution_logo: PathBuf,
    pub authorized_signature: PathBuf,
}

impl AssetPaths {
    pub fn path(&self, slot: AssetSlot) -> &PathBuf {
        match slot {
            AssetSlot::InstitutionLogo => &self.institution_logo,
            AssetSlot::AuthorizedSignature => &self.authorized_signature,
        }
    }
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            institution_logo: PathBuf::from("assets/logo.png"),
            authorized_signature: PathBuf::from("assets/signature.png"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentConfig {
    pub institution: Institution,
    pub default_tan: Decimal,
    pub default_taeg: Decimal,
    pub default_place: String,
    pub card_fee: Decimal,
    pub insurance_premium: Decimal,
    pub installment_fee: Decimal,
    pub assets: AssetPaths,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            institution: Institution::default(),
            default_tan: dec!(7.86),
            default_taeg: dec!(8.30),
            default_place: "Milano".to_string(),
            card_fee: dec!(120.00),
            insurance_premium: dec!(150.00),
            installment_fee: dec!(0.00),
            assets: AssetPaths::default(),
        }
    }
}

/// Bounds on the in-memory chat sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    /// A session untouched for this long is dropped.
    pub idle: Duration,
    pub capacity: u64,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            idle: Duration::from_secs(30 * 60),
            capacity: 10_000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub documents: DocumentConfig,
    pub sessions: SessionLimits,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut documents = DocumentConfig::default();
        if let Some(path) = optional("LOGO_PATH") {
            documents.assets.institution_logo = PathBuf::from(path);
        }
        if let Some(path) = optional("SIGNATURE_PATH") {
            documents.assets.authorized_signature = PathBuf::from(path);
        }
        if let Some(tan) = parsed::<Decimal>("DEFAULT_TAN")? {
            documents.default_tan = tan;
        }
        if let Some(taeg) = parsed::<Decimal>("DEFAULT_TAEG")? {
            documents.default_taeg = taeg;
        }
        if let Some(place) = optional("DEFAULT_PLACE") {
            documents.default_place = place;
        }
        if let Some(name) = optional("INSTITUTION_NAME") {
            documents.institution.short_name = name.trim_end_matches(" S.p.A.").to_string();
            documents.institution.name = name;
        }

        let mut sessions = SessionLimits::default();
        if let Some(secs) = parsed::<u64>("SESSION_IDLE_SECS")? {
            sessions.idle = Duration::from_secs(secs);
        }
        if let Some(capacity) = parsed::<u64>("SESSION_CAPACITY")? {
            sessions.capacity = capacity;
        }

        Ok(Self {
            host: optional("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed::<u16>("PORT")?.unwrap_or(8080),
            documents,
            sessions,
        })
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parsed<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match optional(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
