//! Closed command type for chat input and the field-value parsers.

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::documents::application::DocumentKind;
use crate::documents::finance::round_cents;

lazy_static! {
    static ref AMOUNT_RE: Regex =
        Regex::new(r"^€?\s*([0-9]+(?:[.,][0-9]+)?)\s*€?$").expect("valid amount regex");
    static ref RATE_RE: Regex =
        Regex::new(r"^([0-9]+(?:[.,][0-9]+)?)\s*%?$").expect("valid rate regex");
}

/// One message from the user, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Cancel,
    Choose(DocumentKind),
    /// Free text, trimmed. May be empty.
    Text(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
}

impl Command {
    /// Anything starting with `/` is a command; its first word decides
    /// which. A `@botname` suffix on the token is ignored.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = input.trim();
        if !trimmed.starts_with('/') {
            return Ok(Command::Text(trimmed.to_string()));
        }

        let word = trimmed.split_whitespace().next().unwrap_or(trimmed);
        let token = word.split('@').next().unwrap_or(word);
        match token {
            "/start" => Ok(Command::Start),
            "/cancel" => Ok(Command::Cancel),
            other => DocumentKind::from_token(other)
                .map(Command::Choose)
                .ok_or_else(|| ParseError::UnknownCommand(other.to_string())),
        }
    }
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::parse(s)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("'{0}' is not a valid amount")]
    Amount(String),
    #[error("'{0}' is not a valid duration in months")]
    Duration(String),
    #[error("'{0}' is not a valid percentage")]
    Rate(String),
}

fn decimal(number: &str) -> Option<Decimal> {
    Decimal::from_str(&number.replace(',', ".")).ok()
}

/// Euro amount, comma or dot separator, optional `€` on either side.
/// Rounded to cents.
pub fn parse_amount(text: &str) -> Result<Decimal, InputError> {
    let trimmed = text.trim();
    AMOUNT_RE
        .captures(trimmed)
        .and_then(|caps| decimal(&caps[1]))
        .map(round_cents)
        .ok_or_else(|| InputError::Amount(trimmed.to_string()))
}

/// Whole number of months, at least one.
pub fn parse_duration(text: &str) -> Result<u32, InputError> {
    let trimmed = text.trim();
    match trimmed.parse::<u32>() {
        Ok(months) if months > 0 => Ok(months),
        _ => Err(InputError::Duration(trimmed.to_string())),
    }
}

/// Percentage with an optional `%`. Empty input selects `default`.
pub fn parse_rate(text: &str, default: Decimal) -> Result<Decimal, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    RATE_RE
        .captures(trimmed)
        .and_then(|caps| decimal(&caps[1]))
        .ok_or_else(|| InputError::Rate(trimmed.to_string()))
}
