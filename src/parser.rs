//! Определение формата чека и выбор способа его получения.

pub mod helpers;
pub mod russia;
pub mod serbia;

use std::fmt::Display;

use log::{debug, info};
use regex::Regex;
use reqwest::Url;

use crate::{
    api::Transport,
    config::Config,
    error::{ParseError, Result},
    model::Bill,
};

/// Строка вида `key=value&key=value...`.
const QR_PATTERN: &str = r"^[a-z]+=[^&=]*(&[a-z]+=[^&=]*)+$";

/// Поддерживаемые форматы чеков.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Ссылка на страницу проверки сербского чека.
    Serbia,

    /// Строка из QR кода российского чека.
    Russia,
}

impl Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Serbia => write!(f, "serbia"),
            Format::Russia => write!(f, "russia"),
        }
    }
}

/// Определяет формат входной строки.
pub fn detect(input: &str) -> Result<Format> {
    let input = input.trim();

    if let Ok(url) = Url::parse(input) {
        let is_http = matches!(url.scheme(), "http" | "https");
        if is_http && url.host_str() == Some(serbia::HOST) {
            return Ok(Format::Serbia);
        }
        return Err(ParseError::UnsupportedFormat);
    }

    let re = Regex::new(QR_PATTERN).map_err(|_| ParseError::UnsupportedFormat)?;
    if input.starts_with("t=") || re.is_match(input) {
        return Ok(Format::Russia);
    }

    Err(ParseError::UnsupportedFormat)
}

/// Получает чеки из любого поддерживаемого источника.
pub struct Parser<T> {
    transport: T,
    config: Config,
}

impl<T: Transport> Parser<T> {
    pub fn new(transport: T, config: Config) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Определяет формат и получает чек.
    pub fn parse(&self, input: &str) -> Result<Bill> {
        let input = input.trim();
        let format = detect(input)?;
        info!("Формат чека: {}", format);

        let bill = match format {
            Format::Serbia => serbia::parse(&self.transport, input, &self.config.serbia)?,
            Format::Russia => {
                let password = self
                    .config
                    .russia
                    .password
                    .as_deref()
                    .ok_or(ParseError::MissingPassword)?;
                russia::parse(&self.transport, input, password, &self.config.russia)?
            }
        };

        debug!("Чек {} от {}, позиций: {}", bill.id, bill.name, bill.items.len());

        Ok(bill)
    }
}
