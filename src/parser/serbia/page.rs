use std::str::FromStr;

use chrono::NaiveDateTime;
use log::error;
use regex::Regex;
use rust_decimal::Decimal;
use scraper::{Html, Selector};

use crate::{
    error::{ParseError, Result},
    model::Price,
    parser::helpers::{clean_price, clean_whitespace},
};

const INVOICE_SELECTOR: &str = "#invoiceNumberLabel";
const PRICE_SELECTOR: &str = "#totalAmountLabel";
const BUY_DATE_SELECTOR: &str = "#sdcDateTimeLabel";
const BILL_TEXT_SELECTOR: &str = "#collapse3 > div > pre";
const NAME_SELECTOR: &str = "#shopFullNameLabel";

const TOKEN_PATTERN: &str = r"viewModel\.Token\('([^']*)'\);";
const DATE_FORMAT: &str = "%d.%m.%Y. %H:%M:%S";

/// Страница проверки сербского чека.
pub struct Page {
    document: Html,
}

/// Поля чека, извлечённые со страницы.
#[derive(Debug, Clone, PartialEq)]
pub struct PageFields {
    pub invoice_number: String,
    pub price: Price,
    pub date: NaiveDateTime,
    pub bill_text: String,
    pub name: String,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Извлекает и нормализует поля чека.
    pub fn fields(&self) -> Result<PageFields> {
        let invoice_number = clean_whitespace(&self.text(INVOICE_SELECTOR)?).to_owned();
        let name = clean_whitespace(&self.text(NAME_SELECTOR)?).to_owned();
        let bill_text = self.text(BILL_TEXT_SELECTOR)?;

        let raw_date = self.text(BUY_DATE_SELECTOR)?;
        let date = parse_date(clean_whitespace(&raw_date))?;

        let raw_price = self.text(PRICE_SELECTOR)?;
        let price = parse_price(&raw_price)?;

        Ok(PageFields {
            invoice_number,
            price,
            date,
            bill_text,
            name,
        })
    }

    /// Ищет токен авторизации во встроенных скриптах страницы.
    pub fn token(&self) -> Result<String> {
        let re = Regex::new(TOKEN_PATTERN).map_err(|e| ParseError::MalformedDocument(e.to_string()))?;
        let scripts = selector("script")?;

        self.document
            .select(&scripts)
            .find_map(|script| {
                let text = script.text().collect::<String>();
                re.captures(&text).map(|c| c[1].to_owned())
            })
            .ok_or_else(|| {
                error!("Не нашли токен на странице");
                ParseError::MalformedDocument("token not found in document".to_owned())
            })
    }

    fn text(&self, css: &str) -> Result<String> {
        let sel = selector(css)?;

        self.document
            .select(&sel)
            .next()
            .map(|el| el.text().collect::<String>())
            .ok_or_else(|| {
                error!("Не нашли узел {} на странице", css);
                ParseError::MalformedDocument(format!("node {} not found", css))
            })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| ParseError::MalformedDocument(format!("invalid selector {}: {}", css, e)))
}

fn parse_date(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DATE_FORMAT).map_err(|e| {
        error!("Не смогли разобрать дату \"{}\": {}", s, e);
        ParseError::MalformedDocument(format!("date \"{}\": {}", s, e))
    })
}

fn parse_price(s: &str) -> Result<Price> {
    let cleaned = clean_price(s);

    let value = Decimal::from_str(&cleaned).map_err(|e| {
        error!("Не смогли разобрать сумму \"{}\": {}", cleaned, e);
        ParseError::MalformedDocument(format!("price \"{}\": {}", cleaned, e))
    })?;

    Price::new(value).map_err(ParseError::Model)
}
