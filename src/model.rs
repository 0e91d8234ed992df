use std::str::FromStr;

use crate::newtype;
use anyhow::anyhow;
use chrono::NaiveDateTime;
use enum_iterator::{all, Sequence};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Чек.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Bill {
    /// Уникальный идентификатор чека, упорядоченный по времени создания.
    pub id: BillId,

    /// Название продавца.
    pub name: String,

    /// Дата и время покупки в локальном времени продавца.
    pub date: NaiveDateTime,

    /// Итоговая сумма.
    pub price: Price,

    pub currency: Currency,

    pub country: Country,

    /// Позиции чека. Может быть пустым.
    pub items: Vec<Item>,

    /// Произвольные метки, выставляются пользователем.
    pub tag: Option<Tag>,

    /// Ссылка или QR строка, из которой был получен чек.
    pub link: String,

    /// Текст чека как есть. Формат зависит от источника.
    pub bill_text: String,
}

impl Bill {
    /// Добавляет позицию в чек и привязывает её к нему.
    pub fn add_item(&mut self, mut item: Item) {
        item.bill_id = self.id;
        self.items.push(item);
    }

    /// Возвращает дату покупки в виде YYYY-MM-DD.
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Позиция чека.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,

    /// Чек, которому принадлежит позиция.
    pub bill_id: BillId,

    pub name: String,

    /// Стоимость всей позиции.
    pub price: Decimal,

    /// Цена за единицу.
    pub unit_price: Decimal,

    /// Количество. Для весовых товаров дробное.
    pub quantity: Decimal,
}

impl Item {
    /// Создаёт позицию с новым идентификатором.
    pub fn new(
        bill_id: BillId,
        name: String,
        price: Decimal,
        unit_price: Decimal,
        quantity: Decimal,
    ) -> Self {
        Self {
            id: ItemId::generate(),
            bill_id,
            name,
            price,
            unit_price,
            quantity,
        }
    }

    /// Проверяет что стоимость позиции совпадает с ценой, умноженной на
    /// количество, с точностью до `tolerance`.
    pub fn is_consistent(&self, tolerance: Decimal) -> bool {
        (self.unit_price * self.quantity - self.price).abs() <= tolerance
    }
}

newtype!(BillId, Uuid, "Uuid");

impl BillId {
    pub fn generate() -> Self {
        Self::new(Uuid::now_v7())
    }
}

newtype!(ItemId, Uuid, "Uuid");

impl ItemId {
    pub fn generate() -> Self {
        Self::new(Uuid::now_v7())
    }
}

newtype!(Price, Decimal, "Decimal", price_validate);

fn price_validate(value: &Decimal) -> anyhow::Result<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(anyhow!("shouldn't be negative, got {}", value));
    }

    Ok(())
}

newtype!(Tag, String, "String", tag_validate);

const TAG_PATTERN: &str = r"^[\p{Ll}\d]+(,[\p{Ll}\d]+)*,?$";

fn tag_validate(value: &str) -> anyhow::Result<()> {
    let re = Regex::new(TAG_PATTERN)?;
    if !re.is_match(value) {
        return Err(anyhow!(
            "should be lowercase words separated by commas, got \"{}\"",
            value
        ));
    }

    Ok(())
}

impl Tag {
    /// Разбирает метку, пустая строка означает отсутствие метки.
    pub fn parse_optional(value: &str) -> anyhow::Result<Option<Self>> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }

        Self::new(value).map(Some)
    }

    /// Возвращает список отдельных меток.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split(',').filter(|w| !w.is_empty())
    }
}

/// Валюта чека.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    std::hash::Hash,
    derive_more::Display,
    Sequence,
)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[display(fmt = "eur")]
    Eur,
    #[display(fmt = "rsd")]
    Rsd,
    #[display(fmt = "try")]
    Try,
    #[display(fmt = "rub")]
    Rub,
    #[display(fmt = "usd")]
    Usd,
}

impl Currency {
    /// Все поддерживаемые валюты в порядке объявления.
    pub fn available() -> Vec<Currency> {
        all::<Currency>().collect()
    }
}

impl FromStr for Currency {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_lowercase();
        all::<Currency>()
            .find(|c| c.to_string() == value)
            .ok_or(UnknownVariantError::Currency(s.to_owned()))
    }
}

/// Страна, в которой был выписан чек.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    std::hash::Hash,
    derive_more::Display,
    Sequence,
)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    #[display(fmt = "serbia")]
    Serbia,
    #[display(fmt = "turkey")]
    #[serde(alias = "turkiye")]
    Turkey,
    #[display(fmt = "russia")]
    Russia,
}

impl Country {
    /// Все поддерживаемые страны в порядке объявления.
    pub fn available() -> Vec<Country> {
        all::<Country>().collect()
    }
}

impl FromStr for Country {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "serbia" => Ok(Country::Serbia),
            "turkey" | "turkiye" => Ok(Country::Turkey),
            "russia" => Ok(Country::Russia),
            _ => Err(UnknownVariantError::Country(s.to_owned())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UnknownVariantError {
    #[error("currency \"{0}\" not found")]
    Currency(String),

    #[error("country \"{0}\" not found")]
    Country(String),
}
