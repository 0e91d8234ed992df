use chrono::NaiveDateTime;
use log::warn;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    error::{ParseError, Result},
    model::{Bill, BillId, Country, Currency, Item, Price},
};

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Код успешного ответа сервиса.
const CODE_OK: i64 = 1;

/// Расшифрованный ответ сервиса, до проверки кода.
#[derive(Debug, Deserialize)]
struct Envelope {
    code: i64,

    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Data {
    pub json: Receipt,

    #[serde(default)]
    pub html: Option<String>,
}

/// Фискальный документ.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    #[serde(default)]
    pub items: Vec<ReceiptItem>,

    pub date_time: String,

    #[serde(default)]
    pub retail_place: Option<String>,

    /// Название организации.
    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub kkt_reg_id: Option<String>,

    /// Итог в копейках.
    pub total_sum: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptItem {
    pub name: String,

    /// Цена за единицу в копейках.
    pub price: i64,

    pub quantity: Decimal,

    /// Стоимость позиции в копейках.
    pub sum: i64,

    #[serde(default)]
    pub nds: Option<i64>,
}

/// Разбирает расшифрованный ответ и проверяет код.
pub fn decode(plain: &[u8]) -> Result<Data> {
    let envelope: Envelope = serde_json::from_slice(plain)?;

    if envelope.code != CODE_OK {
        let message = match envelope.data {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        return Err(ParseError::Rejected {
            code: envelope.code,
            message,
        });
    }

    Ok(serde_json::from_value(envelope.data)?)
}

/// Переводит копейки в рубли.
fn minor_to_major(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

impl Data {
    /// Собирает чек из фискального документа.
    pub fn into_bill(self, link: &str) -> Result<Bill> {
        let receipt = self.json;
        let id = BillId::generate();

        let date = DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(&receipt.date_time, fmt).ok())
            .ok_or_else(|| {
                ParseError::MalformedDocument(format!("date \"{}\"", receipt.date_time))
            })?;

        let name = receipt
            .retail_place
            .filter(|p| !p.trim().is_empty())
            .or(receipt.user)
            .map(|n| n.trim().to_owned())
            .unwrap_or_default();

        let price = Price::new(minor_to_major(receipt.total_sum)).map_err(ParseError::Model)?;

        let tolerance = Decimal::new(1, 2);
        let items = receipt
            .items
            .into_iter()
            .map(|i| {
                let item = Item::new(
                    id,
                    i.name,
                    minor_to_major(i.sum),
                    minor_to_major(i.price),
                    i.quantity,
                );
                if !item.is_consistent(tolerance) {
                    warn!("Сумма позиции \"{}\" не совпадает с ценой за количество", item.name);
                }
                item
            })
            .collect();

        Ok(Bill {
            id,
            name,
            date,
            price,
            currency: Currency::Rub,
            country: Country::Russia,
            items,
            tag: None,
            link: link.to_owned(),
            bill_text: self.html.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "code": 1,
        "first": 0,
        "data": {
            "json": {
                "user": "ООО \"Аленка\"",
                "items": [
                    {"nds": 1, "sum": 18990, "name": "КОНФ ВЕС Батончики Рот Фронт", "price": 45990, "quantity": 0.413},
                    {"nds": 2, "sum": 8900, "name": "Молоко 3,2% 1л", "price": 8900, "quantity": 1}
                ],
                "dateTime": "2020-09-24T18:37:00",
                "retailPlace": "Магазин Аленка",
                "totalSum": 27890
            },
            "html": "<table></table>"
        }
    }"#;

    #[test]
    fn decode_and_assemble() {
        let data = decode(PAYLOAD.as_bytes()).unwrap();
        let bill = data.into_bill("t=...").unwrap();

        assert_eq!(bill.name, "Магазин Аленка");
        assert_eq!(bill.price.value(), Decimal::new(27890, 2));
        assert_eq!(bill.currency, Currency::Rub);
        assert_eq!(bill.country, Country::Russia);
        assert_eq!(bill.date.to_string(), "2020-09-24 18:37:00");
        assert_eq!(bill.bill_text, "<table></table>");

        assert_eq!(bill.items.len(), 2);
        assert_eq!(bill.items[0].price, Decimal::new(18990, 2));
        assert_eq!(bill.items[0].unit_price, Decimal::new(45990, 2));
        assert_eq!(bill.items[0].quantity, Decimal::new(413, 3));
        assert!(bill.items.iter().all(|i| i.bill_id == bill.id));
    }

    #[test]
    fn merchant_falls_back_to_user() {
        let payload = PAYLOAD.replace(r#""retailPlace": "Магазин Аленка","#, "");
        let bill = decode(payload.as_bytes()).unwrap().into_bill("").unwrap();

        assert_eq!(bill.name, "ООО \"Аленка\"");
    }

    #[test]
    fn date_without_seconds() {
        let payload = PAYLOAD.replace("2020-09-24T18:37:00", "2020-09-24T18:37");
        let bill = decode(payload.as_bytes()).unwrap().into_bill("").unwrap();

        assert_eq!(bill.date.to_string(), "2020-09-24 18:37:00");
    }

    #[test]
    fn rejected_code() {
        let err = decode(r#"{"code": 0, "data": "Чек некорректен"}"#.as_bytes()).unwrap_err();

        match err {
            ParseError::Rejected { code, message } => {
                assert_eq!(code, 0);
                assert_eq!(message, "Чек некорректен");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn kopecks_are_kept() {
        assert_eq!(minor_to_major(34999), Decimal::new(34999, 2));
        assert_eq!(minor_to_major(34999).to_string(), "349.99");
    }
}
