//! Разбор сербских чеков с сайта suf.purs.gov.rs.
//!
//! Страница чека содержит основные поля и одноразовый токен, с которым
//! запрашиваются позиции. Если сервис отвечает `Success: false`, токен
//! считается протухшим: страница запрашивается заново, уже разобранные поля
//! переиспользуются.

mod page;

use std::thread;

use log::{debug, error, info, warn};
use rust_decimal::Decimal;
use serde::Deserialize;

pub use page::{Page, PageFields};

use crate::{
    api::{Body, Request, Transport},
    config::SerbiaConfig,
    error::{ParseError, Result},
    model::{Bill, BillId, Country, Currency, Item},
};

/// Хост сайта проверки сербских чеков.
pub const HOST: &str = "suf.purs.gov.rs";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemsResponse {
    pub success: bool,

    #[serde(default)]
    pub items: Vec<ItemJson>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemJson {
    #[serde(rename = "GTIN", default)]
    pub gtin: Option<String>,
    pub name: String,
    pub quantity: Decimal,
    pub total: Decimal,
    pub unit_price: Decimal,
    #[serde(default)]
    pub label: Option<String>,
}

/// Состояние разбора одного чека между попытками.
struct Attempts {
    attempt: u32,
    parsed: Option<(BillId, PageFields)>,
}

/// Результат одной попытки получить позиции.
enum ItemsOutcome {
    Fetched(Vec<ItemJson>),

    /// Сервис отверг токен, нужна новая страница.
    StaleToken,
}

/// Получает чек по ссылке на страницу проверки.
pub fn parse<T: Transport>(transport: &T, url: &str, cfg: &SerbiaConfig) -> Result<Bill> {
    let mut state = Attempts {
        attempt: 0,
        parsed: None,
    };

    loop {
        state.attempt += 1;
        let last = state.attempt >= cfg.max_attempts;

        if state.attempt > 1 {
            info!("Попытка {}: запрашиваем страницу заново за новым токеном", state.attempt);
            thread::sleep(cfg.backoff());
        }

        let html = match fetch_page(transport, url, cfg) {
            Ok(html) => html,
            Err(e) if !last => {
                warn!("Попытка {}: не удалось загрузить страницу: {}", state.attempt, e);
                continue;
            }
            Err(e) => {
                error!("Не удалось загрузить страницу {}: {}", url, e);
                return Err(e);
            }
        };

        let page = Page::parse(&html);

        // Поля чека разбираем только с первой успешно загруженной страницы.
        let (bill_id, fields) = match state.parsed.take() {
            Some(parsed) => parsed,
            None => {
                let fields = page.fields()?;
                debug!("Поля чека: {:?}", fields);
                (BillId::generate(), fields)
            }
        };

        let token = page.token()?;

        match fetch_items(transport, &fields.invoice_number, &token, cfg)? {
            ItemsOutcome::Fetched(items) => {
                return Ok(build_bill(bill_id, fields, items, url));
            }
            ItemsOutcome::StaleToken if !last => {
                info!("Попытка {}: токен отклонён, повторяем", state.attempt);
                state.parsed = Some((bill_id, fields));
            }
            ItemsOutcome::StaleToken => {
                error!("Не удалось получить позиции за {} попыток", state.attempt);
                return Err(ParseError::RetriesExhausted(state.attempt));
            }
        }
    }
}

fn fetch_page<T: Transport>(transport: &T, url: &str, cfg: &SerbiaConfig) -> Result<String> {
    let req = Request::get(url, cfg.timeout()).header("Referer", url);

    let resp = transport.send(req)?;

    if !resp.is_ok() {
        return Err(ParseError::Status {
            status: resp.status,
            url: url.to_owned(),
        });
    }

    Ok(resp.text())
}

fn fetch_items<T: Transport>(
    transport: &T,
    invoice_number: &str,
    token: &str,
    cfg: &SerbiaConfig,
) -> Result<ItemsOutcome> {
    let form = Body::Form(vec![
        ("invoiceNumber", invoice_number.to_owned()),
        ("token", token.to_owned()),
    ]);
    let req = Request::post(&cfg.items_url, form, cfg.timeout());

    let resp = transport.send(req).map_err(|e| {
        error!("Ошибка запроса позиций: {}", e);
        e
    })?;

    if !resp.is_ok() {
        error!("Запрос позиций вернул статус {}", resp.status);
        return Err(ParseError::Status {
            status: resp.status,
            url: cfg.items_url.clone(),
        });
    }

    let data: ItemsResponse = serde_json::from_slice(&resp.body)?;

    if !data.success {
        warn!(
            "Сервис не отдал позиции для {} с токеном {}",
            invoice_number, token
        );
        return Ok(ItemsOutcome::StaleToken);
    }

    Ok(ItemsOutcome::Fetched(data.items))
}

fn build_bill(bill_id: BillId, fields: PageFields, items: Vec<ItemJson>, url: &str) -> Bill {
    let tolerance = Decimal::new(1, 2);

    let items = items
        .into_iter()
        .map(|i| Item::new(bill_id, i.name, i.total, i.unit_price, i.quantity))
        .inspect(|item| {
            if !item.is_consistent(tolerance) {
                warn!(
                    "Сумма позиции \"{}\" не совпадает с ценой за количество: {} != {} * {}",
                    item.name, item.price, item.unit_price, item.quantity
                );
            }
        })
        .collect();

    Bill {
        id: bill_id,
        name: fields.name,
        date: fields.date,
        price: fields.price,
        currency: Currency::Rsd,
        country: Country::Serbia,
        items,
        tag: None,
        link: url.to_owned(),
        bill_text: fields.bill_text,
    }
}
