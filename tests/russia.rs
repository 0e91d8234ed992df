mod common;

use billdb::{
    api::Method,
    config::{Config, RussiaConfig},
    model::{Country, Currency},
    parser::{russia, Parser},
    ParseError,
};
use common::{read_data, ScriptedTransport};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Fixture {
    password: String,
    #[serde(default)]
    qr_data: String,
    #[serde(default)]
    token: String,
    encrypted: String,
}

fn fixture(name: &str) -> (Fixture, Vec<u8>) {
    let fixture: Fixture = serde_json::from_str(&read_data(name)).unwrap();
    let blob = hex::decode(&fixture.encrypted).unwrap();
    (fixture, blob)
}

#[test]
fn fetches_and_decrypts_bill() {
    let (fx, blob) = fixture("russia_receipt.json");
    let transport = ScriptedTransport::new().respond(200, blob);
    let cfg = RussiaConfig::default();

    let bill = russia::parse(&transport, &fx.qr_data, &fx.password, &cfg).unwrap();

    assert_eq!(bill.name, "Магазин Аленка");
    assert_eq!(bill.price.value(), Decimal::new(34900, 2));
    assert_eq!(bill.currency, Currency::Rub);
    assert_eq!(bill.country, Country::Russia);
    assert_eq!(bill.date.to_string(), "2020-09-24 18:37:00");
    assert_eq!(bill.link, fx.qr_data);
    assert_eq!(bill.bill_text, "<table><tr><td>Магазин Аленка</td></tr></table>");

    assert_eq!(bill.items.len(), 3);
    assert_eq!(bill.items[0].name, "КОНФ ВЕС Батончики Рот Фронт");
    assert_eq!(bill.items[0].quantity, Decimal::new(413, 3));
    assert_eq!(bill.items[2].price, Decimal::new(7010, 2));
    assert_eq!(bill.items[2].unit_price, Decimal::new(3505, 2));
    assert!(bill.items.iter().all(|i| i.bill_id == bill.id));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].url, cfg.endpoint);
    assert_eq!(
        requests[0].body.field("token"),
        Some(format!("0.{}", fx.token).as_str())
    );
    assert_eq!(requests[0].body.field("s"), Some("349"));
    assert_eq!(requests[0].body.field("t"), Some("24.09.2020 18:37"));
}

#[test]
fn wrong_password_fails() {
    let (fx, blob) = fixture("russia_receipt.json");
    let transport = ScriptedTransport::new().respond(200, blob);

    let err = russia::parse(&transport, &fx.qr_data, "wrong", &RussiaConfig::default())
        .unwrap_err();

    assert!(matches!(err, ParseError::Crypto(_)));
}

#[test]
fn rejected_receipt() {
    let (fx, blob) = fixture("russia_rejected.json");
    let (receipt, _) = fixture("russia_receipt.json");
    let transport = ScriptedTransport::new().respond(200, blob);

    let err = russia::parse(&transport, &receipt.qr_data, &fx.password, &RussiaConfig::default())
        .unwrap_err();

    match err {
        ParseError::Rejected { code, message } => {
            assert_eq!(code, 0);
            assert_eq!(message, "Чек некорректен");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn non_200_status() {
    let (fx, _) = fixture("russia_receipt.json");
    let transport = ScriptedTransport::new().respond(502, "Bad Gateway");

    let err = russia::parse(&transport, &fx.qr_data, &fx.password, &RussiaConfig::default())
        .unwrap_err();

    assert!(matches!(err, ParseError::Status { status: 502, .. }));
}

#[test]
fn malformed_qr_does_not_hit_network() {
    let transport = ScriptedTransport::new();

    let err = russia::parse(&transport, "t=20200924T1837&s=349.00", "secret", &RussiaConfig::default())
        .unwrap_err();

    assert!(matches!(err, ParseError::Qr(_)));
    assert!(transport.requests().is_empty());
}

#[test]
fn parser_requires_password() {
    let (fx, blob) = fixture("russia_receipt.json");
    let transport = ScriptedTransport::new().respond(200, blob);
    let parser = Parser::new(&transport, Config::default());

    let err = parser.parse(&fx.qr_data).unwrap_err();

    assert!(matches!(err, ParseError::MissingPassword));
    assert!(transport.requests().is_empty());
}

#[test]
fn parser_dispatches_qr_string() {
    let (fx, blob) = fixture("russia_receipt.json");
    let transport = ScriptedTransport::new().respond(200, blob);

    let mut cfg = Config::default();
    cfg.russia.password = Some(fx.password.clone());
    let parser = Parser::new(&transport, cfg);

    let bill = parser.parse(&format!("  {}\n", fx.qr_data)).unwrap();

    assert_eq!(bill.country, Country::Russia);
    assert_eq!(bill.items.len(), 3);
}

#[test]
fn parser_rejects_unknown_input() {
    let transport = ScriptedTransport::new();
    let parser = Parser::new(&transport, Config::default());

    assert!(matches!(
        parser.parse("https://example.com/receipt/1"),
        Err(ParseError::UnsupportedFormat)
    ));
}
