use std::time::Duration;

use super::{qr::QrParams, token::QR_MARKER};
use crate::api::{Body, Request};

const ORIGIN: &str = "https://proverkacheka.com";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; rv:126.0) Gecko/20100101 Firefox/126.0";

/// Поля multipart формы запроса чека.
pub fn form_fields(qr: &QrParams, token: &str) -> Vec<(&'static str, String)> {
    vec![
        ("fn", qr.fn_number.clone()),
        ("fd", qr.fd.clone()),
        ("fp", qr.fp.clone()),
        ("n", qr.n.clone()),
        ("s", qr.sum.clone()),
        ("t", qr.time_string()),
        ("qr", QR_MARKER.to_owned()),
        ("token", format!("0.{}", token)),
    ]
}

/// Собирает запрос к сервису проверки чеков.
pub fn build(endpoint: &str, qr: &QrParams, token: &str, timeout: Duration) -> Request {
    Request::post(endpoint, Body::Multipart(form_fields(qr, token)), timeout)
        .header("Origin", ORIGIN)
        .header("Referer", format!("{}/", ORIGIN))
        .header("User-Agent", USER_AGENT)
        .header("DNT", "1")
        .header("Cookie", "ENGID=1.1")
}
