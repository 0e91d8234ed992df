//! Разбор российских чеков по строке из QR кода через proverkacheka.com.

pub mod crypto;
pub mod models;
pub mod qr;
pub mod request;
pub mod token;

use log::{debug, error};

use crate::{
    api::Transport,
    config::RussiaConfig,
    error::{ParseError, Result},
    model::Bill,
};

pub use qr::QrParams;

/// Получает чек по строке из QR кода.
///
/// `password` используется для расшифровки ответа сервиса.
pub fn parse<T: Transport>(
    transport: &T,
    qr_string: &str,
    password: &str,
    cfg: &RussiaConfig,
) -> Result<Bill> {
    let qr: QrParams = qr_string.trim().parse()?;
    debug!("Параметры QR: {}", qr);

    let token = token::compute(&qr, cfg.token_attempts)?;

    let req = request::build(&cfg.endpoint, &qr, &token, cfg.timeout());
    let resp = transport.send(req)?;

    if !resp.is_ok() {
        error!("Сервис проверки чеков вернул статус {}", resp.status);
        return Err(ParseError::Status {
            status: resp.status,
            url: cfg.endpoint.clone(),
        });
    }

    let key = crypto::password_key(password);
    let plain = crypto::decrypt(&resp.body, &key).map_err(|e| {
        error!("Не удалось расшифровать ответ: {}", e);
        e
    })?;

    let data = models::decode(&plain)?;

    data.into_bill(qr_string.trim())
}
