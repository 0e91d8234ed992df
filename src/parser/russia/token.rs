//! Токен для запроса к сервису проверки чеков.
//!
//! Сервис требует число, для которого MD5 от параметров чека с этим числом
//! на конце содержит больше четырёх нулей в hex записи.

use log::debug;
use md5::{Digest, Md5};

use super::qr::QrParams;
use crate::error::{ParseError, Result};

/// Значение поля `qr` формы, оно же участвует в хеше.
pub const QR_MARKER: &str = "0";

/// Сколько нулей в хеше нужно превзойти.
const ZEROS_THRESHOLD: usize = 4;

/// Перебирает кандидатов `0..attempts` и возвращает первого подходящего.
pub fn compute(qr: &QrParams, attempts: u32) -> Result<String> {
    let data = format!(
        "{}{}{}{}{}{}{}",
        qr.fn_number,
        qr.fd,
        qr.fp,
        qr.n,
        qr.sum,
        qr.time_string(),
        QR_MARKER
    );

    for candidate in 0..attempts {
        let candidate = candidate.to_string();
        let digest = Md5::new()
            .chain_update(data.as_bytes())
            .chain_update(candidate.as_bytes())
            .finalize();

        let hex = hex::encode(digest);
        if zeros(&hex) > ZEROS_THRESHOLD {
            debug!("Токен {} найден, хеш {}", candidate, hex);
            return Ok(candidate);
        }
    }

    Err(ParseError::TokenNotFound(attempts))
}

fn zeros(hex: &str) -> usize {
    hex.bytes().filter(|b| *b == b'0').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qr(fp: &str) -> QrParams {
        format!("t=20200924T1837&s=349.00&fn=9289000100408074&i=2795&fp={}&n=1", fp)
            .parse()
            .unwrap()
    }

    #[test]
    fn golden_tokens() {
        assert_eq!(compute(&qr("3826571101"), 1000).unwrap(), "7");
        assert_eq!(compute(&qr("1273019065"), 1000).unwrap(), "19");
        assert_eq!(compute(&qr("3826571234"), 1000).unwrap(), "0");
    }

    #[test]
    fn deterministic() {
        let params = qr("3826571101");
        assert_eq!(compute(&params, 1000).unwrap(), compute(&params, 1000).unwrap());
    }

    #[test]
    fn exhausted_search_is_an_error() {
        assert!(matches!(
            compute(&qr("3826571101"), 5),
            Err(ParseError::TokenNotFound(5))
        ));
    }

    #[test]
    fn counts_zeros() {
        assert_eq!(zeros("ac9d36324ccb0200808b496aff4631f0"), 5);
        assert_eq!(zeros("ffff"), 0);
    }
}
