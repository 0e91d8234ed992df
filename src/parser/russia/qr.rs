use std::{fmt::Display, str::FromStr};

use chrono::NaiveDateTime;

/// Минимальное количество параметров в QR строке.
const MIN_PARAMETERS: usize = 6;

const TIME_FORMATS: [&str; 2] = ["%Y%m%dT%H%M%S", "%Y%m%dT%H%M"];

/// Параметры чека из QR кода.
///
/// Пример строки: `t=20200924T1837&s=349.00&fn=9289000100408074&i=2795&fp=3826571101&n=1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrParams {
    /// Номер фискального накопителя (ФН).
    pub fn_number: String,

    /// Номер фискального документа (ФД).
    pub fd: String,

    /// Фискальный признак документа (ФП).
    pub fp: String,

    /// Признак расчёта.
    pub n: String,

    /// Сумма, без дробной части.
    pub sum: String,

    /// Время покупки.
    pub time: NaiveDateTime,
}

impl QrParams {
    /// Время покупки в формате, который ожидает сервис проверки.
    pub fn time_string(&self) -> String {
        self.time.format("%d.%m.%Y %H:%M").to_string()
    }
}

impl Display for QrParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Fn: {}, Fd: {}, Fp: {}, N: {}, Sum: {}, Time: {}",
            self.fn_number, self.fd, self.fp, self.n, self.sum, self.time
        )
    }
}

#[derive(Default)]
struct Builder {
    fn_number: Option<String>,
    fd: Option<String>,
    fp: Option<String>,
    n: Option<String>,
    sum: Option<String>,
    time: Option<NaiveDateTime>,
}

impl Builder {
    fn set(&mut self, key: &str, value: &str) -> Result<(), QrError> {
        match key {
            "fn" => self.fn_number = Some(value.to_owned()),
            "i" => self.fd = Some(value.to_owned()),
            "fp" => self.fp = Some(value.to_owned()),
            "n" => self.n = Some(value.to_owned()),
            // Копейки отбрасываются, сервис принимает целую часть.
            "s" => self.sum = value.split('.').next().map(str::to_owned),
            "t" => self.time = Some(parse_time(value)?),
            _ => return Err(QrError::UnknownKey(key.to_owned())),
        }

        Ok(())
    }

    fn build(self) -> Result<QrParams, QrError> {
        Ok(QrParams {
            fn_number: self.fn_number.ok_or(QrError::MissingKey("fn"))?,
            fd: self.fd.ok_or(QrError::MissingKey("i"))?,
            fp: self.fp.ok_or(QrError::MissingKey("fp"))?,
            n: self.n.ok_or(QrError::MissingKey("n"))?,
            sum: self.sum.ok_or(QrError::MissingKey("s"))?,
            time: self.time.ok_or(QrError::MissingKey("t"))?,
        })
    }
}

fn parse_time(value: &str) -> Result<NaiveDateTime, QrError> {
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| QrError::Time(value.to_owned()))
}

impl FromStr for QrParams {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parameters: Vec<&str> = s.trim().split('&').collect();
        if parameters.len() < MIN_PARAMETERS {
            return Err(QrError::TooFewParameters(parameters.len()));
        }

        let mut builder = Builder::default();
        for parameter in parameters {
            // Сегменты без '=' пропускаем.
            if let Some((key, value)) = parameter.split_once('=') {
                builder.set(key, value)?;
            }
        }

        builder.build()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QrError {
    #[error("expected at least 6 parameters, got {0}")]
    TooFewParameters(usize),

    #[error("unknown key \"{0}\"")]
    UnknownKey(String),

    #[error("missing key \"{0}\"")]
    MissingKey(&'static str),

    #[error("can't parse time \"{0}\"")]
    Time(String),
}
