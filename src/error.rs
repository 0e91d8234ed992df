//! Ошибки разбора чеков.

use crate::{
    api::TransportError,
    parser::russia::{crypto::CryptoError, qr::QrError},
};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unsupported format")]
    UnsupportedFormat,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("malformed qr string")]
    Qr(#[from] QrError),

    #[error("decrypt response")]
    Crypto(#[from] CryptoError),

    #[error("failed to fetch items after {0} attempts")]
    RetriesExhausted(u32),

    #[error("token not found after {0} candidates")]
    TokenNotFound(u32),

    #[error("verification service rejected receipt with code {code}: {message}")]
    Rejected { code: i64, message: String },

    #[error("decode json")]
    Json(#[from] serde_json::Error),

    #[error("password for the russian verification service is not set")]
    MissingPassword,

    #[error("invalid bill: {0}")]
    Model(anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ParseError>;
