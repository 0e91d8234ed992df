//! Получение фискальных чеков из сербской налоговой и российского
//! сервиса проверки чеков.

mod macros;

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod qrcode;

pub use error::{ParseError, Result};
pub use parser::{detect, Format, Parser};
