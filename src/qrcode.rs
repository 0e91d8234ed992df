//! Чтение QR кода с изображения через утилиту `zbarimg`.

use std::{
    io,
    path::Path,
    process::{Command, ExitStatus},
};

use log::debug;

const ZBARIMG: &str = "zbarimg";

/// Префикс строки с распознанным QR кодом.
const QR_PREFIX: &str = "QR-Code:";

/// Код выхода zbarimg, когда на изображении не нашлось ни одного кода.
const NOT_DETECTED_CODE: i32 = 4;

/// Распознаёт QR код на изображении и возвращает его содержимое.
pub fn decode_image(path: &Path) -> Result<String, QrImageError> {
    if !path.is_file() {
        return Err(QrImageError::NotFound(path.display().to_string()));
    }

    debug!("Запускаем {} для {:?}", ZBARIMG, path);
    let output = Command::new(ZBARIMG)
        .arg("--quiet")
        .arg(path)
        .output()
        .map_err(QrImageError::Spawn)?;

    if output.status.code() == Some(NOT_DETECTED_CODE) {
        return Err(QrImageError::NotDetected);
    }

    if !output.status.success() {
        return Err(QrImageError::Failed(output.status));
    }

    parse_output(&String::from_utf8_lossy(&output.stdout))
}

/// Достаёт содержимое первого QR кода из вывода zbarimg.
pub fn parse_output(output: &str) -> Result<String, QrImageError> {
    output
        .lines()
        .find_map(|line| line.strip_prefix(QR_PREFIX))
        .map(|data| data.trim().to_owned())
        .filter(|data| !data.is_empty())
        .ok_or(QrImageError::NotDecoded)
}

#[derive(Debug, thiserror::Error)]
pub enum QrImageError {
    #[error("image {0} not found")]
    NotFound(String),

    #[error("qr code was not detected")]
    NotDetected,

    #[error("qr code was not decoded")]
    NotDecoded,

    #[error("run zbarimg")]
    Spawn(#[source] io::Error),

    #[error("zbarimg failed with {0}")]
    Failed(ExitStatus),
}
