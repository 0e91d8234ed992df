//! Расшифровка ответа сервиса проверки чеков.
//!
//! Ответ зашифрован AES-256-GCM. Ключ это SHA-256 от пароля, последние
//! 12 байт ответа это nonce, всё что до них это шифротекст вместе с тегом.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use sha2::{Digest, Sha256};

/// Длина nonce в байтах.
pub const NONCE_LENGTH: usize = 12;

/// Длина тега аутентификации GCM в байтах.
const TAG_LENGTH: usize = 16;

/// Выводит ключ из пароля.
pub fn password_key(password: &str) -> [u8; 32] {
    Sha256::digest(password.as_bytes()).into()
}

/// Расшифровывает ответ сервиса.
pub fn decrypt(blob: &[u8], key: &[u8; 32]) -> CryptoResult {
    if blob.len() < NONCE_LENGTH + TAG_LENGTH {
        return Err(CryptoError::TooShort(blob.len()));
    }

    let (data, iv) = blob.split_at(blob.len() - NONCE_LENGTH);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
    cipher
        .decrypt(Nonce::from_slice(iv), data)
        .map_err(|_| CryptoError::Authentication)
}

pub type CryptoResult = std::result::Result<Vec<u8>, CryptoError>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("ciphertext too short: {0} bytes")]
    TooShort(usize),

    #[error("authentication failed, wrong password or corrupted response")]
    Authentication,
}
