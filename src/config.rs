use std::{env, path::PathBuf, time::Duration};

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

/// Переменная окружения с паролем к сервису проверки российских чеков.
pub const PASSWORD_ENV: &str = "BILLDB_RUSSIA_PASSWORD";

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Настройки разбора сербских чеков.
    pub serbia: SerbiaConfig,

    /// Настройки разбора российских чеков.
    pub russia: RussiaConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SerbiaConfig {
    /// Адрес, по которому запрашиваются позиции чека.
    pub items_url: String,

    /// Таймаут одного запроса в секундах.
    pub timeout_secs: u64,

    /// Сколько раз пытаться получить позиции со свежим токеном.
    pub max_attempts: u32,

    /// Пауза между попытками в миллисекундах.
    pub backoff_ms: u64,
}

impl SerbiaConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

impl Default for SerbiaConfig {
    fn default() -> Self {
        Self {
            items_url: "https://suf.purs.gov.rs/specifications".to_owned(),
            timeout_secs: 15,
            max_attempts: 3,
            backoff_ms: 1000,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RussiaConfig {
    /// Адрес API сервиса проверки чеков.
    pub endpoint: String,

    /// Таймаут запроса в секундах.
    pub timeout_secs: u64,

    /// Сколько кандидатов перебирать при поиске токена.
    pub token_attempts: u32,

    /// Пароль, из которого выводится ключ для расшифровки ответа.
    pub password: Option<String>,
}

impl RussiaConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for RussiaConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://proverkacheka.com/api/v1/check/get".to_owned(),
            timeout_secs: 30,
            token_attempts: 1000,
            password: None,
        }
    }
}

/// Загружает конфигурацию.
pub fn load(path: PathBuf) -> anyhow::Result<Config> {
    let mut cfg: Config = confy::load_path(path)?;

    normalize(&mut cfg, env::var(PASSWORD_ENV).ok())?;

    Ok(cfg)
}

/// Применяет переопределения из окружения и проверяет значения.
pub fn normalize(cfg: &mut Config, env_password: Option<String>) -> anyhow::Result<()> {
    if let Some(password) = env_password.filter(|p| !p.is_empty()) {
        cfg.russia.password = Some(password);
    }

    // Пустой пароль в файле равносилен его отсутствию.
    if matches!(&cfg.russia.password, Some(p) if p.is_empty()) {
        cfg.russia.password = None;
    }

    if cfg.serbia.max_attempts == 0 {
        return Err(anyhow!("serbia.max_attempts should be at least 1"));
    }

    if cfg.russia.token_attempts == 0 {
        return Err(anyhow!("russia.token_attempts should be at least 1"));
    }

    Ok(())
}
