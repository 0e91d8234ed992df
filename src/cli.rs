use inquire::{validator::Validation, Password, PasswordDisplayMode};

/// Запрашивает пароль к сервису проверки российских чеков.
pub fn ask_password() -> anyhow::Result<String> {
    let password = Password::new("Пароль для расшифровки ответа proverkacheka.com")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_validator(|s: &str| {
            if s.is_empty() {
                return Ok(Validation::Invalid("required".into()));
            };
            Ok(Validation::Valid)
        })
        .prompt()?;

    Ok(password)
}
