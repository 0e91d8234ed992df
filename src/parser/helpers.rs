/// Убирает пробельные символы по краям.
pub fn clean_whitespace(s: &str) -> &str {
    s.trim_matches(|c| matches!(c, ' ' | '\r' | '\n' | '\t'))
}

/// Приводит сумму в сербском формате (1.234,56) к виду 1234.56.
///
/// Строка без запятой считается уже нормализованной и возвращается как есть.
pub fn clean_price(s: &str) -> String {
    let s = clean_whitespace(s);
    if !s.contains(',') {
        return s.to_owned();
    }

    s.replace('.', "").replace(',', ".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_price_converts_serbian_format() {
        assert_eq!(clean_price("1.000,00"), "1000.00");
        assert_eq!(clean_price("1.000.000,00"), "1000000.00");
        assert_eq!(clean_price("89,99"), "89.99");
        assert_eq!(clean_price("\n   5.462,01  "), "5462.01");
    }

    #[test]
    fn clean_price_is_idempotent() {
        for s in ["1.000,00", "1.000.000,00", "0,50", "1000.00"] {
            let once = clean_price(s);
            assert_eq!(clean_price(&once), once);
        }
    }

    #[test]
    fn clean_whitespace_trims_only_edges() {
        assert_eq!(clean_whitespace("\r\n\t 1002298-177 - Maxi \n"), "1002298-177 - Maxi");
        assert_eq!(clean_whitespace(""), "");
    }
}
