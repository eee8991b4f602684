//! Symbol normalization for fixed-width local-market codes.

/// Normalize a ticker symbol before lookup or storage.
///
/// Purely-numeric symbols shorter than 6 characters are left-zero-padded
/// to 6 digits (local-market code convention, e.g. "5930" -> "005930").
/// Everything else passes through trimmed but otherwise untouched.
pub fn normalize_symbol(raw: &str) -> String {
    let s = raw.trim();
    if !s.is_empty() && s.len() < 6 && s.bytes().all(|b| b.is_ascii_digit()) {
        format!("{s:0>6}")
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pads_short_numeric_codes() {
        assert_eq!(normalize_symbol("5930"), "005930");
        assert_eq!(normalize_symbol("35720"), "035720");
        assert_eq!(normalize_symbol("1"), "000001");
    }

    #[test]
    fn test_leaves_full_width_and_alpha_symbols_alone() {
        assert_eq!(normalize_symbol("005930"), "005930");
        assert_eq!(normalize_symbol("1234567"), "1234567");
        assert_eq!(normalize_symbol("AAPL"), "AAPL");
        assert_eq!(normalize_symbol("BTC-KRW"), "BTC-KRW");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(normalize_symbol(" 5930 "), "005930");
        assert_eq!(normalize_symbol(""), "");
    }
}
