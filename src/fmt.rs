use crate::error::{ContasError, Result};

/// Format a float as Brazilian Real: R$ 1.234,56
pub fn money(val: f64) -> String {
    let body = decimal(val.abs());
    if val < 0.0 && body != "0,00" {
        format!("-R$ {body}")
    } else {
        format!("R$ {body}")
    }
}

/// Two-decimal pt-BR number without the currency symbol: 1.234,56
pub fn decimal(val: f64) -> String {
    let negative = val < 0.0;
    let fixed = format!("{:.2}", val.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let grouped = group_thousands(int_part);
    if negative && fixed != "0.00" {
        format!("-{grouped},{dec_part}")
    } else {
        format!("{grouped},{dec_part}")
    }
}

fn group_thousands(int_part: &str) -> String {
    let mut with_dots = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_dots.push('.');
        }
        with_dots.push(c);
    }
    with_dots.chars().rev().collect()
}

/// Mask raw keystrokes as currency input: every non-digit is dropped and the
/// last two digits become the cents. "12345" → "123,45", "" → "".
pub fn mask_currency(text: &str) -> String {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return String::new();
    }
    let padded = format!("{digits:0>3}");
    let (int_part, cents) = padded.split_at(padded.len() - 2);
    let int_part = int_part.trim_start_matches('0');
    let int_part = if int_part.is_empty() { "0" } else { int_part };
    format!("{},{cents}", group_thousands(int_part))
}

/// Inverse of the mask: "1.234,56" → 1234.56. Empty or malformed input is 0.
pub fn parse_masked_currency(masked: &str) -> f64 {
    if masked.is_empty() {
        return 0.0;
    }
    let normalized = masked.replace('.', "").replacen(',', ".", 1);
    normalized.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Render a stored amount in the masked input form for editing.
/// Zero renders as an empty field.
pub fn number_to_masked(value: f64) -> String {
    if value == 0.0 || value.is_nan() {
        return String::new();
    }
    decimal(value)
}

/// Parse an amount typed on the command line. A comma marks the masked
/// pt-BR form (`1.234,56`); otherwise the value is read as a plain decimal
/// (`1234.56`). Negative amounts are rejected, and so is a lone dot followed
/// by exactly three digits (`1.234`), which could mean either form.
pub fn parse_amount(input: &str) -> Result<f64> {
    let invalid = || ContasError::InvalidAmount(input.to_string());
    let trimmed = input.trim().trim_start_matches("R$").trim();
    let value = if trimmed.contains(',') {
        let chars_ok = trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',');
        let has_digit = trimmed.chars().any(|c| c.is_ascii_digit());
        if !chars_ok || !has_digit || trimmed.matches(',').count() > 1 {
            return Err(invalid());
        }
        parse_masked_currency(trimmed)
    } else {
        if is_ambiguous_grouping(trimmed) {
            return Err(invalid());
        }
        trimmed.parse::<f64>().map_err(|_| invalid())?
    };
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok(value)
}

fn is_ambiguous_grouping(text: &str) -> bool {
    match text.split_once('.') {
        Some((int_part, frac)) => {
            !int_part.is_empty() && frac.len() == 3 && frac.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

/// Format a 0..=1 ratio as a whole percentage.
pub fn percent(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}

/// Human-readable file size: 512 B, 1.5 KB, 2.0 MB
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1234.56), "R$ 1.234,56");
        assert_eq!(money(-500.00), "-R$ 500,00");
        assert_eq!(money(0.0), "R$ 0,00");
        assert_eq!(money(1000000.99), "R$ 1.000.000,99");
        assert_eq!(money(42.10), "R$ 42,10");
        assert_eq!(money(-0.001), "R$ 0,00");
    }

    #[test]
    fn test_mask_currency() {
        assert_eq!(mask_currency("12345"), "123,45");
        assert_eq!(mask_currency("123"), "1,23");
        assert_eq!(mask_currency("5"), "0,05");
        assert_eq!(mask_currency("0005"), "0,05");
        assert_eq!(mask_currency("123456789"), "1.234.567,89");
        assert_eq!(mask_currency("1a2b3"), "1,23");
        assert_eq!(mask_currency(""), "");
        assert_eq!(mask_currency("abc"), "");
    }

    #[test]
    fn test_parse_masked_currency() {
        assert_eq!(parse_masked_currency("1.234,56"), 1234.56);
        assert_eq!(parse_masked_currency("0,05"), 0.05);
        assert_eq!(parse_masked_currency(""), 0.0);
        assert_eq!(parse_masked_currency("abc"), 0.0);
    }

    #[test]
    fn test_number_to_masked() {
        assert_eq!(number_to_masked(1234.5), "1.234,50");
        assert_eq!(number_to_masked(0.0), "");
        assert_eq!(number_to_masked(1_000_000.0), "1.000.000,00");
    }

    #[test]
    fn test_money_roundtrip_through_mask() {
        let sweep = (0u64..=100_000).step_by(7);
        let large = [100_000u64, 999_999, 1_000_000, 123_456_789, 99_999_999_999];
        for cents in sweep.chain(large) {
            let value = cents as f64 / 100.0;
            let keystrokes: String = number_to_masked(value)
                .chars()
                .filter(|c| c.is_ascii_digit())
                .collect();
            let parsed = parse_masked_currency(&mask_currency(&keystrokes));
            assert!((parsed - value).abs() < 1e-9, "{value} came back as {parsed}");
        }
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1234.56").unwrap(), 1234.56);
        assert_eq!(parse_amount("1.234,56").unwrap(), 1234.56);
        assert_eq!(parse_amount("R$ 50,00").unwrap(), 50.0);
        assert_eq!(parse_amount("3000").unwrap(), 3000.0);
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("ten").is_err());
        assert!(parse_amount("1,2,3").is_err());
    }

    #[test]
    fn test_parse_amount_rejects_unclear_input() {
        assert!(parse_amount(",").is_err());
        assert!(parse_amount("R$ ,").is_err());
        assert!(parse_amount("1.234").is_err());
        assert!(parse_amount("12.500").is_err());
        assert_eq!(parse_amount("1.234,00").unwrap(), 1234.0);
        assert_eq!(parse_amount("12.50").unwrap(), 12.5);
        assert_eq!(parse_amount("0,5").unwrap(), 0.5);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(2 * 1024 * 1024), "2.0 MB");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(2.0 / 3.0), "67%");
        assert_eq!(percent(0.0), "0%");
    }
}
