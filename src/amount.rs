//! Parsing of user-entered decimals and human-readable token amounts.
//!
//! Amounts are scaled on their decimal digits with integer arithmetic, so
//! `"1.005"` at 2 decimals is exactly 100.5 base units before rounding (a float
//! would see 100.4999...). Rounding is half-up.

use crate::error::TokenError;

/// Parse the decimals field. The token program stores decimals as a `u8`.
pub fn parse_decimals(input: &str) -> Result<u8, TokenError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TokenError::InvalidDecimals(format!(
            "{:?} is not a non-negative integer",
            input
        )));
    }
    trimmed.parse::<u8>().map_err(|_| {
        TokenError::InvalidDecimals(format!("{} is larger than {}", trimmed, u8::MAX))
    })
}

/// Convert a human amount (e.g. `"12.5"`) into base units: `round(amount * 10^decimals)`.
///
/// An empty string is zero. Negative numbers, exponents and separators are rejected,
/// as is a non-zero amount that rounds to zero base units.
pub fn scale_amount(input: &str, decimals: u8) -> Result<u64, TokenError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    let invalid = || {
        TokenError::InvalidSupply(format!("{:?} is not a non-negative decimal number", input))
    };
    let overflow = || TokenError::SupplyOverflow {
        supply: trimmed.to_string(),
        decimals,
    };

    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (digits, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole
        .bytes()
        .chain(fraction.bytes())
        .all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let is_zero = whole.bytes().chain(fraction.bytes()).all(|b| b == b'0');
    if is_zero {
        return Ok(0);
    }

    let scale = 10u128
        .checked_pow(u32::from(decimals))
        .ok_or_else(overflow)?;

    let mut whole_value: u128 = 0;
    for b in whole.bytes() {
        whole_value = whole_value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u128::from(b - b'0')))
            .ok_or_else(overflow)?;
    }

    // First `decimals` fraction digits (zero padded), then one digit for rounding.
    let fraction = fraction.as_bytes();
    let mut fraction_value: u128 = 0;
    for i in 0..usize::from(decimals) {
        let digit = fraction.get(i).map_or(0, |b| b - b'0');
        fraction_value = fraction_value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u128::from(digit)))
            .ok_or_else(overflow)?;
    }
    let round_up = fraction
        .get(usize::from(decimals))
        .is_some_and(|b| *b >= b'5');

    let total = whole_value
        .checked_mul(scale)
        .and_then(|v| v.checked_add(fraction_value))
        .and_then(|v| v.checked_add(u128::from(round_up)))
        .ok_or_else(overflow)?;

    if total == 0 {
        return Err(TokenError::InvalidSupply(format!(
            "{} is below one base unit at {} decimals",
            trimmed, decimals
        )));
    }

    u64::try_from(total).map_err(|_| overflow())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimals() {
        assert_eq!(parse_decimals("2").unwrap(), 2);
        assert_eq!(parse_decimals(" 9 ").unwrap(), 9);
        assert_eq!(parse_decimals("0").unwrap(), 0);
        assert_eq!(parse_decimals("255").unwrap(), 255);
    }

    #[test]
    fn test_parse_decimals_rejects_bad_input() {
        for input in ["", "-1", "2.5", "abc", "256", "1e1"] {
            assert!(
                matches!(parse_decimals(input), Err(TokenError::InvalidDecimals(_))),
                "{:?} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_scale_whole_number() {
        assert_eq!(scale_amount("10", 2).unwrap(), 1000);
        assert_eq!(scale_amount("1", 9).unwrap(), 1_000_000_000);
        assert_eq!(scale_amount("42", 0).unwrap(), 42);
    }

    #[test]
    fn test_scale_matches_rounded_product_for_small_decimals() {
        // Values exactly representable as f64, so the float product is a valid oracle.
        let samples = ["1", "10", "0.5", "2.75", "0.125", "1000", "3.0625"];
        for d in 0u8..=9 {
            for s in samples {
                let expected = (s.parse::<f64>().unwrap() * 10f64.powi(i32::from(d))).round();
                match scale_amount(s, d) {
                    Ok(scaled) => assert_eq!(scaled as f64, expected, "s={} d={}", s, d),
                    Err(_) => assert_eq!(expected, 0.0, "s={} d={}", s, d),
                }
            }
        }
    }

    #[test]
    fn test_scale_rounds_half_up() {
        assert_eq!(scale_amount("1.005", 2).unwrap(), 101);
        assert_eq!(scale_amount("1.004", 2).unwrap(), 100);
        assert_eq!(scale_amount("0.5", 0).unwrap(), 1);
        assert_eq!(scale_amount("0.51", 0).unwrap(), 1);
    }

    #[test]
    fn test_scale_rejects_amount_below_one_base_unit() {
        for (input, decimals) in [("0.001", 2), ("0.49", 0), ("0.0000000004", 9)] {
            assert!(
                matches!(scale_amount(input, decimals), Err(TokenError::InvalidSupply(_))),
                "{:?} at {} decimals should be rejected",
                input,
                decimals
            );
        }
        assert_eq!(
            scale_amount("0.001", 2).unwrap_err().to_string(),
            "Invalid initial supply: 0.001 is below one base unit at 2 decimals"
        );
        // Half a base unit rounds up to one.
        assert_eq!(scale_amount("0.005", 2).unwrap(), 1);
    }

    #[test]
    fn test_scale_zero_forms() {
        assert_eq!(scale_amount("", 2).unwrap(), 0);
        assert_eq!(scale_amount("0", 2).unwrap(), 0);
        assert_eq!(scale_amount("0.000", 2).unwrap(), 0);
        // Zero never overflows, whatever the precision.
        assert_eq!(scale_amount("0", 255).unwrap(), 0);
    }

    #[test]
    fn test_scale_partial_forms() {
        assert_eq!(scale_amount(".5", 1).unwrap(), 5);
        assert_eq!(scale_amount("7.", 1).unwrap(), 70);
        assert_eq!(scale_amount("+3", 1).unwrap(), 30);
    }

    #[test]
    fn test_scale_rejects_malformed() {
        for input in ["-1", "1e3", "1,000", "abc", ".", "1.2.3", "--1"] {
            assert!(
                matches!(scale_amount(input, 2), Err(TokenError::InvalidSupply(_))),
                "{:?} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_scale_overflow() {
        assert_eq!(scale_amount("18446744073709551615", 0).unwrap(), u64::MAX);
        assert!(matches!(
            scale_amount("18446744073709551616", 0),
            Err(TokenError::SupplyOverflow { .. })
        ));
        assert!(matches!(
            scale_amount("20000000000", 9),
            Err(TokenError::SupplyOverflow { .. })
        ));
        assert!(matches!(
            scale_amount("1", 40),
            Err(TokenError::SupplyOverflow { .. })
        ));
    }
}
