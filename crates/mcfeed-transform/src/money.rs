//! Decimal price strings → integer micros.
//!
//! Upstream prices arrive as decimal strings (`"12.99"`). The catalog API
//! wants integer micros (`round(amount × 1_000_000)`) serialized as a string
//! of digits. `rust_decimal` keeps the arithmetic exact; a naive `f64` path
//! produces off-by-one micros for amounts like `4.105`.

use rust_decimal::{Decimal, RoundingStrategy};

/// Converts a decimal price string to an integer micros string.
///
/// Returns `None` when the input is empty after trimming, does not parse as
/// a decimal number, or overflows when scaled to micros; callers treat that
/// as "field absent".
#[must_use]
pub fn price_to_micros(price: &str) -> Option<String> {
    let trimmed = price.trim();
    if trimmed.is_empty() {
        return None;
    }
    let amount: Decimal = trimmed.parse().ok()?;
    // Amounts near Decimal::MAX parse fine but overflow when scaled.
    let micros = amount
        .checked_mul(Decimal::from(1_000_000u32))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    Some(micros.normalize().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_amount_converts_exactly() {
        assert_eq!(price_to_micros("12").as_deref(), Some("12000000"));
    }

    #[test]
    fn fractional_amount_converts_exactly() {
        assert_eq!(price_to_micros("12.99").as_deref(), Some("12990000"));
    }

    #[test]
    fn sub_micro_precision_rounds_half_up() {
        // 4.1234565 × 1e6 = 4123456.5 → 4123457
        assert_eq!(price_to_micros("4.1234565").as_deref(), Some("4123457"));
    }

    #[test]
    fn exact_decimal_avoids_float_drift() {
        // In f64 arithmetic 4.105 × 1e6 = 4104999.999…; the decimal path
        // must produce 4105000.
        assert_eq!(price_to_micros("4.105").as_deref(), Some("4105000"));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(price_to_micros(" 5.00 ").as_deref(), Some("5000000"));
    }

    #[test]
    fn zero_converts_to_zero() {
        assert_eq!(price_to_micros("0.00").as_deref(), Some("0"));
    }

    #[test]
    fn empty_string_is_none() {
        assert!(price_to_micros("").is_none());
        assert!(price_to_micros("   ").is_none());
    }

    #[test]
    fn malformed_value_is_none() {
        assert!(price_to_micros("free").is_none());
        assert!(price_to_micros("12,99").is_none());
    }

    #[test]
    fn overflowing_amount_is_none() {
        // Parses as a Decimal but cannot be scaled to micros.
        assert!(price_to_micros("10000000000000000000000000").is_none());
    }
}
