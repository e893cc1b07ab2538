//! # Money Module
//!
//! Provides the `Money` type: an amount rounded to a currency's minor unit,
//! ready to be written on a document.
//!
//! ## Where Rounding Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  LineItem (f64) ──► compute_totals (f64, unrounded) ──► TotalsResult   │
//! │                                                            │            │
//! │                                                            ▼            │
//! │                             Money::from_amount  ← rounding happens HERE │
//! │                                                            │            │
//! │                                                            ▼            │
//! │                                        Money::format ──► "$1.234.568"   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Arithmetic never rounds. Only display does, and it does so exactly once.
//!
//! ## Usage
//! ```rust
//! use cobro_core::{CurrencyLocale, Money};
//!
//! let cop = CurrencyLocale::colombian_peso();
//! let money = Money::from_amount(1_234_567.8, &cop).unwrap();
//! assert_eq!(money.minor_units(), 1_234_568);
//! assert_eq!(money.format(&cop), "$1.234.568");
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::locale::CurrencyLocale;

/// Most decimals whose minor unit still fits in an `i64` (`10^18`).
pub const MAX_DECIMALS: u8 = 18;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest unit a locale displays.
///
/// ## Design Decisions
/// - **i64 (signed)**: negative totals (credits, discounts) are representable
/// - **Scale comes from the locale**: 1 unit for COP, 1 cent for USD
/// - **Rounding**: half away from zero (`f64::round`), so `0.5 → 1` and
///   `-0.5 → -1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    #[inline]
    pub const fn from_minor_units(units: i64) -> Self {
        Money(units)
    }

    /// Rounds a raw amount (major units) to the locale's minor unit.
    ///
    /// ## Errors
    /// `CoreError::InvalidAmount` when the amount is NaN, infinite, or too
    /// large to be held in minor units. `ValidationError::OutOfRange` when
    /// the locale has more decimals than an `i64` minor unit can express.
    ///
    /// ## Example
    /// ```rust
    /// use cobro_core::{CoreError, CurrencyLocale, Money};
    ///
    /// let usd = CurrencyLocale::us_dollar();
    /// assert_eq!(Money::from_amount(10.125, &usd).unwrap().minor_units(), 1013);
    /// assert!(matches!(
    ///     Money::from_amount(f64::NAN, &usd),
    ///     Err(CoreError::InvalidAmount { .. })
    /// ));
    /// ```
    pub fn from_amount(amount: f64, locale: &CurrencyLocale) -> CoreResult<Self> {
        if !amount.is_finite() {
            return Err(CoreError::invalid_amount(amount));
        }

        if 10i64.checked_pow(u32::from(locale.decimals)).is_none() {
            return Err(ValidationError::OutOfRange {
                field: "decimals".to_string(),
                min: 0.0,
                max: f64::from(MAX_DECIMALS),
            }
            .into());
        }

        let scaled = (amount * locale.minor_unit_factor()).round();

        // i64::MAX as f64 rounds up to 2^63, which is already out of range
        if scaled.abs() >= i64::MAX as f64 {
            return Err(CoreError::invalid_amount(amount));
        }

        Ok(Money(scaled as i64))
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Writes the value with the locale's symbol and separators.
    ///
    /// ## Layout
    /// ```text
    /// [-]<symbol><grouped major>[<decimal separator><minor, zero padded>]
    ///
    /// COP:  -$1.500        $1.550.000
    /// USD:  $0.05          $1,234,567.80
    /// ```
    pub fn format(&self, locale: &CurrencyLocale) -> String {
        let magnitude = self.0.unsigned_abs();
        // Past 10^19 every stored value is a fraction of one major unit.
        let (major, minor) = match 10u64.checked_pow(u32::from(locale.decimals)) {
            Some(factor) => (magnitude / factor, magnitude % factor),
            None => (0, magnitude),
        };

        let mut out = String::new();
        if self.is_negative() {
            out.push('-');
        }
        out.push_str(&locale.symbol);
        out.push_str(&group_digits(major, &locale.grouping_separator));

        if locale.decimals > 0 {
            out.push_str(&locale.decimal_separator);
            out.push_str(&format!(
                "{:0width$}",
                minor,
                width = usize::from(locale.decimals)
            ));
        }

        out
    }
}

/// Inserts `separator` between groups of three digits, counting from the right.
fn group_digits(value: u64, separator: &str) -> String {
    let digits = value.to_string();
    let len = digits.len();
    let mut out = String::with_capacity(len + (len / 3) * separator.len());

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }

    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cop() -> CurrencyLocale {
        CurrencyLocale::colombian_peso()
    }

    fn usd() -> CurrencyLocale {
        CurrencyLocale::us_dollar()
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits(0, "."), "0");
        assert_eq!(group_digits(999, "."), "999");
        assert_eq!(group_digits(1_000, "."), "1.000");
        assert_eq!(group_digits(1_550_000, "."), "1.550.000");
        assert_eq!(group_digits(12_345_678, ","), "12,345,678");
    }

    #[test]
    fn test_format_whole_units() {
        assert_eq!(Money::from_minor_units(1_550_000).format(&cop()), "$1.550.000");
        assert_eq!(Money::zero().format(&cop()), "$0");
        assert_eq!(Money::from_minor_units(-1_500).format(&cop()), "-$1.500");
    }

    #[test]
    fn test_format_with_decimals() {
        assert_eq!(Money::from_minor_units(123_456_780).format(&usd()), "$1,234,567.80");
        assert_eq!(Money::from_minor_units(5).format(&usd()), "$0.05");
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(Money::from_amount(0.5, &cop()).unwrap().minor_units(), 1);
        assert_eq!(Money::from_amount(-0.5, &cop()).unwrap().minor_units(), -1);
        assert_eq!(Money::from_amount(1_234_567.8, &cop()).unwrap().minor_units(), 1_234_568);
        assert_eq!(Money::from_amount(2.4, &cop()).unwrap().minor_units(), 2);
    }

    #[test]
    fn test_negative_zero_is_zero() {
        let money = Money::from_amount(-0.2, &cop()).unwrap();
        assert!(money.is_zero());
        assert_eq!(money.format(&cop()), "$0");
    }

    #[test]
    fn test_non_finite_amounts_are_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                Money::from_amount(value, &cop()),
                Err(CoreError::InvalidAmount { .. })
            ));
        }
    }

    #[test]
    fn test_out_of_range_amounts_are_rejected() {
        assert!(Money::from_amount(1e19, &cop()).is_err());
        assert!(Money::from_amount(1e17, &usd()).is_err());
        assert!(Money::from_amount(1e15, &usd()).is_ok());
    }

    #[test]
    fn test_locale_with_too_many_decimals() {
        let mut locale = usd();
        locale.decimals = 20;

        assert_eq!(
            Money::from_amount(0.0, &locale),
            Err(CoreError::Validation(ValidationError::OutOfRange {
                field: "decimals".to_string(),
                min: 0.0,
                max: 18.0,
            }))
        );
        assert_eq!(Money::from_minor_units(-5).format(&locale), "-$0.00000000000000000005");

        locale.decimals = MAX_DECIMALS;
        assert_eq!(Money::from_amount(1.0, &locale).unwrap().minor_units(), 1_000_000_000_000_000_000);
    }
}
