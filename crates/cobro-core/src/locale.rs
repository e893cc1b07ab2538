//! # Currency Locale
//!
//! Describes how amounts in a currency are written on documents: symbol,
//! digit grouping, decimal separator and the unit name appended by
//! [`amount_to_words`](crate::totals::amount_to_words).
//!
//! ## Built-in Locales
//! ```text
//! ┌──────────┬────────┬──────────┬─────────┬──────────┬──────────┐
//! │ Code     │ Symbol │ Grouping │ Decimal │ Decimals │ Suffix   │
//! ├──────────┼────────┼──────────┼─────────┼──────────┼──────────┤
//! │ COP      │ $      │ .        │ ,       │ 0        │ pesos    │
//! │ USD      │ $      │ ,        │ .       │ 2        │ dollars  │
//! └──────────┴────────┴──────────┴─────────┴──────────┴──────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::validation::{validate_currency_code, ValidationResult};
use crate::ValidationError;

/// Formatting conventions for one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CurrencyLocale {
    /// ISO 4217 code ("COP", "USD").
    pub currency_code: String,

    /// Symbol written before the amount.
    pub symbol: String,

    /// Separator between groups of three digits.
    pub grouping_separator: String,

    /// Separator between the major and minor parts.
    pub decimal_separator: String,

    /// Common name of the unit, appended to amounts in words.
    pub suffix_word: String,

    /// Number of minor-unit digits shown (0 for whole-unit display).
    pub decimals: u8,
}

impl CurrencyLocale {
    /// Colombian peso: `$1.234.568 pesos`.
    pub fn colombian_peso() -> Self {
        CurrencyLocale {
            currency_code: "COP".to_string(),
            symbol: "$".to_string(),
            grouping_separator: ".".to_string(),
            decimal_separator: ",".to_string(),
            suffix_word: "pesos".to_string(),
            decimals: 0,
        }
    }

    /// US dollar: `$1,234,567.80 dollars`.
    pub fn us_dollar() -> Self {
        CurrencyLocale {
            currency_code: "USD".to_string(),
            symbol: "$".to_string(),
            grouping_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            suffix_word: "dollars".to_string(),
            decimals: 2,
        }
    }

    /// Looks up a built-in locale by ISO 4217 code (case-insensitive).
    ///
    /// ## Example
    /// ```rust
    /// use cobro_core::CurrencyLocale;
    ///
    /// let cop = CurrencyLocale::from_code("cop").unwrap();
    /// assert_eq!(cop.grouping_separator, ".");
    /// assert!(CurrencyLocale::from_code("XYZ").is_err());
    /// ```
    pub fn from_code(code: &str) -> CoreResult<Self> {
        match code.trim().to_uppercase().as_str() {
            "COP" => Ok(Self::colombian_peso()),
            "USD" => Ok(Self::us_dollar()),
            other => Err(CoreError::UnknownCurrency(other.to_string())),
        }
    }

    /// Multiplier between major and minor units (`10^decimals`).
    pub fn minor_unit_factor(&self) -> f64 {
        10f64.powi(i32::from(self.decimals))
    }

    /// Checks that the locale can produce unambiguous output.
    ///
    /// ## Rules
    /// - currency code is three uppercase ASCII letters
    /// - separators are non-empty and differ from each other
    /// - at most 4 decimals
    pub fn validate(&self) -> ValidationResult<()> {
        validate_currency_code(&self.currency_code)?;

        if self.grouping_separator.is_empty() {
            return Err(ValidationError::Required {
                field: "grouping_separator".to_string(),
            });
        }

        if self.decimal_separator.is_empty() {
            return Err(ValidationError::Required {
                field: "decimal_separator".to_string(),
            });
        }

        if self.grouping_separator == self.decimal_separator {
            return Err(ValidationError::invalid_format(
                "decimal_separator",
                "must differ from the grouping separator",
            ));
        }

        if self.decimals > 4 {
            return Err(ValidationError::OutOfRange {
                field: "decimals".to_string(),
                min: 0.0,
                max: 4.0,
            });
        }

        Ok(())
    }
}

impl Default for CurrencyLocale {
    fn default() -> Self {
        CurrencyLocale::colombian_peso()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_colombian_peso() {
        let locale = CurrencyLocale::default();
        assert_eq!(locale.currency_code, "COP");
        assert_eq!(locale.decimals, 0);
        assert_eq!(locale.suffix_word, "pesos");
    }

    #[test]
    fn test_from_code() {
        assert_eq!(CurrencyLocale::from_code("USD").unwrap(), CurrencyLocale::us_dollar());
        assert_eq!(
            CurrencyLocale::from_code(" eur "),
            Err(CoreError::UnknownCurrency("EUR".to_string()))
        );
    }

    #[test]
    fn test_minor_unit_factor() {
        assert_eq!(CurrencyLocale::colombian_peso().minor_unit_factor(), 1.0);
        assert_eq!(CurrencyLocale::us_dollar().minor_unit_factor(), 100.0);
    }

    #[test]
    fn test_validate() {
        assert!(CurrencyLocale::colombian_peso().validate().is_ok());
        assert!(CurrencyLocale::us_dollar().validate().is_ok());

        let mut same_separators = CurrencyLocale::colombian_peso();
        same_separators.decimal_separator = ".".to_string();
        assert!(same_separators.validate().is_err());

        let mut bad_code = CurrencyLocale::colombian_peso();
        bad_code.currency_code = "pesos".to_string();
        assert!(bad_code.validate().is_err());
    }
}
