//! # Totals Engine
//!
//! Turns a document's line items into subtotal, tax and total, and writes
//! those figures the way they appear on quotations and billing accounts.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Totals Computation                               │
//! │                                                                         │
//! │  [LineItem, LineItem, ...]                                              │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  compute_totals ── subtotal = Σ quantity × unit_price                   │
//! │        │          tax      = subtotal × rate                            │
//! │        │          total    = subtotal + tax                             │
//! │        ▼                                                                │
//! │  TotalsResult (f64, unrounded)                                          │
//! │        │                                                                │
//! │        ├──► format_currency ──► "$654.500"                              │
//! │        └──► amount_to_words ──► "$654.500 pesos"                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is pure: same input, same output, no retained state.
//!
//! ## Example
//! ```rust
//! use cobro_core::{LineItem, TotalsEngine};
//!
//! let engine = TotalsEngine::default(); // 19 %, COP
//! let items = vec![
//!     LineItem::new("A", 2.0, 150_000.0),
//!     LineItem::new("B", 1.0, 250_000.0),
//! ];
//!
//! let totals = engine.compute_totals(&items);
//! assert_eq!(totals.subtotal, 550_000.0);
//! assert_eq!(engine.format_currency(totals.total).unwrap(), "$654.500");
//! assert_eq!(engine.amount_to_words(totals.total).unwrap(), "$654.500 pesos");
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::error::CoreResult;
use crate::locale::CurrencyLocale;
use crate::money::Money;
use crate::types::{LineItem, NegativeAmountPolicy, TaxRate, TotalsResult};
use crate::validation::validate_line_items;

// =============================================================================
// Pure Operations
// =============================================================================

/// Aggregates line items into subtotal, tax and total.
///
/// Never fails. Negative or zero amounts propagate arithmetically and no
/// rounding is applied. An empty slice yields all zeros.
pub fn compute_totals(items: &[LineItem], tax_rate: TaxRate) -> TotalsResult {
    let subtotal: f64 = items.iter().map(LineItem::line_total).sum();
    let tax = subtotal * tax_rate.fraction();

    TotalsResult {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

/// Formats an amount with the locale's symbol, grouping and decimals.
///
/// A missing amount (`None`) is written as zero.
///
/// ## Errors
/// `CoreError::InvalidAmount` for NaN or infinite amounts.
///
/// ## Example
/// ```rust
/// use cobro_core::totals::format_currency;
/// use cobro_core::CurrencyLocale;
///
/// let cop = CurrencyLocale::colombian_peso();
/// assert_eq!(format_currency(1_550_000.0, &cop).unwrap(), "$1.550.000");
/// assert_eq!(format_currency(None, &cop).unwrap(), "$0");
/// assert!(format_currency(f64::NAN, &cop).is_err());
/// ```
pub fn format_currency(amount: impl Into<Option<f64>>, locale: &CurrencyLocale) -> CoreResult<String> {
    let amount = amount.into().unwrap_or(0.0);
    Ok(Money::from_amount(amount, locale)?.format(locale))
}

/// Writes an amount followed by the currency's common name.
///
/// This is a document convenience (`"$500.000 pesos"`), not a spelled-out
/// cardinal number. A missing amount is written as zero.
///
/// ## Errors
/// `CoreError::InvalidAmount` for NaN or infinite amounts.
pub fn amount_to_words(amount: impl Into<Option<f64>>, locale: &CurrencyLocale) -> CoreResult<String> {
    let formatted = format_currency(amount, locale)?;
    Ok(format!("{} {}", formatted, locale.suffix_word).trim().to_string())
}

// =============================================================================
// Formatted Totals
// =============================================================================

/// Totals written out for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FormattedTotals {
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    /// Total followed by the currency name.
    pub total_in_words: String,
}

// =============================================================================
// Totals Engine
// =============================================================================

/// Session-wide configuration for totals: tax rate, locale, and how
/// negative amounts are treated on checked paths.
///
/// ## Defaults
/// - Tax: 19 % (Colombian VAT)
/// - Locale: Colombian peso
/// - Negative amounts: tolerated
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsEngine {
    tax_rate: TaxRate,
    locale: CurrencyLocale,
    negative_policy: NegativeAmountPolicy,
}

impl TotalsEngine {
    /// Creates an engine with the given tax rate and default locale.
    pub fn new(tax_rate: TaxRate) -> Self {
        TotalsEngine {
            tax_rate,
            ..Default::default()
        }
    }

    /// Replaces the locale used for formatting.
    pub fn with_locale(mut self, locale: CurrencyLocale) -> Self {
        self.locale = locale;
        self
    }

    /// Replaces the negative amount policy.
    pub fn with_negative_policy(mut self, policy: NegativeAmountPolicy) -> Self {
        self.negative_policy = policy;
        self
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    pub fn locale(&self) -> &CurrencyLocale {
        &self.locale
    }

    pub fn negative_policy(&self) -> NegativeAmountPolicy {
        self.negative_policy
    }

    /// Totals at the engine's tax rate. Never fails.
    pub fn compute_totals(&self, items: &[LineItem]) -> TotalsResult {
        compute_totals(items, self.tax_rate)
    }

    /// Totals at an explicit tax rate (documents may carry their own rate).
    pub fn compute_totals_at(&self, items: &[LineItem], tax_rate: TaxRate) -> TotalsResult {
        compute_totals(items, tax_rate)
    }

    /// Validates the items under the engine's policy, then computes totals.
    ///
    /// ## Errors
    /// - `CoreError::NegativeAmount` under [`NegativeAmountPolicy::Reject`]
    /// - `CoreError::Validation` for non-finite amounts, empty descriptions
    ///   or too many items
    pub fn checked_totals(&self, items: &[LineItem]) -> CoreResult<TotalsResult> {
        if let Err(err) = validate_line_items(items, self.negative_policy) {
            warn!(error = %err, items = items.len(), "Rejected line items");
            return Err(err);
        }

        Ok(self.compute_totals(items))
    }

    /// Formats an amount in the engine's locale.
    pub fn format_currency(&self, amount: impl Into<Option<f64>>) -> CoreResult<String> {
        format_currency(amount, &self.locale)
    }

    /// Amount in words in the engine's locale.
    pub fn amount_to_words(&self, amount: impl Into<Option<f64>>) -> CoreResult<String> {
        amount_to_words(amount, &self.locale)
    }

    /// Formats all figures of a totals record at once.
    pub fn format_totals(&self, totals: &TotalsResult) -> CoreResult<FormattedTotals> {
        Ok(FormattedTotals {
            subtotal: self.format_currency(totals.subtotal)?,
            tax: self.format_currency(totals.tax)?,
            total: self.format_currency(totals.total)?,
            total_in_words: self.amount_to_words(totals.total)?,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};

    fn cop() -> CurrencyLocale {
        CurrencyLocale::colombian_peso()
    }

    fn sample_items() -> Vec<LineItem> {
        vec![
            LineItem::new("A", 2.0, 150_000.0),
            LineItem::new("B", 1.0, 250_000.0),
        ]
    }

    #[test]
    fn test_two_items_at_colombian_vat() {
        let totals = compute_totals(&sample_items(), TaxRate::from_fraction(0.19));

        assert_eq!(totals.subtotal, 550_000.0);
        assert!((totals.tax - 104_500.0).abs() < 1e-6);
        assert!((totals.total - 654_500.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_items_yield_zero() {
        let totals = compute_totals(&[], TaxRate::default());
        assert_eq!(totals, TotalsResult::default());
    }

    #[test]
    fn test_negative_amounts_propagate() {
        let items = vec![LineItem::new("Nota crédito", 1.0, -10_000.0)];
        let totals = compute_totals(&items, TaxRate::from_bps(1000));

        assert_eq!(totals.subtotal, -10_000.0);
        assert_eq!(totals.tax, -1_000.0);
        assert_eq!(totals.total, -11_000.0);
    }

    #[test]
    fn test_compute_totals_is_idempotent() {
        let items = sample_items();
        let rate = TaxRate::default();
        assert_eq!(compute_totals(&items, rate), compute_totals(&items, rate));
    }

    #[test]
    fn test_fractional_quantities() {
        let items = vec![LineItem::new("Consultoría (horas)", 1.5, 80_000.0)];
        let totals = compute_totals(&items, TaxRate::zero());
        assert_eq!(totals.subtotal, 120_000.0);
        assert_eq!(totals.total, 120_000.0);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1_550_000.0, &cop()).unwrap(), "$1.550.000");
        assert_eq!(format_currency(0.0, &cop()).unwrap(), "$0");
        assert_eq!(format_currency(1_234_567.8, &cop()).unwrap(), "$1.234.568");
        assert_eq!(
            format_currency(1_234_567.8, &CurrencyLocale::us_dollar()).unwrap(),
            "$1,234,567.80"
        );
    }

    #[test]
    fn test_format_currency_missing_amount_is_zero() {
        assert_eq!(format_currency(None, &cop()).unwrap(), "$0");
        assert_eq!(amount_to_words(None, &cop()).unwrap(), "$0 pesos");
    }

    #[test]
    fn test_format_currency_rejects_non_finite() {
        assert!(matches!(
            format_currency(f64::NAN, &cop()),
            Err(CoreError::InvalidAmount { .. })
        ));
        assert!(matches!(
            amount_to_words(f64::INFINITY, &cop()),
            Err(CoreError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_format_currency_rejects_locale_beyond_minor_unit_range() {
        let mut locale = cop();
        locale.decimals = 20;

        assert!(matches!(
            format_currency(0.0, &locale),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert!(amount_to_words(None, &locale).is_err());
    }

    #[test]
    fn test_amount_to_words() {
        let words = amount_to_words(500_000.0, &cop()).unwrap();
        assert_eq!(words, "$500.000 pesos");
        assert!(words.contains("$500.000"));
        assert!(words.ends_with("pesos"));
    }

    #[test]
    fn test_amount_to_words_trims_empty_suffix() {
        let mut locale = cop();
        locale.suffix_word = String::new();
        assert_eq!(amount_to_words(500_000.0, &locale).unwrap(), "$500.000");
    }

    #[test]
    fn test_engine_defaults() {
        let engine = TotalsEngine::default();
        assert_eq!(engine.tax_rate().bps(), 1900);
        assert_eq!(engine.locale().currency_code, "COP");
        assert_eq!(engine.negative_policy(), NegativeAmountPolicy::Tolerate);
    }

    #[test]
    fn test_engine_checked_totals_honours_policy() {
        let items = vec![
            LineItem::new("Servicio", 1.0, 100_000.0),
            LineItem::new("Descuento", -1.0, 10_000.0),
        ];

        let tolerant = TotalsEngine::default();
        assert_eq!(tolerant.checked_totals(&items).unwrap().subtotal, 90_000.0);

        let strict = TotalsEngine::default().with_negative_policy(NegativeAmountPolicy::Reject);
        assert_eq!(
            strict.checked_totals(&items),
            Err(CoreError::NegativeAmount {
                field: "quantity".to_string(),
                index: 1,
                value: -1.0,
            })
        );

        // The unchecked path never fails.
        assert_eq!(strict.compute_totals(&items).subtotal, 90_000.0);
    }

    #[test]
    fn test_engine_format_totals() {
        let engine = TotalsEngine::default();
        let totals = engine.compute_totals(&sample_items());
        let formatted = engine.format_totals(&totals).unwrap();

        assert_eq!(formatted.subtotal, "$550.000");
        assert_eq!(formatted.tax, "$104.500");
        assert_eq!(formatted.total, "$654.500");
        assert_eq!(formatted.total_in_words, "$654.500 pesos");
    }

    #[test]
    fn test_engine_with_usd_locale() {
        let engine = TotalsEngine::new(TaxRate::from_percentage(8.25))
            .with_locale(CurrencyLocale::us_dollar());
        let totals = engine.compute_totals(&[LineItem::new("Widget", 1.0, 10.0)]);

        assert_eq!(engine.format_currency(totals.tax).unwrap(), "$0.83");
        assert_eq!(engine.amount_to_words(totals.total).unwrap(), "$10.83 dollars");
    }

    #[test]
    fn test_compute_totals_at_document_rate() {
        let engine = TotalsEngine::default();
        let totals = engine.compute_totals_at(&sample_items(), TaxRate::zero());
        assert_eq!(totals.total, 550_000.0);
    }
}
