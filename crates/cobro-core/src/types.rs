//! # Domain Types
//!
//! Core domain types used throughout Cobro.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Client      │   │    Quotation    │   │ BillingAccount  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  tax_id (NIT)   │   │  number         │   │  number         │       │
//! │  │  name           │   │  client_id (FK) │   │  concept        │       │
//! │  └─────────────────┘   │  items          │   │  items          │       │
//! │                        └────────┬────────┘   └────────┬────────┘       │
//! │                                 └──────────┬──────────┘                 │
//! │                                            ▼                            │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │    LineItem     │   │  TotalsResult   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  0.19 = 19 %    │   │  description    │   │  subtotal       │       │
//! │  └─────────────────┘   │  quantity       │   │  tax            │       │
//! │                        │  unit_price     │   │  total          │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! A document exclusively owns its line items. Totals are derived on demand
//! and never stored on their own.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::totals;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate stored as a fraction of the subtotal.
///
/// ## Representations
/// - fraction: `0.19`
/// - percentage: `19.0`
/// - basis points: `1900` (1 bps = 0.01 %)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(f64);

impl TaxRate {
    /// Creates a tax rate from a fraction (`0.19` = 19 %).
    #[inline]
    pub const fn from_fraction(fraction: f64) -> Self {
        TaxRate(fraction)
    }

    /// Creates a tax rate from basis points (`1900` = 19 %).
    #[inline]
    pub fn from_bps(bps: u32) -> Self {
        TaxRate(f64::from(bps) / 10_000.0)
    }

    /// Creates a tax rate from a percentage (`19.0` = 19 %).
    #[inline]
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate(pct / 100.0)
    }

    /// Returns the rate as a fraction.
    #[inline]
    pub const fn fraction(&self) -> f64 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 * 100.0
    }

    /// Returns the rate in basis points, rounded to the nearest point.
    #[inline]
    pub fn bps(&self) -> u32 {
        (self.0 * 10_000.0).round().max(0.0) as u32
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0.0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Default for TaxRate {
    /// The Colombian VAT rate (19 %).
    fn default() -> Self {
        TaxRate::from_bps(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One row of a quotation or billing document.
///
/// Line items have no identity of their own: they are addressed by their
/// position in the owning document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// What is being quoted or billed.
    pub description: String,

    /// Number of units (fractional quantities such as hours are allowed).
    pub quantity: f64,

    /// Price of one unit, in major currency units.
    pub unit_price: f64,
}

impl LineItem {
    /// Creates a new line item.
    pub fn new(description: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        LineItem {
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    /// Quantity × unit price, unrounded.
    #[inline]
    pub fn line_total(&self) -> f64 {
        self.quantity * self.unit_price
    }

    /// Checks whether either amount is below zero.
    #[inline]
    pub fn has_negative_amount(&self) -> bool {
        self.quantity < 0.0 || self.unit_price < 0.0
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Aggregate figures for a document, derived from its line items.
///
/// ## Invariants
/// - `subtotal = Σ(quantity × unit_price)`
/// - `tax = subtotal × rate`
/// - `total = subtotal + tax`
///
/// No rounding is applied; rounding happens when formatting.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TotalsResult {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

// =============================================================================
// Negative Amount Policy
// =============================================================================

/// How negative quantities and unit prices are treated.
///
/// `compute_totals` always tolerates them; the policy applies to the checked
/// paths (`checked_totals`, draft finalization, record decoding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum NegativeAmountPolicy {
    /// Negative values flow through the arithmetic unchanged.
    #[default]
    Tolerate,
    /// Negative values are rejected with `CoreError::NegativeAmount`.
    Reject,
}

// =============================================================================
// Document Kind
// =============================================================================

/// The kinds of documents that carry line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DocumentKind {
    /// A price quotation sent to a client (cotización).
    Quotation,
    /// A billing account / collection document (cuenta de cobro).
    BillingAccount,
}

impl DocumentKind {
    /// Human-readable title printed on the document.
    pub fn title(&self) -> &'static str {
        match self {
            DocumentKind::Quotation => "Cotización",
            DocumentKind::BillingAccount => "Cuenta de cobro",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Quotation => write!(f, "quotation"),
            DocumentKind::BillingAccount => write!(f, "billing"),
        }
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = crate::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quotation" | "cotizacion" | "cotización" => Ok(DocumentKind::Quotation),
            "billing" | "billing_account" | "cuenta" | "cuenta_de_cobro" => {
                Ok(DocumentKind::BillingAccount)
            }
            other => Err(crate::ValidationError::invalid_format(
                "kind",
                format!("unknown document kind '{}', expected quotation or billing", other),
            )),
        }
    }
}

// =============================================================================
// Client
// =============================================================================

/// A client that quotations and billing accounts are addressed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Client {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Person or company name.
    pub name: String,
    /// NIT or citizenship number.
    pub tax_id: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

// =============================================================================
// Quotation
// =============================================================================

/// A price quotation (cotización).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Quotation {
    pub id: String,
    /// Human-facing consecutive number.
    pub number: u32,
    pub client_id: String,
    #[ts(as = "String")]
    pub issued_on: NaiveDate,
    /// Last day the quoted prices are honored.
    #[ts(as = "Option<String>")]
    pub valid_until: Option<NaiveDate>,
    pub items: Vec<LineItem>,
    pub tax_rate: TaxRate,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Quotation {
    /// Totals recomputed from the current line items.
    pub fn totals(&self) -> TotalsResult {
        totals::compute_totals(&self.items, self.tax_rate)
    }

    /// Checks whether the quotation is still valid on the given date.
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.valid_until.map_or(true, |until| date <= until)
    }
}

// =============================================================================
// Billing Account
// =============================================================================

/// A billing account / collection document (cuenta de cobro).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BillingAccount {
    pub id: String,
    pub number: u32,
    pub client_id: String,
    #[ts(as = "String")]
    pub issued_on: NaiveDate,
    /// What the charge is for ("Por concepto de ...").
    pub concept: String,
    pub items: Vec<LineItem>,
    pub tax_rate: TaxRate,
    pub notes: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl BillingAccount {
    /// Totals recomputed from the current line items.
    pub fn totals(&self) -> TotalsResult {
        totals::compute_totals(&self.items, self.tax_rate)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
