//! # cobro-core: Pure Document Logic for Cobro
//!
//! This crate holds the logic behind quotations and billing accounts
//! ("cuentas de cobro"): line item totals, tax, currency formatting and
//! draft editing. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Cobro Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │           Presentation (screens, PDF templates, CLI)            │   │
//! │  │    Client list ──► Quotation editor ──► Billing ──► PDF         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ FormattedTotals, DraftDocument         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cobro-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  totals  │ │  money   │ │  draft   │ │  record  │          │   │
//! │  │   │  Engine  │ │  locale  │ │ EditMode │ │ decoding │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │                                │ loosely typed JSON records             │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │            Hosted document store + authentication               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, TotalsResult, TaxRate, documents)
//! - [`totals`] - Totals engine, currency formatting, amount in words
//! - [`money`] - Amounts rounded to a currency's minor unit
//! - [`locale`] - Currency formatting conventions
//! - [`draft`] - Draft documents passed through editing operations
//! - [`record`] - Decoding of loosely typed store records
//! - [`validation`] - Business rule validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use cobro_core::{CurrencyLocale, LineItem, TaxRate};
//! use cobro_core::totals::{amount_to_words, compute_totals, format_currency};
//!
//! let items = vec![
//!     LineItem::new("A", 2.0, 150_000.0),
//!     LineItem::new("B", 1.0, 250_000.0),
//! ];
//! let totals = compute_totals(&items, TaxRate::from_fraction(0.19));
//!
//! let cop = CurrencyLocale::colombian_peso();
//! assert_eq!(format_currency(totals.subtotal, &cop).unwrap(), "$550.000");
//! assert_eq!(amount_to_words(totals.total, &cop).unwrap(), "$654.500 pesos");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod draft;
pub mod error;
pub mod locale;
pub mod money;
pub mod record;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use draft::{DraftDocument, EditMode, FinalizedDocument};
pub use error::{CoreError, CoreResult, ValidationError};
pub use locale::CurrencyLocale;
pub use money::Money;
pub use record::RecordDecoder;
pub use totals::{FormattedTotals, TotalsEngine};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default tax rate in basis points: Colombian VAT (IVA), 19 %.
pub const DEFAULT_TAX_RATE_BPS: u32 = 1900;

/// Maximum line items on a single document.
///
/// ## Business Reason
/// Keeps documents printable on a reasonable number of PDF pages.
pub const MAX_LINE_ITEMS: usize = 100;

/// Maximum length of a line item description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 500;
