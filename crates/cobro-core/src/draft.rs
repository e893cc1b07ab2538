//! # Draft Documents
//!
//! A quotation or billing account while it is being written.
//!
//! The draft is a plain value: every editing operation takes the draft and
//! returns the next one. The presentation layer owns the value between
//! edits; nothing is kept here.
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft Document Operations                            │
//! │                                                                         │
//! │  User Action              Operation                  Result             │
//! │  ───────────              ─────────                  ──────             │
//! │                                                                         │
//! │  "New quotation" ───────► DraftDocument::create() ─► mode = Create      │
//! │                                                                         │
//! │  "Edit" on a record ────► DraftDocument::edit() ───► mode = Edit{id}    │
//! │                                                                         │
//! │  Add row ───────────────► with_item(item) ─────────► items + [item]     │
//! │                                                                         │
//! │  Change row ────────────► with_item_replaced(i) ───► items[i] = item    │
//! │                                                                         │
//! │  Delete row ────────────► without_item(i) ─────────► items - [i]        │
//! │                                                                         │
//! │  Save ──────────────────► finalize(&engine) ───────► FinalizedDocument  │
//! │                                                      (store persists)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use cobro_core::{DocumentKind, DraftDocument, LineItem, TotalsEngine};
//!
//! let engine = TotalsEngine::default();
//! let draft = DraftDocument::create(DocumentKind::Quotation, engine.tax_rate())
//!     .with_item(LineItem::new("Logo", 1.0, 400_000.0))?
//!     .with_item(LineItem::new("Tarjetas", 2.0, 50_000.0))?;
//!
//! assert_eq!(draft.totals().subtotal, 500_000.0);
//!
//! let document = draft.finalize(&engine)?;
//! assert_eq!(document.formatted.total, "$595.000");
//! # Ok::<(), cobro_core::CoreError>(())
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::totals::{compute_totals, FormattedTotals, TotalsEngine};
use crate::types::{DocumentKind, LineItem, TaxRate, TotalsResult};
use crate::validation::validate_line_items;
use crate::MAX_LINE_ITEMS;

// =============================================================================
// Edit Mode
// =============================================================================

/// Whether a draft creates a new record or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "mode", rename_all = "snake_case")]
#[ts(export)]
pub enum EditMode {
    /// The record does not exist in the store yet.
    Create,
    /// The record with this id is being edited.
    Edit { id: String },
}

// =============================================================================
// Draft Document
// =============================================================================

/// An in-progress quotation or billing account.
///
/// ## Invariants
/// - At most [`MAX_LINE_ITEMS`] line items
/// - Totals are never stored; `totals()` recomputes them on every call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DraftDocument {
    kind: DocumentKind,
    mode: EditMode,
    client_id: Option<String>,
    items: Vec<LineItem>,
    tax_rate: TaxRate,
}

impl DraftDocument {
    /// Starts a draft for a new document.
    pub fn create(kind: DocumentKind, tax_rate: TaxRate) -> Self {
        DraftDocument {
            kind,
            mode: EditMode::Create,
            client_id: None,
            items: Vec::new(),
            tax_rate,
        }
    }

    /// Starts a draft from an existing document's line items.
    pub fn edit(kind: DocumentKind, id: impl Into<String>, items: Vec<LineItem>, tax_rate: TaxRate) -> Self {
        DraftDocument {
            kind,
            mode: EditMode::Edit { id: id.into() },
            client_id: None,
            items,
            tax_rate,
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    /// Checks whether the draft edits an existing record.
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditMode::Edit { .. })
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// Assigns the client the document is addressed to.
    pub fn with_client(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Appends a line item.
    ///
    /// ## Errors
    /// `CoreError::TooManyItems` when the draft is already full.
    pub fn with_item(mut self, item: LineItem) -> CoreResult<Self> {
        if self.items.len() >= MAX_LINE_ITEMS {
            return Err(CoreError::TooManyItems { max: MAX_LINE_ITEMS });
        }

        self.items.push(item);
        Ok(self)
    }

    /// Replaces the line item at `index`.
    pub fn with_item_replaced(mut self, index: usize, item: LineItem) -> CoreResult<Self> {
        let slot = self
            .items
            .get_mut(index)
            .ok_or(CoreError::ItemNotFound { index })?;
        *slot = item;
        Ok(self)
    }

    /// Removes the line item at `index`; later items shift up.
    pub fn without_item(mut self, index: usize) -> CoreResult<Self> {
        if index >= self.items.len() {
            return Err(CoreError::ItemNotFound { index });
        }

        self.items.remove(index);
        Ok(self)
    }

    /// Removes every line item, keeping kind, mode and client.
    pub fn cleared(mut self) -> Self {
        self.items.clear();
        self
    }

    /// Totals for the current line items at the draft's tax rate.
    pub fn totals(&self) -> TotalsResult {
        compute_totals(&self.items, self.tax_rate)
    }

    /// Validates the draft and produces the document to hand to the store.
    ///
    /// The draft is consumed: once finalized it is discarded.
    ///
    /// ## Errors
    /// - `CoreError::Validation` for empty descriptions or non-finite amounts
    /// - `CoreError::NegativeAmount` when the engine rejects negatives
    /// - `CoreError::InvalidAmount` if a total cannot be formatted
    pub fn finalize(self, engine: &TotalsEngine) -> CoreResult<FinalizedDocument> {
        validate_line_items(&self.items, engine.negative_policy())?;

        let totals = self.totals();
        let formatted = engine.format_totals(&totals)?;

        debug!(
            kind = %self.kind,
            editing = self.is_editing(),
            items = self.items.len(),
            total = totals.total,
            "Finalized draft document"
        );

        Ok(FinalizedDocument {
            kind: self.kind,
            mode: self.mode,
            client_id: self.client_id,
            items: self.items,
            tax_rate: self.tax_rate,
            totals,
            formatted,
        })
    }
}

// =============================================================================
// Finalized Document
// =============================================================================

/// A validated draft with its totals, ready for the store and renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FinalizedDocument {
    pub kind: DocumentKind,
    pub mode: EditMode,
    pub client_id: Option<String>,
    pub items: Vec<LineItem>,
    pub tax_rate: TaxRate,
    pub totals: TotalsResult,
    pub formatted: FormattedTotals,
}

// =============================================================================
// Unit Tests
// =============================================================================
