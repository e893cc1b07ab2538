//! # Record Decoding
//!
//! Turns loosely typed records from the document store into typed values.
//!
//! Records written by older front ends are inconsistent: numbers stored as
//! strings, missing fields, Spanish field names. This module is the only
//! place that tolerates that. Everything past it sees validated
//! [`LineItem`]s.
//!
//! ## Coercion Rules
//! ```text
//! ┌──────────────────────────────┬──────────────────────────────────────────┐
//! │ Stored value                 │ Decoded as                               │
//! ├──────────────────────────────┼──────────────────────────────────────────┤
//! │ 150000 / 1.5                 │ 150000.0 / 1.5                           │
//! │ "150000" / " 1.5 "           │ 150000.0 / 1.5                           │
//! │ missing / null / ""          │ 0.0 (logged at debug level)              │
//! │ "abc" / true / [..] / {..}   │ ValidationError::InvalidFormat           │
//! └──────────────────────────────┴──────────────────────────────────────────┘
//! ```
//!
//! ## Field Names
//! - description: `description`, `descripcion`
//! - quantity: `quantity`, `cantidad`
//! - unit price: `unitPrice`, `unit_price`, `precio`, `valorUnitario`
//! - items: `items`, `lineItems`, `productos`
//! - tax rate: `taxRate`, `tax_rate`, `iva` (values of 1 or more are read as
//!   percentages, so `iva: 1` is 1 %)
//! - identifiers: `id`, `clientId`, `client_id`, `cliente` (text or numbers;
//!   numbers are kept as their decimal text)

use serde_json::{Map, Value};
use tracing::debug;

use crate::draft::DraftDocument;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::totals::TotalsEngine;
use crate::types::{Client, DocumentKind, LineItem, NegativeAmountPolicy, TaxRate};
use crate::validation::{
    validate_client_name, validate_line_item_count, validate_quantity, validate_tax_id,
    validate_tax_rate, validate_unit_price, validate_uuid, ValidationResult,
};

const DESCRIPTION_FIELDS: &[&str] = &["description", "descripcion"];
const QUANTITY_FIELDS: &[&str] = &["quantity", "cantidad"];
const UNIT_PRICE_FIELDS: &[&str] = &["unitPrice", "unit_price", "precio", "valorUnitario"];
const ITEMS_FIELDS: &[&str] = &["items", "lineItems", "productos"];
const TAX_RATE_FIELDS: &[&str] = &["taxRate", "tax_rate", "iva"];
const CLIENT_FIELDS: &[&str] = &["clientId", "client_id", "cliente"];

// =============================================================================
// Record Decoder
// =============================================================================

/// Decodes store records using a session's tax rate and negative policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordDecoder {
    default_tax_rate: TaxRate,
    policy: NegativeAmountPolicy,
}

impl RecordDecoder {
    pub fn new(default_tax_rate: TaxRate, policy: NegativeAmountPolicy) -> Self {
        RecordDecoder {
            default_tax_rate,
            policy,
        }
    }

    /// A decoder sharing the engine's tax rate and policy.
    pub fn for_engine(engine: &TotalsEngine) -> Self {
        RecordDecoder::new(engine.tax_rate(), engine.negative_policy())
    }

    /// Decodes one line item object.
    ///
    /// ## Example
    /// ```rust
    /// use cobro_core::record::RecordDecoder;
    /// use cobro_core::TotalsEngine;
    /// use serde_json::json;
    ///
    /// let decoder = RecordDecoder::for_engine(&TotalsEngine::default());
    /// let item = decoder
    ///     .line_item(&json!({ "descripcion": "Pintura", "cantidad": "3", "precio": 45000 }))
    ///     .unwrap();
    ///
    /// assert_eq!(item.quantity, 3.0);
    /// assert_eq!(item.unit_price, 45_000.0);
    /// ```
    pub fn line_item(&self, value: &Value) -> CoreResult<LineItem> {
        self.line_item_at(value, None)
    }

    /// Decodes an array of line item objects.
    pub fn line_items(&self, value: &Value) -> CoreResult<Vec<LineItem>> {
        let array = value
            .as_array()
            .ok_or_else(|| ValidationError::invalid_format("items", "expected an array"))?;

        validate_line_item_count(array.len())?;

        array
            .iter()
            .enumerate()
            .map(|(index, item)| self.line_item_at(item, Some(index)))
            .collect()
    }

    /// Decodes a stored quotation or billing account into a draft.
    ///
    /// A record with an `id` opens in edit mode; one without (or with a
    /// `null` id) opens in create mode. A missing items list decodes as no
    /// items.
    pub fn draft(&self, value: &Value, kind: DocumentKind) -> CoreResult<DraftDocument> {
        let record = as_object(value, "document")?;

        let items = match lookup(record, ITEMS_FIELDS) {
            Some(items) => self.line_items(items)?,
            None => Vec::new(),
        };

        let tax_rate = self.tax_rate(record)?;

        let draft = match identifier(lookup(record, &["id"]), "id")? {
            Some(id) => DraftDocument::edit(kind, id, items, tax_rate),
            None => {
                let mut draft = DraftDocument::create(kind, tax_rate);
                for item in items {
                    draft = draft.with_item(item)?;
                }
                draft
            }
        };

        Ok(match identifier(lookup(record, CLIENT_FIELDS), "client_id")? {
            Some(client_id) => draft.with_client(client_id),
            None => draft,
        })
    }

    /// Decodes and validates a client record.
    pub fn client(&self, value: &Value) -> CoreResult<Client> {
        let client: Client = serde_json::from_value(value.clone())
            .map_err(|err| ValidationError::invalid_format("client", err.to_string()))?;

        validate_uuid(&client.id)?;
        validate_client_name(&client.name)?;
        validate_tax_id(&client.tax_id)?;

        Ok(client)
    }

    fn line_item_at(&self, value: &Value, index: Option<usize>) -> CoreResult<LineItem> {
        let field = |name: &str| match index {
            Some(i) => format!("items[{}].{}", i, name),
            None => name.to_string(),
        };

        let record = as_object(value, &field("item"))?;

        let description = match lookup(record, DESCRIPTION_FIELDS) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.trim().to_string(),
            Some(_) => {
                return Err(ValidationError::invalid_format(field("description"), "expected text").into())
            }
        };

        let quantity = number_or_zero(record, QUANTITY_FIELDS, &field("quantity"))?;
        let unit_price = number_or_zero(record, UNIT_PRICE_FIELDS, &field("unit_price"))?;

        let item = LineItem::new(description, quantity, unit_price);
        self.check_amounts(&item, index.unwrap_or(0))?;
        Ok(item)
    }

    fn check_amounts(&self, item: &LineItem, index: usize) -> CoreResult<()> {
        for (field, value, result) in [
            ("quantity", item.quantity, validate_quantity(item.quantity, self.policy)),
            ("unit_price", item.unit_price, validate_unit_price(item.unit_price, self.policy)),
        ] {
            match result {
                Ok(()) => {}
                Err(ValidationError::MustBeNonNegative { .. }) => {
                    return Err(CoreError::NegativeAmount {
                        field: field.to_string(),
                        index,
                        value,
                    });
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(())
    }

    fn tax_rate(&self, record: &Map<String, Value>) -> CoreResult<TaxRate> {
        let raw = match lookup(record, TAX_RATE_FIELDS) {
            None | Some(Value::Null) => return Ok(self.default_tax_rate),
            Some(value) => parse_number(value, "tax_rate")?,
        };

        let rate = match raw {
            Some(r) if r >= 1.0 => TaxRate::from_percentage(r),
            Some(r) => TaxRate::from_fraction(r),
            None => self.default_tax_rate,
        };

        validate_tax_rate(rate)?;
        Ok(rate)
    }
}

impl Default for RecordDecoder {
    fn default() -> Self {
        RecordDecoder::new(TaxRate::default(), NegativeAmountPolicy::default())
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn as_object<'a>(value: &'a Value, field: &str) -> ValidationResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::invalid_format(field, "expected an object"))
}

/// First present field among the aliases.
fn lookup<'a>(record: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases.iter().find_map(|name| record.get(*name))
}

/// Reads a JSON number or numeric string. `Ok(None)` means "absent".
fn parse_number(value: &Value, field: &str) -> ValidationResult<Option<f64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| ValidationError::invalid_format(field, "number out of range")),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ValidationError::invalid_format(field, format!("'{}' is not a number", s))),
        _ => Err(ValidationError::invalid_format(field, "expected a number")),
    }
}

/// Reads a stored identifier. Numeric ids from older stores keep their
/// decimal text.
fn identifier(value: Option<&Value>, field: &str) -> ValidationResult<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(ValidationError::invalid_format(field, "expected text or a number")),
    }
}

fn number_or_zero(record: &Map<String, Value>, aliases: &[&str], field: &str) -> ValidationResult<f64> {
    let parsed = match lookup(record, aliases) {
        Some(value) => parse_number(value, field)?,
        None => None,
    };

    Ok(parsed.unwrap_or_else(|| {
        debug!(field, "Missing numeric field coerced to zero");
        0.0
    }))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::EditMode;
    use serde_json::json;

    fn decoder() -> RecordDecoder {
        RecordDecoder::default()
    }

    #[test]
    fn test_decodes_numbers_and_numeric_strings() {
        let item = decoder()
            .line_item(&json!({ "description": "Horas", "quantity": " 1.5 ", "unitPrice": "80000" }))
            .unwrap();

        assert_eq!(item, LineItem::new("Horas", 1.5, 80_000.0));
    }

    #[test]
    fn test_missing_fields_become_zero() {
        let item = decoder().line_item(&json!({ "description": "Sin precio" })).unwrap();
        assert_eq!(item.quantity, 0.0);
        assert_eq!(item.unit_price, 0.0);

        let item = decoder()
            .line_item(&json!({ "quantity": null, "precio": "" }))
            .unwrap();
        assert_eq!(item.description, "");
        assert_eq!(item.line_total(), 0.0);
    }

    #[test]
    fn test_rejects_non_numeric_values() {
        let err = decoder()
            .line_items(&json!([
                { "description": "A", "quantity": 1, "unitPrice": 10 },
                { "description": "B", "quantity": "dos", "unitPrice": 10 }
            ]))
            .unwrap_err();

        assert_eq!(
            err,
            CoreError::Validation(ValidationError::InvalidFormat {
                field: "items[1].quantity".to_string(),
                reason: "'dos' is not a number".to_string(),
            })
        );

        assert!(decoder().line_item(&json!({ "quantity": true })).is_err());
        assert!(decoder().line_item(&json!("not an object")).is_err());
        assert!(decoder().line_items(&json!({ "items": [] })).is_err());
    }

    #[test]
    fn test_negative_policy_applies_when_decoding() {
        let record = json!([{ "description": "Ajuste", "quantity": 1, "unitPrice": -500 }]);

        assert!(decoder().line_items(&record).is_ok());

        let strict = RecordDecoder::new(TaxRate::default(), NegativeAmountPolicy::Reject);
        assert_eq!(
            strict.line_items(&record),
            Err(CoreError::NegativeAmount {
                field: "unit_price".to_string(),
                index: 0,
                value: -500.0,
            })
        );
    }

    #[test]
    fn test_draft_from_stored_document() {
        let record = json!({
            "id": "q-17",
            "clientId": "c-3",
            "iva": 19,
            "productos": [
                { "descripcion": "A", "cantidad": 2, "precio": 150000 },
                { "descripcion": "B", "cantidad": 1, "precio": 250000 }
            ]
        });

        let draft = decoder().draft(&record, DocumentKind::Quotation).unwrap();

        assert_eq!(draft.mode(), &EditMode::Edit { id: "q-17".to_string() });
        assert_eq!(draft.client_id(), Some("c-3"));
        assert_eq!(draft.tax_rate().bps(), 1900);
        assert_eq!(draft.totals().subtotal, 550_000.0);
    }

    #[test]
    fn test_draft_without_id_or_tax_uses_defaults() {
        let decoder = RecordDecoder::new(TaxRate::from_bps(500), NegativeAmountPolicy::Tolerate);
        let draft = decoder
            .draft(&json!({ "items": [{ "description": "A", "quantity": 1, "unitPrice": 100 }] }), DocumentKind::BillingAccount)
            .unwrap();

        assert!(!draft.is_editing());
        assert_eq!(draft.tax_rate().bps(), 500);
        assert_eq!(draft.items().len(), 1);
    }

    #[test]
    fn test_tax_rate_of_one_is_one_percent() {
        let record = json!({
            "iva": 1,
            "items": [{ "description": "A", "quantity": 1, "unitPrice": 100 }]
        });
        let draft = decoder().draft(&record, DocumentKind::Quotation).unwrap();
        assert_eq!(draft.tax_rate().bps(), 100);
        assert_eq!(draft.totals().total, 101.0);

        let draft = decoder().draft(&json!({ "taxRate": 0.5 }), DocumentKind::Quotation).unwrap();
        assert_eq!(draft.tax_rate().bps(), 5000);
    }

    #[test]
    fn test_numeric_identifiers_are_kept_as_text() {
        let draft = decoder()
            .draft(&json!({ "id": 42, "cliente": 7 }), DocumentKind::BillingAccount)
            .unwrap();

        assert_eq!(draft.mode(), &EditMode::Edit { id: "42".to_string() });
        assert_eq!(draft.client_id(), Some("7"));

        let draft = decoder().draft(&json!({ "id": null }), DocumentKind::Quotation).unwrap();
        assert!(!draft.is_editing());
    }

    #[test]
    fn test_rejects_malformed_identifiers() {
        assert_eq!(
            decoder().draft(&json!({ "id": true }), DocumentKind::Quotation).unwrap_err(),
            CoreError::Validation(ValidationError::InvalidFormat {
                field: "id".to_string(),
                reason: "expected text or a number".to_string(),
            })
        );
        assert!(decoder()
            .draft(&json!({ "clientId": { "id": "c-3" } }), DocumentKind::Quotation)
            .is_err());
    }

    #[test]
    fn test_draft_rejects_invalid_tax_rate() {
        let result = decoder().draft(&json!({ "taxRate": 250 }), DocumentKind::Quotation);
        assert!(matches!(result, Err(CoreError::Validation(ValidationError::OutOfRange { .. }))));
    }

    #[test]
    fn test_decodes_client() {
        let client = decoder()
            .client(&json!({
                "id": "550e8400-e29b-41d4-a716-446655440000",
                "name": "Café La Esquina",
                "taxId": "900123456-7",
                "email": "pagos@laesquina.co",
                "phone": null,
                "address": null,
                "city": "Medellín"
            }))
            .unwrap();

        assert_eq!(client.city.as_deref(), Some("Medellín"));
    }

    #[test]
    fn test_rejects_client_with_bad_tax_id() {
        let result = decoder().client(&json!({
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "name": "Café La Esquina",
            "taxId": "N/A",
            "email": null,
            "phone": null,
            "address": null,
            "city": null
        }));

        assert!(matches!(result, Err(CoreError::Validation(_))));
    }
}
