//! # Validation Module
//!
//! Input validation for records coming from the document store and for
//! drafts about to be finalized.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Record decoding (record.rs)                                  │
//! │  ├── Shape checks (numbers vs strings)                                 │
//! │  └── Missing numeric fields coerced to zero                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Finite amounts, tax rate range                                    │
//! │  └── Descriptions, identifiers, currency codes                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Totals engine (totals.rs)                                    │
//! │  └── Pure arithmetic over validated values                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cobro_core::validation::{validate_description, validate_tax_rate};
//! use cobro_core::TaxRate;
//!
//! validate_description("Desarrollo sitio web").unwrap();
//! validate_tax_rate(TaxRate::from_fraction(0.19)).unwrap();
//! assert!(validate_tax_rate(TaxRate::from_fraction(1.5)).is_err());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{LineItem, NegativeAmountPolicy, TaxRate};
use crate::{MAX_DESCRIPTION_LEN, MAX_LINE_ITEMS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a line item description.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 500 characters
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates a client name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_client_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a NIT or citizenship number.
///
/// ## Rules
/// - 5 to 20 characters
/// - Digits, optionally followed by `-` and a single check digit
///
/// ## Example
/// ```rust
/// use cobro_core::validation::validate_tax_id;
///
/// assert!(validate_tax_id("900123456-7").is_ok());
/// assert!(validate_tax_id("1020304050").is_ok());
/// assert!(validate_tax_id("90012A456").is_err());
/// ```
pub fn validate_tax_id(tax_id: &str) -> ValidationResult<()> {
    let tax_id = tax_id.trim();

    if tax_id.is_empty() {
        return Err(ValidationError::Required {
            field: "tax_id".to_string(),
        });
    }

    if tax_id.len() < 5 || tax_id.len() > 20 {
        return Err(ValidationError::invalid_format(
            "tax_id",
            "must be between 5 and 20 characters",
        ));
    }

    let (number, check_digit) = match tax_id.split_once('-') {
        Some((number, check)) => (number, Some(check)),
        None => (tax_id, None),
    };

    let digits_only = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

    if !digits_only(number) || check_digit.is_some_and(|c| c.len() != 1 || !digits_only(c)) {
        return Err(ValidationError::invalid_format(
            "tax_id",
            "must be digits with an optional '-' check digit",
        ));
    }

    Ok(())
}

/// Validates an ISO 4217 currency code shape (three uppercase ASCII letters).
pub fn validate_currency_code(code: &str) -> ValidationResult<()> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::invalid_format(
            "currency_code",
            "must be three uppercase letters (ISO 4217)",
        ));
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a numeric amount for a line item field.
///
/// ## Rules
/// - Must be finite
/// - Must be non-negative unless the policy tolerates negatives
fn validate_amount(field: &str, value: f64, policy: NegativeAmountPolicy) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::MustBeFinite {
            field: field.to_string(),
        });
    }

    if value < 0.0 && policy == NegativeAmountPolicy::Reject {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a quantity.
pub fn validate_quantity(quantity: f64, policy: NegativeAmountPolicy) -> ValidationResult<()> {
    validate_amount("quantity", quantity, policy)
}

/// Validates a unit price.
pub fn validate_unit_price(unit_price: f64, policy: NegativeAmountPolicy) -> ValidationResult<()> {
    validate_amount("unit_price", unit_price, policy)
}

/// Validates a tax rate.
///
/// ## Rules
/// - Must be finite
/// - Must be between 0 and 1 (0 % to 100 %)
pub fn validate_tax_rate(rate: TaxRate) -> ValidationResult<()> {
    let fraction = rate.fraction();

    if !fraction.is_finite() {
        return Err(ValidationError::MustBeFinite {
            field: "tax_rate".to_string(),
        });
    }

    if !(0.0..=1.0).contains(&fraction) {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0.0,
            max: 1.0,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the number of line items on a document.
pub fn validate_line_item_count(count: usize) -> ValidationResult<()> {
    if count > MAX_LINE_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "line items".to_string(),
            min: 0.0,
            max: MAX_LINE_ITEMS as f64,
        });
    }

    Ok(())
}

/// Validates every line item of a document before it is finalized.
///
/// Negative amounts are reported as `CoreError::NegativeAmount` with the
/// item's position so the presentation layer can highlight the row.
pub fn validate_line_items(items: &[LineItem], policy: NegativeAmountPolicy) -> CoreResult<()> {
    validate_line_item_count(items.len())?;

    for (index, item) in items.iter().enumerate() {
        validate_description(&item.description)?;

        for (field, value) in [("quantity", item.quantity), ("unit_price", item.unit_price)] {
            match validate_amount(field, value, policy) {
                Ok(()) => {}
                Err(ValidationError::MustBeNonNegative { field }) => {
                    return Err(CoreError::NegativeAmount { field, index, value });
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use cobro_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
