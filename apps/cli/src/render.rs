//! # Text Rendering
//!
//! Plain-text summary of a finalized document, laid out like the footer of
//! the printed quotation or billing account.
//!
//! ```text
//! Cotización (nueva)
//! Cliente: 3f2c...
//!
//!   1. Diseño de logo                 2 x $150.000 = $300.000
//!   2. Impresión                      1 x $250.000 = $250.000
//!
//! Subtotal:   $550.000
//! IVA (19%):  $104.500
//! Total:      $654.500
//! Son: $654.500 pesos
//! ```

use cobro_core::{CoreResult, EditMode, FinalizedDocument, TotalsEngine};

/// Renders the summary of a finalized document.
pub fn render_summary(document: &FinalizedDocument, engine: &TotalsEngine) -> CoreResult<String> {
    let state = match &document.mode {
        EditMode::Create => "nueva".to_string(),
        EditMode::Edit { id } => format!("edición {}", id),
    };
    let mut lines = vec![format!("{} ({})", document.kind.title(), state)];

    if let Some(client_id) = &document.client_id {
        lines.push(format!("Cliente: {}", client_id));
    }
    lines.push(String::new());

    for (i, item) in document.items.iter().enumerate() {
        lines.push(format!(
            "  {:>2}. {:<30} {} x {} = {}",
            i + 1,
            item.description,
            format_quantity(item.quantity),
            engine.format_currency(item.unit_price)?,
            engine.format_currency(item.line_total())?,
        ));
    }
    if !document.items.is_empty() {
        lines.push(String::new());
    }

    let tax_label = format!("IVA ({}%):", format_quantity(document.tax_rate.percentage()));
    lines.push(format!("{:<12}{}", "Subtotal:", document.formatted.subtotal));
    lines.push(format!("{:<12}{}", tax_label, document.formatted.tax));
    lines.push(format!("{:<12}{}", "Total:", document.formatted.total));
    lines.push(format!("Son: {}", document.formatted.total_in_words));

    Ok(lines.join("\n"))
}

/// Whole quantities print without decimals; fractional ones keep up to two.
fn format_quantity(quantity: f64) -> String {
    let rounded = (quantity * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}
