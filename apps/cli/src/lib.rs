//! # Cobro CLI Library
//!
//! Presentation layer for the command line: configuration, argument
//! parsing, and text rendering of document totals.
//!
//! ## Module Organization
//! ```text
//! cobro_cli/
//! ├── lib.rs          ◄─── You are here (run a document summary)
//! ├── args.rs         ◄─── Command line parsing
//! ├── config.rs       ◄─── Layered configuration → TotalsEngine
//! └── render.rs       ◄─── Text summary of a finalized document
//! ```

pub mod args;
pub mod config;
pub mod render;

use anyhow::Context;
use cobro_core::{RecordDecoder, TotalsEngine};
use tracing::info;

use crate::args::Args;

/// Reads the document named in `args` and returns its rendered summary.
pub fn summarize(args: &Args, engine: &TotalsEngine) -> anyhow::Result<String> {
    let raw = std::fs::read_to_string(&args.path)
        .with_context(|| format!("reading {}", args.path.display()))?;

    let record: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {} as JSON", args.path.display()))?;

    let draft = RecordDecoder::for_engine(engine)
        .draft(&record, args.kind)
        .context("decoding document")?;

    info!(
        path = %args.path.display(),
        kind = %args.kind,
        items = draft.items().len(),
        "Document loaded"
    );

    let document = draft.finalize(engine).context("validating document")?;
    Ok(render::render_summary(&document, engine)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cobro_core::DocumentKind;
    use std::io::Write;

    fn document_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_summarize_stored_quotation() {
        let file = document_file(
            r#"{
                "id": "q-1",
                "items": [
                    { "description": "A", "quantity": 2, "unitPrice": 150000 },
                    { "description": "B", "quantity": "1", "unitPrice": "250000" }
                ]
            }"#,
        );
        let args = Args {
            path: file.path().to_path_buf(),
            kind: DocumentKind::Quotation,
        };

        let summary = summarize(&args, &TotalsEngine::default()).unwrap();
        assert!(summary.ends_with("Son: $654.500 pesos"));
    }

    #[test]
    fn test_summarize_reports_bad_json() {
        let file = document_file("{ not json");
        let args = Args {
            path: file.path().to_path_buf(),
            kind: DocumentKind::Quotation,
        };

        let err = summarize(&args, &TotalsEngine::default()).unwrap_err();
        assert!(err.to_string().starts_with("parsing "));
    }

    #[test]
    fn test_summarize_missing_file() {
        let args = Args {
            path: "no-such-document.json".into(),
            kind: DocumentKind::BillingAccount,
        };

        assert!(summarize(&args, &TotalsEngine::default()).is_err());
    }
}
