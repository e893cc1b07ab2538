//! # Cobro CLI
//!
//! Prints the totals of a stored quotation or billing account.
//!
//! ## Usage
//! ```bash
//! cobro cotizacion.json
//! cobro --kind billing cuenta-de-cobro.json
//!
//! # Override settings
//! COBRO__TAX_RATE=0.16 COBRO__CURRENCY__CODE=USD cobro cotizacion.json
//! RUST_LOG=debug cobro cotizacion.json
//! ```

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cobro_cli::args::Args;
use cobro_cli::config::AppConfig;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the summary on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse(std::env::args().skip(1))?;

    let config = AppConfig::load().context("loading configuration")?;
    let engine = config.engine().context("validating configuration")?;
    info!(
        tax_bps = engine.tax_rate().bps(),
        currency = %engine.locale().currency_code,
        policy = ?engine.negative_policy(),
        "Configuration loaded"
    );

    let summary = cobro_cli::summarize(&args, &engine)?;
    println!("{}", summary);

    Ok(())
}
