//! # Application Configuration
//!
//! Settings for a document session: tax rate, currency and the policy for
//! negative amounts.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`COBRO__*`, `__` separates nested keys)
//! 2. Config file (`cobro.toml`, or the path in `COBRO_CONFIG`)
//! 3. Defaults (this file)
//!
//! ## Configuration File Format
//! ```toml
//! tax_rate = 0.19
//! negative_policy = "tolerate"   # tolerate | reject
//!
//! [currency]
//! code = "COP"
//! suffix_word = "pesos"
//! ```

use std::path::{Path, PathBuf};

use cobro_core::validation::validate_tax_rate;
use cobro_core::{CoreError, CurrencyLocale, NegativeAmountPolicy, TaxRate, TotalsEngine};
use serde::Deserialize;
use tracing::debug;

/// Environment variable naming an alternative config file.
pub const CONFIG_PATH_ENV: &str = "COBRO_CONFIG";

/// Config file read when `COBRO_CONFIG` is not set.
pub const DEFAULT_CONFIG_FILE: &str = "cobro.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Tax rate as a fraction (0.19 = 19 %).
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,

    /// Currency used to format amounts.
    #[serde(default)]
    pub currency: CurrencySettings,

    /// Whether negative quantities or prices are accepted.
    #[serde(default)]
    pub negative_policy: NegativeAmountPolicy,
}

/// Currency selection with optional overrides of the built-in locale.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrencySettings {
    /// ISO 4217 code of a built-in locale.
    #[serde(default = "default_currency_code")]
    pub code: String,

    #[serde(default)]
    pub symbol: Option<String>,

    #[serde(default)]
    pub suffix_word: Option<String>,
}

fn default_tax_rate() -> f64 {
    TaxRate::default().fraction()
}

fn default_currency_code() -> String {
    "COP".to_string()
}

impl Default for CurrencySettings {
    fn default() -> Self {
        CurrencySettings {
            code: default_currency_code(),
            symbol: None,
            suffix_word: None,
        }
    }
}

impl Default for AppConfig {
    /// 19 % tax, Colombian pesos, negative amounts tolerated.
    fn default() -> Self {
        AppConfig {
            tax_rate: default_tax_rate(),
            currency: CurrencySettings::default(),
            negative_policy: NegativeAmountPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from `COBRO_CONFIG` (or `cobro.toml`) and the
    /// environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        Self::load_from(&path)
    }

    /// Loads configuration from an optional TOML file and the environment.
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading configuration");

        let config = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("COBRO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Builds the locale from the currency code and overrides.
    pub fn locale(&self) -> Result<CurrencyLocale, ConfigError> {
        let mut locale = CurrencyLocale::from_code(&self.currency.code)?;

        if let Some(symbol) = &self.currency.symbol {
            locale.symbol = symbol.clone();
        }

        if let Some(suffix) = &self.currency.suffix_word {
            locale.suffix_word = suffix.clone();
        }

        locale.validate().map_err(CoreError::from)?;
        Ok(locale)
    }

    /// Validates the settings and builds the totals engine for the session.
    pub fn engine(&self) -> Result<TotalsEngine, ConfigError> {
        let tax_rate = TaxRate::from_fraction(self.tax_rate);
        validate_tax_rate(tax_rate).map_err(CoreError::from)?;

        Ok(TotalsEngine::new(tax_rate)
            .with_locale(self.locale()?)
            .with_negative_policy(self.negative_policy))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] CoreError),
}
