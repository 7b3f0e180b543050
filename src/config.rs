//! Scanner configuration
//!
//! Every field has a default equal to the screening constants, so an empty
//! TOML file (or no file at all) reproduces the stock behaviour.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{ScanError, ScanResult};

/// Complete scanner configuration, loadable from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Volatility and probability model settings
    #[serde(default)]
    pub model: ModelConfig,
    /// Strike band and annotation settings
    #[serde(default)]
    pub selection: SelectionConfig,
    /// Market data settings
    #[serde(default)]
    pub data: DataConfig,
}

/// Volatility and ITM probability settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Risk-free rate used in d1
    /// Default: 0.05
    pub risk_free_rate: f64,

    /// Trailing return window for volatility
    /// Default: 20
    pub volatility_window: usize,

    /// Trading days per year for annualizing volatility
    /// Default: 252
    pub trading_days: f64,

    /// Calendar days per year for time to expiry
    /// Default: 365
    pub days_per_year: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.05,
            volatility_window: 20,
            trading_days: 252.0,
            days_per_year: 365.0,
        }
    }
}

/// Option selection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Calls keep strikes in (S, S * call_band_upper]
    /// Default: 1.15
    pub call_band_upper: f64,

    /// Puts keep strikes in [S * put_band_lower, S)
    /// Default: 0.95
    pub put_band_lower: f64,

    /// Maximum rows per expiration
    /// Default: 10
    pub max_options: usize,

    /// Fraction of spot over which the delta proxy moves by 0.5
    /// Default: 0.1
    pub delta_scale: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            call_band_upper: 1.15,
            put_band_lower: 0.95,
            max_options: 10,
            delta_scale: 0.1,
        }
    }
}

/// Market data settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Yahoo Finance API root
    pub base_url: String,

    /// HTTP user agent
    pub user_agent: String,

    /// History range requested from the chart endpoint
    /// Default: "1y"
    pub history_range: String,

    /// Number of nearest expirations analysed
    /// Default: 2
    pub expirations: usize,

    /// Reference price when neither a quote nor a strike is available
    /// Default: 100.0
    pub default_price: f64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
            history_range: "1y".to_string(),
            expirations: 2,
            default_price: 100.0,
        }
    }
}

impl ScannerConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> ScanResult<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        let content = fs::read_to_string(path)?;
        let config: ScannerConfig =
            toml::from_str(&content).map_err(|e| ScanError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> ScanResult<()> {
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> ScanResult<String> {
        toml::to_string_pretty(self).map_err(|e| ScanError::config(e.to_string()))
    }

    /// Reject settings the pipeline cannot work with
    pub fn validate(&self) -> ScanResult<()> {
        let m = &self.model;
        if m.volatility_window < 2 {
            return Err(ScanError::config("volatility_window must be at least 2"));
        }
        if !(m.trading_days > 0.0) || !(m.days_per_year > 0.0) {
            return Err(ScanError::config("trading_days and days_per_year must be positive"));
        }
        if !m.risk_free_rate.is_finite() {
            return Err(ScanError::config("risk_free_rate must be finite"));
        }

        let s = &self.selection;
        if !(s.call_band_upper > 1.0) {
            return Err(ScanError::config("call_band_upper must be above 1.0"));
        }
        if !(s.put_band_lower > 0.0 && s.put_band_lower < 1.0) {
            return Err(ScanError::config("put_band_lower must be in (0, 1)"));
        }
        if s.max_options == 0 {
            return Err(ScanError::config("max_options must be positive"));
        }
        if !(s.delta_scale > 0.0) {
            return Err(ScanError::config("delta_scale must be positive"));
        }

        let d = &self.data;
        if d.expirations == 0 {
            return Err(ScanError::config("expirations must be positive"));
        }
        if !(d.default_price > 0.0) {
            return Err(ScanError::config("default_price must be positive"));
        }

        Ok(())
    }
}
