use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::path::Path;

use crate::domain::Outcomes;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub staking: StakingConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Fair-odds model coefficients and fallbacks for missing signals
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Bookmaker overhead applied to fair odds (e.g., 0.945)
    pub margin: f64,
    pub xg_weight: f64,
    pub rank_weight: f64,
    pub form_weight: f64,
    /// League size used to invert rank into strength
    pub rank_offset: i64,
    /// Draw probability for a perfectly even match
    pub draw_ceiling: f64,
    pub confidence_scale: f64,
    pub confidence_cap: f64,
    /// Form rating contributed by each filled star
    pub star_value: f64,
    pub defaults: SignalDefaults,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            margin: 0.945,
            xg_weight: 0.3,
            rank_weight: 0.2,
            form_weight: 0.1,
            rank_offset: 20,
            draw_ceiling: 0.25,
            confidence_scale: 2.0,
            confidence_cap: 0.95,
            star_value: 0.2,
            defaults: SignalDefaults::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SignalDefaults {
    pub xg_home: f64,
    pub xg_away: f64,
    pub rank_home: u32,
    pub rank_away: u32,
    /// Form on a 0-1 scale
    pub form_home: f64,
    pub form_away: f64,
}

impl Default for SignalDefaults {
    fn default() -> Self {
        Self {
            xg_home: 1.5,
            xg_away: 1.0,
            rank_home: 8,
            rank_away: 12,
            form_home: 0.6,
            form_away: 0.4,
        }
    }
}

/// Edge threshold and fractional-Kelly sizing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StakingConfig {
    /// Minimum edge in percent to place a bet (e.g., 3.0)
    pub min_edge_pct: Decimal,
    /// Kelly damping (0.25 = quarter-Kelly)
    pub kelly_multiplier: Decimal,
    /// Hard cap on stake as a fraction of bankroll (e.g., 0.05 = 5%)
    pub max_stake_fraction: Decimal,
    /// Quoted odds used when the text carries none
    pub default_odds: Outcomes<Decimal>,
}

impl Default for StakingConfig {
    fn default() -> Self {
        Self {
            min_edge_pct: dec!(3.0),
            kelly_multiplier: dec!(0.25),
            max_stake_fraction: dec!(0.05),
            default_odds: Outcomes::new(dec!(2.10), dec!(3.40), dec!(3.60)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub initial_bankroll: Decimal,
    /// Probability that a simulated trade settles as a win
    pub win_probability: f64,
    /// Seed for a reproducible settlement stream
    pub seed: Option<u64>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            initial_bankroll: dec!(10000),
            win_probability: 0.55,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let mut builder = Config::builder()
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("BETFOOT_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (BETFOOT_LEDGER__INITIAL_BANKROLL, etc.)
            .add_source(
                Environment::with_prefix("BETFOOT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        // Hosting platforms hand the listen port in PORT
        if let Ok(port) = std::env::var("PORT") {
            builder = builder.set_override("server.port", port)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let m = &self.model;
        if !(m.margin > 0.0 && m.margin <= 1.0) {
            errors.push("model.margin must be in (0, 1]".to_string());
        }
        if !(0.0..=1.0).contains(&m.draw_ceiling) {
            errors.push("model.draw_ceiling must be between 0 and 1".to_string());
        }
        if !(0.0..=1.0).contains(&m.confidence_cap) {
            errors.push("model.confidence_cap must be between 0 and 1".to_string());
        }

        let s = &self.staking;
        if s.min_edge_pct < Decimal::ZERO {
            errors.push("staking.min_edge_pct must not be negative".to_string());
        }
        if s.kelly_multiplier <= Decimal::ZERO {
            errors.push("staking.kelly_multiplier must be positive".to_string());
        }
        if s.max_stake_fraction <= Decimal::ZERO || s.max_stake_fraction > Decimal::ONE {
            errors.push("staking.max_stake_fraction must be in (0, 1]".to_string());
        }
        for (market, odds) in s.default_odds.iter() {
            if *odds <= Decimal::ONE {
                errors.push(format!("staking.default_odds.{market} must be above 1.0"));
            }
        }

        if self.ledger.initial_bankroll <= Decimal::ZERO {
            errors.push("ledger.initial_bankroll must be positive".to_string());
        }
        if !(0.0..=1.0).contains(&self.ledger.win_probability) {
            errors.push("ledger.win_probability must be between 0 and 1".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
