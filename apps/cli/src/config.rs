//! # Display Configuration
//!
//! Currency symbols and default field values for the terminal front end.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags
//! 2. Environment variables (`PRICEPOINT_*`)
//! 3. Defaults (this file)
//!
//! Configuration is read once at startup and never mutated afterwards.

use pricepoint_core::InputDefaults;

/// Front-end configuration.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Symbol shown next to source-currency amounts (the supplier cost).
    pub source_symbol: String,

    /// Symbol shown next to target-currency amounts (everything derived).
    pub target_symbol: String,

    /// Default field values used at startup and restored by reset.
    pub defaults: InputDefaults,
}

impl Default for DisplayConfig {
    /// USD supplier costs priced into GBP retail.
    fn default() -> Self {
        DisplayConfig {
            source_symbol: "$".to_string(),
            target_symbol: "£".to_string(),
            defaults: InputDefaults::default(),
        }
    }
}

impl DisplayConfig {
    /// Creates a DisplayConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `PRICEPOINT_SOURCE_SYMBOL` / `PRICEPOINT_TARGET_SYMBOL`
    /// - `PRICEPOINT_COST`, `PRICEPOINT_RATE`, `PRICEPOINT_FREIGHT`,
    ///   `PRICEPOINT_MARGIN`, `PRICEPOINT_TAX`: override the default
    ///   field values (e.g. `PRICEPOINT_TAX=19` for German VAT)
    pub fn from_env() -> Self {
        let mut config = DisplayConfig::default();

        if let Ok(symbol) = std::env::var("PRICEPOINT_SOURCE_SYMBOL") {
            config.source_symbol = symbol;
        }
        if let Ok(symbol) = std::env::var("PRICEPOINT_TARGET_SYMBOL") {
            config.target_symbol = symbol;
        }

        if let Some(cost) = env_number("PRICEPOINT_COST") {
            config.defaults.source_cost = cost;
        }
        if let Some(rate) = env_number("PRICEPOINT_RATE") {
            config.defaults.exchange_rate = rate;
        }
        if let Some(freight) = env_number("PRICEPOINT_FREIGHT") {
            config.defaults.freight_multiplier = freight;
        }
        if let Some(margin) = env_number("PRICEPOINT_MARGIN") {
            config.defaults.margin_percent = margin;
        }
        if let Some(tax) = env_number("PRICEPOINT_TAX") {
            config.defaults.tax_percent = tax;
        }

        config
    }

    /// Formats a derived amount with the target currency symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = DisplayConfig::default();
    /// assert_eq!(config.format_target(1.466), "£1.47");
    /// assert_eq!(config.format_target(-0.29), "-£0.29");
    /// ```
    pub fn format_target(&self, amount: f64) -> String {
        format_with_symbol(&self.target_symbol, amount)
    }

    /// Formats a source-currency amount (the supplier cost).
    pub fn format_source(&self, amount: f64) -> String {
        format_with_symbol(&self.source_symbol, amount)
    }
}

/// Reads a numeric environment override; malformed values are ignored.
fn env_number(name: &str) -> Option<f64> {
    std::env::var(name).ok()?.trim().parse::<f64>().ok()
}

fn format_with_symbol(symbol: &str, amount: f64) -> String {
    // Amounts that round to zero drop the sign so "-0.00" never shows.
    let amount = if amount.abs() < 0.005 { 0.0 } else { amount };
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{symbol}{:.2}", amount.abs())
}

/// Formats a percentage with 2 decimal digits.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_target() {
        let config = DisplayConfig::default();
        assert_eq!(config.format_target(1.466), "£1.47");
        assert_eq!(config.format_target(0.0), "£0.00");
        assert_eq!(config.format_target(-0.29), "-£0.29");
        assert_eq!(config.format_target(-0.0001), "£0.00");
    }

    #[test]
    fn test_format_source() {
        let config = DisplayConfig::default();
        assert_eq!(config.format_source(1.0), "$1.00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(64.2033), "64.20%");
        assert_eq!(format_percent(0.0), "0.00%");
    }
}
