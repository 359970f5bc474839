//! # Pricing Records
//!
//! Input and result records for one pricing computation, plus the raw
//! input coercion rules.
//!
//! ## Coercion, Not Validation
//! Field text arrives from a live input surface where half-typed numbers
//! are normal. The calculator never rejects input: anything that does not
//! parse to a finite non-negative number is treated as `0.0` and the
//! computation proceeds. See [`parse_amount`] and [`coerce_amount`].

use serde::{Deserialize, Serialize};

use crate::rounding::round_up_to_ninety_five;

// =============================================================================
// Inputs
// =============================================================================

/// One snapshot of the calculator's numeric inputs.
///
/// A snapshot is read from current field state on every triggering edit
/// and discarded after the computation; nothing is cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingInputs {
    /// Item cost in the source currency.
    pub source_cost: f64,

    /// Source currency to target currency conversion rate.
    pub exchange_rate: f64,

    /// Markup factor applied after conversion (1.0 = no freight).
    pub freight_multiplier: f64,

    /// Target gross margin percentage. Values at or above 100 are
    /// degenerate and force a zero sell price.
    pub margin_percent: f64,

    /// Tax percentage applied to the net sell price.
    pub tax_percent: f64,

    /// Manually chosen pre-rounding gross price. Presence activates
    /// reverse (price to margin) computation.
    pub manual_gross_price: Option<f64>,
}

impl PricingInputs {
    /// Returns a copy with every field passed through [`coerce_amount`],
    /// so the engine's arithmetic only ever sees finite non-negative
    /// numbers.
    pub fn sanitized(&self) -> Self {
        PricingInputs {
            source_cost: coerce_amount(self.source_cost),
            exchange_rate: coerce_amount(self.exchange_rate),
            freight_multiplier: coerce_amount(self.freight_multiplier),
            margin_percent: coerce_amount(self.margin_percent),
            tax_percent: coerce_amount(self.tax_percent),
            manual_gross_price: self.manual_gross_price.map(coerce_amount),
        }
    }
}

impl Default for PricingInputs {
    fn default() -> Self {
        InputDefaults::default().inputs()
    }
}

// =============================================================================
// Defaults
// =============================================================================

/// Default field values, used at startup and restored by reset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputDefaults {
    pub source_cost: f64,
    pub exchange_rate: f64,
    pub freight_multiplier: f64,
    pub margin_percent: f64,
    pub tax_percent: f64,
}

impl Default for InputDefaults {
    /// The stock configuration: a 1 USD item at 0.73 USD→GBP with 20%
    /// freight, priced for a 40% margin under 20% VAT.
    fn default() -> Self {
        InputDefaults {
            source_cost: 1.0,
            exchange_rate: 0.73,
            freight_multiplier: 1.2,
            margin_percent: 40.0,
            tax_percent: 20.0,
        }
    }
}

impl InputDefaults {
    /// Expands the defaults into a full input snapshot (no manual gross).
    pub fn inputs(&self) -> PricingInputs {
        PricingInputs {
            source_cost: self.source_cost,
            exchange_rate: self.exchange_rate,
            freight_multiplier: self.freight_multiplier,
            margin_percent: self.margin_percent,
            tax_percent: self.tax_percent,
            manual_gross_price: None,
        }
    }
}

// =============================================================================
// Result
// =============================================================================

/// The derived prices for one computation. Immutable once produced.
///
/// ## Field Relationships
/// ```text
/// source_cost × exchange_rate × freight_multiplier
///        │ ceil to cents
///        ▼
///    net_cost ──► sell_net ──► gross_raw ──► final_price (.95 grid)
///                  │  margin or                │
///                  │  manual gross             │ reverse tax
///                  ▼                           ▼
///                profit                   final_profit
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Converted cost, rounded up to 2 decimals. Never negative.
    pub net_cost: f64,

    /// Pre-tax sell price derived from the driving value.
    pub sell_net: f64,

    /// Sell price with tax applied, not yet on the `.95` grid.
    pub gross_raw: f64,

    /// `gross_raw` rounded up to the nearest `.95` price point.
    pub final_price: f64,

    /// `sell_net - net_cost`. Since `sell_net` is the tax-reversed image
    /// of the driving gross value, this is also the profit implied by
    /// whatever gross figure is displayed.
    pub profit: f64,

    /// Profit at the shelf price: `final_price / (1 + tax) - net_cost`.
    pub final_profit: f64,

    /// `profit / net_cost × 100`, or 0 when the net cost is zero.
    pub markup_percent: f64,

    /// Margin implied by a manual gross price, clamped to `[0, 99]`.
    /// Only populated by reverse computations.
    pub implied_margin_percent: Option<f64>,
}

impl PricingResult {
    /// The final price as a plain 2-decimal string, no currency symbol.
    ///
    /// This is the exact payload handed to the clipboard-like echo sink.
    ///
    /// ## Example
    /// ```rust
    /// use pricepoint_core::{compute_forward, PricingInputs};
    ///
    /// let result = compute_forward(&PricingInputs::default());
    /// assert_eq!(result.clipboard_text(), "1.95");
    /// ```
    pub fn clipboard_text(&self) -> String {
        format!("{:.2}", self.final_price)
    }

    /// True when the final price sits on the `.95` grid. Holds for every
    /// result the engine produces; exposed for sanity checks.
    pub fn final_price_on_grid(&self) -> bool {
        round_up_to_ninety_five(self.final_price) == self.final_price
    }
}

// =============================================================================
// Raw Input Coercion
// =============================================================================

/// Coerces a raw numeric value onto the calculator's input domain.
///
/// NaN, infinities, and negative values all become `0.0`. Inputs are
/// declared non-negative; a negative cost or rate would otherwise leak a
/// negative net cost into the result record.
pub fn coerce_amount(raw: f64) -> f64 {
    if raw.is_finite() && raw > 0.0 {
        raw
    } else {
        0.0
    }
}

/// Parses field text into an amount, coercing anything malformed to `0.0`.
///
/// The analog of reading a numeric input field: surrounding whitespace is
/// ignored, and text that is empty, mid-edit (`"1."` parses, `"."` does
/// not), or junk simply contributes zero.
///
/// ## Example
/// ```rust
/// use pricepoint_core::types::parse_amount;
///
/// assert_eq!(parse_amount("0.73"), 0.73);
/// assert_eq!(parse_amount("  40 "), 40.0);
/// assert_eq!(parse_amount(""), 0.0);
/// assert_eq!(parse_amount("abc"), 0.0);
/// assert_eq!(parse_amount("-2"), 0.0);
/// assert_eq!(parse_amount("NaN"), 0.0);
/// ```
pub fn parse_amount(text: &str) -> f64 {
    text.trim().parse::<f64>().map_or(0.0, coerce_amount)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_amount() {
        assert_eq!(coerce_amount(1.5), 1.5);
        assert_eq!(coerce_amount(0.0), 0.0);
        assert_eq!(coerce_amount(-0.01), 0.0);
        assert_eq!(coerce_amount(f64::NAN), 0.0);
        assert_eq!(coerce_amount(f64::INFINITY), 0.0);
        assert_eq!(coerce_amount(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_parse_amount_accepts_plain_numbers() {
        assert_eq!(parse_amount("0.73"), 0.73);
        assert_eq!(parse_amount("1.2"), 1.2);
        assert_eq!(parse_amount(" 20 "), 20.0);
    }

    #[test]
    fn test_parse_amount_coerces_junk_to_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("   "), 0.0);
        assert_eq!(parse_amount("."), 0.0);
        assert_eq!(parse_amount("1,95"), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("-5"), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
    }

    #[test]
    fn test_sanitized_clears_bad_fields() {
        let inputs = PricingInputs {
            source_cost: f64::NAN,
            exchange_rate: -0.5,
            freight_multiplier: f64::INFINITY,
            margin_percent: 40.0,
            tax_percent: 20.0,
            manual_gross_price: Some(f64::NAN),
        };
        let clean = inputs.sanitized();
        assert_eq!(clean.source_cost, 0.0);
        assert_eq!(clean.exchange_rate, 0.0);
        assert_eq!(clean.freight_multiplier, 0.0);
        assert_eq!(clean.margin_percent, 40.0);
        assert_eq!(clean.manual_gross_price, Some(0.0));
    }

    #[test]
    fn test_defaults_round_trip_into_inputs() {
        let inputs = PricingInputs::default();
        assert_eq!(inputs.exchange_rate, 0.73);
        assert_eq!(inputs.margin_percent, 40.0);
        assert_eq!(inputs.manual_gross_price, None);
    }

    #[test]
    fn test_result_serializes_with_snake_case_fields() {
        let result = crate::compute_forward(&PricingInputs::default());
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("net_cost").is_some());
        assert!(json.get("final_price").is_some());
        assert!(json.get("implied_margin_percent").is_some());
    }
}
