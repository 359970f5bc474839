//! # Pricing Engine
//!
//! The two computations at the heart of the calculator.
//!
//! ## Forward and Reverse Flows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  FORWARD: margin drives price                                       │
//! │                                                                     │
//! │  cost ── × rate ── × freight ── ceil₂ ──► net_cost                  │
//! │                                              │ ÷ (1 - margin)       │
//! │                                              ▼                      │
//! │                                          sell_net                   │
//! │                                              │ × (1 + tax)          │
//! │                                              ▼                      │
//! │                                          gross_raw ── .95 ceiling ──► final_price
//! │                                                                     │
//! │  REVERSE: a chosen price drives margin                              │
//! │                                                                     │
//! │  manual gross ── ÷ (1 + tax) ──► sell_net ──► implied margin        │
//! │       │                                        (clamped to [0,99])  │
//! │       └── .95 ceiling ──► final_price                               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Totality
//! Both entry points are total: every division is guarded, inputs are
//! sanitized first, and any degenerate configuration (margin ≥ 100%, a
//! zero net cost, a zero sell price) substitutes `0.0` instead of
//! producing NaN, infinity, or a panic.

use crate::rounding::{round_up_to_cents, round_up_to_ninety_five};
use crate::types::{PricingInputs, PricingResult};
use crate::{IMPLIED_MARGIN_MAX, IMPLIED_MARGIN_MIN};

// =============================================================================
// Forward: margin → price
// =============================================================================

/// Derives a recommended retail price from a target margin.
///
/// ## Steps
/// 1. Convert the cost and apply freight, then round UP to whole cents.
/// 2. Divide by the margin complement to get the pre-tax sell price.
///    A margin at or above 100% has no complement to divide by; the
///    sell price collapses to zero instead.
/// 3. Apply tax, then climb to the next `.95` price point.
///
/// ## Example
/// ```rust
/// use pricepoint_core::{compute_forward, PricingInputs};
///
/// let result = compute_forward(&PricingInputs::default());
/// assert_eq!(result.net_cost, 0.88);
/// assert_eq!(result.final_price, 1.95);
/// assert_eq!(result.implied_margin_percent, None);
/// ```
pub fn compute_forward(inputs: &PricingInputs) -> PricingResult {
    let inputs = inputs.sanitized();

    let net_cost =
        round_up_to_cents(inputs.source_cost * inputs.exchange_rate * inputs.freight_multiplier);

    let margin = inputs.margin_percent / 100.0;
    let sell_net = if margin >= 1.0 {
        0.0
    } else {
        net_cost / (1.0 - margin)
    };

    let tax_factor = 1.0 + inputs.tax_percent / 100.0;
    let gross_raw = sell_net * tax_factor;
    let final_price = round_up_to_ninety_five(gross_raw);

    let profit = sell_net - net_cost;
    let final_profit = final_price / tax_factor - net_cost;
    let markup_percent = if net_cost == 0.0 {
        0.0
    } else {
        profit / net_cost * 100.0
    };

    PricingResult {
        net_cost,
        sell_net,
        gross_raw,
        final_price,
        profit,
        final_profit,
        markup_percent,
        implied_margin_percent: None,
    }
}

// =============================================================================
// Reverse: price → margin
// =============================================================================

/// Back-derives the implied margin from a manually chosen gross price.
///
/// The manual gross is taken as the displayed (unrounded) gross, so the
/// pre-tax sell price is recovered by reversing tax out of it. The
/// implied margin is clamped to `[0, 99]` before it is handed back as
/// the new driving margin value; see [`crate::IMPLIED_MARGIN_MAX`].
///
/// ## Example
/// ```rust
/// use pricepoint_core::{compute_reverse, PricingInputs};
///
/// let result = compute_reverse(&PricingInputs::default(), 2.95);
/// // 2.95 / 1.2 = 2.4583 net of tax, vs a 0.88 net cost
/// let implied = result.implied_margin_percent.unwrap();
/// assert!((implied - 64.2).abs() < 0.1);
/// ```
pub fn compute_reverse(inputs: &PricingInputs, manual_gross: f64) -> PricingResult {
    let inputs = inputs.sanitized();
    let manual_gross = crate::types::coerce_amount(manual_gross);

    let net_cost =
        round_up_to_cents(inputs.source_cost * inputs.exchange_rate * inputs.freight_multiplier);

    let tax_factor = 1.0 + inputs.tax_percent / 100.0;
    let sell_net = manual_gross / tax_factor;
    let gross_raw = manual_gross;
    let final_price = round_up_to_ninety_five(manual_gross);

    let implied_margin = if sell_net == 0.0 {
        0.0
    } else {
        ((sell_net - net_cost) / sell_net * 100.0).clamp(IMPLIED_MARGIN_MIN, IMPLIED_MARGIN_MAX)
    };

    let profit = sell_net - net_cost;
    let final_profit = final_price / tax_factor - net_cost;
    let markup_percent = if net_cost == 0.0 {
        0.0
    } else {
        profit / net_cost * 100.0
    };

    PricingResult {
        net_cost,
        sell_net,
        gross_raw,
        final_price,
        profit,
        final_profit,
        markup_percent,
        implied_margin_percent: Some(implied_margin),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
