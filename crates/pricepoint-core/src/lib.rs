//! # pricepoint-core: Pure Pricing Logic for PricePoint
//!
//! This crate is the **heart** of PricePoint. It turns a handful of raw
//! numeric field values into a recommended retail price and back again,
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      PricePoint Architecture                        │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                    Front end (apps/cli)                       │  │
//! │  │    flag parsing ──► rendering ──► clipboard echo ──► REPL     │  │
//! │  └─────────────────────────────┬─────────────────────────────────┘  │
//! │                                │ field edits / focus / reset         │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐  │
//! │  │              ★ pricepoint-core (THIS CRATE) ★                 │  │
//! │  │                                                               │  │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐     │  │
//! │  │   │ rounding │  │  types   │  │  engine  │  │ session  │     │  │
//! │  │   │ .95 grid │  │  Inputs  │  │ forward  │  │   Mode   │     │  │
//! │  │   │ cent ceil│  │  Result  │  │ reverse  │  │  machine │     │  │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────┘     │  │
//! │  │                                                               │  │
//! │  │   NO I/O • NO CLOCK • NO ENVIRONMENT • PURE FUNCTIONS         │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`rounding`] - Ceiling rounding to whole cents and to the `.95` grid
//! - [`types`] - Input/result records and raw-input coercion
//! - [`engine`] - Forward (margin to price) and reverse (price to margin)
//! - [`session`] - Mode state machine owning field text and echo dedupe
//! - [`error`] - Typed error for field-name parsing
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every computation is deterministic
//! 2. **Total Functions**: any finite or non-finite input produces a
//!    result, never a panic, never NaN in the output record
//! 3. **Coerce, Don't Reject**: malformed field text becomes `0.0`; the
//!    calculator always renders something
//!
//! ## Example Usage
//!
//! ```rust
//! use pricepoint_core::{compute_forward, PricingInputs};
//!
//! let inputs = PricingInputs {
//!     source_cost: 1.0,
//!     exchange_rate: 0.73,
//!     freight_multiplier: 1.2,
//!     margin_percent: 40.0,
//!     tax_percent: 20.0,
//!     manual_gross_price: None,
//! };
//!
//! let result = compute_forward(&inputs);
//! assert_eq!(result.net_cost, 0.88);
//! assert_eq!(result.final_price, 1.95);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;
pub mod rounding;
pub mod session;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use pricepoint_core::Session` instead of
// `use pricepoint_core::session::Session`

pub use engine::{compute_forward, compute_reverse};
pub use error::FieldError;
pub use rounding::{round_up_to_cents, round_up_to_ninety_five};
pub use session::{Field, Mode, Recompute, Session};
pub use types::{InputDefaults, PricingInputs, PricingResult};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Upper clamp for the implied margin written back into the margin field.
///
/// ## Why 99 and not 100?
/// A margin of 100% makes the forward formula divide by zero
/// (`net_cost / (1 - 1.0)`). Clamping the write-back below 100 guarantees
/// that leaving reverse mode never plants a degenerate driving value in
/// the margin field.
pub const IMPLIED_MARGIN_MAX: f64 = 99.0;

/// Lower clamp for the implied margin written back into the margin field.
///
/// A manual price below cost would otherwise display a negative margin;
/// the margin field only holds values in `[0, IMPLIED_MARGIN_MAX]`.
pub const IMPLIED_MARGIN_MIN: f64 = 0.0;
