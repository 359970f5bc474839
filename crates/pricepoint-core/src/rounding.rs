//! # Rounding Module
//!
//! Ceiling rounding for retail prices.
//!
//! ## The Two Grids
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  COST SIDE: round UP to whole cents                                 │
//! │                                                                     │
//! │    0.876  ──►  0.88        (never round a cost down: a supplier     │
//! │    0.8701 ──►  0.88         invoice is paid in full cents)          │
//! │    0.88   ──►  0.88                                                 │
//! │                                                                     │
//! │  PRICE SIDE: round UP to the next .95 price point                   │
//! │                                                                     │
//! │    1.76   ──►  1.95        (psychological price points: shelf       │
//! │    1.96   ──►  2.95         prices end in .95)                      │
//! │   10.00   ──► 10.95        (an exact integer is NOT a price point)  │
//! │    1.95   ──►  1.95        (already on the grid: pass through)      │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Floating Point Discipline
//! Both functions tolerate ordinary binary representation noise. Without
//! a guard, `0.07 * 100.0` evaluates to `7.000000000000001` and a naive
//! `ceil` would bump an exact 7-cent amount to 8 cents. `ROUND_EPS`
//! absorbs that noise; it is far smaller than any genuine sub-cent
//! remainder (`0.001 * 100.0 = 0.1`), so real fractions still round up.

// =============================================================================
// Epsilon
// =============================================================================

/// Tolerance for binary floating-point representation noise.
///
/// Must sit well below the smallest meaningful remainder (a tenth of a
/// cent, `1e-1` in cent space) and well above accumulated f64 noise,
/// which reaches order `1e-8` in cent space for amounts up to a million.
const ROUND_EPS: f64 = 1e-6;

// =============================================================================
// Cent Ceiling
// =============================================================================

/// Rounds `amount` UP to 2 decimal places (0.876 → 0.88).
///
/// Returns the smallest value with at most 2 decimal digits that is
/// greater than or equal to `amount`, computed as `ceil(amount × 100) / 100`
/// with an epsilon guard so values already exact at 2 decimals are not
/// bumped up a cent by representation error.
///
/// Degenerate inputs (negative, NaN, infinities) floor at `0.0`; the net
/// cost this feeds is never negative.
///
/// ## Example
/// ```rust
/// use pricepoint_core::rounding::round_up_to_cents;
///
/// assert_eq!(round_up_to_cents(0.876), 0.88);
/// assert_eq!(round_up_to_cents(0.88), 0.88);   // already exact: unchanged
/// assert_eq!(round_up_to_cents(0.8701), 0.88); // any remainder rounds up
/// assert_eq!(round_up_to_cents(0.0), 0.0);
/// ```
pub fn round_up_to_cents(amount: f64) -> f64 {
    if !amount.is_finite() {
        return 0.0;
    }

    let cents = (amount * 100.0 - ROUND_EPS).ceil();
    if cents <= 0.0 {
        return 0.0;
    }
    cents / 100.0
}

// =============================================================================
// Price Point Ceiling
// =============================================================================

/// Rounds `amount` UP to the nearest value ending in `.95`
/// (1.76 → 1.95, 1.96 → 2.95).
///
/// ## Boundary Policy
/// This is a strict ceiling onto the `.95` grid:
/// - a fractional part of exactly `0` still rounds up to that whole
///   number's price point (`10.00` → `10.95`, never a pass-through)
/// - a value already ending in `.95` is on the grid and is returned
///   unchanged (`1.95` → `1.95`), which makes the function idempotent
///
/// Degenerate inputs (negative, NaN, infinities) are treated as `0.0`,
/// so the smallest possible price point `0.95` comes back.
///
/// ## Example
/// ```rust
/// use pricepoint_core::rounding::round_up_to_ninety_five;
///
/// assert_eq!(round_up_to_ninety_five(1.76), 1.95);
/// assert_eq!(round_up_to_ninety_five(1.96), 2.95);
/// assert_eq!(round_up_to_ninety_five(10.0), 10.95);
/// assert_eq!(round_up_to_ninety_five(1.95), 1.95);
/// ```
pub fn round_up_to_ninety_five(amount: f64) -> f64 {
    let amount = if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    };

    let whole = amount.floor();
    let frac = amount - whole;

    // The epsilon lets 1.95 (whose fraction evaluates to 0.95000...0002)
    // stay on its own grid point instead of jumping to 2.95.
    if frac <= 0.95 + ROUND_EPS {
        whole + 0.95
    } else {
        whole + 1.95
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cents_rounds_up() {
        assert_eq!(round_up_to_cents(0.876), 0.88);
        assert_eq!(round_up_to_cents(1.001), 1.01);
        assert_eq!(round_up_to_cents(2.999), 3.0);
    }

    #[test]
    fn test_cents_exact_values_unchanged() {
        // Each of these is exact at 2 decimals; noise in `x * 100.0`
        // must not bump them a cent.
        for exact in [0.07, 0.29, 0.88, 1.13, 10.0, 17.95, 123.45] {
            assert_eq!(round_up_to_cents(exact), exact, "bumped {exact}");
        }
    }

    #[test]
    fn test_cents_degenerate_inputs() {
        assert_eq!(round_up_to_cents(0.0), 0.0);
        assert_eq!(round_up_to_cents(-3.5), 0.0);
        assert_eq!(round_up_to_cents(f64::NAN), 0.0);
        assert_eq!(round_up_to_cents(f64::INFINITY), 0.0);
        assert_eq!(round_up_to_cents(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_cents_idempotent() {
        for x in [0.876, 1.001, 17.949, 0.0] {
            let once = round_up_to_cents(x);
            assert_eq!(round_up_to_cents(once), once);
        }
    }

    #[test]
    fn test_ninety_five_basic() {
        assert_eq!(round_up_to_ninety_five(1.76), 1.95);
        assert_eq!(round_up_to_ninety_five(1.96), 2.95);
        assert_eq!(round_up_to_ninety_five(0.5), 0.95);
    }

    #[test]
    fn test_ninety_five_integer_still_rounds_up() {
        // An exact integer is below its own .95 point, so it climbs to it.
        assert_eq!(round_up_to_ninety_five(10.0), 10.95);
        assert_eq!(round_up_to_ninety_five(2.0), 2.95);
        assert_eq!(round_up_to_ninety_five(0.0), 0.95);
    }

    #[test]
    fn test_ninety_five_boundary_pass_through() {
        // The one pass-through case: already on the grid.
        assert_eq!(round_up_to_ninety_five(1.95), 1.95);
        assert_eq!(round_up_to_ninety_five(0.95), 0.95);
        assert_eq!(round_up_to_ninety_five(10.95), 10.95);
    }

    #[test]
    fn test_ninety_five_just_past_boundary() {
        assert_eq!(round_up_to_ninety_five(1.951), 2.95);
        assert_eq!(round_up_to_ninety_five(0.96), 1.95);
    }

    #[test]
    fn test_ninety_five_degenerate_inputs() {
        assert_eq!(round_up_to_ninety_five(f64::NAN), 0.95);
        assert_eq!(round_up_to_ninety_five(f64::INFINITY), 0.95);
        assert_eq!(round_up_to_ninety_five(-4.2), 0.95);
    }
}

// =============================================================================
// Property Tests
// =============================================================================

#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn cents_is_a_ceiling(amount in 0.0f64..1_000_000.0) {
            let rounded = round_up_to_cents(amount);
            // Never below the input (modulo the noise tolerance), never
            // more than a cent above it.
            prop_assert!(rounded >= amount - 1e-6);
            prop_assert!(rounded - amount < 0.01 + 1e-6);
        }

        #[test]
        fn cents_is_idempotent(amount in 0.0f64..1_000_000.0) {
            let once = round_up_to_cents(amount);
            prop_assert_eq!(round_up_to_cents(once), once);
        }

        #[test]
        fn ninety_five_lands_on_the_grid(amount in 0.0f64..1_000_000.0) {
            let price = round_up_to_ninety_five(amount);
            let frac = price - price.floor();
            prop_assert!((frac - 0.95).abs() < 1e-6, "fraction was {frac}");
            prop_assert!(price >= amount - 1e-6);
            prop_assert!(price - amount <= 1.0 + 1e-6);
        }

        #[test]
        fn ninety_five_is_idempotent(amount in 0.0f64..1_000_000.0) {
            let once = round_up_to_ninety_five(amount);
            prop_assert_eq!(round_up_to_ninety_five(once), once);
        }
    }
}
