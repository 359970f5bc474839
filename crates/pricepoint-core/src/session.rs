//! # Calculator Session
//!
//! The state machine deciding which input currently owns the derived
//! fields, plus the session-scoped echo dedupe memo.
//!
//! ## Mode Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Session State Machine                         │
//! │                                                                     │
//! │            edit cost/rate/freight/margin/tax                        │
//! │           ┌─────────────────────────────────┐                       │
//! │           ▼                                 │                       │
//! │      ┌─────────┐  focus gross          ┌────┴────┐                  │
//! │      │ FORWARD │──────────────────────►│ EDITING │◄─┐ input gross   │
//! │      └─────────┘                       └────┬────┘──┘ (live reverse)│
//! │           ▲                                 │                       │
//! │           │ blur, gross empty               │ blur, gross non-empty │
//! │           │ (also: reset, from any mode)    ▼                       │
//! │           │                            ┌─────────┐                  │
//! │           └────────────────────────────┤ REVERSE │                  │
//! │                 edit any other field   └─────────┘                  │
//! │                                                                     │
//! │  While EDITING, edits to the other five fields are SUPPRESSED:      │
//! │  recomputing would overwrite the text the user is typing into.      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why the session owns field TEXT, not numbers
//! The calculator reacts to live input surfaces where `"1."` and `""`
//! are legitimate transient states. The session keeps the raw text and
//! takes a coerced numeric snapshot at each recompute, exactly like the
//! input fields it mirrors. Derived write-backs (the implied margin, the
//! normalized gross) are themselves written as text.

use serde::{Deserialize, Serialize};

use crate::engine::{compute_forward, compute_reverse};
use crate::error::FieldError;
use crate::types::{parse_amount, InputDefaults, PricingInputs, PricingResult};

// =============================================================================
// Mode
// =============================================================================

/// Which input currently drives the derived fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// The margin field drives; prices are derived.
    Forward,
    /// A manually chosen gross price drives; the margin is derived.
    Reverse,
    /// The manual-gross field has input focus. Reverse computation runs
    /// live, and edits to every other field are suppressed.
    Editing,
}

// =============================================================================
// Fields
// =============================================================================

/// The five scalar input fields (the manual gross field is handled by
/// its own focus/input/blur events).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    SourceCost,
    ExchangeRate,
    FreightMultiplier,
    MarginPercent,
    TaxPercent,
}

impl Field {
    /// The canonical short name, as accepted by [`Field::from_str`].
    pub fn name(&self) -> &'static str {
        match self {
            Field::SourceCost => "cost",
            Field::ExchangeRate => "rate",
            Field::FreightMultiplier => "freight",
            Field::MarginPercent => "margin",
            Field::TaxPercent => "tax",
        }
    }
}

impl std::str::FromStr for Field {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cost" => Ok(Field::SourceCost),
            "rate" => Ok(Field::ExchangeRate),
            "freight" | "multiplier" => Ok(Field::FreightMultiplier),
            "margin" => Ok(Field::MarginPercent),
            "tax" | "vat" => Ok(Field::TaxPercent),
            other => Err(FieldError::Unknown(other.to_string())),
        }
    }
}

// =============================================================================
// Recompute Record
// =============================================================================

/// The outcome of one accepted session event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recompute {
    /// Mode after the event.
    pub mode: Mode,

    /// The freshly derived prices.
    pub result: PricingResult,

    /// The plain final price to push at the echo sink, present only
    /// when it differs from the previously echoed value.
    pub echo: Option<String>,
}

// =============================================================================
// Session
// =============================================================================

/// One calculator session: raw field text, the current mode, and the
/// "last echoed" memo used to suppress duplicate clipboard writes.
///
/// ## Invariants
/// - Exactly one of {margin field, manual gross field} is the driving
///   value; the other only ever holds derived write-backs.
/// - `last_echoed` is session-scoped and cleared by [`Session::reset`],
///   so a reset can re-emit the same price.
/// - Events never fail; a suppressed edit returns `None` and changes
///   nothing but the stored text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    source_cost: String,
    exchange_rate: String,
    freight_multiplier: String,
    margin_percent: String,
    tax_percent: String,
    manual_gross: String,
    mode: Mode,
    last_echoed: Option<String>,
    defaults: InputDefaults,
}

impl Session {
    /// Creates a session with the given defaults, in forward mode.
    ///
    /// The caller normally follows up with [`Session::refresh`] to
    /// produce the startup result.
    pub fn new(defaults: InputDefaults) -> Self {
        let mut session = Session {
            source_cost: String::new(),
            exchange_rate: String::new(),
            freight_multiplier: String::new(),
            margin_percent: String::new(),
            tax_percent: String::new(),
            manual_gross: String::new(),
            mode: Mode::Forward,
            last_echoed: None,
            defaults,
        };
        session.restore_defaults();
        session
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Raw text of a scalar field.
    pub fn field_text(&self, field: Field) -> &str {
        match field {
            Field::SourceCost => &self.source_cost,
            Field::ExchangeRate => &self.exchange_rate,
            Field::FreightMultiplier => &self.freight_multiplier,
            Field::MarginPercent => &self.margin_percent,
            Field::TaxPercent => &self.tax_percent,
        }
    }

    /// Raw text of the manual gross field.
    pub fn gross_text(&self) -> &str {
        &self.manual_gross
    }

    /// Coerced numeric snapshot of the current field state.
    pub fn snapshot(&self) -> PricingInputs {
        let gross = self.manual_gross.trim();
        PricingInputs {
            source_cost: parse_amount(&self.source_cost),
            exchange_rate: parse_amount(&self.exchange_rate),
            freight_multiplier: parse_amount(&self.freight_multiplier),
            margin_percent: parse_amount(&self.margin_percent),
            tax_percent: parse_amount(&self.tax_percent),
            manual_gross_price: if gross.is_empty() {
                None
            } else {
                Some(parse_amount(gross))
            },
        }
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// An edit to one of the five scalar fields.
    ///
    /// ## Behavior
    /// - Not editing the gross field: the margin (or whichever field was
    ///   touched) drives again; forward recompute, mode = `Forward`.
    /// - Gross field focused (`Editing`): the text is stored but the
    ///   recompute is SUPPRESSED, returning `None`. Recomputing here
    ///   would clobber the gross field mid-keystroke.
    pub fn edit(&mut self, field: Field, text: &str) -> Option<Recompute> {
        match field {
            Field::SourceCost => self.source_cost = text.to_string(),
            Field::ExchangeRate => self.exchange_rate = text.to_string(),
            Field::FreightMultiplier => self.freight_multiplier = text.to_string(),
            Field::MarginPercent => self.margin_percent = text.to_string(),
            Field::TaxPercent => self.tax_percent = text.to_string(),
        }

        if self.mode == Mode::Editing {
            return None;
        }

        self.mode = Mode::Forward;
        self.manual_gross.clear();
        Some(self.run_forward())
    }

    /// The manual gross field gained input focus.
    pub fn focus_gross(&mut self) {
        self.mode = Mode::Editing;
    }

    /// An input event on the focused manual gross field: live reverse
    /// feedback while the user types.
    pub fn input_gross(&mut self, text: &str) -> Recompute {
        self.manual_gross = text.to_string();
        self.mode = Mode::Editing;
        self.run_reverse()
    }

    /// The manual gross field lost input focus.
    ///
    /// An empty field abandons the override and falls back to forward
    /// mode; otherwise the text is normalized to 2 decimals and reverse
    /// mode becomes sticky.
    pub fn blur_gross(&mut self) -> Recompute {
        if self.manual_gross.trim().is_empty() {
            self.manual_gross.clear();
            self.mode = Mode::Forward;
            return self.run_forward();
        }

        let gross = parse_amount(&self.manual_gross);
        self.manual_gross = format!("{gross:.2}");
        self.mode = Mode::Reverse;
        self.run_reverse()
    }

    /// Explicit reset: default field text, no override, forward mode,
    /// and a cleared echo memo so the same price can be re-emitted.
    pub fn reset(&mut self) -> Recompute {
        self.restore_defaults();
        self.manual_gross.clear();
        self.mode = Mode::Forward;
        self.last_echoed = None;
        self.run_forward()
    }

    /// Recomputes from current state without changing it, respecting the
    /// current mode. Used once at startup and by display refreshes.
    pub fn refresh(&mut self) -> Recompute {
        match self.mode {
            Mode::Forward => self.run_forward(),
            Mode::Reverse | Mode::Editing => self.run_reverse(),
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn restore_defaults(&mut self) {
        self.source_cost = trim_number(self.defaults.source_cost);
        self.exchange_rate = trim_number(self.defaults.exchange_rate);
        self.freight_multiplier = trim_number(self.defaults.freight_multiplier);
        self.margin_percent = trim_number(self.defaults.margin_percent);
        self.tax_percent = trim_number(self.defaults.tax_percent);
    }

    fn run_forward(&mut self) -> Recompute {
        let result = compute_forward(&self.snapshot());
        self.finish(Mode::Forward, result)
    }

    fn run_reverse(&mut self) -> Recompute {
        let snapshot = self.snapshot();
        let gross = snapshot.manual_gross_price;
        let result = compute_reverse(&snapshot, gross.unwrap_or(0.0));

        // The implied margin becomes the new driving margin value, so
        // forward mode resumes consistently once the override is gone.
        // An empty gross field writes nothing back: clearing the text
        // must not wipe out the margin it is about to hand control to.
        if gross.is_some() {
            if let Some(implied) = result.implied_margin_percent {
                self.margin_percent = format!("{implied:.2}");
            }
        }

        self.finish(self.mode, result)
    }

    fn finish(&mut self, mode: Mode, result: PricingResult) -> Recompute {
        let text = result.clipboard_text();
        let echo = if self.last_echoed.as_deref() == Some(text.as_str()) {
            None
        } else {
            self.last_echoed = Some(text.clone());
            Some(text)
        };

        Recompute {
            mode,
            result,
            echo,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(InputDefaults::default())
    }
}

/// Formats a default value the way a person would type it ("0.73", "1",
/// "1.2"), trailing zeros trimmed.
fn trim_number(value: f64) -> String {
    let text = format!("{value}");
    if text == "-0" {
        "0".to_string()
    } else {
        text
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_is_forward_with_defaults() {
        let mut session = Session::default();
        assert_eq!(session.mode(), Mode::Forward);
        assert_eq!(session.field_text(Field::ExchangeRate), "0.73");
        assert_eq!(session.field_text(Field::MarginPercent), "40");

        let recompute = session.refresh();
        assert_eq!(recompute.result.final_price, 1.95);
        assert_eq!(recompute.echo.as_deref(), Some("1.95"));
    }

    #[test]
    fn test_scalar_edit_recomputes_forward() {
        let mut session = Session::default();
        session.refresh();

        let recompute = session.edit(Field::SourceCost, "2").unwrap();
        assert_eq!(recompute.mode, Mode::Forward);
        // 2 × 0.73 × 1.2 = 1.752 → 1.76 net cost
        assert_eq!(recompute.result.net_cost, 1.76);
    }

    #[test]
    fn test_malformed_edit_contributes_zero() {
        let mut session = Session::default();
        let recompute = session.edit(Field::SourceCost, "oops").unwrap();
        assert_eq!(recompute.result.net_cost, 0.0);
        assert_eq!(recompute.result.final_price, 0.95);
    }

    #[test]
    fn test_edits_suppressed_while_editing_gross() {
        let mut session = Session::default();
        session.refresh();
        session.focus_gross();

        assert!(session.edit(Field::SourceCost, "5").is_none());
        assert_eq!(session.mode(), Mode::Editing);
        // The text still landed, ready for the next recompute.
        assert_eq!(session.field_text(Field::SourceCost), "5");
    }

    #[test]
    fn test_live_gross_input_recomputes_reverse() {
        let mut session = Session::default();
        session.refresh();
        session.focus_gross();

        let recompute = session.input_gross("2.95");
        assert_eq!(recompute.mode, Mode::Editing);
        let implied = recompute.result.implied_margin_percent.unwrap();
        assert!((implied - 64.2).abs() < 0.1);
        // Write-back: the margin field now holds the implied margin.
        assert_eq!(session.field_text(Field::MarginPercent), "64.20");
    }

    #[test]
    fn test_blur_with_value_enters_reverse_and_normalizes() {
        let mut session = Session::default();
        session.refresh();
        session.focus_gross();
        session.input_gross("2.9");

        let recompute = session.blur_gross();
        assert_eq!(recompute.mode, Mode::Reverse);
        assert_eq!(session.mode(), Mode::Reverse);
        assert_eq!(session.gross_text(), "2.90");
    }

    #[test]
    fn test_blur_empty_falls_back_to_forward() {
        let mut session = Session::default();
        session.refresh();
        session.focus_gross();
        session.input_gross("2.95");
        session.focus_gross();
        session.input_gross("");

        let recompute = session.blur_gross();
        assert_eq!(recompute.mode, Mode::Forward);
        // The margin written back while reversing now drives forward.
        assert_eq!(session.field_text(Field::MarginPercent), "64.20");
        assert!(recompute.result.implied_margin_percent.is_none());
    }

    #[test]
    fn test_scalar_edit_after_reverse_returns_to_forward() {
        let mut session = Session::default();
        session.refresh();
        session.focus_gross();
        session.input_gross("2.95");
        session.blur_gross();
        assert_eq!(session.mode(), Mode::Reverse);

        let recompute = session.edit(Field::MarginPercent, "40").unwrap();
        assert_eq!(recompute.mode, Mode::Forward);
        assert_eq!(session.gross_text(), "");
    }

    #[test]
    fn test_echo_deduplicates_identical_prices() {
        let mut session = Session::default();
        let first = session.refresh();
        assert_eq!(first.echo.as_deref(), Some("1.95"));

        // Margin 40 → 41 keeps the final price on 1.95 for this cost.
        let second = session.edit(Field::MarginPercent, "41").unwrap();
        assert_eq!(second.result.final_price, 1.95);
        assert_eq!(second.echo, None);

        let third = session.edit(Field::MarginPercent, "70").unwrap();
        assert_eq!(third.echo.as_deref(), Some("3.95"));
    }

    #[test]
    fn test_reset_restores_defaults_and_echo_memo() {
        let mut session = Session::default();
        session.refresh();
        session.edit(Field::SourceCost, "9");
        session.focus_gross();
        session.input_gross("12.00");
        session.blur_gross();

        let recompute = session.reset();
        assert_eq!(recompute.mode, Mode::Forward);
        assert_eq!(session.field_text(Field::SourceCost), "1");
        assert_eq!(session.field_text(Field::MarginPercent), "40");
        assert_eq!(session.gross_text(), "");
        // The memo was cleared, so the stock price echoes again.
        assert_eq!(recompute.echo.as_deref(), Some("1.95"));
    }

    #[test]
    fn test_field_names_parse() {
        use std::str::FromStr;

        assert_eq!(Field::from_str("cost").unwrap(), Field::SourceCost);
        assert_eq!(Field::from_str("RATE").unwrap(), Field::ExchangeRate);
        assert_eq!(Field::from_str("vat").unwrap(), Field::TaxPercent);
        assert_eq!(
            Field::from_str("multiplier").unwrap(),
            Field::FreightMultiplier
        );
        assert!(Field::from_str("margn").is_err());
        for field in [
            Field::SourceCost,
            Field::ExchangeRate,
            Field::FreightMultiplier,
            Field::MarginPercent,
            Field::TaxPercent,
        ] {
            assert_eq!(Field::from_str(field.name()).unwrap(), field);
        }
    }
}
