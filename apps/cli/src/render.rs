//! # Rendering
//!
//! Text rendering of a pricing result: a summary block for every
//! recompute, and a step-by-step breakdown showing how the numbers were
//! derived (the terminal analog of a "show your working" panel).

use pricepoint_core::{Mode, PricingInputs, PricingResult};

use crate::config::{format_percent, DisplayConfig};

/// The summary block printed after every recompute.
pub fn summary(config: &DisplayConfig, mode: Mode, result: &PricingResult) -> String {
    let mut out = String::new();

    push_row(&mut out, "Net cost", &config.format_target(result.net_cost));
    push_row(&mut out, "Sell net", &config.format_target(result.sell_net));
    push_row(
        &mut out,
        "Gross (unrounded)",
        &config.format_target(result.gross_raw),
    );
    push_row(&mut out, "RRP", &config.format_target(result.final_price));
    push_row(&mut out, "Profit", &config.format_target(result.profit));
    push_row(
        &mut out,
        "Profit at RRP",
        &config.format_target(result.final_profit),
    );
    push_row(&mut out, "Markup", &format_percent(result.markup_percent));

    if let Some(implied) = result.implied_margin_percent {
        push_row(&mut out, "Implied margin", &format_percent(implied));
    }

    let mode_label = match mode {
        Mode::Forward => "forward (margin drives price)",
        Mode::Reverse => "reverse (price drives margin)",
        Mode::Editing => "editing price",
    };
    push_row(&mut out, "Mode", mode_label);

    out
}

/// The step-by-step working for a forward computation.
pub fn breakdown(config: &DisplayConfig, inputs: &PricingInputs, result: &PricingResult) -> String {
    let converted = inputs.source_cost * inputs.exchange_rate;
    let with_freight = converted * inputs.freight_multiplier;
    let margin_complement = 1.0 - inputs.margin_percent / 100.0;
    let tax_factor = 1.0 + inputs.tax_percent / 100.0;

    let mut out = String::from("Calculation steps:\n");

    out.push_str(&format!(
        "  convert    {} x {:.4} = {:.4}\n",
        config.format_source(inputs.source_cost),
        inputs.exchange_rate,
        converted,
    ));
    out.push_str(&format!(
        "  freight    {converted:.4} x {:.2} = {with_freight:.4}\n",
        inputs.freight_multiplier,
    ));
    out.push_str(&format!(
        "  net cost   round up to cents -> {}\n",
        config.format_target(result.net_cost),
    ));

    match result.implied_margin_percent {
        None => {
            out.push_str(&format!(
                "  margin     {} / {margin_complement:.2} = {}\n",
                config.format_target(result.net_cost),
                config.format_target(result.sell_net),
            ));
            out.push_str(&format!(
                "  tax        {} x {tax_factor:.2} = {}\n",
                config.format_target(result.sell_net),
                config.format_target(result.gross_raw),
            ));
        }
        Some(implied) => {
            out.push_str(&format!(
                "  un-tax     {} / {tax_factor:.2} = {}\n",
                config.format_target(result.gross_raw),
                config.format_target(result.sell_net),
            ));
            out.push_str(&format!(
                "  margin     ({} - {}) / {} = {}\n",
                config.format_target(result.sell_net),
                config.format_target(result.net_cost),
                config.format_target(result.sell_net),
                format_percent(implied),
            ));
        }
    }

    out.push_str(&format!(
        "  RRP        round up to .95 -> {}\n",
        config.format_target(result.final_price),
    ));

    out
}

fn push_row(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("  {label:<18} {value}\n"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricepoint_core::{compute_forward, compute_reverse};

    #[test]
    fn test_summary_forward_has_no_implied_margin_row() {
        let config = DisplayConfig::default();
        let inputs = PricingInputs::default();
        let result = compute_forward(&inputs);
        let text = summary(&config, Mode::Forward, &result);

        assert!(text.contains("RRP"));
        assert!(text.contains("£1.95"));
        assert!(text.contains("forward"));
        assert!(!text.contains("Implied margin"));
    }

    #[test]
    fn test_summary_reverse_shows_implied_margin() {
        let config = DisplayConfig::default();
        let inputs = PricingInputs::default();
        let result = compute_reverse(&inputs, 2.95);
        let text = summary(&config, Mode::Reverse, &result);

        assert!(text.contains("Implied margin"));
        assert!(text.contains("64.20%"));
        assert!(text.contains("reverse"));
    }

    #[test]
    fn test_breakdown_forward_walks_the_chain() {
        let config = DisplayConfig::default();
        let inputs = PricingInputs::default();
        let result = compute_forward(&inputs);
        let text = breakdown(&config, &inputs, &result);

        assert!(text.contains("convert"));
        assert!(text.contains("freight"));
        assert!(text.contains("margin"));
        assert!(text.contains("£0.88"));
        assert!(text.contains("£1.95"));
    }

    #[test]
    fn test_breakdown_reverse_reverses_tax() {
        let config = DisplayConfig::default();
        let inputs = PricingInputs::default();
        let result = compute_reverse(&inputs, 2.95);
        let text = breakdown(&config, &inputs, &result);

        assert!(text.contains("un-tax"));
        assert!(text.contains("64.20%"));
    }
}
