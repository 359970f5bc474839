//! # pricepoint: Terminal Front End
//!
//! Thin orchestration layer over `pricepoint-core`.
//!
//! ## Two Ways In
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  One-shot                                                           │
//! │    pricepoint --cost 3.50 --margin 45                               │
//! │    pricepoint --gross 5.95          (reverse: price drives margin)  │
//! │    pricepoint --json                (result record as JSON)         │
//! │                                                                     │
//! │  Interactive                                                        │
//! │    pricepoint --interactive         (drives the full session        │
//! │                                      state machine; see repl.rs)    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod echo;
mod render;
mod repl;

use std::process::ExitCode;

use pricepoint_core::{compute_forward, compute_reverse, InputDefaults, Mode, PricingInputs};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::DisplayConfig;
use echo::spawn_echo;

const USAGE: &str = "\
pricepoint - retail price calculator

usage:
  pricepoint [flags]

flags:
  --cost <n>       item cost in the source currency
  --rate <n>       source -> target exchange rate
  --freight <n>    freight multiplier (1.0 = none)
  --margin <n>     target gross margin percent
  --tax <n>        tax percent applied to the net sell price
  --gross <n>      manually chosen gross price (reverse mode)
  --json           print the result record as JSON
  --no-copy        skip the clipboard echo
  -i, --interactive  start an interactive session
  -h, --help       show this help

environment:
  PRICEPOINT_COST / _RATE / _FREIGHT / _MARGIN / _TAX   default field values
  PRICEPOINT_SOURCE_SYMBOL / _TARGET_SYMBOL             display symbols
  RUST_LOG                                              log filter (default info)
";

/// Flag parsing failures.
#[derive(Debug, Error)]
enum CliError {
    #[error("unknown flag '{0}' (see --help)")]
    UnknownFlag(String),

    #[error("flag '{0}' expects a value")]
    MissingValue(String),
}

/// Parsed command line. Field overrides stay as raw text; the core's
/// coercion rules apply to them the same as to any other field input.
#[derive(Debug, Default)]
struct CliArgs {
    cost: Option<String>,
    rate: Option<String>,
    freight: Option<String>,
    margin: Option<String>,
    tax: Option<String>,
    gross: Option<String>,
    json: bool,
    no_copy: bool,
    interactive: bool,
    help: bool,
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> Result<CliArgs, CliError> {
    let mut args = CliArgs::default();

    while let Some(flag) = raw.next() {
        let mut value_for = |flag: &str| raw.next().ok_or(CliError::MissingValue(flag.to_string()));

        match flag.as_str() {
            "--cost" => args.cost = Some(value_for("--cost")?),
            "--rate" => args.rate = Some(value_for("--rate")?),
            "--freight" | "--multiplier" => args.freight = Some(value_for("--freight")?),
            "--margin" => args.margin = Some(value_for("--margin")?),
            "--tax" | "--vat" => args.tax = Some(value_for("--tax")?),
            "--gross" => args.gross = Some(value_for("--gross")?),
            "--json" => args.json = true,
            "--no-copy" => args.no_copy = true,
            "--interactive" | "-i" => args.interactive = true,
            "--help" | "-h" => args.help = true,
            other => return Err(CliError::UnknownFlag(other.to_string())),
        }
    }

    Ok(args)
}

/// Applies flag overrides on top of the configured defaults.
fn apply_overrides(defaults: &InputDefaults, args: &CliArgs) -> PricingInputs {
    use pricepoint_core::types::parse_amount;

    let mut inputs = defaults.inputs();
    if let Some(text) = &args.cost {
        inputs.source_cost = parse_amount(text);
    }
    if let Some(text) = &args.rate {
        inputs.exchange_rate = parse_amount(text);
    }
    if let Some(text) = &args.freight {
        inputs.freight_multiplier = parse_amount(text);
    }
    if let Some(text) = &args.margin {
        inputs.margin_percent = parse_amount(text);
    }
    if let Some(text) = &args.tax {
        inputs.tax_percent = parse_amount(text);
    }
    inputs.manual_gross_price = args.gross.as_deref().map(parse_amount);
    inputs
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), CliError> {
    let args = parse_args(std::env::args().skip(1))?;
    if args.help {
        print!("{USAGE}");
        return Ok(());
    }

    let config = DisplayConfig::from_env();
    debug!(?config, "configuration loaded");

    if args.interactive {
        let mut session = pricepoint_core::Session::new(config.defaults);
        info!("interactive session started (type `help`)");
        if let Err(err) = repl::run(&mut session, &config, !args.no_copy).await {
            eprintln!("error: {err}");
        }
        return Ok(());
    }

    one_shot(&config, &args).await;
    Ok(())
}

/// One computation, printed and echoed, no session kept.
async fn one_shot(config: &DisplayConfig, args: &CliArgs) {
    let inputs = apply_overrides(&config.defaults, args);

    let (mode, result) = match inputs.manual_gross_price {
        Some(gross) => (Mode::Reverse, compute_reverse(&inputs, gross)),
        None => (Mode::Forward, compute_forward(&inputs)),
    };

    if args.json {
        let json = serde_json::to_string_pretty(&result).expect("result record serializes");
        println!("{json}");
        return;
    }

    print!("{}", render::breakdown(config, &inputs, &result));
    println!();
    print!("{}", render::summary(config, mode, &result));

    if !args.no_copy {
        // One-shot runs wait for the copy; exiting first would kill it.
        let _ = spawn_echo(result.clipboard_text()).await;
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
