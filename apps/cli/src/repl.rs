//! # Interactive Session
//!
//! A line-oriented front end over the calculator session. Each command
//! maps onto one of the session's events, so the interactive surface
//! behaves exactly like the live input fields it stands in for:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  command            session event                                │
//! │  ─────────────      ────────────────────────────────────────     │
//! │  set cost 3.50      edit(SourceCost, "3.50")                     │
//! │  gross              focus_gross()                                │
//! │  gross 5.95         focus_gross() + input_gross("5.95")          │
//! │  done               blur_gross()                                 │
//! │  clear              input_gross("") + blur_gross()               │
//! │  reset              reset()                                      │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Edits typed while the price field is focused are held, not applied:
//! the session stores the text but produces no recompute, and the loop
//! says so instead of printing a summary.

use std::str::FromStr;

use pricepoint_core::{Field, Mode, Recompute, Session};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

use crate::config::DisplayConfig;
use crate::echo::spawn_echo;
use crate::render;

const HELP: &str = "\
commands:
  set <field> <value>   edit a field (cost, rate, freight, margin, tax)
  gross                 start editing the manual price
  gross <value>         type into the manual price field (live reverse)
  done                  leave the manual price field
  clear                 empty the manual price field and leave it
  show                  reprint the current summary
  steps                 print the calculation steps
  json                  print the current result as JSON
  reset                 restore defaults and forward mode
  quit                  exit
";

/// Runs the interactive loop until EOF or `quit`.
pub async fn run(
    session: &mut Session,
    config: &DisplayConfig,
    copy_enabled: bool,
) -> std::io::Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // Startup computation, same as a page load.
    let startup = session.refresh();
    print_recompute(&mut stdout, session, config, &startup, copy_enabled).await?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };

        match dispatch(session, line.trim()) {
            Action::Quit => break,
            Action::Silent => {}
            Action::Message(text) => {
                stdout.write_all(text.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
            }
            Action::Recomputed(recompute) => {
                print_recompute(&mut stdout, session, config, &recompute, copy_enabled).await?;
            }
            Action::Steps => {
                let recompute = session.refresh();
                let text = render::breakdown(config, &session.snapshot(), &recompute.result);
                stdout.write_all(text.as_bytes()).await?;
            }
            Action::Json => {
                let recompute = session.refresh();
                let json = serde_json::to_string_pretty(&recompute.result)
                    .expect("result record serializes");
                stdout.write_all(json.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
            }
        }
    }

    Ok(())
}

/// What the loop should do after one input line.
enum Action {
    Quit,
    Silent,
    Message(String),
    Recomputed(Recompute),
    Steps,
    Json,
}

fn dispatch(session: &mut Session, line: &str) -> Action {
    let mut parts = line.splitn(2, char::is_whitespace);
    let command = parts.next().unwrap_or("");
    let rest = parts.next().unwrap_or("").trim();

    match command {
        "" => Action::Silent,
        "help" | "?" => Action::Message(HELP.to_string()),
        "quit" | "exit" | "q" => Action::Quit,
        "show" => Action::Recomputed(session.refresh()),
        "steps" => Action::Steps,
        "json" => Action::Json,
        "reset" => Action::Recomputed(session.reset()),
        "set" => {
            let mut args = rest.splitn(2, char::is_whitespace);
            let name = args.next().unwrap_or("");
            let value = args.next().unwrap_or("").trim();
            match Field::from_str(name) {
                Err(err) => Action::Message(format!("error: {err}")),
                Ok(field) => match session.edit(field, value) {
                    Some(recompute) => Action::Recomputed(recompute),
                    None => {
                        debug!(field = field.name(), "edit suppressed while editing price");
                        Action::Message("(held: finish the price field first)".to_string())
                    }
                },
            }
        }
        "gross" => {
            session.focus_gross();
            if rest.is_empty() {
                Action::Message("(editing price: `gross <value>`, then `done`)".to_string())
            } else {
                Action::Recomputed(session.input_gross(rest))
            }
        }
        "done" => {
            if session.mode() != Mode::Editing {
                return Action::Message("(the price field is not being edited)".to_string());
            }
            Action::Recomputed(session.blur_gross())
        }
        "clear" => {
            session.focus_gross();
            session.input_gross("");
            Action::Recomputed(session.blur_gross())
        }
        other => Action::Message(format!("unknown command '{other}' (try `help`)")),
    }
}

async fn print_recompute(
    stdout: &mut tokio::io::Stdout,
    session: &Session,
    config: &DisplayConfig,
    recompute: &Recompute,
    copy_enabled: bool,
) -> std::io::Result<()> {
    let text = render::summary(config, session.mode(), &recompute.result);
    stdout.write_all(text.as_bytes()).await?;

    if copy_enabled {
        if let Some(price) = &recompute.echo {
            // Fire-and-forget: the copy resolves on its own time and
            // reports through the log, never blocking the next command.
            let _ = spawn_echo(price.clone());
        }
    }

    Ok(())
}
