//! `attendscan` - CLI for attendee lookup
//!
//! This binary plays the scanner and the display: codes come in as arguments
//! or stdin lines, and the display state is printed to stdout.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, warn};

use attendscan::cli::{parse_line, Cli, Command, ConfigCommand, InputLine, LookupCommand};
use attendscan::render::{present, render_display, NotificationKind, Presentation};
use attendscan::{init_logging, Config, LookupClient, RecordSource, ScanCode, Session, Update};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    match cli.command {
        Command::Lookup(lookup_cmd) => {
            let config = load_config(cli.config)?;
            handle_lookup(&config, &lookup_cmd).await
        }
        Command::Scan => handle_scan(&load_config(cli.config)?).await,
        Command::Config(config_cmd) => handle_config(cli.config, config_cmd),
    }
}

fn load_config(config_path: Option<PathBuf>) -> anyhow::Result<Config> {
    Config::load_from(config_path).context("loading configuration")
}

async fn handle_lookup(config: &Config, cmd: &LookupCommand) -> anyhow::Result<ExitCode> {
    let client = LookupClient::from_config(config)?;
    let code = ScanCode::new(cmd.code.as_str())?;

    let result = client.lookup(&code).await;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    match present(&result) {
        Presentation::Show { details, events } => {
            if !cmd.json {
                let display = attendscan::DisplayState {
                    code: code.to_string(),
                    details,
                    events,
                    notification: None,
                };
                print!("{}", render_display(&display));
            }
            Ok(ExitCode::SUCCESS)
        }
        Presentation::Notify(kind) => {
            if let Some(diagnostic) = result.failure_message() {
                error!(code = %code, error = %diagnostic, "lookup failed");
            }
            notify(kind);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn handle_scan(config: &Config) -> anyhow::Result<ExitCode> {
    let client = LookupClient::from_config(config)?;
    debug!(endpoint = %client.endpoint(), "scan session ready");
    let mut session = Session::new(Arc::new(client));

    // A pipe delivers every code at once; settle each lookup before the next.
    let piped = !std::io::stdin().is_terminal();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading scanner input")? else {
                    settle(&mut session).await;
                    break;
                };
                match parse_line(&line) {
                    InputLine::Scan(outcome) => {
                        session.scan(outcome);
                        if piped {
                            settle(&mut session).await;
                        }
                    }
                    InputLine::Clear => {
                        session.clear();
                        println!();
                    }
                    InputLine::Quit => break,
                    InputLine::Unknown(command) => {
                        warn!(%command, "unknown command; expected :done, :clear or :quit");
                    }
                }
            }
            update = session.next_update() => show_update(&session, update),
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Wait for the pending lookup, if any, and show its outcome.
async fn settle(session: &mut Session) {
    while session.is_pending() {
        let update = session.next_update().await;
        show_update(session, update);
    }
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> anyhow::Result<ExitCode> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = load_config(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Endpoint]");
                println!("  URL:                {}", config.endpoint.url);
                println!("  Action:             {}", config.endpoint.action);
                println!("  Code parameter:     {}", config.endpoint.code_param);
                println!();
                println!("[HTTP]");
                println!("  Timeout (ms):       {}", config.http.timeout_ms);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => {
                    println!("Configuration error: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn show_update(session: &Session, update: Update) {
    match update {
        Update::Shown => print!("{}", render_display(session.display())),
        Update::Notified(kind) => notify(kind),
        Update::Stale => {}
    }
}

/// Transient, user-facing notice. Diagnostics stay in the log.
fn notify(kind: NotificationKind) {
    eprintln!("{kind}");
}
