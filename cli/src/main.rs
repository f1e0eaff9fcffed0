//! Honeypot CLI binary.
//!
//! Subcommands: `serve` (HTTP API), `chat` (interactive session, default), `simulate`
//! (adversary-driven session).

mod logging;
mod repl;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use cli::display::{format_intel, format_verdict, truncate_display};
use cli::{load_settings, parse_scenario, run_simulation, Backends, CliError};
use honeypot::Session;
use repl::{run_chat_loop, ChatOptions};

/// Default number of simulated exchanges.
const DEFAULT_SIMULATE_TURNS: usize = 3;

/// Default max length for explanation text printed to stderr. 0 means no truncation.
const DEFAULT_MAX_DISPLAY_LEN: usize = 200;

#[derive(Parser, Debug)]
#[command(name = "honeypot")]
#[command(about = "Honeypot: a scam-baiting chat agent that extracts scammer payment details")]
struct Args {
    #[command(subcommand)]
    cmd: Option<Command>,

    /// Use offline mock LLMs (no API key or network needed)
    #[arg(long, global = true)]
    mock: bool,

    /// Verbose: debug logs for honeypot crates (unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Model name (overrides HONEYPOT_MODEL)
    #[arg(long, global = true, value_name = "MODEL")]
    model: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Run the HTTP API (POST /api/v1/engage, GET /health)
    Serve(ServeArgs),
    /// Chat with the agent as the scammer
    Chat(ChatArgs),
    /// Let a simulated scammer talk to the agent
    Simulate(SimulateArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct ServeArgs {
    /// Listen address (default HONEYPOT_ADDR or 0.0.0.0:$PORT)
    #[arg(long, value_name = "ADDR")]
    addr: Option<String>,
}

#[derive(clap::Args, Debug, Clone, Default)]
struct ChatArgs {
    /// Print each verdict as one JSON line
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args, Debug, Clone)]
struct SimulateArgs {
    /// Scenario: lottery, job, kyc, sextortion, or free text (an invalid value lists the presets)
    #[arg(short, long, default_value = "lottery")]
    scenario: String,
    /// Number of exchanges
    #[arg(short, long, default_value_t = DEFAULT_SIMULATE_TURNS)]
    turns: usize,
    /// Print the final session snapshot as JSON
    #[arg(long)]
    json: bool,
}

/// Reads max display length from `HONEYPOT_MAX_DISPLAY_LEN`. Returns default on missing/invalid.
fn max_display_len() -> usize {
    std::env::var("HONEYPOT_MAX_DISPLAY_LEN")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_DISPLAY_LEN)
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("honeypot: {}", msg);
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    if let Err(e) = config::load_and_apply(config::APP_NAME, None) {
        eprintln!("honeypot: ignoring config: {}", e);
    }
    logging::init(args.verbose)?;

    let settings = load_settings(args.model.clone()).unwrap_or_else(|e| fail(e));
    let backends = Backends::new(&settings, args.mock);

    match args.cmd.clone().unwrap_or(Command::Chat(ChatArgs::default())) {
        Command::Serve(sa) => {
            let api_key = settings
                .require_api_key()
                .map_err(CliError::from)
                .unwrap_or_else(|e| fail(e));
            let state = serve::AppState::new(Arc::new(backends.processor(&settings)), api_key);
            let addr = sa.addr.unwrap_or_else(|| settings.bind_addr.clone());
            if let Err(e) = serve::run_serve(&addr, state).await {
                fail(format!("serve error: {}", e));
            }
        }
        Command::Chat(ca) => {
            let mut session = Session::new(Arc::new(backends.processor(&settings)));
            let opts = ChatOptions {
                json: ca.json,
                max_len: max_display_len(),
            };
            run_chat_loop(&mut session, &opts).await?;
        }
        Command::Simulate(sa) => {
            let scenario = parse_scenario(&sa.scenario).unwrap_or_else(|e| fail(e));
            let mut session = Session::new(Arc::new(backends.processor(&settings)));
            let generator = backends.adversary(&settings);
            let max_len = max_display_len();
            let json = sa.json;

            if !json {
                eprintln!("Simulating {} for {} turns", scenario, sa.turns);
            }
            run_simulation(&mut session, &generator, &scenario, sa.turns, |i, ex| {
                if json {
                    return;
                }
                println!("\n#{} scammer> {}", i + 1, ex.scam_message);
                println!("#{} aarav>   {}", i + 1, ex.verdict.reply_text);
                eprintln!("{}", format_verdict(&ex.verdict, max_len));
            })
            .await;

            let snapshot = session.snapshot();
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                println!("\n{}", format_intel(&snapshot.accumulated_intel));
                if let Some(report) = session.report() {
                    let line = serde_json::to_string(&report)?;
                    eprintln!("last report: {}", truncate_display(&line, max_len));
                }
            }
        }
    }
    Ok(())
}
