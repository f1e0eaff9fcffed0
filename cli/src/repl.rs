//! Interactive chat loop: you play the scammer, the agent replies as the persona.
//!
//! Exits on EOF (Ctrl+D) or `quit`/`exit`/`/quit`. `/intel` prints the accumulated intel,
//! `/report` the dashboard JSON of the last verdict.

use std::io::Write;

use honeypot::Session;
use tokio::io::{AsyncBufReadExt, BufReader};

use cli::display::{format_intel, format_verdict};

/// Output options for the chat loop.
pub struct ChatOptions {
    /// Print each verdict as one JSON line instead of text.
    pub json: bool,
    /// Max chars of explanation text to show; 0 means no truncation.
    pub max_len: usize,
}

pub async fn run_chat_loop(
    session: &mut Session,
    opts: &ChatOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = BufReader::new(tokio::io::stdin()).lines();
    if !opts.json {
        println!("Honeypot chat. Type as the scammer; /intel, /report, quit.");
    }

    loop {
        if !opts.json {
            print!("scammer> ");
            std::io::stdout().flush()?;
        }

        let line = match reader.next_line().await? {
            None => break,
            Some(s) if s.trim().is_empty() => continue,
            Some(s) if is_quit_command(&s) => break,
            Some(s) => s,
        };

        match line.trim() {
            "/intel" => {
                println!("{}", format_intel(session.accumulated_intel()));
                continue;
            }
            "/report" => {
                match session.report() {
                    Some(report) => println!("{}", serde_json::to_string_pretty(&report)?),
                    None => println!("(no verdict yet)"),
                }
                continue;
            }
            _ => {}
        }

        let verdict = session.send_message(&line).await;
        if opts.json {
            println!("{}", serde_json::to_string(verdict)?);
        } else {
            println!("aarav> {}", verdict.reply_text);
            eprintln!("{}", format_verdict(verdict, opts.max_len));
        }
    }

    if !opts.json {
        let snapshot = session.snapshot();
        eprintln!(
            "{} turns, {} indicators collected",
            snapshot.turn_count,
            snapshot.accumulated_intel.indicator_count()
        );
        if snapshot.accumulated_intel.has_intel() {
            eprintln!("{}", format_intel(&snapshot.accumulated_intel));
        }
    }
    Ok(())
}

fn is_quit_command(s: &str) -> bool {
    matches!(
        s.trim().to_lowercase().as_str(),
        "quit" | "exit" | "/quit" | "/exit"
    )
}
