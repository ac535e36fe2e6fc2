//! Console front end for the ParleGPT relay
//!
//! One demonstration call, then a blocking read loop: each line goes through
//! the shared relay and the reply is printed. `exit` or `quit` (any case)
//! ends the session. Every turn is independent; a failed call is printed and
//! the loop continues.

use anyhow::Result;
use parle_core::{ASSISTANT_NAME, Config, PromptRelay, RelayError};
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Hardcoded greeting for the demonstration call at startup
const GREETING: &str = "Bonjour, qui es-tu et qui t'a créé ?";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let config = Config::from_env();
    if config.api_key.is_none() {
        println!("Note: Make sure to set the GOOGLE_API_KEY environment variable.");
    }

    let relay = PromptRelay::new(&config);

    // Demonstration call with a hardcoded greeting
    match relay.relay(GREETING).await {
        Ok(reply) => {
            println!("--- Réponse de ParleGPT ---");
            println!("{reply}");
            println!("---------------------------");
        }
        Err(e @ RelayError::Unconfigured) => {
            // Startup failure: nothing will work without a credential
            eprintln!("An error occurred: {e}");
            eprintln!("\nPossible fix: Check your API Key or Model Name.");
            return Ok(());
        }
        Err(e) => {
            eprintln!("An error occurred: {e}");
            eprintln!("\nPossible fix: Check your API Key or Model Name.");
        }
    }

    println!("\n(You can type 'exit' to quit)");

    let stdin = BufReader::new(tokio::io::stdin());
    run_repl(&relay, stdin).await
}

/// Case-insensitive exit words ending the read loop
fn is_exit_command(line: &str) -> bool {
    let word = line.trim().to_lowercase();
    word == "exit" || word == "quit"
}

/// The read loop. Generic over the line source so tests can feed scripted
/// input; `main` passes async stdin so Ctrl+C is caught at the prompt too.
async fn run_repl<R>(relay: &PromptRelay, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();

    loop {
        print!("\nYou: ");
        io::stdout().flush()?;

        let line = tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {e}");
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        let message = line.trim();

        if message.is_empty() {
            continue;
        }
        if is_exit_command(message) {
            break;
        }

        // One relay call per turn; failures are printed and the loop goes on
        match relay.relay(message).await {
            Ok(reply) => println!("{ASSISTANT_NAME}: {reply}"),
            Err(e) => eprintln!("An error occurred: {e}"),
        }
    }

    Ok(())
}
