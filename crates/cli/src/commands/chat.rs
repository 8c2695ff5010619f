//! `parley chat` and `parley ask` — talk to the engine.

use parley_core::intent::classify;
use std::io::Write;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::debug;

use super::open_engine;

pub async fn run(session: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = open_engine(session).await?;

    println!();
    println!("  Parley — Interactive Mode");
    println!();
    println!("  Session:   {}", session.unwrap_or("default"));
    println!("  Queue:     {} ({} pending)", engine.queue().backend(), engine.queue().pending().len());
    println!("  Tools:     {}", engine.tools().names().join(", "));
    println!();
    println!("  Type your message and press Enter.");
    println!("  Type 'quit' or 'exit' to leave.");
    println!();

    let mut lines = BufReader::new(io::stdin()).lines();

    loop {
        print!("  You > ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line.to_lowercase().as_str(), "quit" | "exit") {
            break;
        }

        debug!(intent = %classify(line), "Intent classified");
        let response = engine.generate_response(line).await;
        for out in response.lines() {
            println!("  Assistant > {out}");
        }
        println!();
    }

    println!();
    println!("  Goodbye!");
    println!();
    Ok(())
}

pub async fn ask(session: Option<&str>, message: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = open_engine(session).await?;
    debug!(intent = %classify(message), "Intent classified");
    println!("{}", engine.generate_response(message).await);
    Ok(())
}
