use std::{
    fs::OpenOptions,
    io::{BufRead, BufReader, Write},
    path::PathBuf,
};

use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Target};
use slide_edit_mcp::{
    state::SlideEditTools,
    types::{McpMessage, McpResponse},
};

const INSTRUCTIONS: &str = "Surgical edits to single-file HTML slide decks. Use slide_map to see slide indices, stage_edits to preview a batch of edits, and commit_staged to write it.";

/// MCP server for editing HTML slide decks over stdio
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON file that keeps the session (context directory and staged edits) across restarts
    #[arg(long, env = "SLIDE_EDIT_SESSION_PATH")]
    session_storage_path: Option<String>,

    /// File to append logs to; filter with RUST_LOG. Logging is off without it.
    #[arg(long, env = "LOG_LOCATION")]
    log_location: Option<String>,
}

fn init_logging(log_location: &str) -> Result<()> {
    let path = PathBuf::from(&*shellexpand::tilde(log_location));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Builder::from_default_env()
        .target(Target::Pipe(Box::new(
            OpenOptions::new().create(true).append(true).open(path)?,
        )))
        .init();
    Ok(())
}

fn send(stdout: &mut impl Write, response: &McpResponse) -> Result<()> {
    let response_str = serde_json::to_string(response)?;
    log::trace!("-> {response_str}");
    stdout.write_all(response_str.as_bytes())?;
    stdout.write_all(b"\n")?;
    stdout.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_location) = &args.log_location {
        init_logging(log_location)?;
    }

    let mut state = SlideEditTools::new(args.session_storage_path.as_deref())?;

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    loop {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) if line.trim().is_empty() => continue,
            Ok(_) => {
                log::trace!("<- {line}");
                match serde_json::from_str(&line) {
                    Ok(McpMessage::Request(request)) => {
                        let response = request.execute(&mut state, Some(INSTRUCTIONS));
                        send(&mut stdout, &response)?;
                    }
                    Ok(McpMessage::Notification(notification)) => {
                        log::debug!("notification {}", notification.method);
                    }
                    Err(e) => {
                        log::warn!("unparseable message: {e}");
                        if let Some(response) = McpResponse::for_unparseable(&line, &e) {
                            send(&mut stdout, &response)?;
                        }
                    }
                }
            }
            Err(e) => {
                log::error!("Error reading line: {e}");
                break;
            }
        }
    }

    Ok(())
}
