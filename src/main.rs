use anyhow::{Context, Result};
use calcpad::config::Config;
use calcpad::{CalculatorSession, FileStore, KeyValueStore, MemoryStore, logging, parse_keys};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Keypad calculator for the terminal.
///
/// Type keys as text, e.g. `12x3=` or `5 MS CE MR`. `history` and
/// `memory` show the side panels, `quit` exits.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the persistent store
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep history and memory in memory only
    #[arg(long)]
    ephemeral: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref()).context("Failed to load config")?;
    if args.data_dir.is_some() {
        config.data_dir = args.data_dir;
    }
    logging::init(config.log_filter.as_deref());

    let store: Box<dyn KeyValueStore> = if args.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        let path = config.store_path();
        Box::new(
            FileStore::open(&path)
                .with_context(|| format!("Failed to open store at {}", path.display()))?,
        )
    };

    run(CalculatorSession::new(store))
}

fn run<S: KeyValueStore>(mut session: CalculatorSession<S>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    render(&session, &mut stdout)?;

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read input")?;
        match line.trim() {
            "quit" | "exit" => break,
            "history" => render_history(&session, &mut stdout)?,
            "memory" => render_memory(&session, &mut stdout)?,
            input => match parse_keys(input) {
                Ok(keys) => {
                    for key in keys {
                        session.press(key);
                    }
                    render(&session, &mut stdout)?;
                }
                Err(e) => writeln!(stdout, "  ? {}", e)?,
            },
        }
    }

    Ok(())
}

fn render<S: KeyValueStore>(session: &CalculatorSession<S>, out: &mut impl Write) -> Result<()> {
    let indicator = if session.memory().is_some() { "M" } else { " " };
    writeln!(out, "{} {}", indicator, session.expression())?;
    if !session.live_preview().is_empty() {
        writeln!(out, "    {}", session.live_preview())?;
    }
    out.flush()?;
    Ok(())
}

fn render_history<S: KeyValueStore>(
    session: &CalculatorSession<S>,
    out: &mut impl Write,
) -> Result<()> {
    if session.history().is_empty() {
        writeln!(out, "No history")?;
    }
    for (index, entry) in session.history().iter().enumerate() {
        writeln!(out, "{}) {}", index + 1, entry)?;
    }
    Ok(())
}

fn render_memory<S: KeyValueStore>(
    session: &CalculatorSession<S>,
    out: &mut impl Write,
) -> Result<()> {
    match session.memory() {
        Some(value) => writeln!(out, "{}", calcpad::calculator::format_number(value))?,
        None => writeln!(out, "No Memory")?,
    }
    Ok(())
}
