use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use zcalc::keys::Key;
use zcalc::{Config, DisplayLines, Session};

/// Keypad calculator for the terminal.
///
/// Each input line is a sequence of keys: digits, `+ - * /` (or `× ÷`), `.`,
/// `%`, `=`, and the named keys `neg`, `bs` and `c`.
#[derive(Debug, Parser)]
#[command(name = "zcalc", version)]
struct Args {
    /// Config file path (uses ~/.config/zcalc/config.toml if not specified)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Press these keys, print the display and exit
    #[arg(long)]
    keys: Option<String>,
}

fn print_display(out: &mut impl Write, display: &DisplayLines) -> io::Result<()> {
    if !display.history.is_empty() {
        writeln!(out, "{:>24}", display.history)?;
    }
    writeln!(out, "{:>24}", display.primary)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    let mut session = Session::with_config(&config);
    let mut stdout = io::stdout().lock();

    if let Some(keys) = &args.keys {
        session.press_all(Key::parse_sequence(keys)?);
        print_display(&mut stdout, session.display())?;
        return Ok(());
    }

    print_display(&mut stdout, session.display())?;
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        match Key::parse_sequence(&line) {
            Ok(keys) => session.press_all(keys),
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        }
        print_display(&mut stdout, session.display())?;
    }

    Ok(())
}
