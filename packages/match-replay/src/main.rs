//! Match replay CLI - runs a scripted match through the live scoring engine.
//!
//! Reads a JSON script (`{"setup": ..., "commands": [...]}`), applies it in
//! memory, and writes the delivery ledger, a ball-by-ball CSV, and a summary
//! with the scoreboard and result.

mod output;
mod script;
mod types;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use output::write_replay;
use script::{run, MatchScript, ReplayMode};
use tracing::{error, info};
use types::OutputFormat;

#[derive(Parser)]
#[command(name = "match-replay")]
#[command(about = "Replay a scripted cricket match through the scoring engine")]
struct Args {
    /// Path to the match script (JSON)
    script: PathBuf,

    /// Fire innings close and innings break transitions automatically
    #[arg(long)]
    auto_transitions: bool,

    /// Scheduled overs per innings (display only)
    #[arg(long, default_value = "20")]
    overs: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON logs filtered by RUST_LOG instead of plain text
    #[arg(long, conflicts_with = "verbose")]
    json_logs: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./replay-results")]
    output_dir: PathBuf,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress the ledger
    #[arg(long)]
    compress: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.json_logs {
        live_scoring::telemetry::init_tracing();
    } else {
        let filter = if args.verbose {
            "debug"
        } else if args.show_output {
            "info"
        } else {
            "warn"
        };
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let started = Instant::now();
    let script = MatchScript::load(&args.script)?;
    let mode = if args.auto_transitions {
        ReplayMode::AutoTransitions
    } else {
        ReplayMode::Strict
    };
    info!(
        script = %args.script.display(),
        commands = script.commands.len(),
        mode = ?mode,
        "Replaying match"
    );

    let (session, events) = match run(script, mode, args.overs) {
        Ok(done) => done,
        Err((step, err)) => {
            error!(step, code = %err.code(), detail = %err.detail(), "Replay stopped");
            return Err(format!("command {step} rejected: {err}").into());
        }
    };

    let out = write_replay(
        &args.output_dir,
        &args.output_format,
        args.compress,
        &session,
        &events,
    )?;

    let board = session.scoreboard();
    match session.result() {
        Some(result) => println!("{}", result.summary()),
        None => println!("{} {} ({} ov)", board.batting_team, board.score, board.overs),
    }

    if args.show_output {
        info!(
            deliveries = session.ledger().len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Replay complete"
        );
        if let Some(path) = &out.ledger_path {
            info!("Ledger: {}", path.display());
        }
        info!("Ball-by-ball: {}", out.csv_path.display());
        info!("Summary: {}", out.summary_path.display());
    }
    Ok(())
}
