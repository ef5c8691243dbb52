//! Output writers for replay results.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use live_scoring::domain::events::MatchEvent;
use live_scoring::domain::result::MatchResult;
use live_scoring::domain::snapshot::Scoreboard;
use live_scoring::MatchSession;
use serde::Serialize;

use crate::types::{CsvDeliveryRow, OutputFormat};

/// Final figures written next to the ledger.
#[derive(Serialize)]
struct Summary<'a> {
    match_id: String,
    result: Option<&'a MatchResult>,
    scoreboard: Scoreboard,
    events: &'a [MatchEvent],
    journal: &'a [live_scoring::MatchCommand],
}

pub struct ReplayOutput {
    pub ledger_path: Option<PathBuf>,
    pub csv_path: PathBuf,
    pub summary_path: PathBuf,
}

fn open_truncated(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
}

/// Write the ledger, ball-by-ball CSV, and summary for one replayed match.
pub fn write_replay(
    output_dir: &Path,
    format: &OutputFormat,
    compress: bool,
    session: &MatchSession,
    events: &[MatchEvent],
) -> Result<ReplayOutput, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(output_dir)?;
    let stem = format!("match_{}", session.state().header.match_id);

    let ledger_path = if matches!(format, OutputFormat::Jsonl) {
        let filename = format!("{stem}_ledger.jsonl");
        let (mut writer, path): (Box<dyn Write>, PathBuf) = if compress {
            let gz_path = output_dir.join(format!("{filename}.gz"));
            let writer = BufWriter::new(GzEncoder::new(
                File::create(&gz_path)?,
                Compression::default(),
            ));
            (Box::new(writer), gz_path)
        } else {
            let path = output_dir.join(&filename);
            (Box::new(BufWriter::new(open_truncated(&path)?)), path)
        };
        for delivery in session.ledger() {
            writeln!(writer, "{}", serde_json::to_string(delivery)?)?;
        }
        writer.flush()?;
        Some(path)
    } else {
        None
    };

    let csv_path = output_dir.join(format!("{stem}_balls.csv"));
    let mut csv_writer = csv::Writer::from_writer(BufWriter::new(open_truncated(&csv_path)?));
    for delivery in session.ledger() {
        csv_writer.serialize(CsvDeliveryRow::from(delivery))?;
    }
    csv_writer.flush()?;

    let summary_path = output_dir.join(format!("{stem}_summary.json"));
    let summary = Summary {
        match_id: session.state().header.match_id.to_string(),
        result: session.result(),
        scoreboard: session.scoreboard(),
        events,
        journal: session.journal(),
    };
    let mut summary_writer = BufWriter::new(open_truncated(&summary_path)?);
    serde_json::to_writer_pretty(&mut summary_writer, &summary)?;
    summary_writer.flush()?;

    Ok(ReplayOutput {
        ledger_path,
        csv_path,
        summary_path,
    })
}
