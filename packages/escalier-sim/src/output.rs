//! Output writers for simulation results.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use escalier::report::{ContractsRow, FinalStandingRow, ScoreSeries};
use serde::Serialize;

use crate::types::{OutputFormat, Profile};

/// Everything recorded about one simulated session.
#[derive(Debug, Clone, Serialize)]
pub struct GameReport {
    pub game_id: u32,
    pub seed: u64,
    pub timestamp: String,
    pub players: Vec<String>,
    pub profiles: Vec<Profile>,
    pub abandon_budget: u8,
    pub bonus: bool,
    pub rounds_played: usize,
    pub reversals: usize,
    pub duration_ms: f64,
    pub standings: Vec<FinalStandingRow>,
    pub score_evolution: Vec<ScoreSeries>,
    pub contracts: Vec<ContractsRow>,
}

/// One CSV line per player per game.
#[derive(Debug, Serialize)]
struct StandingCsvRow<'a> {
    game_id: u32,
    seed: u64,
    place: usize,
    name: &'a str,
    profile: Profile,
    score: i32,
    contracts_made: u32,
    contracts_broken: u32,
    abandons: u8,
    reversals: u8,
    bonus: i32,
}

pub struct OutputWriter {
    jsonl_writer: Option<BufWriter<File>>,
    json_reports: Option<Vec<GameReport>>,
    csv_writer: csv::Writer<BufWriter<File>>,
    json_path: PathBuf,
    csv_path: PathBuf,
}

pub fn timestamp() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Iso8601::DEFAULT)
        .unwrap_or_else(|_| "unknown".to_string())
}

fn create(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
}

impl OutputWriter {
    pub fn new(output_dir: &str, format: &OutputFormat) -> Result<Self, Box<dyn std::error::Error>> {
        let dir = Path::new(output_dir);
        std::fs::create_dir_all(dir)?;

        let stamp = timestamp().replace(':', "-");

        let (jsonl_writer, json_reports, json_path) = match format {
            OutputFormat::Jsonl => {
                let path = dir.join(format!("simulation_{stamp}.jsonl"));
                (Some(BufWriter::new(create(&path)?)), None, path)
            }
            OutputFormat::Json => (
                None,
                Some(Vec::new()),
                dir.join(format!("simulation_{stamp}.json")),
            ),
        };

        // Always create CSV summary; the header comes from the first row.
        let csv_path = dir.join(format!("simulation_{stamp}_standings.csv"));
        let csv_writer = csv::Writer::from_writer(BufWriter::new(create(&csv_path)?));

        Ok(Self {
            jsonl_writer,
            json_reports,
            csv_writer,
            json_path,
            csv_path,
        })
    }

    pub fn write_game(
        &mut self,
        report: &GameReport,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(ref mut writer) = self.jsonl_writer {
            let json = serde_json::to_string(report)?;
            writeln!(writer, "{json}")?;
            writer.flush()?;
        }
        if let Some(ref mut reports) = self.json_reports {
            reports.push(report.clone());
        }

        for row in &report.standings {
            let profile = report
                .players
                .iter()
                .position(|name| *name == row.name)
                .and_then(|seat| report.profiles.get(seat))
                .copied()
                .unwrap_or(Profile::Steady);
            self.csv_writer.serialize(StandingCsvRow {
                game_id: report.game_id,
                seed: report.seed,
                place: row.place,
                name: &row.name,
                profile,
                score: row.score,
                contracts_made: row.contracts_made,
                contracts_broken: row.contracts_broken,
                abandons: row.abandons,
                reversals: row.reversals,
                bonus: row.bonus,
            })?;
        }
        self.csv_writer.flush()?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(ref mut writer) = self.jsonl_writer {
            writer.flush()?;
        }
        if let Some(reports) = self.json_reports.take() {
            let mut writer = BufWriter::new(create(&self.json_path)?);
            serde_json::to_writer_pretty(&mut writer, &reports)?;
            writer.flush()?;
        }
        self.csv_writer.flush()?;
        Ok(())
    }

    pub fn output_paths(&self) -> (&Path, &Path) {
        (&self.json_path, &self.csv_path)
    }
}
