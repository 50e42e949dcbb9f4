//! Escalier simulator CLI - plays complete scripted sessions through the core.
//!
//! Each seat follows a scripted profile; results go to JSONL/JSON plus a CSV
//! standings summary.

mod output;
mod simulator;
mod types;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use escalier::config::SessionConfig;
use escalier::domain::{AbandonBudget, GameOptions};
use output::{GameReport, OutputWriter};
use simulator::{GameResult, Simulator};
use tracing::{info, warn};
use types::{LogFormat, OutputFormat, Profile};

const DEFAULT_NAMES: [&str; 8] = ["Noah", "Spart", "Alex", "Nao", "Jean", "Lou", "Mia", "Ines"];

#[derive(Parser)]
#[command(name = "escalier-sim")]
#[command(about = "Scripted Escalier sessions for checking the scoring engine")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Number of players (named from a built-in list)
    #[arg(short, long, default_value = "5", conflicts_with = "config")]
    players: u8,

    /// JSON session config (players, abandon_budget, bonus)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Abandons per half: 0, 1, 3 or 5
    #[arg(long, default_value = "5")]
    abandons: u8,

    /// Enable the end-game bonus (needs 5 abandons)
    #[arg(long)]
    bonus: bool,

    /// Profile for every seat (default rotates Perfect, Steady, Abandoner, Steady, Erratic)
    #[arg(long)]
    profile: Option<Profile>,

    /// Base seed; game N uses seed + N
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: String,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,
}

struct Table {
    names: Vec<String>,
    options: GameOptions,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize logging - silent by default, only show warnings/errors
    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    escalier::telemetry::init_tracing(args.log_format.into(), filter)?;

    let table = table_from_args(&args)?;
    let profiles: Vec<Profile> = (0..table.names.len())
        .map(|seat| args.profile.unwrap_or_else(|| Profile::for_seat(seat)))
        .collect();

    if args.show_output {
        info!(
            games = args.games,
            players = table.names.len(),
            abandon_budget = table.options.abandon_budget.allowance(),
            bonus = table.options.bonus_enabled,
            "Starting Escalier simulator"
        );
        info!("Profiles: {:?}", profiles);
    }

    let mut output_writer = OutputWriter::new(&args.output_dir, &args.output_format)?;
    let base_seed = args.seed.unwrap_or_else(rand::random);

    let start = Instant::now();
    let mut results = Vec::new();
    let mut errors = 0;

    for game_num in 1..=args.games {
        let game_start = Instant::now();
        let seed = base_seed.wrapping_add(u64::from(game_num));

        let simulator = Simulator::new(seed, profiles.clone());
        match simulator.simulate_game(&table.names, table.options) {
            Ok(result) => {
                let report = GameReport {
                    game_id: game_num,
                    seed,
                    timestamp: output::timestamp(),
                    players: table.names.clone(),
                    profiles: profiles.clone(),
                    abandon_budget: table.options.abandon_budget.allowance(),
                    bonus: table.options.bonus_enabled,
                    rounds_played: result.rounds_played,
                    reversals: result.reversals,
                    duration_ms: game_start.elapsed().as_secs_f64() * 1000.0,
                    standings: result.standings.clone(),
                    score_evolution: result.score_evolution.clone(),
                    contracts: result.contracts.clone(),
                };
                if let Err(e) = output_writer.write_game(&report) {
                    warn!("Failed to write results for game {}: {}", game_num, e);
                }
                if args.verbose {
                    info!(game = game_num, winner = ?result.standings.first(), "Game completed");
                }
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!("Game {} failed: {}", game_num, e);
            }
        }
    }

    let elapsed = start.elapsed();
    let (json_path, csv_path) = output_writer.output_paths();
    let (json_path, csv_path) = (json_path.to_path_buf(), csv_path.to_path_buf());
    output_writer.finish()?;

    if args.show_output {
        info!("Detailed results written to: {}", json_path.display());
        info!("Standings CSV written to: {}", csv_path.display());
        print_summary(&results, &table.names, errors, elapsed, args.games);
    }

    Ok(())
}

fn table_from_args(args: &Args) -> Result<Table, Box<dyn std::error::Error>> {
    if let Some(path) = &args.config {
        let setup = SessionConfig::from_path(path)?.into_setup()?;
        return Ok(Table {
            names: setup.names.iter().map(|n| n.trim().to_owned()).collect(),
            options: setup.options,
        });
    }

    let count = usize::from(args.players);
    if !(2..=DEFAULT_NAMES.len()).contains(&count) {
        return Err(format!("--players must be 2..={}", DEFAULT_NAMES.len()).into());
    }
    let budget = AbandonBudget::try_from(args.abandons)?;
    Ok(Table {
        names: DEFAULT_NAMES[..count].iter().map(|n| n.to_string()).collect(),
        options: GameOptions::new(budget, args.bonus),
    })
}

fn print_summary(
    results: &[GameResult],
    names: &[String],
    errors: u32,
    elapsed: std::time::Duration,
    total: u32,
) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {}", errors);
    }
    println!("Total time: {:?}", elapsed);
    if results.is_empty() {
        return;
    }
    println!(
        "Average time per game: {:?}",
        elapsed / results.len() as u32
    );

    let mut wins = vec![0u32; names.len()];
    let mut total_scores = vec![0i64; names.len()];
    let mut broken = vec![0u32; names.len()];
    for result in results {
        let best = result.standings.first().map_or(0, |s| s.score);
        for row in &result.standings {
            let Some(seat) = names.iter().position(|n| *n == row.name) else {
                continue;
            };
            total_scores[seat] += i64::from(row.score);
            broken[seat] += row.contracts_broken;
            if row.score == best {
                wins[seat] += 1;
            }
        }
    }

    println!("\n=== Results by Player ===");
    for (seat, name) in names.iter().enumerate() {
        let games = results.len() as f64;
        println!(
            "{}: avg={:.1}, broken/game={:.1}, wins={} ({:.1}%)",
            name,
            total_scores[seat] as f64 / games,
            f64::from(broken[seat]) / games,
            wins[seat],
            f64::from(wins[seat]) / games * 100.0
        );
    }
}
