//! Shared types for the simulator.

use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Jsonl,
    Json,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl From<LogFormat> for escalier::telemetry::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Text => escalier::telemetry::LogFormat::Text,
            LogFormat::Json => escalier::telemetry::LogFormat::Json,
        }
    }
}

/// Scripted behaviour of one seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Bids at random, abandons 15% of the time, breaks 20% of contracts.
    Steady,
    /// Bids half the cards and always makes it.
    Perfect,
    /// Abandons 80% of the time when affordable; low bids, often wrong.
    Abandoner,
    /// Bids at random and always breaks.
    Erratic,
}

impl Profile {
    /// Seat rotation used when no profile is forced.
    pub const ROTATION: [Profile; 5] = [
        Profile::Perfect,
        Profile::Steady,
        Profile::Abandoner,
        Profile::Steady,
        Profile::Erratic,
    ];

    pub fn for_seat(seat: usize) -> Self {
        Self::ROTATION[seat % Self::ROTATION.len()]
    }

    pub fn abandon_rate(self) -> f64 {
        match self {
            Profile::Steady => 0.15,
            Profile::Abandoner => 0.8,
            Profile::Perfect | Profile::Erratic => 0.0,
        }
    }

    /// Chance that a contract goes wrong.
    pub fn miss_rate(self) -> f64 {
        match self {
            Profile::Steady => 0.2,
            Profile::Perfect => 0.0,
            Profile::Abandoner => 0.6,
            Profile::Erratic => 1.0,
        }
    }
}
