//! Domain events emitted by a run and by progression settlement.
//!
//! The core never talks to platform services directly. It queues events and a
//! [`RunReporter`] decides what to do with them (log, submit, ignore).

use procgen::BiomeId;

use crate::content::HideSpotType;
use crate::state::RunSummary;
use crate::weather::WeatherState;

#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    Started,
    CheckpointReached { count: u32 },
    BiomeChanged(BiomeId),
    WeatherChanged(WeatherState),
    /// Something bumped the catcher. `source` is the entity kind name.
    Hit { source: &'static str },
    HideStarted(HideSpotType),
    /// Correct stance against a bear.
    NearMiss,
    CoverFound,
    StormFailed,
    AdrenalineStarted,
    AdrenalineEnded,
    /// Emitted exactly once, on the first terminal frame.
    RunEnded(RunSummary),
}

pub mod leaderboard {
    pub const BEST_DISTANCE: &str = "dd_best_distance";
    pub const MOST_CHECKPOINTS: &str = "dd_most_checkpoints";
    pub const MOST_PP_RUN: &str = "dd_most_pp_run";
}

pub mod achievement {
    pub const FIRST_ESCAPE: &str = "dd_ach_first_escape";
    pub const THREE_CHECKPOINTS: &str = "dd_ach_3_checkpoints";
    pub const FIVE_HIDES: &str = "dd_ach_5_hides";
    pub const STREAK_7: &str = "dd_ach_streak_7";
    pub const DAILY_MISSIONS_3: &str = "dd_ach_daily_missions_3";
}

/// Fire-and-forget platform submissions produced at settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    Leaderboard { board: &'static str, value: u64 },
    Achievement { id: &'static str },
}

/// Consumer of domain events.
pub trait RunReporter {
    fn run_event(&mut self, event: &RunEvent);
    fn report(&mut self, event: &ReportEvent);
}

/// Writes events to the log.
#[derive(Debug, Default)]
pub struct LogReporter;

impl RunReporter for LogReporter {
    fn run_event(&mut self, event: &RunEvent) {
        match event {
            RunEvent::RunEnded(s) => log::info!(
                "Run ended ({}): distance {}, checkpoints {}, hides {}, food {}, {:.1}s",
                if s.won { "home" } else { "caught" },
                s.distance,
                s.checkpoints,
                s.hides,
                s.food,
                s.elapsed
            ),
            RunEvent::CheckpointReached { count } => log::info!("Checkpoint {}", count),
            RunEvent::WeatherChanged(w) => log::info!("Weather: {}", w.label()),
            other => log::debug!("{:?}", other),
        }
    }

    fn report(&mut self, event: &ReportEvent) {
        match event {
            ReportEvent::Leaderboard { board, value } => log::info!("Leaderboard {} <- {}", board, value),
            ReportEvent::Achievement { id } => log::info!("Achievement unlocked: {}", id),
        }
    }
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NullReporter;

impl RunReporter for NullReporter {
    fn run_event(&mut self, _event: &RunEvent) {}
    fn report(&mut self, _event: &ReportEvent) {}
}

/// Keeps everything; handy for tests and replays.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub run_events: Vec<RunEvent>,
    pub reports: Vec<ReportEvent>,
}

impl RunReporter for RecordingReporter {
    fn run_event(&mut self, event: &RunEvent) {
        self.run_events.push(event.clone());
    }

    fn report(&mut self, event: &ReportEvent) {
        self.reports.push(event.clone());
    }
}
