//! Persistent player progression: currency, upgrades, bests, XP/rank, unlocks,
//! perk loadout, daily missions and streak.
//!
//! The blob is stored as RON through a [`ProgressionBackend`]. Mutators only
//! touch the in-memory copy; call [`ProgressionStore::save`] to persist.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use procgen::{BiomeId, CalendarDay};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::events::{achievement, leaderboard, ReportEvent};
use crate::missions::{DailyMissionBoard, StreakTracker};
use crate::perks::{PerkId, MAX_EQUIPPED};
use crate::rank::{rank_for_xp, rewards_between, xp_for_run, PlayerRank};
use crate::state::RunSummary;
use crate::upgrades::{AppliedUpgrades, UpgradeId};

/// Bump when the blob layout changes incompatibly.
pub const SCHEMA_VERSION: u32 = 2;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("progression I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("progression data is malformed: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("could not serialize progression: {0}")]
    Serialize(#[from] ron::Error),
    #[error("progression schema version {found}, expected {expected}")]
    VersionMismatch { expected: u32, found: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progression {
    pub version: u32,
    /// Paw points.
    pub currency: u32,
    pub upgrades: BTreeMap<UpgradeId, u32>,
    pub best_distance: u64,
    pub best_checkpoints: u32,
    pub best_pp_run: u32,
    pub total_xp: u32,
    pub rank: PlayerRank,
    /// `type:id` unlock keys.
    pub unlocked: BTreeSet<String>,
    pub perk_loadout: Vec<PerkId>,
    pub missions: DailyMissionBoard,
    pub streak: StreakTracker,
    /// Lifetime count of completed daily missions.
    pub missions_completed: u32,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            currency: 0,
            upgrades: BTreeMap::new(),
            best_distance: 0,
            best_checkpoints: 0,
            best_pp_run: 0,
            total_xp: 0,
            rank: PlayerRank::Stray,
            unlocked: BTreeSet::from([BiomeId::Suburb.unlock_key()]),
            perk_loadout: Vec::new(),
            missions: DailyMissionBoard::default(),
            streak: StreakTracker::default(),
            missions_completed: 0,
        }
    }
}

// ── Backends ────────────────────────────────────────────────────────────

/// Raw storage for the serialized blob.
pub trait ProgressionBackend {
    /// `Ok(None)` when nothing has been saved yet.
    fn read(&self) -> Result<Option<String>, StoreError>;
    fn write(&mut self, data: &str) -> Result<(), StoreError>;
}

/// A RON file on disk.
#[derive(Debug, Clone)]
pub struct RonFileBackend {
    path: PathBuf,
}

impl RonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ProgressionBackend for RonFileBackend {
    fn read(&self) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&self.path)?))
    }

    fn write(&mut self, data: &str) -> Result<(), StoreError> {
        std::fs::write(&self.path, data)?;
        Ok(())
    }
}

/// In-memory storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    pub data: Option<String>,
}

impl ProgressionBackend for MemoryBackend {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.data.clone())
    }

    fn write(&mut self, data: &str) -> Result<(), StoreError> {
        self.data = Some(data.to_string());
        Ok(())
    }
}

// ── Settlement ──────────────────────────────────────────────────────────

/// Everything a finished run changed in progression.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettlement {
    pub streak_multiplier: f32,
    /// Run currency after the streak multiplier.
    pub currency_earned: u32,
    pub completed_missions: Vec<String>,
    pub mission_rewards: u32,
    pub xp_gained: u32,
    pub previous_rank: PlayerRank,
    pub new_rank: PlayerRank,
    pub rank_rewards: u32,
    pub new_unlocks: Vec<String>,
    pub new_best_distance: bool,
    pub reports: Vec<ReportEvent>,
}

impl RunSettlement {
    pub fn ranked_up(&self) -> bool {
        self.new_rank != self.previous_rank
    }
}

// ── Store ───────────────────────────────────────────────────────────────

pub struct ProgressionStore<B: ProgressionBackend> {
    backend: B,
    pub data: Progression,
}

impl<B: ProgressionBackend> ProgressionStore<B> {
    /// Strict load: parse and version errors are returned.
    pub fn open(backend: B) -> Result<Self, StoreError> {
        let data = match backend.read()? {
            Some(text) => parse(&text)?,
            None => Progression::default(),
        };
        Ok(Self { backend, data })
    }

    /// Load, falling back to a fresh profile if the stored blob is unusable.
    pub fn open_or_default(backend: B) -> Self {
        let data = match backend.read().and_then(|t| t.map(|t| parse(&t)).transpose()) {
            Ok(Some(d)) => d,
            Ok(None) => Progression::default(),
            Err(e) => {
                log::warn!("Could not load progression ({}), starting fresh", e);
                Progression::default()
            }
        };
        Self { backend, data }
    }

    pub fn save(&mut self) -> Result<(), StoreError> {
        let text = ron::ser::to_string_pretty(&self.data, ron::ser::PrettyConfig::default())?;
        self.backend.write(&text)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ── Shop ────────────────────────────────────────────────────────────

    pub fn level(&self, id: UpgradeId) -> u32 {
        self.data.upgrades.get(&id).copied().unwrap_or(0)
    }

    pub fn next_cost(&self, id: UpgradeId) -> Option<u32> {
        let def = id.definition();
        let current = self.level(id);
        (current < def.max_level).then(|| def.cost(current + 1))
    }

    pub fn can_buy(&self, id: UpgradeId) -> bool {
        self.next_cost(id).is_some_and(|cost| self.data.currency >= cost)
    }

    pub fn buy(&mut self, id: UpgradeId) -> bool {
        let Some(cost) = self.next_cost(id) else {
            return false;
        };
        if self.data.currency < cost {
            return false;
        }
        self.data.currency -= cost;
        *self.data.upgrades.entry(id).or_insert(0) += 1;
        log::info!("Bought {} level {}", id.definition().name, self.level(id));
        true
    }

    pub fn applied_upgrades(&self) -> AppliedUpgrades {
        AppliedUpgrades::from_levels(&self.data.upgrades)
    }

    // ── Perks & unlocks ─────────────────────────────────────────────────

    pub fn is_unlocked(&self, key: &str) -> bool {
        self.data.unlocked.contains(key)
    }

    /// Keep only unlocked perks, first two distinct.
    pub fn set_perk_loadout(&mut self, perks: &[PerkId]) {
        let mut loadout = Vec::new();
        for p in perks {
            if loadout.len() == MAX_EQUIPPED {
                break;
            }
            if !loadout.contains(p) && self.is_unlocked(&p.unlock_key()) {
                loadout.push(*p);
            }
        }
        self.data.perk_loadout = loadout;
    }

    pub fn equipped_perks(&self) -> &[PerkId] {
        &self.data.perk_loadout
    }

    pub fn add_currency(&mut self, amount: u32) {
        self.data.currency = self.data.currency.saturating_add(amount);
    }

    // ── Daily ───────────────────────────────────────────────────────────

    /// Record today's session for the streak and make sure missions are current.
    pub fn begin_day(&mut self, today: CalendarDay) -> u32 {
        self.data.missions.refresh(today);
        self.data.streak.bump(today)
    }

    /// Apply a finished run: currency × streak, missions, XP and rank-up, bests.
    pub fn settle_run(&mut self, summary: &RunSummary, today: CalendarDay) -> RunSettlement {
        self.data.missions.refresh(today);
        let mult = self.data.streak.multiplier();
        let mut reports = Vec::new();

        let currency_earned = (summary.currency_earned as f32 * mult).floor() as u32;

        let completed = self.data.missions.apply_run(summary);
        let mission_base: u32 = completed.iter().map(|m| m.reward_pp).sum();
        let mission_rewards = (mission_base as f32 * mult).floor() as u32;
        self.data.missions_completed += completed.len() as u32;

        let xp_gained = xp_for_run(summary);
        let previous_rank = self.data.rank;
        self.data.total_xp = self.data.total_xp.saturating_add(xp_gained);
        let new_rank = rank_for_xp(self.data.total_xp).max(previous_rank);
        self.data.rank = new_rank;

        let mut rank_rewards = 0;
        let mut new_unlocks = Vec::new();
        for def in rewards_between(previous_rank, new_rank) {
            rank_rewards += def.rewards_pp;
            for item in def.unlocks {
                let key = item.key();
                if self.data.unlocked.insert(key.clone()) {
                    new_unlocks.push(key);
                }
            }
        }
        if new_rank != previous_rank {
            log::info!("Rank up: {} -> {}", previous_rank.display_name(), new_rank.display_name());
        }

        self.add_currency(currency_earned + mission_rewards + rank_rewards);

        let pp_this_run = currency_earned + mission_rewards;
        let new_best_distance = summary.distance > self.data.best_distance;
        self.data.best_distance = self.data.best_distance.max(summary.distance);
        self.data.best_checkpoints = self.data.best_checkpoints.max(summary.checkpoints);
        self.data.best_pp_run = self.data.best_pp_run.max(pp_this_run);

        reports.push(ReportEvent::Leaderboard { board: leaderboard::BEST_DISTANCE, value: summary.distance });
        reports.push(ReportEvent::Leaderboard {
            board: leaderboard::MOST_CHECKPOINTS,
            value: summary.checkpoints as u64,
        });
        reports.push(ReportEvent::Leaderboard { board: leaderboard::MOST_PP_RUN, value: pp_this_run as u64 });

        let achievements = [
            (summary.won, achievement::FIRST_ESCAPE),
            (summary.checkpoints >= 3, achievement::THREE_CHECKPOINTS),
            (summary.hides >= 5, achievement::FIVE_HIDES),
            (self.data.streak.count >= 7, achievement::STREAK_7),
            (self.data.missions_completed >= 3, achievement::DAILY_MISSIONS_3),
        ];
        for (earned, id) in achievements {
            if earned {
                reports.push(ReportEvent::Achievement { id });
            }
        }

        RunSettlement {
            streak_multiplier: mult,
            currency_earned,
            completed_missions: completed.into_iter().map(|m| m.id).collect(),
            mission_rewards,
            xp_gained,
            previous_rank,
            new_rank,
            rank_rewards,
            new_unlocks,
            new_best_distance,
            reports,
        }
    }
}

fn parse(text: &str) -> Result<Progression, StoreError> {
    let data: Progression = ron::from_str(text)?;
    if data.version != SCHEMA_VERSION {
        return Err(StoreError::VersionMismatch { expected: SCHEMA_VERSION, found: data.version });
    }
    Ok(data)
}
