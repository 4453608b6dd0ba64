//! Deterministic daily content: challenge of the day and daily missions.
//!
//! Both are derived from a stable FNV-1a hash of the `yyyymmdd` day key, so
//! the same calendar day always yields the same challenge and mission list.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

// ── Calendar days ───────────────────────────────────────────────────────

/// A proleptic Gregorian calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CalendarDay {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDay {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Day containing the given unix timestamp (UTC).
    pub fn from_unix_seconds(secs: i64) -> Self {
        Self::from_ordinal(secs.div_euclid(86_400))
    }

    /// `yyyymmdd` key used for hashing and persistence.
    pub fn key(&self) -> String {
        format!("{:04}{:02}{:02}", self.year, self.month, self.day)
    }

    /// Days since 1970-01-01.
    pub fn ordinal(&self) -> i64 {
        let m = self.month as i64;
        let d = self.day as i64;
        let y = if m <= 2 { self.year as i64 - 1 } else { self.year as i64 };
        let era = (if y >= 0 { y } else { y - 399 }) / 400;
        let yoe = y - era * 400;
        let mp = (m + 9) % 12;
        let doy = (153 * mp + 2) / 5 + d - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        era * 146_097 + doe - 719_468
    }

    pub fn from_ordinal(days: i64) -> Self {
        let z = days + 719_468;
        let era = (if z >= 0 { z } else { z - 146_096 }) / 146_097;
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
        let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
        let year = (yoe + era * 400 + if month <= 2 { 1 } else { 0 }) as i32;
        Self { year, month, day }
    }

    pub fn previous(&self) -> Self {
        Self::from_ordinal(self.ordinal() - 1)
    }

    /// Hash seed for this day's content.
    pub fn seed(&self) -> i64 {
        stable_hash(&self.key())
    }
}

/// FNV-1a over the UTF-8 bytes, reinterpreted as signed.
pub fn stable_hash(s: &str) -> i64 {
    let mut hash: u64 = 1_469_598_103_934_665_603;
    let prime: u64 = 1_099_511_628_211;
    for b in s.bytes() {
        hash ^= b as u64;
        hash = hash.wrapping_mul(prime);
    }
    hash as i64
}

// ── Daily challenge ─────────────────────────────────────────────────────

/// Run-wide rule tweaks applied by the daily challenge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunModifiers {
    pub no_hiding: bool,
    pub fog_multiplier: f32,
    pub risk_only: bool,
    pub start_with_adrenaline: bool,
    pub food_spawn_multiplier: f32,
    pub score_multiplier: f32,
}

impl Default for RunModifiers {
    fn default() -> Self {
        Self {
            no_hiding: false,
            fog_multiplier: 1.0,
            risk_only: false,
            start_with_adrenaline: false,
            food_spawn_multiplier: 1.0,
            score_multiplier: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DailyChallengeId {
    Normal,
    NoHiding,
    DoubleFog,
    RiskOnly,
    AdrenalineStart,
    LowFood,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyChallenge {
    pub id: DailyChallengeId,
    pub title: &'static str,
    pub description: &'static str,
    pub modifiers: RunModifiers,
}

impl DailyChallenge {
    /// All presets, in selection order.
    pub fn presets() -> Vec<DailyChallenge> {
        let base = RunModifiers::default();
        vec![
            DailyChallenge {
                id: DailyChallengeId::Normal,
                title: "Normal Run",
                description: "Standard rules. Make it HOME.",
                modifiers: base,
            },
            DailyChallenge {
                id: DailyChallengeId::NoHiding,
                title: "No Hiding",
                description: "Hide spots are disabled. Run smart.",
                modifiers: RunModifiers { no_hiding: true, score_multiplier: 1.2, ..base },
            },
            DailyChallenge {
                id: DailyChallengeId::DoubleFog,
                title: "Thick Fog",
                description: "Fog is heavier than usual.",
                modifiers: RunModifiers { fog_multiplier: 2.0, score_multiplier: 1.25, ..base },
            },
            DailyChallenge {
                id: DailyChallengeId::RiskOnly,
                title: "Risk Lanes Only",
                description: "Only RISK lane rewards count.",
                modifiers: RunModifiers { risk_only: true, score_multiplier: 1.35, ..base },
            },
            DailyChallenge {
                id: DailyChallengeId::AdrenalineStart,
                title: "Adrenaline Rush",
                description: "Start the run in Adrenaline Mode.",
                modifiers: RunModifiers { start_with_adrenaline: true, score_multiplier: 1.2, ..base },
            },
            DailyChallenge {
                id: DailyChallengeId::LowFood,
                title: "Slim Pickings",
                description: "Food spawns are reduced.",
                modifiers: RunModifiers { food_spawn_multiplier: 0.6, score_multiplier: 1.4, ..base },
            },
        ]
    }

    pub fn preset(id: DailyChallengeId) -> Option<DailyChallenge> {
        Self::presets().into_iter().find(|c| c.id == id)
    }

    /// Challenge of the day: `|hash(yyyymmdd)| mod presets`.
    pub fn for_day(day: CalendarDay) -> DailyChallenge {
        let mut list = Self::presets();
        let idx = (day.seed().unsigned_abs() % list.len() as u64) as usize;
        list.swap_remove(idx)
    }
}

// ── Daily missions ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionType {
    PassCheckpoints,
    SuccessfulHides,
    CollectFood,
    SurviveSeconds,
    ReachDistance,
}

impl MissionType {
    pub const ALL: [MissionType; 5] = [
        MissionType::PassCheckpoints,
        MissionType::SuccessfulHides,
        MissionType::CollectFood,
        MissionType::SurviveSeconds,
        MissionType::ReachDistance,
    ];
}

/// One daily mission and its progress. Progress is the best single-run value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: String,
    pub mission_type: MissionType,
    pub title: String,
    pub target: u32,
    pub reward_pp: u32,
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub is_complete: bool,
}

impl Mission {
    /// Build a mission of `mission_type` with a target drawn from its table.
    pub fn build<R: Rng + ?Sized>(mission_type: MissionType, rng: &mut R) -> Self {
        let (prefix, targets, title): (&str, [u32; 3], fn(u32) -> String) = match mission_type {
            MissionType::PassCheckpoints => ("cp", [2, 3, 4], |t| format!("Pass {} checkpoints", t)),
            MissionType::SuccessfulHides => ("hide", [3, 4, 5], |t| format!("Hide successfully {} times", t)),
            MissionType::CollectFood => ("food", [5, 6, 7], |t| format!("Collect {} food", t)),
            MissionType::SurviveSeconds => ("survive", [60, 75, 90], |t| format!("Survive {}s", t)),
            MissionType::ReachDistance => ("dist", [600, 800, 1000], |t| format!("Reach distance {}", t)),
        };
        let target = targets.choose(rng).copied().unwrap_or(targets[1]);
        let reward_pp = match mission_type {
            MissionType::PassCheckpoints => 60 + target * 15,
            MissionType::SuccessfulHides => 65 + target * 12,
            MissionType::CollectFood => 55 + target * 10,
            MissionType::SurviveSeconds => 80 + (target / 15) * 10,
            MissionType::ReachDistance => 90 + (target / 200) * 20,
        };
        Self {
            id: format!("{}_{}", prefix, target),
            mission_type,
            title: title(target),
            target,
            reward_pp,
            progress: 0,
            is_complete: false,
        }
    }

    /// Fraction complete, in [0, 1].
    pub fn progress_ratio(&self) -> f32 {
        if self.target == 0 {
            return 0.0;
        }
        (self.progress as f32 / self.target as f32).min(1.0)
    }
}

/// Today's three missions: distinct types, seeded by the day hash.
pub fn missions_for_day(day: CalendarDay) -> Vec<Mission> {
    let mut rng = StdRng::seed_from_u64(day.seed() as u64);
    let mut types = MissionType::ALL.to_vec();
    types.shuffle(&mut rng);
    types.into_iter().take(3).map(|t| Mission::build(t, &mut rng)).collect()
}
