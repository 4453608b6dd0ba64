//! Shop upgrade catalog and the per-run multipliers folded from purchased levels.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeBranch {
    Endurance,
    Stealth,
    Scavenger,
}

impl UpgradeBranch {
    pub fn display_name(&self) -> &'static str {
        match self {
            UpgradeBranch::Endurance => "Endurance",
            UpgradeBranch::Stealth => "Stealth",
            UpgradeBranch::Scavenger => "Scavenger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UpgradeId {
    IronLegs,
    SlowBurn,
    DeepBreath,
    QuietSteps,
    ScentDrop,
    FastHide,
    SharpNose,
    FullBelly,
    LuckyFind,
}

impl UpgradeId {
    pub const ALL: [UpgradeId; 9] = [
        UpgradeId::IronLegs,
        UpgradeId::SlowBurn,
        UpgradeId::DeepBreath,
        UpgradeId::QuietSteps,
        UpgradeId::ScentDrop,
        UpgradeId::FastHide,
        UpgradeId::SharpNose,
        UpgradeId::FullBelly,
        UpgradeId::LuckyFind,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            UpgradeId::IronLegs => "ironLegs",
            UpgradeId::SlowBurn => "slowBurn",
            UpgradeId::DeepBreath => "deepBreath",
            UpgradeId::QuietSteps => "quietSteps",
            UpgradeId::ScentDrop => "scentDrop",
            UpgradeId::FastHide => "fastHide",
            UpgradeId::SharpNose => "sharpNose",
            UpgradeId::FullBelly => "fullBelly",
            UpgradeId::LuckyFind => "luckyFind",
        }
    }

    pub fn definition(&self) -> UpgradeDefinition {
        let (branch, name, description, max_level, base_cost, cost_growth) = match self {
            UpgradeId::IronLegs => (UpgradeBranch::Endurance, "Iron Legs", "+10 max stamina per level.", 3, 80, 60),
            UpgradeId::SlowBurn => (UpgradeBranch::Endurance, "Slow Burn", "-6% stamina drain per level.", 3, 120, 80),
            UpgradeId::DeepBreath => {
                (UpgradeBranch::Endurance, "Deep Breath", "Adrenaline cooldown -10% per level.", 2, 180, 120)
            }
            UpgradeId::QuietSteps => (UpgradeBranch::Stealth, "Quiet Steps", "-8% scent gain per level.", 3, 90, 70),
            UpgradeId::ScentDrop => {
                (UpgradeBranch::Stealth, "Scent Drop", "Hide reduces scent +10% per level.", 3, 110, 80)
            }
            UpgradeId::FastHide => (UpgradeBranch::Stealth, "Fast Hide", "Hide window +0.15s per level.", 2, 160, 120),
            UpgradeId::SharpNose => {
                (UpgradeBranch::Scavenger, "Sharp Nose", "+6% pickup spawns per level.", 3, 90, 70)
            }
            UpgradeId::FullBelly => (UpgradeBranch::Scavenger, "Full Belly", "-6% hunger drain per level.", 3, 120, 85),
            UpgradeId::LuckyFind => {
                (UpgradeBranch::Scavenger, "Lucky Find", "Rare food chance +2% per level.", 3, 150, 100)
            }
        };
        UpgradeDefinition { id: *self, branch, name, description, max_level, base_cost, cost_growth }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeDefinition {
    pub id: UpgradeId,
    pub branch: UpgradeBranch,
    pub name: &'static str,
    pub description: &'static str,
    pub max_level: u32,
    pub base_cost: u32,
    pub cost_growth: u32,
}

impl UpgradeDefinition {
    /// Price of buying `next_level` (1-based).
    pub fn cost(&self, next_level: u32) -> u32 {
        self.base_cost + next_level.saturating_sub(1) * self.cost_growth
    }
}

/// Upgrade effects resolved for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppliedUpgrades {
    /// Extra stamina capacity, in percent of the base meter.
    pub max_stamina_bonus: f32,
    pub stamina_drain_multiplier: f32,
    pub adrenaline_cooldown_multiplier: f32,
    pub scent_gain_multiplier: f32,
    pub hide_scent_bonus_multiplier: f32,
    /// Extra hide seconds.
    pub hide_window_bonus: f32,
    pub pickup_spawn_multiplier: f32,
    pub hunger_drain_multiplier: f32,
    pub rare_food_bonus_chance: f32,
}

impl Default for AppliedUpgrades {
    fn default() -> Self {
        Self {
            max_stamina_bonus: 0.0,
            stamina_drain_multiplier: 1.0,
            adrenaline_cooldown_multiplier: 1.0,
            scent_gain_multiplier: 1.0,
            hide_scent_bonus_multiplier: 1.0,
            hide_window_bonus: 0.0,
            pickup_spawn_multiplier: 1.0,
            hunger_drain_multiplier: 1.0,
            rare_food_bonus_chance: 0.0,
        }
    }
}

impl AppliedUpgrades {
    pub fn from_levels(levels: &BTreeMap<UpgradeId, u32>) -> Self {
        let lvl = |id: UpgradeId| levels.get(&id).copied().unwrap_or(0).min(id.definition().max_level) as f32;

        Self {
            max_stamina_bonus: lvl(UpgradeId::IronLegs) * 10.0,
            stamina_drain_multiplier: (1.0 - lvl(UpgradeId::SlowBurn) * 0.06).max(0.6),
            adrenaline_cooldown_multiplier: 1.0 - lvl(UpgradeId::DeepBreath) * 0.10,
            scent_gain_multiplier: (1.0 - lvl(UpgradeId::QuietSteps) * 0.08).max(0.65),
            hide_scent_bonus_multiplier: 1.0 + lvl(UpgradeId::ScentDrop) * 0.10,
            hide_window_bonus: lvl(UpgradeId::FastHide) * 0.15,
            pickup_spawn_multiplier: 1.0 + lvl(UpgradeId::SharpNose) * 0.06,
            hunger_drain_multiplier: (1.0 - lvl(UpgradeId::FullBelly) * 0.06).max(0.6),
            rare_food_bonus_chance: lvl(UpgradeId::LuckyFind) * 0.02,
        }
    }
}
