//! Player ranks, XP per run, and rank-up rewards.

use serde::{Deserialize, Serialize};

use crate::state::RunSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerRank {
    Stray,
    Runner,
    StreetSmart,
    Survivor,
    EscapeArtist,
    Homebound,
    Legend,
}

impl PlayerRank {
    pub const ALL: [PlayerRank; 7] = [
        PlayerRank::Stray,
        PlayerRank::Runner,
        PlayerRank::StreetSmart,
        PlayerRank::Survivor,
        PlayerRank::EscapeArtist,
        PlayerRank::Homebound,
        PlayerRank::Legend,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            PlayerRank::Stray => "Stray",
            PlayerRank::Runner => "Runner",
            PlayerRank::StreetSmart => "Street-Smart",
            PlayerRank::Survivor => "Survivor",
            PlayerRank::EscapeArtist => "Escape Artist",
            PlayerRank::Homebound => "Homebound",
            PlayerRank::Legend => "Legend",
        }
    }

    pub fn next(&self) -> Option<PlayerRank> {
        let idx = Self::ALL.iter().position(|r| r == self)?;
        Self::ALL.get(idx + 1).copied()
    }

    pub fn definition(&self) -> RankDefinition {
        use UnlockType::*;
        let (required_xp, rewards_pp, unlocks): (u32, u32, &[(&str, UnlockType, &str)]) = match self {
            PlayerRank::Stray => (0, 0, &[("suburb", Biome, "Suburbs")]),
            PlayerRank::Runner => (350, 120, &[("woods", Biome, "Woods"), ("bush", HideSpot, "Bush")]),
            PlayerRank::StreetSmart => (850, 160, &[("tree", HideSpot, "Tree"), ("classic", Skin, "Classic Dog")]),
            PlayerRank::Survivor => (1500, 220, &[("industrial", Biome, "Industrial"), ("shed", HideSpot, "Shed")]),
            PlayerRank::EscapeArtist => {
                (2400, 280, &[("house", HideSpot, "House"), ("agileStart", Perk, "Agile Start")])
            }
            PlayerRank::Homebound => {
                (3600, 350, &[("stormNight", Biome, "Storm Night"), ("culvert", HideSpot, "Culvert")])
            }
            PlayerRank::Legend => (5200, 500, &[("legend", Skin, "Legend Coat"), ("shadowStep", Perk, "Shadow Step")]),
        };
        RankDefinition {
            rank: *self,
            required_xp,
            rewards_pp,
            unlocks: unlocks
                .iter()
                .map(|(id, kind, name)| UnlockItem { id: (*id).to_string(), kind: *kind, name: (*name).to_string() })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnlockType {
    Biome,
    HideSpot,
    Skin,
    Perk,
}

impl UnlockType {
    pub fn prefix(&self) -> &'static str {
        match self {
            UnlockType::Biome => "biome",
            UnlockType::HideSpot => "hideSpot",
            UnlockType::Skin => "skin",
            UnlockType::Perk => "perk",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockItem {
    pub id: String,
    pub kind: UnlockType,
    pub name: String,
}

impl UnlockItem {
    /// Progression key, `type:id`.
    pub fn key(&self) -> String {
        format!("{}:{}", self.kind.prefix(), self.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankDefinition {
    pub rank: PlayerRank,
    pub required_xp: u32,
    pub rewards_pp: u32,
    pub unlocks: Vec<UnlockItem>,
}

/// `distance/10 + 60·checkpoints + 35·hides + 10·food`.
pub fn xp_for_run(summary: &RunSummary) -> u32 {
    let dist = (summary.distance / 10).min(u32::MAX as u64) as u32;
    dist.saturating_add(summary.checkpoints * 60)
        .saturating_add(summary.hides * 35)
        .saturating_add(summary.food * 10)
}

/// Highest rank whose requirement is met.
pub fn rank_for_xp(total_xp: u32) -> PlayerRank {
    PlayerRank::ALL
        .into_iter()
        .filter(|r| total_xp >= r.definition().required_xp)
        .last()
        .unwrap_or(PlayerRank::Stray)
}

/// Definitions of every rank gained going from `from` to `to` (exclusive of `from`).
pub fn rewards_between(from: PlayerRank, to: PlayerRank) -> Vec<RankDefinition> {
    PlayerRank::ALL.into_iter().filter(|r| *r > from && *r <= to).map(|r| r.definition()).collect()
}
