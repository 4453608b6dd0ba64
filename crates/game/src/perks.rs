//! Equippable perks: a two-slot loadout with start, checkpoint and spawn hooks.

use serde::{Deserialize, Serialize};

pub const MAX_EQUIPPED: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PerkId {
    AgileStart,
    ShadowStep,
    ScavengerLuck,
}

impl PerkId {
    pub const ALL: [PerkId; 3] = [PerkId::AgileStart, PerkId::ShadowStep, PerkId::ScavengerLuck];

    pub fn key(&self) -> &'static str {
        match self {
            PerkId::AgileStart => "agileStart",
            PerkId::ShadowStep => "shadowStep",
            PerkId::ScavengerLuck => "scavengerLuck",
        }
    }

    pub fn unlock_key(&self) -> String {
        format!("perk:{}", self.key())
    }

    pub fn definition(&self) -> PerkDefinition {
        match self {
            PerkId::AgileStart => PerkDefinition {
                id: *self,
                name: "Agile Start",
                description: "Start each run with extra stamina.",
                stamina_start_bonus: 18.0,
                shadow_decay_multiplier: 1.0,
                shadow_duration: 0.0,
                rare_food_bonus_chance: 0.0,
            },
            PerkId::ShadowStep => PerkDefinition {
                id: *self,
                name: "Shadow Step",
                description: "After each checkpoint, scent decays faster for a short time.",
                stamina_start_bonus: 0.0,
                shadow_decay_multiplier: 2.2,
                shadow_duration: 10.0,
                rare_food_bonus_chance: 0.0,
            },
            PerkId::ScavengerLuck => PerkDefinition {
                id: *self,
                name: "Scavenger Luck",
                description: "Slightly increases the chance of rare food drops.",
                stamina_start_bonus: 0.0,
                shadow_decay_multiplier: 1.0,
                shadow_duration: 0.0,
                rare_food_bonus_chance: 0.04,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerkDefinition {
    pub id: PerkId,
    pub name: &'static str,
    pub description: &'static str,
    /// Percent of a full stamina meter granted at run start.
    pub stamina_start_bonus: f32,
    pub shadow_decay_multiplier: f32,
    pub shadow_duration: f32,
    pub rare_food_bonus_chance: f32,
}

/// Runtime state of the equipped perks.
#[derive(Debug, Clone)]
pub struct PerkSystem {
    equipped: Vec<PerkId>,
    shadow_timer: f32,
    shadow_decay_mult: f32,
    rare_food_bonus: f32,
}

impl Default for PerkSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl PerkSystem {
    pub fn new() -> Self {
        Self { equipped: Vec::new(), shadow_timer: 0.0, shadow_decay_mult: 1.0, rare_food_bonus: 0.0 }
    }

    /// Equip a loadout. Duplicates are dropped and only the first two slots count.
    pub fn configure(&mut self, loadout: &[PerkId]) {
        self.equipped.clear();
        for perk in loadout {
            if self.equipped.len() == MAX_EQUIPPED {
                break;
            }
            if !self.equipped.contains(perk) {
                self.equipped.push(*perk);
            }
        }
        self.shadow_timer = 0.0;
        self.shadow_decay_mult = 1.0;
        self.rare_food_bonus = self
            .equipped
            .iter()
            .map(|p| p.definition().rare_food_bonus_chance)
            .sum();
    }

    pub fn equipped(&self) -> &[PerkId] {
        &self.equipped
    }

    pub fn is_equipped(&self, perk: PerkId) -> bool {
        self.equipped.contains(&perk)
    }

    /// Stamina fraction to grant when the run starts.
    pub fn run_start_stamina(&self) -> f32 {
        self.equipped.iter().map(|p| p.definition().stamina_start_bonus / 100.0).sum()
    }

    pub fn on_checkpoint(&mut self) {
        if self.is_equipped(PerkId::ShadowStep) {
            let def = PerkId::ShadowStep.definition();
            self.shadow_timer = def.shadow_duration;
            self.shadow_decay_mult = def.shadow_decay_multiplier;
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.shadow_timer > 0.0 {
            self.shadow_timer -= dt;
            if self.shadow_timer <= 0.0 {
                self.shadow_timer = 0.0;
                self.shadow_decay_mult = 1.0;
            }
        }
    }

    /// Multiplier on passive scent decay, recomputed every tick.
    pub fn scent_decay_multiplier(&self) -> f32 {
        self.shadow_decay_mult
    }

    pub fn rare_food_bonus(&self) -> f32 {
        self.rare_food_bonus
    }
}
