//! Procedural spawning on a variable-rate timer.
//!
//! Each firing picks a lane and makes one cumulative roll across the category
//! bands (hide spot, food, predator/animal). Whatever is left over is an
//! obstacle, so raising any chance quietly lowers obstacle frequency.
//! Which concrete obstacle, pickup or hide spot appears is left to a
//! [`ContentResolver`] that knows the current biome and the player's unlocks.
//!
//! Base chances only move through [`SpawnerSystem::apply_difficulty_ramp`];
//! weather and challenge modifiers are applied to a per-frame copy.

use std::collections::BTreeSet;

use procgen::{pick, total_weight, BiomeConfig, WeightedItem};
use rand::{Rng, RngCore};

use crate::collision::random_lane;
use crate::config::SpawnerConfig;
use crate::content::HideSpotType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnCategory {
    HideSpot,
    Pickup,
    Obstacle,
    AnimalMarker,
    PredatorMarker,
}

/// One spawn decision. Consumed by the orchestrator the frame it is produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub category: SpawnCategory,
    pub lane: i32,
    pub y: f32,
}

/// Category chances for one roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnChances {
    pub hide_spot: f32,
    pub food: f32,
    pub animal: f32,
    /// Fraction of animal spawns that become predators.
    pub predator: f32,
}

impl SpawnChances {
    /// Resolve a uniform roll in `[0, 1)` against the cumulative bands.
    pub fn resolve(&self, roll: f32, food_mult: f32) -> SpawnCategory {
        let hide = self.hide_spot.max(0.0);
        let food = (self.food * food_mult).max(0.0);
        let animal = self.animal.max(0.0);
        let predator = animal * self.predator.clamp(0.0, 1.0);

        let mut edge = hide;
        if roll < edge {
            return SpawnCategory::HideSpot;
        }
        edge += food;
        if roll < edge {
            return SpawnCategory::Pickup;
        }
        if roll < edge + predator {
            return SpawnCategory::PredatorMarker;
        }
        edge += animal;
        if roll < edge {
            return SpawnCategory::AnimalMarker;
        }
        SpawnCategory::Obstacle
    }
}

/// Per-frame inputs composed by the orchestrator.
#[derive(Debug, Clone, Copy)]
pub struct SpawnFrame {
    /// Weather-adjusted chances for this frame.
    pub chances: SpawnChances,
    /// Aggregate intensity; higher shortens the interval.
    pub spawn_rate: f32,
    pub food_mult: f32,
    pub spawn_y: f32,
}

pub struct SpawnerSystem {
    cfg: SpawnerConfig,

    // ── Base values (ramped per checkpoint) ─────────────────────────────
    base: SpawnChances,
    pub spawn_interval: f32,

    next_spawn_time: f32,
}

impl SpawnerSystem {
    pub fn new(cfg: SpawnerConfig) -> Self {
        let mut s = Self {
            base: base_chances(&cfg),
            spawn_interval: cfg.spawn_interval,
            cfg,
            next_spawn_time: 0.0,
        };
        s.reset(0.0);
        s
    }

    pub fn reset(&mut self, now: f32) {
        self.base = base_chances(&self.cfg);
        self.spawn_interval = self.cfg.spawn_interval;
        self.next_spawn_time = now + self.cfg.first_spawn_delay;
    }

    pub fn base_chances(&self) -> SpawnChances {
        self.base
    }

    pub fn next_spawn_time(&self) -> f32 {
        self.next_spawn_time
    }

    /// Effective interval for a given rate.
    pub fn effective_interval(&self, spawn_rate: f32) -> f32 {
        self.spawn_interval / spawn_rate.max(0.1)
    }

    pub fn update<R: Rng + ?Sized>(
        &mut self,
        now: f32,
        frame: &SpawnFrame,
        pause_spawns: bool,
        rng: &mut R,
    ) -> Option<SpawnRequest> {
        if pause_spawns || now < self.next_spawn_time {
            return None;
        }
        self.next_spawn_time = now + self.effective_interval(frame.spawn_rate);

        let lane = random_lane(rng);
        let roll: f32 = rng.gen();
        let category = frame.chances.resolve(roll, frame.food_mult);
        log::debug!("Spawn {:?} lane {} at {:.0}", category, lane, frame.spawn_y);
        Some(SpawnRequest { category, lane, y: frame.spawn_y })
    }

    /// One difficulty step: shorter interval, fewer hide spots and food, more animals.
    pub fn apply_difficulty_ramp(&mut self) {
        let c = &self.cfg;
        self.spawn_interval = (self.spawn_interval - c.interval_step).max(c.min_interval);
        self.base.hide_spot = (self.base.hide_spot - c.hide_spot_step).max(c.hide_spot_floor);
        self.base.food = (self.base.food - c.food_step).max(c.food_floor);
        self.base.animal = (self.base.animal + c.animal_step).min(c.animal_cap);
    }
}

fn base_chances(cfg: &SpawnerConfig) -> SpawnChances {
    SpawnChances {
        hide_spot: cfg.hide_spot_chance,
        food: cfg.food_chance,
        animal: cfg.animal_chance,
        predator: cfg.predator_chance,
    }
}

// ── Content selection ───────────────────────────────────────────────────

/// Chooses the concrete content for a spawn category.
pub trait ContentResolver {
    fn obstacle(&self, biome: &BiomeConfig, rng: &mut dyn RngCore) -> String;
    fn pickup(&self, biome: &BiomeConfig, rng: &mut dyn RngCore) -> String;
    /// `None` means no hide spot this roll.
    fn hide_spot(&self, biome: &BiomeConfig, rng: &mut dyn RngCore) -> Option<HideSpotType>;
}

pub const FALLBACK_OBSTACLE: &str = "rock";
pub const FALLBACK_PICKUP: &str = "foodSmall";
pub const RARE_PICKUP: &str = "rareFood";

/// Resolves from the biome's weighted pools, honouring unlocks and rare bonuses.
#[derive(Debug, Clone, Default)]
pub struct PoolResolver {
    /// Progression unlock keys (`hideSpot:<id>`, ...).
    pub unlocked: BTreeSet<String>,
    /// Extra rare-food share from perks and upgrades (fraction of total pool weight).
    pub rare_bonus: f32,
}

impl PoolResolver {
    pub fn new(unlocked: BTreeSet<String>, rare_bonus: f32) -> Self {
        Self { unlocked, rare_bonus: rare_bonus.max(0.0) }
    }

    /// Pickup pool with the rare entry boosted by `rare_bonus × total`.
    pub fn boosted_pickups(&self, pool: &[WeightedItem]) -> Vec<WeightedItem> {
        let extra = (self.rare_bonus * total_weight(pool) as f32).round() as i32;
        pool.iter()
            .map(|item| {
                if item.id == RARE_PICKUP && item.weight > 0 {
                    WeightedItem::new(item.id.clone(), item.weight + extra)
                } else {
                    item.clone()
                }
            })
            .collect()
    }
}

impl ContentResolver for PoolResolver {
    fn obstacle(&self, biome: &BiomeConfig, rng: &mut dyn RngCore) -> String {
        pick(&biome.obstacle_pool, rng).unwrap_or(FALLBACK_OBSTACLE).to_string()
    }

    fn pickup(&self, biome: &BiomeConfig, rng: &mut dyn RngCore) -> String {
        let pool = self.boosted_pickups(&biome.pickup_pool);
        pick(&pool, rng).unwrap_or(FALLBACK_PICKUP).to_string()
    }

    fn hide_spot(&self, biome: &BiomeConfig, rng: &mut dyn RngCore) -> Option<HideSpotType> {
        let allowed: Vec<WeightedItem> = biome
            .hide_spot_pool
            .iter()
            .filter(|item| {
                HideSpotType::from_id(&item.id).is_some_and(|h| self.unlocked.contains(&h.unlock_key()))
            })
            .cloned()
            .collect();
        pick(&allowed, rng).and_then(HideSpotType::from_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::LANES;
    use procgen::BiomeId;
    use rand::Rng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn default_chances() -> SpawnChances {
        base_chances(&SpawnerConfig::default())
    }

    #[test]
    fn cumulative_roll_bands() {
        let c = default_chances();
        assert_eq!(c.resolve(0.05, 1.0), SpawnCategory::HideSpot);
        assert_eq!(c.resolve(0.99, 1.0), SpawnCategory::Obstacle);
        assert_eq!(c.resolve(0.10, 1.0), SpawnCategory::Pickup);
        assert_eq!(c.resolve(0.282, 1.0), SpawnCategory::PredatorMarker);
        assert_eq!(c.resolve(0.29, 1.0), SpawnCategory::AnimalMarker);
        assert_eq!(c.resolve(0.36, 1.0), SpawnCategory::AnimalMarker);
        assert_eq!(c.resolve(0.385, 1.0), SpawnCategory::Obstacle);
    }

    #[test]
    fn food_multiplier_widens_food_band() {
        let c = default_chances();
        assert_eq!(c.resolve(0.30, 1.0), SpawnCategory::AnimalMarker);
        assert_eq!(c.resolve(0.30, 1.2), SpawnCategory::Pickup);
    }

    #[test]
    fn predators_are_a_fraction_of_animal_spawns() {
        let c = default_chances();
        let mut rng = StdRng::seed_from_u64(11);
        let (mut animals, mut predators) = (0u32, 0u32);
        for _ in 0..200_000 {
            match c.resolve(rng.gen(), 1.0) {
                SpawnCategory::AnimalMarker => animals += 1,
                SpawnCategory::PredatorMarker => predators += 1,
                _ => {}
            }
        }
        let share = predators as f32 / (animals + predators) as f32;
        assert!((0.03..0.07).contains(&share), "predator share {share}");

        let all = SpawnChances { predator: 1.0, ..c };
        assert_eq!(all.resolve(0.37, 1.0), SpawnCategory::PredatorMarker);
        let none = SpawnChances { predator: 0.0, ..c };
        assert_eq!(none.resolve(0.281, 1.0), SpawnCategory::AnimalMarker);
    }

    #[test]
    fn no_spawn_while_paused_or_early() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = SpawnerSystem::new(SpawnerConfig::default());
        let frame = SpawnFrame { chances: default_chances(), spawn_rate: 1.0, food_mult: 1.0, spawn_y: 500.0 };
        assert_eq!(s.update(0.5, &frame, false, &mut rng), None);
        assert_eq!(s.update(1.0, &frame, true, &mut rng), None);
        let req = s.update(1.0, &frame, false, &mut rng).expect("due");
        assert!(LANES.contains(&req.lane));
        assert_eq!(req.y, 500.0);
        assert!((s.next_spawn_time() - 2.1).abs() < 1e-5);
    }

    #[test]
    fn spawn_lanes_cover_every_lane() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut s = SpawnerSystem::new(SpawnerConfig::default());
        let frame = SpawnFrame { chances: default_chances(), spawn_rate: 1.0, food_mult: 1.0, spawn_y: 0.0 };
        let mut seen = BTreeSet::new();
        for i in 0..300 {
            if let Some(req) = s.update(1.0 + i as f32 * 2.0, &frame, false, &mut rng) {
                assert!(LANES.contains(&req.lane));
                seen.insert(req.lane);
            }
        }
        assert_eq!(seen.len(), LANES.len());
    }

    #[test]
    fn spawn_rate_floor() {
        let s = SpawnerSystem::new(SpawnerConfig::default());
        assert!((s.effective_interval(2.0) - 0.55).abs() < 1e-6);
        assert!((s.effective_interval(0.0) - 11.0).abs() < 1e-4);
    }

    #[test]
    fn ramp_respects_floors_and_caps() {
        let mut s = SpawnerSystem::new(SpawnerConfig::default());
        for _ in 0..100 {
            s.apply_difficulty_ramp();
        }
        let b = s.base_chances();
        assert_eq!(s.spawn_interval, 0.70);
        assert_eq!(b.hide_spot, 0.06);
        assert_eq!(b.food, 0.12);
        assert_eq!(b.animal, 0.22);
        s.reset(0.0);
        assert_eq!(s.base_chances(), default_chances());
    }

    #[test]
    fn hide_spots_only_from_unlocked() {
        let mut rng = StdRng::seed_from_u64(5);
        let woods = BiomeConfig::from_id(BiomeId::Woods);
        let none = PoolResolver::default();
        assert_eq!(none.hide_spot(&woods, &mut rng), None);

        let only_tree = PoolResolver::new(["hideSpot:tree".to_string()].into_iter().collect(), 0.0);
        for _ in 0..50 {
            assert_eq!(only_tree.hide_spot(&woods, &mut rng), Some(HideSpotType::Tree));
        }
    }

    #[test]
    fn rare_bonus_boosts_rare_weight() {
        let suburb = BiomeConfig::from_id(BiomeId::Suburb);
        let r = PoolResolver::new(BTreeSet::new(), 0.10);
        let boosted = r.boosted_pickups(&suburb.pickup_pool);
        let rare = boosted.iter().find(|i| i.id == RARE_PICKUP).map(|i| i.weight);
        // total 78 → +8
        assert_eq!(rare, Some(13));
    }

    #[test]
    fn empty_pools_fall_back() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut biome = BiomeConfig::from_id(BiomeId::Suburb);
        biome.obstacle_pool.clear();
        biome.pickup_pool.clear();
        let r = PoolResolver::default();
        assert_eq!(r.obstacle(&biome, &mut rng), FALLBACK_OBSTACLE);
        assert_eq!(r.pickup(&biome, &mut rng), FALLBACK_PICKUP);
    }
}
