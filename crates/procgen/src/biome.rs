//! Biome catalog: per-biome content pools and tuning knobs for the track.

use serde::{Deserialize, Serialize};

use crate::weighted::WeightedItem;

/// Biomes the run can rotate through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BiomeId {
    /// Quiet streets, fences and bins.
    Suburb,
    /// Forest trail with logs and mud.
    Woods,
    /// Yards full of pallets and pipes. Busier and hungrier.
    Industrial,
    /// Dark, wet and foggy.
    StormNight,
}

impl BiomeId {
    pub const ALL: [BiomeId; 4] = [
        BiomeId::Suburb,
        BiomeId::Woods,
        BiomeId::Industrial,
        BiomeId::StormNight,
    ];

    /// Stable lower-camel id used in unlock keys and save files.
    pub fn key(&self) -> &'static str {
        match self {
            BiomeId::Suburb => "suburb",
            BiomeId::Woods => "woods",
            BiomeId::Industrial => "industrial",
            BiomeId::StormNight => "stormNight",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.key() == key)
    }

    /// Progression unlock key, e.g. `biome:woods`.
    pub fn unlock_key(&self) -> String {
        format!("biome:{}", self.key())
    }
}

/// Multipliers a biome applies on top of weather and upgrades.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiomeModifiers {
    pub spawn_intensity_mult: f32,
    pub stamina_drain_mult: f32,
    pub hunger_drain_mult: f32,
    pub scent_gain_mult: f32,
    /// Added on top of weather fog.
    pub fog_extra: f32,
}

impl Default for BiomeModifiers {
    fn default() -> Self {
        Self {
            spawn_intensity_mult: 1.0,
            stamina_drain_mult: 1.0,
            hunger_drain_mult: 1.0,
            scent_gain_mult: 1.0,
            fog_extra: 0.0,
        }
    }
}

/// Immutable catalog entry for one biome.
#[derive(Debug, Clone)]
pub struct BiomeConfig {
    pub id: BiomeId,
    pub display_name: &'static str,
    /// Obstacle ids ("cone", "fence", "log", ...).
    pub obstacle_pool: Vec<WeightedItem>,
    /// Pickup ids ("foodSmall", "foodBig", "rareFood").
    pub pickup_pool: Vec<WeightedItem>,
    /// Hide-spot ids ("bush", "tree", "shed", "house", "culvert").
    pub hide_spot_pool: Vec<WeightedItem>,
    pub mods: BiomeModifiers,
}

fn pool(entries: &[(&str, i32)]) -> Vec<WeightedItem> {
    entries.iter().map(|(id, w)| WeightedItem::new(*id, *w)).collect()
}

impl BiomeConfig {
    /// Get configuration for a biome.
    pub fn from_id(id: BiomeId) -> Self {
        match id {
            BiomeId::Suburb => Self {
                id,
                display_name: "Suburbs",
                obstacle_pool: pool(&[("trashcan", 30), ("fence", 25), ("cone", 20), ("bicycle", 15)]),
                pickup_pool: pool(&[("foodSmall", 55), ("foodBig", 18), ("rareFood", 5)]),
                hide_spot_pool: pool(&[("bush", 50), ("tree", 20)]),
                mods: BiomeModifiers::default(),
            },
            BiomeId::Woods => Self {
                id,
                display_name: "Woods",
                obstacle_pool: pool(&[("log", 35), ("branch", 25), ("mud", 15), ("rock", 25)]),
                pickup_pool: pool(&[("foodSmall", 50), ("foodBig", 20), ("rareFood", 6)]),
                hide_spot_pool: pool(&[("bush", 35), ("tree", 40), ("shed", 10)]),
                mods: BiomeModifiers {
                    spawn_intensity_mult: 1.06,
                    stamina_drain_mult: 1.03,
                    hunger_drain_mult: 1.02,
                    scent_gain_mult: 0.98,
                    fog_extra: 0.0,
                },
            },
            BiomeId::Industrial => Self {
                id,
                display_name: "Industrial",
                obstacle_pool: pool(&[("pallet", 30), ("pipe", 30), ("crate", 20), ("barrel", 20)]),
                pickup_pool: pool(&[("foodSmall", 45), ("foodBig", 24), ("rareFood", 7)]),
                hide_spot_pool: pool(&[("shed", 35), ("house", 12), ("tree", 10)]),
                mods: BiomeModifiers {
                    spawn_intensity_mult: 1.12,
                    stamina_drain_mult: 1.05,
                    hunger_drain_mult: 1.04,
                    scent_gain_mult: 1.03,
                    fog_extra: 0.0,
                },
            },
            BiomeId::StormNight => Self {
                id,
                display_name: "Storm Night",
                obstacle_pool: pool(&[
                    ("puddle", 25),
                    ("fallenSign", 25),
                    ("fence", 20),
                    ("trashcan", 20),
                    ("wire", 10),
                ]),
                pickup_pool: pool(&[("foodSmall", 52), ("foodBig", 16), ("rareFood", 9)]),
                hide_spot_pool: pool(&[("bush", 25), ("tree", 25), ("house", 15), ("culvert", 8)]),
                mods: BiomeModifiers {
                    spawn_intensity_mult: 1.05,
                    stamina_drain_mult: 1.04,
                    hunger_drain_mult: 1.02,
                    scent_gain_mult: 0.90,
                    fog_extra: 0.18,
                },
            },
        }
    }
}

/// Read-only lookup over every biome config, built once at startup.
#[derive(Debug, Clone)]
pub struct BiomeCatalog {
    entries: Vec<BiomeConfig>,
}

impl Default for BiomeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl BiomeCatalog {
    pub fn new() -> Self {
        Self { entries: BiomeId::ALL.into_iter().map(BiomeConfig::from_id).collect() }
    }

    pub fn get(&self, id: BiomeId) -> &BiomeConfig {
        // Every BiomeId has an entry; index follows BiomeId::ALL order.
        let idx = BiomeId::ALL.iter().position(|b| *b == id).unwrap_or(0);
        &self.entries[idx]
    }

    pub fn all(&self) -> &[BiomeConfig] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weighted::total_weight;

    #[test]
    fn every_biome_has_non_empty_pools() {
        let catalog = BiomeCatalog::new();
        for cfg in catalog.all() {
            assert!(total_weight(&cfg.obstacle_pool) > 0, "{:?}", cfg.id);
            assert!(total_weight(&cfg.pickup_pool) > 0, "{:?}", cfg.id);
            assert!(total_weight(&cfg.hide_spot_pool) > 0, "{:?}", cfg.id);
        }
    }

    #[test]
    fn catalog_lookup_matches_id() {
        let catalog = BiomeCatalog::new();
        for id in BiomeId::ALL {
            assert_eq!(catalog.get(id).id, id);
        }
        assert_eq!(catalog.get(BiomeId::StormNight).mods.fog_extra, 0.18);
    }

    #[test]
    fn keys_round_trip() {
        for id in BiomeId::ALL {
            assert_eq!(BiomeId::from_key(id.key()), Some(id));
        }
        assert_eq!(BiomeId::Woods.unlock_key(), "biome:woods");
        assert_eq!(BiomeId::from_key("moon"), None);
    }
}
