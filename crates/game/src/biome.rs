//! Biome rotation across checkpoints, restricted to unlocked biomes.

use std::collections::BTreeSet;

use procgen::{BiomeCatalog, BiomeConfig, BiomeId, BiomeModifiers};
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone)]
pub struct BiomeSystem {
    catalog: BiomeCatalog,
    current: BiomeId,
    unlocked: Vec<BiomeId>,
    checkpoint_counter: u32,
    rotate_every: u32,
}

impl BiomeSystem {
    pub fn new(rotate_every: u32) -> Self {
        Self {
            catalog: BiomeCatalog::new(),
            current: BiomeId::Suburb,
            unlocked: vec![BiomeId::Suburb],
            checkpoint_counter: 0,
            rotate_every: rotate_every.max(1),
        }
    }

    /// Pick up unlocked biomes from progression keys (`biome:<id>`). Falls back to suburb.
    pub fn configure_unlocked(&mut self, unlocked_keys: &BTreeSet<String>) {
        let mut list: Vec<BiomeId> =
            BiomeId::ALL.into_iter().filter(|b| unlocked_keys.contains(&b.unlock_key())).collect();
        if list.is_empty() {
            list.push(BiomeId::Suburb);
        }
        self.unlocked = list;
        if !self.unlocked.contains(&self.current) {
            self.current = self.unlocked[0];
        }
    }

    pub fn reset(&mut self) {
        self.checkpoint_counter = 0;
        self.current = if self.unlocked.contains(&BiomeId::Suburb) { BiomeId::Suburb } else { self.unlocked[0] };
    }

    /// Count a checkpoint; on cadence, rotate to a different unlocked biome.
    /// Returns the new biome when one was chosen.
    pub fn on_checkpoint_passed<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<BiomeId> {
        self.checkpoint_counter += 1;
        if self.checkpoint_counter % self.rotate_every != 0 {
            return None;
        }
        let candidates: Vec<BiomeId> = self.unlocked.iter().copied().filter(|b| *b != self.current).collect();
        let next = candidates.choose(rng).copied().unwrap_or(self.current);
        self.current = next;
        log::info!("Biome: {}", self.config().display_name);
        Some(next)
    }

    pub fn current(&self) -> BiomeId {
        self.current
    }

    pub fn unlocked(&self) -> &[BiomeId] {
        &self.unlocked
    }

    pub fn config(&self) -> &BiomeConfig {
        self.catalog.get(self.current)
    }

    pub fn mods(&self) -> BiomeModifiers {
        self.config().mods
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn keys(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rotation_never_repeats_current() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut b = BiomeSystem::new(1);
        b.configure_unlocked(&keys(&["biome:suburb", "biome:woods", "biome:industrial"]));
        for _ in 0..50 {
            let before = b.current();
            let after = b.on_checkpoint_passed(&mut rng).expect("rotates every checkpoint");
            assert_ne!(before, after);
            assert!(b.unlocked().contains(&after));
        }
    }

    #[test]
    fn single_unlocked_stays_put() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut b = BiomeSystem::new(1);
        b.configure_unlocked(&BTreeSet::new());
        assert_eq!(b.on_checkpoint_passed(&mut rng), Some(BiomeId::Suburb));
    }

    #[test]
    fn slower_cadence() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut b = BiomeSystem::new(2);
        b.configure_unlocked(&keys(&["biome:suburb", "biome:woods"]));
        assert_eq!(b.on_checkpoint_passed(&mut rng), None);
        assert_eq!(b.on_checkpoint_passed(&mut rng), Some(BiomeId::Woods));
    }

    #[test]
    fn locked_current_moves_to_first_unlocked() {
        let mut b = BiomeSystem::new(1);
        b.configure_unlocked(&keys(&["biome:stormNight"]));
        assert_eq!(b.current(), BiomeId::StormNight);
        assert_eq!(b.mods().fog_extra, 0.18);
    }
}
