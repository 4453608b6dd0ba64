//! Checkpoint gate scheduling: randomized interval, at most one gate in flight.

use rand::Rng;

use crate::config::CheckpointConfig;
use crate::weather::dwell;

#[derive(Debug, Clone)]
pub struct CheckpointScheduler {
    cfg: CheckpointConfig,
    next_checkpoint_time: f32,
    has_active: bool,
    spawned: u32,
    consumed: u32,
}

impl CheckpointScheduler {
    pub fn new(cfg: CheckpointConfig) -> Self {
        Self { cfg, next_checkpoint_time: 0.0, has_active: false, spawned: 0, consumed: 0 }
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, now: f32, rng: &mut R) {
        self.has_active = false;
        self.spawned = 0;
        self.consumed = 0;
        self.schedule_next(now, rng);
    }

    /// Returns `true` when a gate should be spawned this frame.
    pub fn update(&mut self, now: f32) -> bool {
        if now < self.next_checkpoint_time || self.has_active {
            return false;
        }
        self.has_active = true;
        self.spawned += 1;
        true
    }

    /// The live gate was consumed; re-arm the timer.
    pub fn did_trigger<R: Rng + ?Sized>(&mut self, now: f32, rng: &mut R) {
        if self.has_active {
            self.consumed += 1;
        }
        self.has_active = false;
        self.schedule_next(now, rng);
    }

    /// The live gate scrolled away unconsumed; allow a new one on schedule.
    pub fn did_miss<R: Rng + ?Sized>(&mut self, now: f32, rng: &mut R) {
        if self.has_active {
            self.has_active = false;
            self.spawned -= 1;
            self.schedule_next(now, rng);
        }
    }

    pub fn has_active(&self) -> bool {
        self.has_active
    }

    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    pub fn consumed(&self) -> u32 {
        self.consumed
    }

    pub fn next_checkpoint_time(&self) -> f32 {
        self.next_checkpoint_time
    }

    fn schedule_next<R: Rng + ?Sized>(&mut self, now: f32, rng: &mut R) {
        self.next_checkpoint_time = now + dwell(rng, self.cfg.min_interval, self.cfg.max_interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn never_two_live_gates() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut cp = CheckpointScheduler::new(CheckpointConfig::default());
        cp.reset(0.0, &mut rng);

        let mut t = 0.0;
        let mut live = 0;
        for step in 0..20_000 {
            t += 0.05;
            if cp.update(t) {
                live += 1;
                assert_eq!(live, 1);
            }
            // consume every so often
            if live == 1 && step % 700 == 0 {
                cp.did_trigger(t, &mut rng);
                live -= 1;
            }
            assert!(cp.spawned() - cp.consumed() <= 1);
        }
        assert!(cp.spawned() > 1);
    }

    #[test]
    fn first_gate_in_interval() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut cp = CheckpointScheduler::new(CheckpointConfig::default());
        cp.reset(0.0, &mut rng);
        assert!(!cp.update(29.9));
        let next = cp.next_checkpoint_time();
        assert!((30.0..=60.0).contains(&next));
        assert!(cp.update(next));
        assert!(!cp.update(next + 100.0));
    }

    #[test]
    fn fixed_interval_config() {
        let mut rng = StdRng::seed_from_u64(2);
        let cfg = CheckpointConfig { min_interval: 45.0, max_interval: 45.0, ..CheckpointConfig::default() };
        let mut cp = CheckpointScheduler::new(cfg);
        cp.reset(10.0, &mut rng);
        assert_eq!(cp.next_checkpoint_time(), 55.0);
    }

    #[test]
    fn missed_gate_frees_the_slot() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut cp = CheckpointScheduler::new(CheckpointConfig::default());
        cp.reset(0.0, &mut rng);
        assert!(cp.update(61.0));
        cp.did_miss(61.0, &mut rng);
        assert!(!cp.has_active());
        assert_eq!(cp.spawned(), 0);
        assert!(cp.update(200.0));
    }
}
