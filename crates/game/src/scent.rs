//! Scent meter (0..100) and the catcher-pressure multiplier derived from it.

use crate::config::ScentConfig;

pub const MAX_SCENT: f32 = 100.0;

#[derive(Debug, Clone)]
pub struct ScentSystem {
    cfg: ScentConfig,
    scent: f32,
}

impl ScentSystem {
    pub fn new(cfg: ScentConfig) -> Self {
        Self { cfg, scent: 0.0 }
    }

    pub fn reset(&mut self) {
        self.scent = 0.0;
    }

    pub fn scent(&self) -> f32 {
        self.scent
    }

    /// Passive decay plus continuous gains. Multipliers are the composed per-tick values.
    pub fn update(&mut self, dt: f32, sprinting: bool, sliding: bool, gain_mult: f32, decay_mult: f32) {
        let mut s = self.scent - self.cfg.passive_decay_per_second * decay_mult * dt;
        if sprinting {
            s += self.cfg.sprint_gain_per_second * gain_mult * dt;
        }
        if sliding {
            s += self.cfg.slide_gain_per_second * gain_mult * dt;
        }
        self.scent = s.clamp(0.0, MAX_SCENT);
    }

    pub fn on_jump(&mut self, gain_mult: f32) {
        self.scent = (self.scent + self.cfg.jump_gain * gain_mult).clamp(0.0, MAX_SCENT);
    }

    pub fn reduce_from_hide(&mut self, strength: f32) {
        self.scent = (self.scent - strength.max(0.0)).max(0.0);
    }

    /// `1 + slope · scent/100`; scales catcher bumps on hits.
    pub fn pressure(&self) -> f32 {
        1.0 + self.cfg.pressure_slope * (self.scent / MAX_SCENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressure_spans_one_to_one_thirty_five() {
        let mut s = ScentSystem::new(ScentConfig::default());
        assert_eq!(s.pressure(), 1.0);
        for _ in 0..30 {
            s.on_jump(1.0);
        }
        assert_eq!(s.scent(), MAX_SCENT);
        assert!((s.pressure() - 1.35).abs() < 1e-6);
    }

    #[test]
    fn pressure_is_monotonic_in_scent() {
        let mut s = ScentSystem::new(ScentConfig::default());
        let mut last = s.pressure();
        for _ in 0..10 {
            s.on_jump(1.0);
            assert!(s.pressure() > last);
            last = s.pressure();
        }
    }

    #[test]
    fn decay_and_sprint_balance() {
        let mut s = ScentSystem::new(ScentConfig::default());
        s.on_jump(1.0);
        s.update(1.0, false, false, 1.0, 1.0);
        assert!((s.scent() - 4.0).abs() < 1e-5);
        s.update(1.0, true, false, 1.0, 1.0);
        assert!((s.scent() - 6.0).abs() < 1e-5);
        s.update(10.0, false, false, 1.0, 2.2);
        assert_eq!(s.scent(), 0.0);
    }

    #[test]
    fn hide_reduces_but_never_below_zero() {
        let mut s = ScentSystem::new(ScentConfig::default());
        s.on_jump(2.0);
        s.reduce_from_hide(40.0);
        assert_eq!(s.scent(), 0.0);
    }
}
