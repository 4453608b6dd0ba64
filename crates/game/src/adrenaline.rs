//! Low-stamina adrenaline burst: auto-triggers, runs for a while, then cools down.

use crate::config::AdrenalineConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdrenalineChange {
    Started,
    Ended,
}

#[derive(Debug, Clone)]
pub struct AdrenalineSystem {
    cfg: AdrenalineConfig,
    active: bool,
    active_timer: f32,
    cooldown_timer: f32,
    /// From upgrades; scales the cooldown applied on each deactivation.
    cooldown_multiplier: f32,
}

impl AdrenalineSystem {
    pub fn new(cfg: AdrenalineConfig) -> Self {
        Self { cfg, active: false, active_timer: 0.0, cooldown_timer: 0.0, cooldown_multiplier: 1.0 }
    }

    pub fn reset(&mut self) {
        self.active = false;
        self.active_timer = 0.0;
        self.cooldown_timer = 0.0;
    }

    pub fn set_cooldown_multiplier(&mut self, mult: f32) {
        self.cooldown_multiplier = mult.max(0.0);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn update(&mut self, dt: f32, stamina: f32) -> Option<AdrenalineChange> {
        if self.cooldown_timer > 0.0 {
            self.cooldown_timer = (self.cooldown_timer - dt).max(0.0);
        }

        let mut change = None;
        if !self.active && self.cooldown_timer == 0.0 && stamina <= self.cfg.trigger_stamina {
            self.activate();
            change = Some(AdrenalineChange::Started);
        }

        if self.active {
            self.active_timer += dt;
            if self.active_timer >= self.cfg.active_duration {
                self.deactivate();
                change = Some(AdrenalineChange::Ended);
            }
        }
        change
    }

    /// Start the burst regardless of stamina and cooldown. No-op while already active.
    pub fn force_activate(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.activate();
        true
    }

    pub fn speed_multiplier(&self) -> f32 {
        if self.active {
            self.cfg.speed_boost
        } else {
            1.0
        }
    }

    pub fn jump_multiplier(&self) -> f32 {
        if self.active {
            self.cfg.jump_boost
        } else {
            1.0
        }
    }

    fn activate(&mut self) {
        self.active = true;
        self.active_timer = 0.0;
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.cooldown_timer = self.cfg.cooldown * self.cooldown_multiplier;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triggers_at_threshold_and_ends_after_duration() {
        let mut a = AdrenalineSystem::new(AdrenalineConfig::default());
        assert_eq!(a.update(0.1, 0.5), None);
        assert_eq!(a.update(0.1, 0.18), Some(AdrenalineChange::Started));
        assert_eq!(a.speed_multiplier(), 1.25);
        assert_eq!(a.jump_multiplier(), 1.15);
        let mut ended = false;
        for _ in 0..45 {
            if a.update(0.1, 0.05) == Some(AdrenalineChange::Ended) {
                ended = true;
                break;
            }
        }
        assert!(ended);
        assert_eq!(a.speed_multiplier(), 1.0);
    }

    #[test]
    fn cooldown_blocks_retrigger() {
        let mut a = AdrenalineSystem::new(AdrenalineConfig::default());
        a.set_cooldown_multiplier(0.5);
        a.force_activate();
        a.update(4.0, 0.0);
        assert!(!a.is_active());
        // 5s cooldown with the upgrade
        assert_eq!(a.update(4.9, 0.0), None);
        assert_eq!(a.update(0.2, 0.0), Some(AdrenalineChange::Started));
    }

    #[test]
    fn force_is_noop_when_active() {
        let mut a = AdrenalineSystem::new(AdrenalineConfig::default());
        assert!(a.force_activate());
        assert!(!a.force_activate());
    }
}
