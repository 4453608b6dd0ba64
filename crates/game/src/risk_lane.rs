//! Periodic safe / risk / shortcut lane assignments.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::RiskLaneConfig;
use crate::content::LaneZoneType;
use crate::weather::dwell;

#[derive(Debug, Clone)]
pub struct RiskLaneSystem {
    cfg: RiskLaneConfig,
    timer: f32,
    next_spawn_in: f32,
    /// Zone the dog is currently inside.
    current_zone: LaneZoneType,
}

impl RiskLaneSystem {
    pub fn new(cfg: RiskLaneConfig) -> Self {
        let first = cfg.first_interval;
        Self { cfg, timer: 0.0, next_spawn_in: first, current_zone: LaneZoneType::Safe }
    }

    pub fn reset(&mut self) {
        self.timer = 0.0;
        self.next_spawn_in = self.cfg.first_interval;
        self.current_zone = LaneZoneType::Safe;
    }

    /// Returns the lane assignment (left, centre, right) when a zone set is due.
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R, risk_only: bool) -> Option<[LaneZoneType; 3]> {
        self.timer += dt;
        if self.timer < self.next_spawn_in {
            return None;
        }
        self.timer = 0.0;
        self.next_spawn_in = dwell(rng, self.cfg.min_interval, self.cfg.max_interval);

        if risk_only {
            return Some([LaneZoneType::Risk; 3]);
        }
        let mut lanes = [LaneZoneType::Safe, LaneZoneType::Risk, LaneZoneType::Shortcut];
        lanes.shuffle(rng);
        Some(lanes)
    }

    pub fn zone_length(&self) -> f32 {
        self.cfg.zone_length
    }

    pub fn current_zone(&self) -> LaneZoneType {
        self.current_zone
    }

    pub fn enter_zone(&mut self, zone: LaneZoneType) {
        self.current_zone = zone;
    }

    pub fn leave_zone(&mut self) {
        self.current_zone = LaneZoneType::Safe;
    }

    /// Multiplier on per-tick distance points.
    pub fn distance_multiplier(&self) -> f32 {
        match self.current_zone {
            LaneZoneType::Shortcut => self.cfg.shortcut_distance_mult,
            _ => 1.0,
        }
    }

    /// Multiplier on the food score bonus.
    pub fn pickup_multiplier(&self) -> f32 {
        match self.current_zone {
            LaneZoneType::Risk => self.cfg.risk_pickup_mult,
            _ => 1.0,
        }
    }
}
