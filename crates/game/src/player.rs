//! Dog kinematics: stance, jump arc, slide timer and lane tween.
//!
//! The dog never moves along the track on its own; the world scrolls under it.
//! Only lateral position (lane tween) and height (jump arc) are simulated here.

use engine_core::LaneSystem;

use crate::config::DogConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stance {
    Run,
    Slide,
}

/// Ground contact transitions produced by the jump arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundEvent {
    TookOff,
    Landed,
}

#[derive(Debug, Clone, Copy)]
struct LaneTween {
    from_x: f32,
    to_x: f32,
    elapsed: f32,
    duration: f32,
}

impl LaneTween {
    /// Ease-out quadratic.
    fn sample(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.to_x;
        }
        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        let eased = 1.0 - (1.0 - t) * (1.0 - t);
        self.from_x + (self.to_x - self.from_x) * eased
    }

    fn done(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Kinematic state of the dog.
#[derive(Debug, Clone)]
pub struct DogKinematics {
    cfg: DogConfig,
    pub stance: Stance,
    /// Set and cleared by ground contacts.
    pub grounded: bool,
    /// Height above the track.
    pub height: f32,
    pub vertical_velocity: f32,
    slide_end_time: f32,
    /// Logical lane; switches as soon as a lane change is accepted.
    pub lane: i32,
    /// Rendered lateral position (follows the tween).
    pub x: f32,
    tween: Option<LaneTween>,
    airborne: bool,
}

impl DogKinematics {
    pub fn new(cfg: DogConfig) -> Self {
        Self {
            cfg,
            stance: Stance::Run,
            grounded: true,
            height: 0.0,
            vertical_velocity: 0.0,
            slide_end_time: 0.0,
            lane: 0,
            x: 0.0,
            tween: None,
            airborne: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.cfg.clone());
    }

    pub fn is_sliding(&self) -> bool {
        self.stance == Stance::Slide
    }

    pub fn can_jump(&self) -> bool {
        self.grounded && !self.is_sliding()
    }

    pub fn can_slide(&self) -> bool {
        self.grounded
    }

    /// Launch. `power_mult` scales the take-off velocity (adrenaline).
    pub fn jump(&mut self, power_mult: f32) -> bool {
        if !self.can_jump() {
            return false;
        }
        self.vertical_velocity = self.cfg.jump_velocity * power_mult.max(0.0);
        self.grounded = false;
        true
    }

    pub fn begin_slide(&mut self, now: f32) -> bool {
        if !self.can_slide() {
            return false;
        }
        self.stance = Stance::Slide;
        self.slide_end_time = now + self.cfg.slide_duration;
        true
    }

    /// Start a lane change. Returns `false` when the move is clamped away.
    pub fn change_lane(&mut self, lanes: &LaneSystem, delta: i32, duration: f32) -> bool {
        let target = lanes.step(self.lane, delta);
        if target == self.lane {
            return false;
        }
        self.lane = target;
        self.tween = Some(LaneTween { from_x: self.x, to_x: lanes.x(target), elapsed: 0.0, duration: duration.max(0.0) });
        true
    }

    pub fn is_changing_lane(&self) -> bool {
        self.tween.is_some()
    }

    /// Height above which jump obstacles are cleared.
    pub fn clears_jump_obstacles(&self) -> bool {
        self.height > self.cfg.clearance_height
    }

    /// Advance slide timer, jump arc and lane tween.
    pub fn update(&mut self, now: f32, dt: f32) -> Option<GroundEvent> {
        if self.is_sliding() && now >= self.slide_end_time {
            self.stance = Stance::Run;
        }

        if let Some(tween) = self.tween.as_mut() {
            tween.elapsed += dt;
            self.x = tween.sample();
            if tween.done() {
                self.x = tween.to_x;
                self.tween = None;
            }
        }

        if self.vertical_velocity == 0.0 && self.height <= 0.0 {
            return None;
        }
        self.height += self.vertical_velocity * dt;
        self.vertical_velocity -= self.cfg.gravity * dt;

        if self.height <= 0.0 {
            self.height = 0.0;
            self.vertical_velocity = 0.0;
            self.airborne = false;
            return Some(GroundEvent::Landed);
        }
        if !self.airborne {
            self.airborne = true;
            return Some(GroundEvent::TookOff);
        }
        None
    }

    /// Ground contact hook.
    pub fn mark_grounded(&mut self, grounded: bool) {
        self.grounded = grounded;
    }
}
