//! Follow camera with trauma-based screen shake.

use glam::Vec2;

/// Zoom while adrenaline is active.
pub const ADRENALINE_ZOOM: f32 = 0.92;

/// Camera shake driven by trauma. Intensity is trauma squared.
#[derive(Debug, Clone)]
pub struct ScreenShake {
    pub intensity: f32,
    pub decay_rate: f32,
    pub offset: Vec2,
    pub trauma: f32,
    /// Jitter phase; advances with frame time only.
    clock: f32,
}

impl Default for ScreenShake {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenShake {
    pub fn new() -> Self {
        Self { intensity: 0.0, decay_rate: 1.5, offset: Vec2::ZERO, trauma: 0.0, clock: 0.0 }
    }

    pub fn add_trauma(&mut self, amount: f32) {
        self.trauma = (self.trauma + amount).min(1.0);
    }

    pub fn update(&mut self, dt: f32) {
        self.clock += dt;
        self.intensity = self.trauma * self.trauma;
        if self.intensity > 0.001 {
            let max_offset = self.intensity * 18.0;
            let t = self.clock;
            self.offset = Vec2::new((t * 173.7).sin() * max_offset, (t * 259.3).cos() * max_offset);
        } else {
            self.offset = Vec2::ZERO;
        }
        self.trauma = (self.trauma - self.decay_rate * dt).max(0.0);
    }
}

/// Tracks the scrolled world and the dog.
#[derive(Debug, Clone)]
pub struct CameraRig {
    /// World scroll offset (negative distance travelled).
    pub world_offset: f32,
    /// Point the camera looks at, before shake.
    pub target: Vec2,
    /// Camera sits this far ahead of the dog.
    pub lead: f32,
    pub zoom: f32,
    pub shake: ScreenShake,
}

impl CameraRig {
    pub fn new(lead: f32) -> Self {
        Self { world_offset: 0.0, target: Vec2::ZERO, lead, zoom: 1.0, shake: ScreenShake::new() }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.lead);
    }

    pub fn bump(&mut self, trauma: f32) {
        self.shake.add_trauma(trauma);
    }

    pub fn update(&mut self, dt: f32, world_offset: f32, dog: Vec2, adrenaline: bool) {
        self.world_offset = world_offset;
        self.target = Vec2::new(0.0, dog.y + self.lead);
        self.zoom = if adrenaline { ADRENALINE_ZOOM } else { 1.0 };
        self.shake.update(dt);
    }

    /// Final look-at point including shake.
    pub fn position(&self) -> Vec2 {
        self.target + self.shake.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trauma_caps_and_decays() {
        let mut s = ScreenShake::new();
        s.add_trauma(0.7);
        s.add_trauma(0.7);
        assert_eq!(s.trauma, 1.0);
        s.update(0.1);
        assert!(s.offset.length() > 0.0);
        for _ in 0..60 {
            s.update(0.1);
        }
        assert_eq!(s.trauma, 0.0);
        s.update(0.1);
        assert_eq!(s.offset, Vec2::ZERO);
    }

    #[test]
    fn rig_follows_dog_and_zooms_under_adrenaline() {
        let mut rig = CameraRig::new(140.0);
        rig.update(1.0 / 60.0, -500.0, Vec2::new(120.0, 500.0), true);
        assert_eq!(rig.world_offset, -500.0);
        assert_eq!(rig.target, Vec2::new(0.0, 640.0));
        assert_eq!(rig.zoom, ADRENALINE_ZOOM);
        rig.update(1.0 / 60.0, -510.0, Vec2::new(120.0, 510.0), false);
        assert_eq!(rig.zoom, 1.0);
        assert_eq!(rig.position(), rig.target);
    }
}
