//! Frame timing for the simulation loop.

/// Delta assumed for the very first frame, when there is no previous timestamp.
pub const NOMINAL_FIRST_DT: f32 = 1.0 / 60.0;

/// Derives per-frame delta time from the host's absolute frame timestamps.
///
/// The host (render loop, test harness, headless driver) passes its own clock
/// value every frame; the clock never reads wall time itself.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    /// Timestamp of the previous frame, `None` before the first frame.
    last_update: Option<f32>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to the frame stamped `now` and return its delta.
    /// Timestamps that go backwards yield a zero delta.
    pub fn tick(&mut self, now: f32) -> f32 {
        let delta = match self.last_update {
            None => NOMINAL_FIRST_DT,
            Some(last) => (now - last).max(0.0),
        };
        self.last_update = Some(now);
        delta
    }

    /// Forget the previous timestamp so the next frame uses the nominal delta.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_uses_nominal_delta() {
        let mut clock = FrameClock::new();
        let dt = clock.tick(100.0);
        assert!((dt - NOMINAL_FIRST_DT).abs() < 1e-6);
        let dt = clock.tick(100.5);
        assert!((dt - 0.5).abs() < 1e-5);
    }

    #[test]
    fn backwards_time_is_zero_delta() {
        let mut clock = FrameClock::new();
        clock.tick(5.0);
        assert_eq!(clock.tick(4.0), 0.0);
    }

    #[test]
    fn reset_restores_nominal_first_frame() {
        let mut clock = FrameClock::new();
        clock.tick(1.0);
        clock.tick(2.0);
        clock.reset();
        assert!((clock.tick(50.0) - NOMINAL_FIRST_DT).abs() < 1e-6);
    }
}
