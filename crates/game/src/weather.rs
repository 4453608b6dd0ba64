//! Weather state machine: clear ↔ thunderstorm / snowstorm, with a find-cover
//! challenge nested inside thunderstorms.

use rand::Rng;

use crate::config::WeatherConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherState {
    Clear,
    Thunderstorm,
    Snowstorm,
}

impl WeatherState {
    pub fn label(&self) -> &'static str {
        match self {
            WeatherState::Clear => "Clear",
            WeatherState::Thunderstorm => "Thunderstorm",
            WeatherState::Snowstorm => "Snowstorm",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            WeatherState::Snowstorm => "Low visibility • Slippery lanes",
            _ => "",
        }
    }
}

/// Per-state modifier bundle. Pure lookup; derived values are recomputed from
/// it every tick and never folded into base values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherModifiers {
    pub scent_gain_mult: f32,
    pub scent_decay_mult: f32,
    /// Flat extra stamina drain per second.
    pub stamina_drain_extra: f32,
    /// Flat extra hunger drain per second.
    pub hunger_drain_extra: f32,
    pub spawn_intensity_mult: f32,
    /// 1.0 = fully visible.
    pub visibility: f32,
    pub scroll_speed_mult: f32,
    pub lane_change_mult: f32,
    pub animal_chance_mult: f32,
    pub animal_chance_floor: f32,
    pub food_chance_mult: f32,
    pub food_chance_floor: f32,
}

impl WeatherModifiers {
    pub const CLEAR: WeatherModifiers = WeatherModifiers {
        scent_gain_mult: 1.0,
        scent_decay_mult: 1.0,
        stamina_drain_extra: 0.0,
        hunger_drain_extra: 0.0,
        spawn_intensity_mult: 1.0,
        visibility: 1.0,
        scroll_speed_mult: 1.0,
        lane_change_mult: 1.0,
        animal_chance_mult: 1.0,
        animal_chance_floor: 0.0,
        food_chance_mult: 1.0,
        food_chance_floor: 0.0,
    };

    pub fn for_state(state: WeatherState) -> Self {
        match state {
            WeatherState::Clear => Self::CLEAR,
            WeatherState::Thunderstorm => Self {
                scent_gain_mult: 0.85,
                scent_decay_mult: 1.35,
                stamina_drain_extra: 0.010,
                hunger_drain_extra: 0.004,
                spawn_intensity_mult: 1.10,
                visibility: 0.80,
                ..Self::CLEAR
            },
            WeatherState::Snowstorm => Self {
                scent_gain_mult: 1.10,
                scent_decay_mult: 0.80,
                stamina_drain_extra: 0.015,
                hunger_drain_extra: 0.008,
                spawn_intensity_mult: 0.90,
                visibility: 0.45,
                scroll_speed_mult: 0.86,
                lane_change_mult: 1.35,
                animal_chance_mult: 0.70,
                animal_chance_floor: 0.06,
                food_chance_mult: 0.92,
                food_chance_floor: 0.10,
            },
        }
    }

    pub fn animal_chance(&self, base: f32) -> f32 {
        if self.animal_chance_mult == 1.0 {
            return base;
        }
        (base * self.animal_chance_mult).max(self.animal_chance_floor)
    }

    pub fn food_chance(&self, base: f32) -> f32 {
        if self.food_chance_mult == 1.0 {
            return base;
        }
        (base * self.food_chance_mult).max(self.food_chance_floor)
    }
}

/// Timer-driven weather with randomized dwell times.
#[derive(Debug, Clone)]
pub struct WeatherSystem {
    pub state: WeatherState,
    cfg: WeatherConfig,
    /// When clear ends (only meaningful while clear).
    next_state_change_time: f32,
    /// When the current storm ends.
    state_end_time: f32,

    // ── Cover challenge (thunderstorm only) ─────────────────────────────
    cover_active: bool,
    cover_remaining: f32,
}

impl WeatherSystem {
    pub fn new(cfg: WeatherConfig) -> Self {
        Self {
            state: WeatherState::Clear,
            cfg,
            next_state_change_time: 0.0,
            state_end_time: 0.0,
            cover_active: false,
            cover_remaining: 0.0,
        }
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, now: f32, rng: &mut R) {
        self.state = WeatherState::Clear;
        self.cover_active = false;
        self.cover_remaining = 0.0;
        self.schedule_next_clear(now, rng);
    }

    /// Advance timers. Returns the new state on a transition.
    pub fn update<R: Rng + ?Sized>(&mut self, now: f32, dt: f32, rng: &mut R) -> Option<WeatherState> {
        match self.state {
            WeatherState::Clear => {
                if now < self.next_state_change_time {
                    return None;
                }
                let total = self.cfg.thunder_chance + self.cfg.snow_chance;
                if total <= 0.0 {
                    self.schedule_next_clear(now, rng);
                    return None;
                }
                let roll = rng.gen::<f32>() * total;
                if roll < self.cfg.thunder_chance {
                    self.begin_thunder(now, rng);
                } else {
                    self.begin_snow(now, rng);
                }
                Some(self.state)
            }
            WeatherState::Thunderstorm => {
                if self.cover_active {
                    self.cover_remaining = (self.cover_remaining - dt).max(0.0);
                }
                if now >= self.state_end_time {
                    self.end_to_clear(now, rng);
                    return Some(self.state);
                }
                None
            }
            WeatherState::Snowstorm => {
                if now >= self.state_end_time {
                    self.end_to_clear(now, rng);
                    return Some(self.state);
                }
                None
            }
        }
    }

    pub fn modifiers(&self) -> WeatherModifiers {
        WeatherModifiers::for_state(self.state)
    }

    pub fn cover_active(&self) -> bool {
        self.cover_active
    }

    pub fn cover_remaining(&self) -> f32 {
        self.cover_remaining
    }

    /// The open cover window has run out.
    pub fn cover_expired(&self) -> bool {
        self.state == WeatherState::Thunderstorm && self.cover_active && self.cover_remaining <= 0.01
    }

    pub fn player_found_cover(&mut self) {
        self.cover_active = false;
        self.cover_remaining = 0.0;
    }

    /// Re-arm the cover countdown after a failure.
    pub fn trigger_new_cover_challenge(&mut self) {
        self.cover_active = true;
        self.cover_remaining = self.cfg.cover_deadline;
    }

    fn begin_thunder<R: Rng + ?Sized>(&mut self, now: f32, rng: &mut R) {
        self.state = WeatherState::Thunderstorm;
        self.state_end_time = now + dwell(rng, self.cfg.storm_min, self.cfg.storm_max);
        self.trigger_new_cover_challenge();
    }

    fn begin_snow<R: Rng + ?Sized>(&mut self, now: f32, rng: &mut R) {
        self.state = WeatherState::Snowstorm;
        self.state_end_time = now + dwell(rng, self.cfg.snow_min, self.cfg.snow_max);
        self.cover_active = false;
        self.cover_remaining = 0.0;
    }

    fn end_to_clear<R: Rng + ?Sized>(&mut self, now: f32, rng: &mut R) {
        self.state = WeatherState::Clear;
        self.cover_active = false;
        self.cover_remaining = 0.0;
        self.schedule_next_clear(now, rng);
    }

    fn schedule_next_clear<R: Rng + ?Sized>(&mut self, now: f32, rng: &mut R) {
        self.next_state_change_time = now + dwell(rng, self.cfg.clear_min, self.cfg.clear_max);
    }
}

/// Uniform in `[min, max]`; tolerates `min == max`.
pub(crate) fn dwell<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn run_until_change(w: &mut WeatherSystem, rng: &mut StdRng, start: f32) -> (f32, WeatherState) {
        let mut t = start;
        loop {
            t += 0.1;
            if let Some(s) = w.update(t, 0.1, rng) {
                return (t, s);
            }
            assert!(t < start + 1000.0, "weather never changed");
        }
    }

    #[test]
    fn clear_dwell_respects_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut w = WeatherSystem::new(WeatherConfig::default());
        w.reset(0.0, &mut rng);
        let (t, state) = run_until_change(&mut w, &mut rng, 0.0);
        assert!((16.0..=28.2).contains(&t), "left clear at {}", t);
        assert_ne!(state, WeatherState::Clear);
        let (_, back) = run_until_change(&mut w, &mut rng, t);
        assert_eq!(back, WeatherState::Clear);
    }

    #[test]
    fn thunder_only_config_always_storms_with_cover() {
        let cfg = WeatherConfig { thunder_chance: 1.0, snow_chance: 0.0, ..WeatherConfig::default() };
        let mut rng = StdRng::seed_from_u64(5);
        let mut w = WeatherSystem::new(cfg);
        w.reset(0.0, &mut rng);
        let (_, state) = run_until_change(&mut w, &mut rng, 0.0);
        assert_eq!(state, WeatherState::Thunderstorm);
        assert!(w.cover_active());
        assert_eq!(w.cover_remaining(), 6.0);
    }

    #[test]
    fn zero_chances_stay_clear() {
        let cfg = WeatherConfig { thunder_chance: 0.0, snow_chance: 0.0, ..WeatherConfig::default() };
        let mut rng = StdRng::seed_from_u64(5);
        let mut w = WeatherSystem::new(cfg);
        w.reset(0.0, &mut rng);
        for i in 0..2000 {
            assert_eq!(w.update(i as f32 * 0.1, 0.1, &mut rng), None);
        }
        assert_eq!(w.state, WeatherState::Clear);
    }

    #[test]
    fn cover_countdown_expires_and_rearms() {
        let cfg = WeatherConfig { thunder_chance: 1.0, snow_chance: 0.0, ..WeatherConfig::default() };
        let mut rng = StdRng::seed_from_u64(9);
        let mut w = WeatherSystem::new(cfg);
        w.reset(0.0, &mut rng);
        let (mut t, _) = run_until_change(&mut w, &mut rng, 0.0);
        for _ in 0..61 {
            t += 0.1;
            w.update(t, 0.1, &mut rng);
        }
        assert!(w.cover_expired());
        w.trigger_new_cover_challenge();
        assert!(!w.cover_expired());
        w.player_found_cover();
        assert!(!w.cover_active());
    }

    #[test]
    fn modifier_table_is_pure() {
        assert_eq!(WeatherModifiers::for_state(WeatherState::Clear), WeatherModifiers::CLEAR);
        let snow = WeatherModifiers::for_state(WeatherState::Snowstorm);
        assert_eq!(snow.scroll_speed_mult, 0.86);
        assert_eq!(snow.animal_chance(0.05), 0.06);
        assert!((snow.food_chance(0.18) - 0.1656).abs() < 1e-5);
        let thunder = WeatherModifiers::for_state(WeatherState::Thunderstorm);
        assert_eq!(thunder.animal_chance(0.10), 0.10);
        assert_eq!(thunder.scent_decay_mult, 1.35);
    }
}
