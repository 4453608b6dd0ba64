//! Derived HUD text. The core only produces strings; layout and styling live in the host UI.

use crate::effects::StatusEffect;
use crate::weather::WeatherState;

/// Text fields a HUD would display. Cleared by a run reset.
#[derive(Debug, Clone, PartialEq)]
pub struct HudText {
    /// e.g. "Panic(2s), Slowed(1s)".
    pub active_effects: String,
    pub weather: String,
    /// e.g. "Find cover: 4s", empty when no cover window is open.
    pub cover_timer: String,
    pub weather_hint: String,
}

impl Default for HudText {
    fn default() -> Self {
        Self {
            active_effects: String::new(),
            weather: WeatherState::Clear.label().to_string(),
            cover_timer: String::new(),
            weather_hint: String::new(),
        }
    }
}

impl HudText {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn set_active_effects(&mut self, effects: &[StatusEffect]) {
        self.active_effects = format_effects(effects);
    }

    pub fn set_weather(&mut self, state: WeatherState) {
        self.weather = state.label().to_string();
        self.weather_hint = state.hint().to_string();
    }

    pub fn set_cover_timer(&mut self, remaining: Option<f32>) {
        self.cover_timer = match remaining {
            Some(t) => format!("Find cover: {}s", t.max(0.0).ceil() as i32),
            None => String::new(),
        };
    }
}

/// "Name(Ns)" per effect, whole seconds truncated, comma separated.
pub fn format_effects(effects: &[StatusEffect]) -> String {
    effects
        .iter()
        .map(|e| format!("{}({}s)", e.kind.display_name(), e.remaining as i32))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::StatusEffectKind;

    #[test]
    fn effects_text_truncates_seconds() {
        let list = vec![
            StatusEffect { kind: StatusEffectKind::Panic, remaining: 2.7 },
            StatusEffect { kind: StatusEffectKind::Slowed, remaining: 0.4 },
        ];
        assert_eq!(format_effects(&list), "Panic(2s), Slowed(0s)");
        assert_eq!(format_effects(&[]), "");
    }

    #[test]
    fn cover_timer_rounds_up_and_clears() {
        let mut hud = HudText::default();
        hud.set_cover_timer(Some(4.2));
        assert_eq!(hud.cover_timer, "Find cover: 5s");
        hud.set_cover_timer(Some(-1.0));
        assert_eq!(hud.cover_timer, "Find cover: 0s");
        hud.set_cover_timer(None);
        assert_eq!(hud.cover_timer, "");
    }

    #[test]
    fn clear_restores_defaults() {
        let mut hud = HudText::default();
        hud.set_weather(WeatherState::Snowstorm);
        hud.active_effects = "Panic(1s)".into();
        hud.clear();
        assert_eq!(hud, HudText::default());
        assert_eq!(hud.weather, "Clear");
    }
}
