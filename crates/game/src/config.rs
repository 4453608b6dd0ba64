//! Run tuning (track, meters, spawner, weather, scent...). Loaded from dogdash.ron at startup.
//!
//! Every field has a serde default, so a partial file only overrides what it names.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config syntax: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("could not serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("{section}.{field}: min {min} is greater than max {max}")]
    InvertedRange {
        section: &'static str,
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("{section}.{field} = {value} must be within [0, 1]")]
    ChanceOutOfRange {
        section: &'static str,
        field: &'static str,
        value: f32,
    },
    #[error("{section}.{field} = {value} must be positive")]
    NotPositive {
        section: &'static str,
        field: &'static str,
        value: f32,
    },
}

/// All tuning for a run. Loaded from `dogdash.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for the gameplay RNG. `None` = fresh entropy every run.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub track: TrackConfig,
    #[serde(default)]
    pub dog: DogConfig,
    #[serde(default)]
    pub run: RunTuning,
    #[serde(default)]
    pub spawner: SpawnerConfig,
    #[serde(default)]
    pub checkpoint: CheckpointConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub scent: ScentConfig,
    #[serde(default)]
    pub adrenaline: AdrenalineConfig,
    #[serde(default)]
    pub risk_lanes: RiskLaneConfig,
    #[serde(default)]
    pub sim: SimConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            track: TrackConfig::default(),
            dog: DogConfig::default(),
            run: RunTuning::default(),
            spawner: SpawnerConfig::default(),
            checkpoint: CheckpointConfig::default(),
            weather: WeatherConfig::default(),
            scent: ScentConfig::default(),
            adrenaline: AdrenalineConfig::default(),
            risk_lanes: RiskLaneConfig::default(),
            sim: SimConfig::default(),
        }
    }
}

// ── Track geometry & scroll ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Distance between lane centres.
    pub lane_offset: f32,
    /// Visible track height; spawn lead and cleanup distances scale with it.
    pub view_height: f32,
    /// Starting forward scroll speed (units/s).
    pub base_scroll_speed: f32,
    /// Scroll speed added per checkpoint.
    pub scroll_speed_step: f32,
    /// Ceiling for the ramped base scroll speed.
    pub max_scroll_speed: f32,
    /// Base lane-change tween duration (s).
    pub lane_change_duration: f32,
    /// Scroll distance per score point.
    pub units_per_point: f32,
    /// Spawns happen this many view heights ahead of the dog.
    pub spawn_ahead: f32,
    /// Checkpoint reward items are placed this many view heights ahead.
    pub reward_ahead: f32,
    /// Entities further than this many view heights behind the dog are removed.
    pub cleanup_behind: f32,
    /// Checkpoint gates spawn this far past the regular spawn line.
    pub checkpoint_lead: f32,
    /// Weather hazards spawn this far past the regular spawn line.
    pub hazard_lead: f32,
    /// Camera sits this far above the dog.
    pub camera_lead: f32,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            lane_offset: 120.0,
            view_height: 844.0,
            base_scroll_speed: 520.0,
            scroll_speed_step: 35.0,
            max_scroll_speed: 820.0,
            lane_change_duration: 0.10,
            units_per_point: 8.0,
            spawn_ahead: 0.9,
            reward_ahead: 0.55,
            cleanup_behind: 1.2,
            checkpoint_lead: 260.0,
            hazard_lead: 120.0,
            camera_lead: 140.0,
        }
    }
}

// ── Dog kinematics ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DogConfig {
    /// Initial upward velocity of a jump.
    pub jump_velocity: f32,
    /// Downward acceleration while airborne.
    pub gravity: f32,
    /// How long a slide lasts (s).
    pub slide_duration: f32,
    /// Height at which jump-clearable obstacles are cleared.
    pub clearance_height: f32,
}

impl Default for DogConfig {
    fn default() -> Self {
        Self {
            jump_velocity: 820.0,
            gravity: 2600.0,
            slide_duration: 0.55,
            clearance_height: 40.0,
        }
    }
}

// ── Meters & rewards ────────────────────────────────────────────────────

/// Constants for the resource state machine. Amounts are fractions of a full meter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunTuning {
    pub hide_duration: f32,
    pub hide_catcher_drain_per_second: f32,
    pub hide_catcher_relief: f32,
    pub home_progress_per_checkpoint: f32,
    pub checkpoint_catcher_relief: f32,
    pub checkpoint_hunger_boost: f32,
    pub checkpoint_stamina_boost: f32,
    pub stamina_regen_per_second: f32,
    /// Regen multiplier while the stink effect is active.
    pub stink_regen_multiplier: f32,
    pub obstacle_catcher_bump: f32,
    pub jump_stamina_cost: f32,
    pub slide_stamina_cost: f32,
    pub storm_catcher_penalty: f32,
    pub storm_stamina_penalty: f32,
    pub base_stamina_drain_per_second: f32,
    pub base_hunger_drain_per_second: f32,
    pub food_score_bonus: u32,
    pub food_currency: u32,
    pub checkpoint_currency: u32,
    /// Starting stamina when the daily challenge starts the run in adrenaline.
    pub adrenaline_start_stamina: f32,
}

impl Default for RunTuning {
    fn default() -> Self {
        Self {
            hide_duration: 2.2,
            hide_catcher_drain_per_second: 0.20,
            hide_catcher_relief: 0.06,
            home_progress_per_checkpoint: 0.12,
            checkpoint_catcher_relief: 0.10,
            checkpoint_hunger_boost: 0.18,
            checkpoint_stamina_boost: 0.12,
            stamina_regen_per_second: 0.08,
            stink_regen_multiplier: 0.55,
            obstacle_catcher_bump: 0.18,
            jump_stamina_cost: 0.10,
            slide_stamina_cost: 0.07,
            storm_catcher_penalty: 0.18,
            storm_stamina_penalty: 0.20,
            base_stamina_drain_per_second: 0.0,
            base_hunger_drain_per_second: 0.010,
            food_score_bonus: 25,
            food_currency: 3,
            checkpoint_currency: 10,
            adrenaline_start_stamina: 0.15,
        }
    }
}

// ── Spawner & difficulty ramp ───────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    pub spawn_interval: f32,
    /// Delay before the first spawn of a run.
    pub first_spawn_delay: f32,
    pub hide_spot_chance: f32,
    pub food_chance: f32,
    pub animal_chance: f32,
    /// Fraction of animal spawns that become predators.
    pub predator_chance: f32,

    // per-checkpoint ramp
    pub interval_step: f32,
    pub min_interval: f32,
    pub hide_spot_step: f32,
    pub hide_spot_floor: f32,
    pub food_step: f32,
    pub food_floor: f32,
    pub animal_step: f32,
    pub animal_cap: f32,
    /// Every Nth checkpoint adds a panic spike.
    pub panic_every: u32,
    pub panic_spike_duration: f32,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            spawn_interval: 1.10,
            first_spawn_delay: 0.8,
            hide_spot_chance: 0.10,
            food_chance: 0.18,
            animal_chance: 0.10,
            predator_chance: 0.05,
            interval_step: 0.04,
            min_interval: 0.70,
            hide_spot_step: 0.004,
            hide_spot_floor: 0.06,
            food_step: 0.002,
            food_floor: 0.12,
            animal_step: 0.01,
            animal_cap: 0.22,
            panic_every: 3,
            panic_spike_duration: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckpointConfig {
    pub min_interval: f32,
    pub max_interval: f32,
    /// Rotate biome every N checkpoints.
    pub biome_rotate_every: u32,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self { min_interval: 30.0, max_interval: 60.0, biome_rotate_every: 1 }
    }
}

// ── Weather ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub clear_min: f32,
    pub clear_max: f32,
    pub storm_min: f32,
    pub storm_max: f32,
    pub snow_min: f32,
    pub snow_max: f32,
    /// Seconds to reach cover once a thunderstorm cover window opens.
    pub cover_deadline: f32,
    pub thunder_chance: f32,
    pub snow_chance: f32,
    /// Seconds between lightning/cover hazards during a thunderstorm.
    pub storm_hazard_interval: f32,
    /// Seconds between ice patches during a snowstorm.
    pub ice_hazard_interval: f32,
    pub ice_slip_lockout: f32,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            clear_min: 16.0,
            clear_max: 28.0,
            storm_min: 14.0,
            storm_max: 22.0,
            snow_min: 16.0,
            snow_max: 26.0,
            cover_deadline: 6.0,
            thunder_chance: 0.55,
            snow_chance: 0.45,
            storm_hazard_interval: 1.8,
            ice_hazard_interval: 1.6,
            ice_slip_lockout: 1.2,
        }
    }
}

// ── Scent / adrenaline / risk lanes ─────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScentConfig {
    pub passive_decay_per_second: f32,
    pub sprint_gain_per_second: f32,
    pub jump_gain: f32,
    pub slide_gain_per_second: f32,
    /// Pressure at full scent is `1 + pressure_slope`.
    pub pressure_slope: f32,
}

impl Default for ScentConfig {
    fn default() -> Self {
        Self {
            passive_decay_per_second: 2.0,
            sprint_gain_per_second: 4.0,
            jump_gain: 6.0,
            slide_gain_per_second: 3.0,
            pressure_slope: 0.35,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdrenalineConfig {
    pub trigger_stamina: f32,
    pub active_duration: f32,
    pub cooldown: f32,
    pub speed_boost: f32,
    pub jump_boost: f32,
}

impl Default for AdrenalineConfig {
    fn default() -> Self {
        Self {
            trigger_stamina: 0.18,
            active_duration: 4.0,
            cooldown: 10.0,
            speed_boost: 1.25,
            jump_boost: 1.15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskLaneConfig {
    pub min_interval: f32,
    pub max_interval: f32,
    pub first_interval: f32,
    pub zone_length: f32,
    /// Distance-point multiplier while in a shortcut zone.
    pub shortcut_distance_mult: f32,
    /// Pickup score multiplier while in a risk zone.
    pub risk_pickup_mult: f32,
}

impl Default for RiskLaneConfig {
    fn default() -> Self {
        Self {
            min_interval: 18.0,
            max_interval: 28.0,
            first_interval: 22.0,
            zone_length: 800.0,
            shortcut_distance_mult: 1.5,
            risk_pickup_mult: 2.0,
        }
    }
}

// ── Headless driver ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Stop the simulated run after this many seconds even if it is still going.
    pub max_seconds: f32,
    pub frame_rate: f32,
    /// Progression save file.
    pub save_path: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { max_seconds: 300.0, frame_rate: 60.0, save_path: "dogdash_save.ron".into() }
    }
}

impl GameConfig {
    /// Load config from `dogdash.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Invalid config at {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Strict load: any I/O, syntax or range problem is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_ron(&data)
    }

    pub fn from_ron(data: &str) -> Result<Self, ConfigError> {
        let cfg: Self = ron::from_str(data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    /// Save current config to `dogdash.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        match self.to_ron() {
            Ok(s) => {
                if let Err(e) = std::fs::write(&path, s) {
                    log::warn!("Could not write config to {:?}: {}", path, e);
                }
            }
            Err(e) => log::warn!("Could not serialize config: {}", e),
        }
    }

    /// Check ranges and interval ordering.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ranges = [
            ("checkpoint", "interval", self.checkpoint.min_interval, self.checkpoint.max_interval),
            ("weather", "clear", self.weather.clear_min, self.weather.clear_max),
            ("weather", "storm", self.weather.storm_min, self.weather.storm_max),
            ("weather", "snow", self.weather.snow_min, self.weather.snow_max),
            ("risk_lanes", "interval", self.risk_lanes.min_interval, self.risk_lanes.max_interval),
        ];
        for (section, field, min, max) in ranges {
            if min > max {
                return Err(ConfigError::InvertedRange { section, field, min, max });
            }
        }

        let chances = [
            ("spawner", "hide_spot_chance", self.spawner.hide_spot_chance),
            ("spawner", "food_chance", self.spawner.food_chance),
            ("spawner", "animal_chance", self.spawner.animal_chance),
            ("spawner", "predator_chance", self.spawner.predator_chance),
            ("weather", "thunder_chance", self.weather.thunder_chance),
            ("weather", "snow_chance", self.weather.snow_chance),
        ];
        for (section, field, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ChanceOutOfRange { section, field, value });
            }
        }

        let positives = [
            ("track", "view_height", self.track.view_height),
            ("track", "units_per_point", self.track.units_per_point),
            ("spawner", "spawn_interval", self.spawner.spawn_interval),
            ("dog", "slide_duration", self.dog.slide_duration),
            ("sim", "frame_rate", self.sim.frame_rate),
        ];
        for (section, field, value) in positives {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { section, field, value });
            }
        }
        Ok(())
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("dogdash.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = GameConfig::from_ron("(seed: Some(7), spawner: (food_chance: 0.3))").unwrap();
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.spawner.food_chance, 0.3);
        assert_eq!(cfg.spawner.hide_spot_chance, 0.10);
        assert_eq!(cfg.track.base_scroll_speed, 520.0);
    }

    #[test]
    fn inverted_interval_is_rejected() {
        let err = GameConfig::from_ron("(checkpoint: (min_interval: 50.0, max_interval: 10.0))").unwrap_err();
        assert!(matches!(err, ConfigError::InvertedRange { section: "checkpoint", .. }));
    }

    #[test]
    fn chance_above_one_is_rejected() {
        let err = GameConfig::from_ron("(weather: (thunder_chance: 1.5))").unwrap_err();
        assert!(matches!(err, ConfigError::ChanceOutOfRange { field: "thunder_chance", .. }));
    }

    #[test]
    fn written_config_reads_back() {
        let mut cfg = GameConfig::default();
        cfg.seed = Some(99);
        cfg.weather.cover_deadline = 4.5;
        let text = cfg.to_ron().unwrap();
        let back = GameConfig::from_ron(&text).unwrap();
        assert_eq!(back.seed, Some(99));
        assert_eq!(back.weather.cover_deadline, 4.5);
    }

    #[test]
    fn syntax_error_is_parse_error() {
        assert!(matches!(GameConfig::from_ron("(seed: "), Err(ConfigError::Parse(_))));
    }
}
