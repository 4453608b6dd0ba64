//! The run orchestrator. Owns every subsystem, the track and the random
//! source; the per-frame pass lives in [`crate::update`] and contact
//! resolution in [`crate::collision`].

use std::collections::BTreeSet;

use engine_core::{sim_rng, FrameClock, LaneSystem, SimRng};
use glam::Vec2;
use input::{Intent, IntentQueue};
use procgen::RunModifiers;

use crate::adrenaline::AdrenalineSystem;
use crate::biome::BiomeSystem;
use crate::camera::CameraRig;
use crate::checkpoint::CheckpointScheduler;
use crate::collision::{self, Contact};
use crate::config::GameConfig;
use crate::effects::StatusEffectSystem;
use crate::events::RunEvent;
use crate::perks::{PerkId, PerkSystem};
use crate::player::{DogKinematics, GroundEvent};
use crate::progression::Progression;
use crate::risk_lane::RiskLaneSystem;
use crate::scent::ScentSystem;
use crate::spawner::{ContentResolver, PoolResolver, SpawnChances, SpawnerSystem};
use crate::state::{GamePhase, RunState};
use crate::track::{ContactProbe, Presenter, Track};
use crate::update;
use crate::upgrades::AppliedUpgrades;
use crate::weather::WeatherSystem;

/// Scroll multiplier while slowed.
pub const SLOWED_SCROLL_MULT: f32 = 0.78;
/// Lane-change duration multiplier while panicking.
pub const PANIC_LANE_MULT: f32 = 1.6;

/// Everything a run takes from meta-progression and the daily challenge.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSetup {
    pub modifiers: RunModifiers,
    pub upgrades: AppliedUpgrades,
    pub perks: Vec<PerkId>,
    /// Unlock keys (`biome:woods`, `hideSpot:bush`, ...).
    pub unlocked: BTreeSet<String>,
}

impl Default for RunSetup {
    fn default() -> Self {
        Self {
            modifiers: RunModifiers::default(),
            upgrades: AppliedUpgrades::default(),
            perks: Vec::new(),
            unlocked: Progression::default().unlocked,
        }
    }
}

impl RunSetup {
    pub fn from_progression(progression: &Progression, modifiers: RunModifiers) -> Self {
        Self {
            modifiers,
            upgrades: AppliedUpgrades::from_levels(&progression.upgrades),
            perks: progression.perk_loadout.clone(),
            unlocked: progression.unlocked.clone(),
        }
    }
}

/// Per-tick derived values, recomputed from base values every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameModifiers {
    pub scroll_speed: f32,
    pub lane_change_duration: f32,
    /// Weather × biome spawn intensity.
    pub spawn_rate: f32,
    pub stamina_drain: f32,
    pub hunger_drain: f32,
    pub scent_gain: f32,
    pub scent_decay: f32,
    pub food_mult: f32,
    /// Spawner chances after weather adjustments.
    pub chances: SpawnChances,
    /// 0 = clear view, 1 = fully fogged.
    pub fog: f32,
}

/// A pounce waiting for its warning to run out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayedEvent {
    pub trigger_time: f32,
    pub y: f32,
    pub lane: i32,
}

pub struct GameScene {
    pub(crate) cfg: GameConfig,
    pub(crate) setup: RunSetup,
    pub(crate) rng: SimRng,
    pub(crate) clock: FrameClock,
    pub(crate) lanes: LaneSystem,
    pub(crate) resolver: Box<dyn ContentResolver>,
    pub(crate) probe: ContactProbe,
    pub(crate) builtin_probe: bool,

    pub state: RunState,
    pub dog: DogKinematics,
    pub track: Track,
    pub effects: StatusEffectSystem,
    pub weather: WeatherSystem,
    pub biome: BiomeSystem,
    pub spawner: SpawnerSystem,
    pub checkpoints: CheckpointScheduler,
    pub adrenaline: AdrenalineSystem,
    pub scent: ScentSystem,
    pub risk_lanes: RiskLaneSystem,
    pub perks: PerkSystem,
    pub camera: CameraRig,

    // ── Per-run orchestration state ─────────────────────────────────────
    pub(crate) frame: FrameModifiers,
    /// Run time, advanced by frame deltas.
    pub(crate) now: f32,
    /// Distance scrolled; the dog's position along the track.
    pub(crate) distance: f32,
    pub(crate) scroll_speed_base: f32,
    pub(crate) difficulty_level: u32,
    pub(crate) ice_slip_end_time: f32,
    pub(crate) storm_accumulator: f32,
    pub(crate) snow_accumulator: f32,
    pub(crate) lion_pounces: Vec<DelayedEvent>,
    pub(crate) ground_events: Vec<GroundEvent>,
    pub(crate) intents: IntentQueue,
    pub(crate) restart_requested: bool,
    pub(crate) run_started: bool,
    pub(crate) run_end_emitted: bool,
    pub(crate) events: Vec<RunEvent>,
}

impl GameScene {
    pub fn new(cfg: GameConfig, setup: RunSetup) -> Self {
        let rng = sim_rng(cfg.seed);
        let mut perks = PerkSystem::new();
        perks.configure(&setup.perks);
        let rare_bonus = setup.upgrades.rare_food_bonus_chance + perks.rare_food_bonus();
        let resolver = PoolResolver::new(setup.unlocked.clone(), rare_bonus);

        let mut scene = Self {
            rng,
            clock: FrameClock::new(),
            lanes: LaneSystem::new(cfg.track.lane_offset),
            resolver: Box::new(resolver),
            probe: ContactProbe::new(),
            builtin_probe: true,
            state: RunState::new(cfg.run.clone()),
            dog: DogKinematics::new(cfg.dog.clone()),
            track: Track::new(),
            effects: StatusEffectSystem::new(),
            weather: WeatherSystem::new(cfg.weather.clone()),
            biome: BiomeSystem::new(cfg.checkpoint.biome_rotate_every),
            spawner: SpawnerSystem::new(cfg.spawner.clone()),
            checkpoints: CheckpointScheduler::new(cfg.checkpoint.clone()),
            adrenaline: AdrenalineSystem::new(cfg.adrenaline.clone()),
            scent: ScentSystem::new(cfg.scent.clone()),
            risk_lanes: RiskLaneSystem::new(cfg.risk_lanes.clone()),
            perks,
            camera: CameraRig::new(cfg.track.camera_lead),
            frame: FrameModifiers {
                scroll_speed: cfg.track.base_scroll_speed,
                lane_change_duration: cfg.track.lane_change_duration,
                spawn_rate: 1.0,
                stamina_drain: 0.0,
                hunger_drain: 0.0,
                scent_gain: 1.0,
                scent_decay: 1.0,
                food_mult: 1.0,
                chances: SpawnChances { hide_spot: 0.0, food: 0.0, animal: 0.0, predator: 0.0 },
                fog: 0.0,
            },
            now: 0.0,
            distance: 0.0,
            scroll_speed_base: cfg.track.base_scroll_speed,
            difficulty_level: 0,
            ice_slip_end_time: 0.0,
            storm_accumulator: 0.0,
            snow_accumulator: 0.0,
            lion_pounces: Vec::new(),
            ground_events: Vec::new(),
            intents: IntentQueue::new(),
            restart_requested: false,
            run_started: false,
            run_end_emitted: false,
            events: Vec::new(),
            cfg,
            setup,
        };
        scene.reinitialize();
        scene
    }

    pub fn with_presenter(mut self, presenter: Box<dyn Presenter>) -> Self {
        self.track.set_presenter(presenter);
        self
    }

    pub fn set_resolver(&mut self, resolver: Box<dyn ContentResolver>) {
        self.resolver = resolver;
    }

    /// Turn off the built-in overlap probe when a physics host delivers contacts.
    pub fn set_builtin_probe(&mut self, enabled: bool) {
        self.builtin_probe = enabled;
    }

    /// Tear down and rebuild all run state.
    pub(crate) fn reinitialize(&mut self) {
        let upgrades = self.setup.upgrades;
        self.state.configure(self.setup.modifiers, upgrades.hide_window_bonus, upgrades.max_stamina_bonus);
        self.state.reset();
        self.dog.reset();
        self.track.clear();
        self.probe.reset();
        self.effects.reset();
        self.weather.reset(0.0, &mut self.rng);
        self.biome.configure_unlocked(&self.setup.unlocked);
        self.biome.reset();
        self.spawner.reset(0.0);
        self.checkpoints.reset(0.0, &mut self.rng);
        self.adrenaline.reset();
        self.adrenaline.set_cooldown_multiplier(upgrades.adrenaline_cooldown_multiplier);
        self.scent.reset();
        self.risk_lanes.reset();
        self.perks.configure(&self.setup.perks);
        self.camera.reset();
        self.clock.reset();

        self.now = 0.0;
        self.distance = 0.0;
        self.scroll_speed_base = self.cfg.track.base_scroll_speed;
        self.difficulty_level = 0;
        self.ice_slip_end_time = 0.0;
        self.storm_accumulator = 0.0;
        self.snow_accumulator = 0.0;
        self.lion_pounces.clear();
        self.ground_events.clear();
        self.intents.clear();
        self.restart_requested = false;
        self.run_started = false;
        self.run_end_emitted = false;
        self.frame = update::compose_modifiers(self);
    }

    // ── Host entry points ───────────────────────────────────────────────

    /// Advance one frame stamped with the host clock.
    pub fn update(&mut self, host_time: f32) {
        update::frame(self, host_time);
    }

    /// Buffer an intent for the start of the next frame.
    pub fn queue_intent(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    /// Apply an intent now. Returns `true` when it changed anything.
    /// A tap after the run ended requests a restart.
    pub fn handle_intent(&mut self, intent: Intent) -> bool {
        if self.state.phase.is_terminal() {
            if intent == Intent::Jump {
                self.request_restart();
            }
            return false;
        }
        self.start_run_if_needed();

        match intent {
            Intent::Jump => {
                let cost = self.state.jump_cost();
                if !self.dog.can_jump() || !self.state.can_spend_stamina(cost) {
                    return false;
                }
                self.state.spend_for_jump();
                self.dog.jump(self.adrenaline.jump_multiplier());
                self.scent.on_jump(self.frame.scent_gain);
                true
            }
            Intent::Slide => {
                let cost = self.state.slide_cost();
                if !self.dog.can_slide() || !self.state.can_spend_stamina(cost) {
                    return false;
                }
                self.state.spend_for_slide();
                self.dog.begin_slide(self.now)
            }
            Intent::LaneLeft | Intent::LaneRight => {
                if self.now < self.ice_slip_end_time {
                    log::debug!("Lane change dropped: slipping on ice");
                    return false;
                }
                let delta = intent.lane_delta().unwrap_or(0);
                self.dog.change_lane(&self.lanes, delta, self.frame.lane_change_duration)
            }
        }
    }

    /// Consumed at the top of the next frame.
    pub fn request_restart(&mut self) {
        self.restart_requested = true;
    }

    /// External physics contact began.
    pub fn contact_began(&mut self, contact: &Contact) {
        collision::contact_began(self, contact);
    }

    /// External physics contact ended.
    pub fn contact_ended(&mut self, contact: &Contact) {
        collision::contact_ended(self, contact);
    }

    pub fn drain_events(&mut self) -> Vec<RunEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn now(&self) -> f32 {
        self.now
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn dog_position(&self) -> Vec2 {
        Vec2::new(self.dog.x, self.distance)
    }

    pub fn frame_modifiers(&self) -> &FrameModifiers {
        &self.frame
    }

    pub fn scroll_speed_base(&self) -> f32 {
        self.scroll_speed_base
    }

    pub fn difficulty_level(&self) -> u32 {
        self.difficulty_level
    }

    pub fn ice_slip_end_time(&self) -> f32 {
        self.ice_slip_end_time
    }

    pub fn pending_pounces(&self) -> &[DelayedEvent] {
        &self.lion_pounces
    }

    pub fn setup(&self) -> &RunSetup {
        &self.setup
    }

    pub fn config(&self) -> &GameConfig {
        &self.cfg
    }

    // ── Internal helpers ────────────────────────────────────────────────

    /// ready → running plus the one-off run-start hooks.
    pub(crate) fn start_run_if_needed(&mut self) {
        if self.run_started {
            return;
        }
        self.state.start_if_needed();
        if !self.state.is_running() {
            return;
        }
        self.run_started = true;
        self.state.add_stamina(self.perks.run_start_stamina());
        if self.setup.modifiers.start_with_adrenaline && self.adrenaline.force_activate() {
            self.emit(RunEvent::AdrenalineStarted);
        }
        log::info!("Run started in {}", self.biome.config().display_name);
        self.emit(RunEvent::Started);
    }

    /// Where regular spawns are placed.
    pub(crate) fn spawn_y(&self) -> f32 {
        self.distance + self.cfg.track.view_height * self.cfg.track.spawn_ahead
    }

    /// Catcher bump, camera shake and a `Hit` event. Status effects are up to the caller.
    pub(crate) fn register_hit(&mut self, source: &'static str) {
        self.state.on_obstacle_hit();
        self.camera.bump(0.35);
        log::debug!("Hit by {} (catcher {:.2})", source, self.state.catcher);
        self.emit(RunEvent::Hit { source });
    }

    pub(crate) fn emit(&mut self, event: RunEvent) {
        self.events.push(event);
    }
}
