//! Run state: phase machine and all meter math (stamina, hunger, catcher, home).
//!
//! Every mutating operation except [`RunState::reset`] and
//! [`RunState::start_if_needed`] is a silent no-op unless the run is
//! [`GamePhase::Running`]. Meters always clamp to `[0, 1]`.

use procgen::RunModifiers;

use crate::config::RunTuning;
use crate::content::HideSpotType;
use crate::hud::HudText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Ready,
    Running,
    GameOver,
    Won,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Won)
    }
}

/// Final numbers of a run, handed to reporting and progression.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub distance: u64,
    pub checkpoints: u32,
    pub hides: u32,
    pub food: u32,
    pub currency_earned: u32,
    pub elapsed: f32,
    pub won: bool,
}

/// Authoritative meters for one run.
#[derive(Debug, Clone)]
pub struct RunState {
    tuning: RunTuning,
    modifiers: RunModifiers,

    pub phase: GamePhase,
    /// Distance points plus bonuses.
    pub score: u64,
    pub elapsed: f32,

    // ── Meters (0..1) ───────────────────────────────────────────────────
    pub stamina: f32,
    pub hunger: f32,
    /// Reaching 1.0 ends the run.
    pub catcher: f32,
    /// Reaching 1.0 wins the run.
    pub home_progress: f32,
    pub checkpoint_count: u32,

    // ── Hiding ──────────────────────────────────────────────────────────
    pub is_hiding: bool,
    hide_end_time: f32,
    pub active_hide_type: Option<HideSpotType>,

    /// Scales catcher bumps from hits. Set every tick from scent.
    pressure_multiplier: f32,
    /// Extra hide seconds from upgrades.
    hide_window_bonus: f32,
    /// Action costs are divided by this (stamina capacity upgrades).
    stamina_capacity: f32,

    // ── Run stats ───────────────────────────────────────────────────────
    pub food_collected: u32,
    pub successful_hides: u32,
    pub currency_earned: u32,

    pub hud: HudText,
}

fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

impl RunState {
    pub fn new(tuning: RunTuning) -> Self {
        let mut s = Self {
            tuning,
            modifiers: RunModifiers::default(),
            phase: GamePhase::Ready,
            score: 0,
            elapsed: 0.0,
            stamina: 1.0,
            hunger: 1.0,
            catcher: 0.0,
            home_progress: 0.0,
            checkpoint_count: 0,
            is_hiding: false,
            hide_end_time: 0.0,
            active_hide_type: None,
            pressure_multiplier: 1.0,
            hide_window_bonus: 0.0,
            stamina_capacity: 1.0,
            food_collected: 0,
            successful_hides: 0,
            currency_earned: 0,
            hud: HudText::default(),
        };
        s.reset();
        s
    }

    /// Install run-wide modifiers. `stamina_bonus_pct` is extra capacity in percent.
    pub fn configure(&mut self, modifiers: RunModifiers, hide_window_bonus: f32, stamina_bonus_pct: f32) {
        self.modifiers = modifiers;
        self.hide_window_bonus = hide_window_bonus.max(0.0);
        self.stamina_capacity = 1.0 + stamina_bonus_pct.max(0.0) / 100.0;
    }

    pub fn modifiers(&self) -> &RunModifiers {
        &self.modifiers
    }

    pub fn tuning(&self) -> &RunTuning {
        &self.tuning
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    pub fn reset(&mut self) {
        self.phase = GamePhase::Ready;
        self.score = 0;
        self.elapsed = 0.0;
        self.stamina = if self.modifiers.start_with_adrenaline {
            clamp01(self.tuning.adrenaline_start_stamina)
        } else {
            1.0
        };
        self.hunger = 1.0;
        self.catcher = 0.0;
        self.home_progress = 0.0;
        self.checkpoint_count = 0;
        self.is_hiding = false;
        self.hide_end_time = 0.0;
        self.active_hide_type = None;
        self.pressure_multiplier = 1.0;
        self.food_collected = 0;
        self.successful_hides = 0;
        self.currency_earned = 0;
        self.hud.clear();
    }

    /// ready → running, exactly once.
    pub fn start_if_needed(&mut self) {
        if self.phase == GamePhase::Ready {
            self.phase = GamePhase::Running;
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn trigger_game_over(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::GameOver;
        }
    }

    pub fn trigger_win(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Won;
        }
    }

    fn check_caught(&mut self) {
        if self.catcher >= 1.0 {
            self.trigger_game_over();
        }
    }

    // ── Per-tick ────────────────────────────────────────────────────────

    /// Accumulate time and distance. `distance_points` is clamped to at least 1.
    pub fn tick(&mut self, dt: f32, distance_points: u64) {
        if !self.is_running() {
            return;
        }
        self.elapsed += dt.max(0.0);
        self.score += distance_points.max(1);
    }

    pub fn add_bonus_points(&mut self, points: u64) {
        if !self.is_running() {
            return;
        }
        self.score += points;
    }

    pub fn set_pressure_multiplier(&mut self, pressure: f32) {
        self.pressure_multiplier = pressure.max(0.0);
    }

    pub fn pressure_multiplier(&self) -> f32 {
        self.pressure_multiplier
    }

    /// Continuous drains (weather/biome/upgrade composed by the caller), per second.
    pub fn apply_stamina_hunger_drain(&mut self, dt: f32, stamina_per_second: f32, hunger_per_second: f32) {
        if !self.is_running() {
            return;
        }
        self.stamina = clamp01(self.stamina - stamina_per_second.max(0.0) * dt);
        self.hunger = clamp01(self.hunger - hunger_per_second.max(0.0) * dt);
    }

    pub fn is_starving(&self) -> bool {
        self.hunger <= 0.0
    }

    /// Passive regen. Reduced under stink; none while starving.
    pub fn update_stamina_regen(&mut self, dt: f32, stink_active: bool) {
        if !self.is_running() || self.is_starving() {
            return;
        }
        let mut regen = self.tuning.stamina_regen_per_second * dt;
        if stink_active {
            regen *= self.tuning.stink_regen_multiplier;
        }
        self.stamina = clamp01(self.stamina + regen);
    }

    /// Flat stamina grant (perks).
    pub fn add_stamina(&mut self, amount: f32) {
        if !self.is_running() {
            return;
        }
        self.stamina = clamp01(self.stamina + amount);
    }

    // ── Actions ─────────────────────────────────────────────────────────

    pub fn jump_cost(&self) -> f32 {
        self.tuning.jump_stamina_cost / self.stamina_capacity
    }

    pub fn slide_cost(&self) -> f32 {
        self.tuning.slide_stamina_cost / self.stamina_capacity
    }

    pub fn can_spend_stamina(&self, amount: f32) -> bool {
        self.is_running() && self.stamina >= amount
    }

    pub fn spend_for_jump(&mut self) {
        let cost = self.jump_cost();
        if self.can_spend_stamina(cost) {
            self.stamina = clamp01(self.stamina - cost);
        }
    }

    pub fn spend_for_slide(&mut self) {
        let cost = self.slide_cost();
        if self.can_spend_stamina(cost) {
            self.stamina = clamp01(self.stamina - cost);
        }
    }

    // ── Collision outcomes ──────────────────────────────────────────────

    /// Catcher bump scaled by the live pressure multiplier.
    pub fn on_obstacle_hit(&mut self) {
        if !self.is_running() {
            return;
        }
        self.catcher = clamp01(self.catcher + self.tuning.obstacle_catcher_bump * self.pressure_multiplier);
        self.check_caught();
    }

    /// Plain food reward: score bonus (× challenge multiplier) and currency.
    pub fn on_food_pickup(&mut self) {
        self.award_food(1.0, 0.0);
    }

    /// Food reward with an extra score factor and hunger restore.
    pub fn award_food(&mut self, score_factor: f32, hunger_restore: f32) {
        if !self.is_running() {
            return;
        }
        let bonus = self.tuning.food_score_bonus as f32 * self.modifiers.score_multiplier * score_factor.max(0.0);
        self.score += bonus.round() as u64;
        self.hunger = clamp01(self.hunger + hunger_restore);
        self.currency_earned += self.tuning.food_currency;
        self.food_collected += 1;
    }

    /// Returns `true` if hiding actually started.
    pub fn begin_hide(&mut self, kind: Option<HideSpotType>, now_elapsed: f32) -> bool {
        if self.modifiers.no_hiding || !self.is_running() {
            return false;
        }
        self.is_hiding = true;
        self.active_hide_type = kind;
        self.hide_end_time = now_elapsed + self.tuning.hide_duration + self.hide_window_bonus;
        self.catcher = clamp01(self.catcher - self.tuning.hide_catcher_relief);
        self.successful_hides += 1;
        true
    }

    pub fn exit_hiding(&mut self) {
        self.is_hiding = false;
        self.active_hide_type = None;
    }

    pub fn should_pause_spawns(&self) -> bool {
        self.is_hiding
    }

    /// While hiding the catcher drains; the hide ends on its own at `hide_end_time`.
    pub fn update_hiding(&mut self, dt: f32, elapsed: f32) {
        if !self.is_hiding || !self.is_running() {
            return;
        }
        self.catcher = clamp01(self.catcher - self.tuning.hide_catcher_drain_per_second * dt);
        if elapsed >= self.hide_end_time {
            self.exit_hiding();
        }
    }

    pub fn hide_end_time(&self) -> f32 {
        self.hide_end_time
    }

    pub fn on_checkpoint_reached(&mut self) {
        if !self.is_running() {
            return;
        }
        self.checkpoint_count += 1;
        self.home_progress = clamp01(self.home_progress + self.tuning.home_progress_per_checkpoint);
        self.hunger = clamp01(self.hunger + self.tuning.checkpoint_hunger_boost);
        self.stamina = clamp01(self.stamina + self.tuning.checkpoint_stamina_boost);
        self.catcher = clamp01(self.catcher - self.tuning.checkpoint_catcher_relief);
        self.currency_earned += self.tuning.checkpoint_currency;
        if self.home_progress >= 1.0 {
            self.trigger_win();
        }
    }

    /// Failing a thunderstorm cover window.
    pub fn on_storm_fail_penalty(&mut self) {
        if !self.is_running() {
            return;
        }
        self.catcher = clamp01(self.catcher + self.tuning.storm_catcher_penalty);
        self.stamina = clamp01(self.stamina - self.tuning.storm_stamina_penalty);
        self.check_caught();
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            distance: self.score,
            checkpoints: self.checkpoint_count,
            hides: self.successful_hides,
            food: self.food_collected,
            currency_earned: self.currency_earned,
            elapsed: self.elapsed,
            won: self.phase == GamePhase::Won,
        }
    }
}
