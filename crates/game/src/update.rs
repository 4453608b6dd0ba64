//! Per-frame run advancement.
//!
//! Frame order: restart → intents → effects/perks/adrenaline → weather →
//! modifier composition → drains & scent → scroll → score → spawns → markers
//! and delayed pounces → dog kinematics → hiding → regen → cleanup → camera →
//! HUD → contacts → end-of-run.

use engine_core::LANES;
use rand::Rng;

use crate::adrenaline::AdrenalineChange;
use crate::collision::{random_lane, Body, Contact};
use crate::content::{BearRequirement, Clearance, Creature, EntityKind, PickupKind};
use crate::effects::StatusEffectKind;
use crate::events::RunEvent;
use crate::player::GroundEvent;
use crate::scene::{DelayedEvent, FrameModifiers, GameScene, PANIC_LANE_MULT, SLOWED_SCROLL_MULT};
use crate::spawner::{SpawnCategory, SpawnChances, SpawnFrame, SpawnRequest};
use crate::track::DogProbe;
use crate::weather::WeatherState;

/// How long a lion warning stays on the track.
const LION_WARNING_SECONDS: f32 = 1.0;
/// Delay between the warning and the pounce.
const LION_POUNCE_DELAY: f32 = 0.9;
/// Skunks leave their cloud this far behind them.
const STINK_CLOUD_OFFSET: f32 = 40.0;

/// Fold weather, biome, status effects, upgrades, perks and the daily
/// challenge into this tick's effective values.
pub(crate) fn compose_modifiers(scene: &GameScene) -> FrameModifiers {
    let weather = scene.weather.modifiers();
    let biome = scene.biome.mods();
    let upgrades = &scene.setup.upgrades;
    let challenge = &scene.setup.modifiers;
    let tuning = scene.state.tuning();

    let mut scroll_speed = scene.scroll_speed_base * weather.scroll_speed_mult * scene.adrenaline.speed_multiplier();
    if scene.effects.is_active(StatusEffectKind::Slowed) {
        scroll_speed *= SLOWED_SCROLL_MULT;
    }

    let mut lane_change_duration = scene.cfg.track.lane_change_duration * weather.lane_change_mult;
    if scene.effects.is_active(StatusEffectKind::Panic) {
        lane_change_duration *= PANIC_LANE_MULT;
    }

    let base = scene.spawner.base_chances();
    let chances = SpawnChances {
        animal: weather.animal_chance(base.animal),
        food: weather.food_chance(base.food),
        ..base
    };

    FrameModifiers {
        scroll_speed,
        lane_change_duration,
        spawn_rate: weather.spawn_intensity_mult * biome.spawn_intensity_mult,
        stamina_drain: (tuning.base_stamina_drain_per_second + weather.stamina_drain_extra)
            * biome.stamina_drain_mult
            * upgrades.stamina_drain_multiplier,
        hunger_drain: (tuning.base_hunger_drain_per_second + weather.hunger_drain_extra)
            * biome.hunger_drain_mult
            * upgrades.hunger_drain_multiplier,
        scent_gain: weather.scent_gain_mult * biome.scent_gain_mult * upgrades.scent_gain_multiplier,
        scent_decay: weather.scent_decay_mult * scene.perks.scent_decay_multiplier(),
        food_mult: challenge.food_spawn_multiplier * upgrades.pickup_spawn_multiplier,
        chances,
        fog: ((1.0 - weather.visibility) * challenge.fog_multiplier + biome.fog_extra).clamp(0.0, 1.0),
    }
}

/// Run one frame. `host_time` is the host's monotonic clock in seconds.
pub(crate) fn frame(scene: &mut GameScene, host_time: f32) {
    if scene.restart_requested {
        log::info!("Restarting run");
        scene.reinitialize();
        return;
    }

    scene.start_run_if_needed();
    let dt = scene.clock.tick(host_time);
    if !scene.state.is_running() {
        finish_if_terminal(scene);
        // A queued tap after the run ends restarts on the next frame.
        while let Some(intent) = scene.intents.pop() {
            scene.handle_intent(intent);
        }
        return;
    }
    scene.now += dt;

    while let Some(intent) = scene.intents.pop() {
        scene.handle_intent(intent);
    }

    // ── Timers & modifiers ──────────────────────────────────────────────
    scene.effects.update(dt);
    scene.perks.update(dt);
    match scene.adrenaline.update(dt, scene.state.stamina) {
        Some(AdrenalineChange::Started) => scene.emit(RunEvent::AdrenalineStarted),
        Some(AdrenalineChange::Ended) => scene.emit(RunEvent::AdrenalineEnded),
        None => {}
    }
    update_weather(scene, dt);
    scene.frame = compose_modifiers(scene);
    let mods = scene.frame;

    // ── Meters ──────────────────────────────────────────────────────────
    scene.state.apply_stamina_hunger_drain(dt, mods.stamina_drain, mods.hunger_drain);
    let sprinting = scene.adrenaline.is_active();
    let sliding = scene.dog.is_sliding();
    scene.scent.update(dt, sprinting, sliding, mods.scent_gain, mods.scent_decay);
    scene.state.set_pressure_multiplier(scene.scent.pressure());

    // ── Scroll & score ──────────────────────────────────────────────────
    let step = mods.scroll_speed * dt;
    scene.distance += step;
    let points = (step / scene.cfg.track.units_per_point * scene.risk_lanes.distance_multiplier()).floor();
    scene.state.tick(dt, points.max(1.0) as u64);

    // ── Spawning ────────────────────────────────────────────────────────
    spawn_pass(scene, dt);
    resolve_markers(scene);
    resolve_pounces(scene);
    scene.track.tick_lifetimes(dt);

    // ── Dog ─────────────────────────────────────────────────────────────
    let now = scene.now;
    if let Some(event) = scene.dog.update(now, dt) {
        scene.ground_events.push(event);
    }
    let elapsed = scene.state.elapsed;
    scene.state.update_hiding(dt, elapsed);
    let stink = scene.effects.is_active(StatusEffectKind::Stink);
    scene.state.update_stamina_regen(dt, stink);

    // ── Cleanup, camera, HUD ────────────────────────────────────────────
    let cutoff = scene.distance - scene.cfg.track.view_height * scene.cfg.track.cleanup_behind;
    for kind in scene.track.cleanup_behind(cutoff) {
        if kind == EntityKind::Checkpoint {
            log::debug!("Checkpoint missed");
            scene.checkpoints.did_miss(now, &mut scene.rng);
        }
    }

    let dog = scene.dog_position();
    let adrenaline = scene.adrenaline.is_active();
    scene.camera.update(dt, -scene.distance, dog, adrenaline);
    let (offset, look_at) = (scene.camera.world_offset, scene.camera.position());
    scene.track.presenter_mut().camera_follow(offset, look_at);

    let active = scene.effects.active_list();
    scene.state.hud.set_active_effects(&active);

    resolve_contacts(scene);
    finish_if_terminal(scene);
}

fn update_weather(scene: &mut GameScene, dt: f32) {
    let now = scene.now;
    if let Some(state) = scene.weather.update(now, dt, &mut scene.rng) {
        log::info!("Weather changed to {}", state.label());
        scene.storm_accumulator = 0.0;
        scene.snow_accumulator = 0.0;
        scene.state.hud.set_weather(state);
        scene.emit(RunEvent::WeatherChanged(state));
    }

    let hazard_y = scene.spawn_y() + scene.cfg.track.hazard_lead;
    match scene.weather.state {
        WeatherState::Thunderstorm => {
            scene.storm_accumulator += dt;
            if scene.storm_accumulator >= scene.cfg.weather.storm_hazard_interval {
                scene.storm_accumulator = 0.0;
                let lane = random_lane(&mut scene.rng);
                let kind = if scene.rng.gen_bool(0.5) { EntityKind::LightningZone } else { EntityKind::CoverZone };
                scene.track.spawn(kind, lane, hazard_y);
            }
            if scene.weather.cover_expired() {
                log::debug!("No cover found in time");
                scene.state.on_storm_fail_penalty();
                scene.weather.trigger_new_cover_challenge();
                scene.emit(RunEvent::StormFailed);
            }
            let remaining = scene.weather.cover_active().then(|| scene.weather.cover_remaining());
            scene.state.hud.set_cover_timer(remaining);
        }
        WeatherState::Snowstorm => {
            scene.snow_accumulator += dt;
            if scene.snow_accumulator >= scene.cfg.weather.ice_hazard_interval {
                scene.snow_accumulator = 0.0;
                let lane = random_lane(&mut scene.rng);
                scene.track.spawn(EntityKind::IcePatch, lane, hazard_y);
            }
            scene.state.hud.set_cover_timer(None);
        }
        WeatherState::Clear => scene.state.hud.set_cover_timer(None),
    }
}

fn spawn_pass(scene: &mut GameScene, dt: f32) {
    let now = scene.now;
    let spawn_y = scene.spawn_y();
    let spawn_frame = SpawnFrame {
        chances: scene.frame.chances,
        spawn_rate: scene.frame.spawn_rate,
        food_mult: scene.frame.food_mult,
        spawn_y,
    };
    let pause = scene.state.should_pause_spawns();
    if let Some(request) = scene.spawner.update(now, &spawn_frame, pause, &mut scene.rng) {
        materialize(scene, request);
    }

    if scene.checkpoints.update(now) {
        log::debug!("Checkpoint gate #{}", scene.checkpoints.spawned());
        scene.track.spawn(EntityKind::Checkpoint, 0, spawn_y + scene.cfg.track.checkpoint_lead);
    }

    let risk_only = scene.setup.modifiers.risk_only;
    if let Some(zones) = scene.risk_lanes.update(dt, &mut scene.rng, risk_only) {
        let length = scene.risk_lanes.zone_length();
        for (lane, zone) in LANES.into_iter().zip(zones) {
            scene.track.spawn_lane_zone(zone, lane, spawn_y, length);
        }
    }
}

/// Turn a spawn decision into a track entity.
fn materialize(scene: &mut GameScene, request: SpawnRequest) {
    let SpawnRequest { category, lane, y } = request;
    match category {
        SpawnCategory::HideSpot => {
            if let Some(hide) = scene.resolver.hide_spot(scene.biome.config(), &mut scene.rng) {
                scene.track.spawn_content(EntityKind::HideSpot(hide), lane, y, hide.id());
            }
        }
        SpawnCategory::Pickup => {
            let id = scene.resolver.pickup(scene.biome.config(), &mut scene.rng);
            scene.track.spawn_content(EntityKind::Pickup(PickupKind::from_id(&id)), lane, y, &id);
        }
        SpawnCategory::Obstacle => {
            let id = scene.resolver.obstacle(scene.biome.config(), &mut scene.rng);
            scene.track.spawn_content(EntityKind::Obstacle(Clearance::for_obstacle(&id)), lane, y, &id);
        }
        SpawnCategory::AnimalMarker => {
            scene.track.spawn(EntityKind::AnimalMarker, lane, y);
        }
        SpawnCategory::PredatorMarker => {
            scene.track.spawn(EntityKind::PredatorMarker, lane, y);
        }
    }
}

/// Markers never survive the frame they were spawned in.
fn resolve_markers(scene: &mut GameScene) {
    for (marker, pos) in scene.track.take_markers() {
        match marker {
            EntityKind::PredatorMarker => {
                if scene.rng.gen_bool(0.5) {
                    scene.track.spawn(EntityKind::Animal(Creature::Moose), pos.lane, pos.y);
                } else {
                    scene.track.spawn_transient(EntityKind::LionWarning, pos.lane, pos.y, LION_WARNING_SECONDS);
                    scene.lion_pounces.push(DelayedEvent {
                        trigger_time: scene.now + LION_POUNCE_DELAY,
                        y: pos.y,
                        lane: pos.lane,
                    });
                }
            }
            EntityKind::AnimalMarker => {
                let roll = scene.rng.gen_range(0..100);
                if roll < 40 {
                    scene.track.spawn(EntityKind::Animal(Creature::Deer), pos.lane, pos.y);
                } else if roll < 70 {
                    scene.track.spawn(EntityKind::Animal(Creature::Skunk), pos.lane, pos.y);
                    scene.track.spawn(EntityKind::StinkCloud, pos.lane, pos.y - STINK_CLOUD_OFFSET);
                } else {
                    let requirement =
                        if scene.rng.gen_bool(0.5) { BearRequirement::Jump } else { BearRequirement::Slide };
                    scene.track.spawn(EntityKind::Bear(requirement), pos.lane, pos.y);
                }
            }
            _ => {}
        }
    }
}

fn resolve_pounces(scene: &mut GameScene) {
    let now = scene.now;
    let (due, waiting): (Vec<_>, Vec<_>) = scene.lion_pounces.drain(..).partition(|p| now >= p.trigger_time);
    scene.lion_pounces = waiting;
    for pounce in due {
        scene.track.spawn(EntityKind::Animal(Creature::MountainLion), pounce.lane, pounce.y);
    }
}

/// Feed ground transitions and probe overlaps through the contact handlers.
fn resolve_contacts(scene: &mut GameScene) {
    let ground = Contact::dog_with(Body::ground());
    for event in std::mem::take(&mut scene.ground_events) {
        match event {
            GroundEvent::Landed => scene.contact_began(&ground),
            GroundEvent::TookOff => scene.contact_ended(&ground),
        }
    }

    if !scene.builtin_probe {
        return;
    }
    let dog = DogProbe {
        lane: scene.dog.lane,
        y: scene.distance,
        sliding: scene.dog.is_sliding(),
        clears_jump: scene.dog.clears_jump_obstacles(),
    };
    let result = scene.probe.probe(&scene.track, &dog);
    for (entity, kind) in result.ended {
        if let Some(contact) = Contact::dog_with_entity(entity, &kind) {
            scene.contact_ended(&contact);
        }
    }
    for (entity, kind) in result.began {
        if let Some(contact) = Contact::dog_with_entity(entity, &kind) {
            scene.contact_began(&contact);
        }
    }
}

fn finish_if_terminal(scene: &mut GameScene) {
    if !scene.state.phase.is_terminal() || scene.run_end_emitted {
        return;
    }
    scene.run_end_emitted = true;
    let summary = scene.state.summary();
    log::info!(
        "Run ended ({:?}): distance {}, checkpoints {}, hides {}, food {}",
        scene.state.phase,
        summary.distance,
        summary.checkpoints,
        summary.hides,
        summary.food
    );
    scene.emit(RunEvent::RunEnded(summary));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::content::{HideSpotType, LaneZoneType};
    use crate::scene::RunSetup;
    use crate::spawner::ContentResolver;
    use crate::state::GamePhase;
    use input::Intent;
    use procgen::BiomeConfig;
    use rand::RngCore;

    const DT: f32 = 1.0 / 60.0;

    fn scene(seed: u64) -> GameScene {
        let mut cfg = GameConfig::default();
        cfg.seed = Some(seed);
        GameScene::new(cfg, RunSetup::default())
    }

    /// Simple autopilot: jump or slide on a timer, drift between lanes.
    fn drive(scene: &mut GameScene, frames: usize) -> Vec<RunEvent> {
        let mut events = Vec::new();
        for i in 0..frames {
            match i % 90 {
                0 => scene.queue_intent(Intent::Jump),
                45 => scene.queue_intent(Intent::Slide),
                30 => scene.queue_intent(if i % 180 == 30 { Intent::LaneLeft } else { Intent::LaneRight }),
                _ => {}
            }
            scene.update(i as f32 * DT);
            events.extend(scene.drain_events());
        }
        events
    }

    #[test]
    fn first_frame_starts_the_run() {
        let mut s = scene(1);
        assert_eq!(s.phase(), GamePhase::Ready);
        s.update(0.0);
        assert_eq!(s.phase(), GamePhase::Running);
        assert!((s.now() - DT).abs() < 1e-6);
        assert_eq!(s.drain_events(), vec![RunEvent::Started]);
    }

    #[test]
    fn seeded_runs_are_deterministic() {
        let mut a = scene(42);
        let mut b = scene(42);
        let ea = drive(&mut a, 60 * 40);
        let eb = drive(&mut b, 60 * 40);
        assert_eq!(ea, eb);
        assert_eq!(a.state.score, b.state.score);
        assert_eq!(a.distance(), b.distance());
        assert_eq!(a.track.len(), b.track.len());
    }

    #[test]
    fn score_advances_with_scroll() {
        let mut s = scene(3);
        for i in 0..60 {
            s.update(i as f32 * DT);
        }
        // 520 units/s at 8 units a point is at least 1 point per frame.
        assert!(s.state.score >= 60);
        assert!(s.distance() > 500.0 && s.distance() < 540.0);
        assert_eq!(s.dog_position().y, s.distance());
    }

    #[test]
    fn no_markers_survive_a_frame() {
        let mut s = scene(9);
        for i in 0..(60 * 30) {
            s.update(i as f32 * DT);
            assert_eq!(s.track.count(|k| k.is_marker()), 0);
        }
    }

    #[test]
    fn slowed_and_panic_compose() {
        let mut s = scene(5);
        s.update(0.0);
        let base = *s.frame_modifiers();
        s.effects.add(StatusEffectKind::Slowed, 2.0);
        s.effects.add(StatusEffectKind::Panic, 2.0);
        let m = compose_modifiers(&s);
        assert!((m.scroll_speed - base.scroll_speed * SLOWED_SCROLL_MULT).abs() < 1e-3);
        assert!((m.lane_change_duration - base.lane_change_duration * PANIC_LANE_MULT).abs() < 1e-5);
        assert_eq!(m.fog, 0.0);
    }

    #[test]
    fn snowstorm_modifiers_apply_to_a_copy() {
        let mut s = scene(5);
        s.weather.state = WeatherState::Snowstorm;
        let base = s.spawner.base_chances();
        let m = compose_modifiers(&s);
        assert!((m.chances.animal - (base.animal * 0.7).max(0.06)).abs() < 1e-6);
        assert!((m.scroll_speed - 520.0 * 0.86).abs() < 1e-3);
        assert!((m.fog - 0.55).abs() < 1e-5);
        assert_eq!(s.spawner.base_chances(), base);
    }

    #[test]
    fn nothing_advances_after_game_over_and_end_is_reported_once() {
        let mut s = scene(7);
        s.update(0.0);
        s.update(DT);
        s.state.trigger_game_over();
        let (score, distance) = (s.state.score, s.distance());

        let mut ended = 0;
        for i in 2..30 {
            s.update(i as f32 * DT);
            ended += s.drain_events().iter().filter(|e| matches!(e, RunEvent::RunEnded(_))).count();
        }
        assert_eq!(ended, 1);
        assert_eq!(s.state.score, score);
        assert_eq!(s.distance(), distance);
    }

    #[test]
    fn tap_after_game_over_restarts() {
        let mut s = scene(7);
        for i in 0..60 {
            s.update(i as f32 * DT);
        }
        s.state.trigger_game_over();
        assert!(!s.handle_intent(Intent::Jump));
        s.update(1.0);
        assert_eq!(s.phase(), GamePhase::Ready);
        assert_eq!(s.distance(), 0.0);
        assert!(s.track.is_empty());

        s.update(1.1);
        assert_eq!(s.phase(), GamePhase::Running);
        assert!((s.now() - DT).abs() < 1e-6);
    }

    #[test]
    fn queued_tap_after_game_over_restarts() {
        let mut s = scene(7);
        for i in 0..30 {
            s.update(i as f32 * DT);
        }
        s.state.trigger_game_over();
        s.queue_intent(Intent::Jump);
        s.update(0.6);
        assert!(s.phase().is_terminal());
        s.update(0.7);
        assert_eq!(s.phase(), GamePhase::Ready);
        assert_eq!(s.distance(), 0.0);
        assert_eq!(s.state.score, 0);
    }

    #[test]
    fn queued_non_jump_after_game_over_does_nothing() {
        let mut s = scene(7);
        s.update(0.0);
        s.state.trigger_game_over();
        s.queue_intent(Intent::LaneLeft);
        s.queue_intent(Intent::Slide);
        s.update(DT);
        s.update(2.0 * DT);
        assert!(s.phase().is_terminal());
        assert!(s.intents.drain().is_empty());
    }

    /// Always answers with the same content.
    struct FixedResolver;

    impl ContentResolver for FixedResolver {
        fn obstacle(&self, _biome: &BiomeConfig, _rng: &mut dyn RngCore) -> String {
            "log".to_string()
        }
        fn pickup(&self, _biome: &BiomeConfig, _rng: &mut dyn RngCore) -> String {
            "rareFood".to_string()
        }
        fn hide_spot(&self, _biome: &BiomeConfig, _rng: &mut dyn RngCore) -> Option<HideSpotType> {
            Some(HideSpotType::Tree)
        }
    }

    #[test]
    fn installed_resolver_chooses_spawned_content() {
        let mut s = scene(12);
        s.set_resolver(Box::new(FixedResolver));
        s.update(0.0);
        let y = s.distance() + 600.0;
        for (category, lane) in
            [(SpawnCategory::Obstacle, -1), (SpawnCategory::Pickup, 0), (SpawnCategory::HideSpot, 1)]
        {
            materialize(&mut s, SpawnRequest { category, lane, y });
        }

        let content = |s: &GameScene, kind: EntityKind| {
            let found = s.track.find(|k| *k == kind);
            assert_eq!(found.len(), 1, "{:?}", kind);
            s.track.content_id(found[0].0)
        };
        assert_eq!(content(&s, EntityKind::Obstacle(Clearance::Slide)).as_deref(), Some("log"));
        assert_eq!(content(&s, EntityKind::Pickup(PickupKind::RareFood)).as_deref(), Some("rareFood"));
        assert_eq!(content(&s, EntityKind::HideSpot(HideSpotType::Tree)).as_deref(), Some("tree"));
    }

    #[test]
    fn installed_resolver_feeds_the_spawn_loop() {
        let mut cfg = GameConfig::default();
        cfg.seed = Some(13);
        cfg.spawner.first_spawn_delay = 0.0;
        cfg.spawner.hide_spot_chance = 0.0;
        cfg.spawner.food_chance = 0.0;
        cfg.spawner.animal_chance = 0.0;
        let mut s = GameScene::new(cfg, RunSetup::default());
        s.set_resolver(Box::new(FixedResolver));
        s.set_builtin_probe(false);
        for i in 0..(60 * 4) {
            s.update(i as f32 * DT);
        }
        let obstacles = s.track.find(|k| matches!(k, EntityKind::Obstacle(_)));
        assert!(!obstacles.is_empty());
        for (entity, kind, _) in obstacles {
            assert_eq!(kind, EntityKind::Obstacle(Clearance::Slide));
            assert_eq!(s.track.content_id(entity).as_deref(), Some("log"));
        }
    }

    #[test]
    fn host_contacts_replace_the_builtin_overlap_check() {
        let mut cfg = GameConfig::default();
        cfg.seed = Some(14);
        cfg.spawner.first_spawn_delay = 1000.0;
        let mut s = GameScene::new(cfg, RunSetup::default());
        s.set_builtin_probe(false);
        s.update(0.0);
        let lane = s.dog.lane;
        let rock = s.track.spawn(EntityKind::Obstacle(Clearance::Jump), lane, s.distance() + 10.0);
        for i in 1..6 {
            s.update(i as f32 * DT);
        }
        assert_eq!(s.state.catcher, 0.0);
        assert!(!s.drain_events().iter().any(|e| matches!(e, RunEvent::Hit { .. })));

        let kind = EntityKind::Obstacle(Clearance::Jump);
        let contact = Contact::dog_with_entity(rock, &kind).expect("obstacle has a body");
        s.contact_began(&contact);
        assert!(s.state.catcher > 0.0);
        assert!(s.drain_events().contains(&RunEvent::Hit { source: kind.name() }));

        let zone_kind = EntityKind::LaneZone(LaneZoneType::Risk);
        let zone = s.track.spawn_lane_zone(LaneZoneType::Risk, lane, s.distance(), 200.0);
        let contact = Contact::dog_with_entity(zone, &zone_kind).expect("zone has a body");
        s.contact_began(&contact);
        assert_eq!(s.risk_lanes.current_zone(), LaneZoneType::Risk);
        s.contact_ended(&contact);
        assert_eq!(s.risk_lanes.current_zone(), LaneZoneType::Safe);
    }

    #[test]
    fn ice_lockout_blocks_lane_changes_until_it_expires() {
        let mut s = scene(2);
        s.update(0.0);
        s.ice_slip_end_time = s.now() + 0.5;
        assert!(!s.handle_intent(Intent::LaneLeft));
        s.now = s.ice_slip_end_time;
        assert!(s.handle_intent(Intent::LaneLeft));
        assert_eq!(s.dog.lane, -1);
    }

    #[test]
    fn thunderstorm_cover_failure_penalizes_and_rearms() {
        let mut cfg = GameConfig::default();
        cfg.seed = Some(4);
        cfg.weather.clear_min = 0.0;
        cfg.weather.clear_max = 0.0;
        cfg.weather.thunder_chance = 1.0;
        cfg.weather.snow_chance = 0.0;
        cfg.weather.storm_hazard_interval = 1000.0;
        cfg.spawner.first_spawn_delay = 1000.0;
        let mut s = GameScene::new(cfg, RunSetup::default());
        s.update(0.0);
        assert_eq!(s.weather.state, WeatherState::Thunderstorm);
        assert!(s.drain_events().contains(&RunEvent::WeatherChanged(WeatherState::Thunderstorm)));
        let catcher = s.state.catcher;
        let mut failed = false;
        for i in 1..(60 * 7) {
            s.update(i as f32 * DT);
            if s.drain_events().contains(&RunEvent::StormFailed) {
                failed = true;
                break;
            }
        }
        assert!(failed);
        assert!(s.state.catcher > catcher);
        assert!(s.weather.cover_active());
    }

    #[test]
    fn lion_warning_precedes_pounce() {
        let mut s = scene(8);
        s.update(0.0);
        s.lion_pounces.push(DelayedEvent { trigger_time: s.now() + 0.1, y: s.distance() + 500.0, lane: 1 });
        s.update(DT);
        assert_eq!(s.pending_pounces().len(), 1);
        for i in 2..12 {
            s.update(i as f32 * DT);
        }
        assert!(s.pending_pounces().is_empty());
        assert_eq!(s.track.count(|k| *k == EntityKind::Animal(Creature::MountainLion)), 1);
    }
}
