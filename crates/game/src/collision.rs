//! Contact categories and the fixed-priority resolution of dog contacts.

use engine_core::LANES;
use hecs::Entity;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::content::{BearRequirement, EntityKind, HideSpotType, LaneZoneType, PickupKind};
use crate::effects::StatusEffectKind;
use crate::events::RunEvent;
use crate::scene::GameScene;
use crate::spawner::FALLBACK_PICKUP;

/// Contact categories, one bit each.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Dog = 1 << 0,
    Ground = 1 << 1,
    Obstacle = 1 << 2,
    Food = 1 << 3,
    HideSpot = 1 << 4,
    Checkpoint = 1 << 5,
    Animal = 1 << 6,
    /// Stink clouds.
    HazardZone = 1 << 7,
    Bear = 1 << 8,
    CoverZone = 1 << 9,
    LightningZone = 1 << 10,
    IcePatch = 1 << 11,
    LaneZone = 1 << 12,
}

impl Category {
    /// Resolution order for contact-begin; first match wins.
    pub const PRIORITY: [Category; 12] = [
        Category::Checkpoint,
        Category::LaneZone,
        Category::Ground,
        Category::Obstacle,
        Category::Food,
        Category::HideSpot,
        Category::Animal,
        Category::HazardZone,
        Category::Bear,
        Category::CoverZone,
        Category::LightningZone,
        Category::IcePatch,
    ];

    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Category of a track entity. Markers and warnings have none.
    pub fn of(kind: &EntityKind) -> Option<Category> {
        Some(match kind {
            EntityKind::Obstacle(_) => Category::Obstacle,
            EntityKind::Pickup(_) => Category::Food,
            EntityKind::HideSpot(_) => Category::HideSpot,
            EntityKind::Checkpoint => Category::Checkpoint,
            EntityKind::Animal(_) => Category::Animal,
            EntityKind::StinkCloud => Category::HazardZone,
            EntityKind::Bear(_) => Category::Bear,
            EntityKind::CoverZone => Category::CoverZone,
            EntityKind::LightningZone => Category::LightningZone,
            EntityKind::IcePatch => Category::IcePatch,
            EntityKind::LaneZone(_) => Category::LaneZone,
            EntityKind::AnimalMarker | EntityKind::PredatorMarker | EntityKind::LionWarning => return None,
        })
    }
}

/// One side of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Body {
    pub category: Category,
    /// Track entity, if the body is one.
    pub entity: Option<Entity>,
}

impl Body {
    pub fn dog() -> Self {
        Self { category: Category::Dog, entity: None }
    }

    pub fn ground() -> Self {
        Self { category: Category::Ground, entity: None }
    }

    pub fn entity(category: Category, entity: Entity) -> Self {
        Self { category, entity: Some(entity) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: Body,
    pub b: Body,
}

impl Contact {
    pub fn new(a: Body, b: Body) -> Self {
        Self { a, b }
    }

    pub fn dog_with(other: Body) -> Self {
        Self::new(Body::dog(), other)
    }

    /// Dog against a track entity of the given kind. `None` for kinds that never collide.
    pub fn dog_with_entity(entity: Entity, kind: &EntityKind) -> Option<Self> {
        Category::of(kind).map(|c| Self::dog_with(Body::entity(c, entity)))
    }

    pub fn involves(&self, category: Category) -> bool {
        self.a.category == category || self.b.category == category
    }

    fn entity_of(&self, category: Category) -> Option<Entity> {
        if self.a.category == category {
            self.a.entity
        } else if self.b.category == category {
            self.b.entity
        } else {
            None
        }
    }
}

// ── Contact begin ───────────────────────────────────────────────────────

pub fn contact_began(scene: &mut GameScene, contact: &Contact) {
    if !contact.involves(Category::Dog) {
        return;
    }
    let Some(category) = Category::PRIORITY.into_iter().find(|c| contact.involves(*c)) else {
        return;
    };
    if category == Category::Ground {
        scene.dog.mark_grounded(true);
        return;
    }
    if !scene.state.is_running() {
        return;
    }
    let Some(entity) = contact.entity_of(category) else {
        return;
    };
    // Already consumed by an earlier contact this frame.
    let Some(kind) = scene.track.kind(entity) else {
        return;
    };
    log::debug!("Contact {:?} with {}", category, kind.name());

    match kind {
        EntityKind::Checkpoint => on_checkpoint(scene, entity),
        EntityKind::LaneZone(zone) => scene.risk_lanes.enter_zone(zone),
        EntityKind::Obstacle(_) => {
            scene.register_hit(kind.name());
            scene.effects.add(StatusEffectKind::Panic, 2.5);
        }
        EntityKind::Pickup(pickup) => {
            scene.track.despawn(entity);
            on_pickup(scene, pickup);
        }
        EntityKind::HideSpot(hide) => {
            scene.track.despawn(entity);
            on_hide_spot(scene, hide);
        }
        EntityKind::Animal(creature) => {
            if creature.slows_on_hit() {
                scene.effects.add(StatusEffectKind::Slowed, 2.5);
            }
            scene.register_hit(kind.name());
            scene.effects.add(StatusEffectKind::Panic, 3.0);
        }
        EntityKind::StinkCloud => scene.effects.add(StatusEffectKind::Stink, 4.0),
        EntityKind::Bear(requirement) => {
            scene.track.despawn(entity);
            on_bear(scene, requirement);
        }
        EntityKind::CoverZone => {
            scene.track.despawn(entity);
            scene.weather.player_found_cover();
            scene.state.on_food_pickup();
            scene.emit(RunEvent::CoverFound);
        }
        EntityKind::LightningZone => {
            scene.track.despawn(entity);
            scene.effects.add(StatusEffectKind::Slowed, 3.0);
            scene.effects.add(StatusEffectKind::Panic, 2.0);
            scene.register_hit(kind.name());
        }
        EntityKind::IcePatch => {
            scene.track.despawn(entity);
            scene.effects.add(StatusEffectKind::Slowed, 2.8);
            scene.effects.add(StatusEffectKind::Panic, 1.8);
            scene.register_hit(kind.name());
            scene.ice_slip_end_time = scene.now + scene.cfg.weather.ice_slip_lockout;
        }
        EntityKind::AnimalMarker | EntityKind::PredatorMarker | EntityKind::LionWarning => {}
    }
}

pub fn contact_ended(scene: &mut GameScene, contact: &Contact) {
    if !contact.involves(Category::Dog) {
        return;
    }
    if contact.involves(Category::Ground) {
        scene.dog.mark_grounded(false);
    } else if contact.involves(Category::LaneZone) {
        scene.risk_lanes.leave_zone();
    }
}

fn on_pickup(scene: &mut GameScene, pickup: PickupKind) {
    if scene.setup.modifiers.risk_only && scene.risk_lanes.current_zone() != LaneZoneType::Risk {
        log::debug!("Pickup outside a risk lane: no reward");
        return;
    }
    let factor = pickup.score_factor() * scene.risk_lanes.pickup_multiplier();
    scene.state.award_food(factor, pickup.hunger_restore());
}

/// Destroyed either way; the wrong stance turns the hide into a hit.
fn on_hide_spot(scene: &mut GameScene, hide: HideSpotType) {
    if hide.requires_slide() && !scene.dog.is_sliding() {
        scene.register_hit(EntityKind::HideSpot(hide).name());
        return;
    }
    let elapsed = scene.state.elapsed;
    if scene.state.begin_hide(Some(hide), elapsed) {
        let strength = hide.scent_reduce_strength() * scene.setup.upgrades.hide_scent_bonus_multiplier;
        scene.scent.reduce_from_hide(strength);
        scene.emit(RunEvent::HideStarted(hide));
    }
}

/// Jump requirement is met while airborne, slide requirement while sliding.
fn on_bear(scene: &mut GameScene, requirement: BearRequirement) {
    let correct = match requirement {
        BearRequirement::Jump => !scene.dog.grounded,
        BearRequirement::Slide => scene.dog.is_sliding(),
    };
    if correct {
        scene.emit(RunEvent::NearMiss);
    } else {
        scene.register_hit("bear");
    }
}

const CHECKPOINT_HIDE_SPOTS: [HideSpotType; 4] =
    [HideSpotType::Shed, HideSpotType::House, HideSpotType::Culvert, HideSpotType::Tree];

fn on_checkpoint(scene: &mut GameScene, gate: Entity) {
    scene.track.despawn(gate);
    scene.state.on_checkpoint_reached();
    let now = scene.now;
    scene.checkpoints.did_trigger(now, &mut scene.rng);
    scene.perks.on_checkpoint();
    scene.emit(RunEvent::CheckpointReached { count: scene.state.checkpoint_count });
    if let Some(biome) = scene.biome.on_checkpoint_passed(&mut scene.rng) {
        scene.emit(RunEvent::BiomeChanged(biome));
    }
    spawn_checkpoint_rewards(scene);
    apply_difficulty_step(scene);
}

/// Guaranteed food (sometimes two) and a hide spot just ahead of the dog.
fn spawn_checkpoint_rewards(scene: &mut GameScene) {
    let track_cfg = &scene.cfg.track;
    let reward_y = scene.distance + track_cfg.view_height * track_cfg.reward_ahead;

    scene.track.spawn_content(EntityKind::Pickup(PickupKind::FoodSmall), 0, reward_y, FALLBACK_PICKUP);
    if scene.rng.gen_bool(0.5) {
        let lane = if scene.rng.gen_bool(0.5) { -1 } else { 1 };
        scene.track.spawn_content(EntityKind::Pickup(PickupKind::FoodSmall), lane, reward_y + 60.0, FALLBACK_PICKUP);
    }
    let hide = CHECKPOINT_HIDE_SPOTS.choose(&mut scene.rng).copied().unwrap_or(HideSpotType::Shed);
    scene.track.spawn_content(EntityKind::HideSpot(hide), 0, reward_y + 120.0, hide.id());
}

fn apply_difficulty_step(scene: &mut GameScene) {
    scene.difficulty_level += 1;
    let track_cfg = &scene.cfg.track;
    scene.scroll_speed_base = (scene.scroll_speed_base + track_cfg.scroll_speed_step).min(track_cfg.max_scroll_speed);
    scene.spawner.apply_difficulty_ramp();

    let every = scene.cfg.spawner.panic_every;
    if every > 0 && scene.difficulty_level % every == 0 {
        scene.effects.add(StatusEffectKind::Panic, scene.cfg.spawner.panic_spike_duration);
    }
    log::debug!(
        "Difficulty {}: base scroll {:.0}, spawn interval {:.2}",
        scene.difficulty_level,
        scene.scroll_speed_base,
        scene.spawner.spawn_interval
    );
}

/// Random lane for hazards and rewards.
pub(crate) fn random_lane<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    LANES.choose(rng).copied().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::content::{Clearance, Creature};
    use crate::scene::RunSetup;
    use crate::state::GamePhase;

    fn running_scene() -> GameScene {
        let mut cfg = GameConfig::default();
        cfg.seed = Some(11);
        let mut scene = GameScene::new(cfg, RunSetup::default());
        scene.start_run_if_needed();
        scene
    }

    fn touch(scene: &mut GameScene, kind: EntityKind, lane: i32) -> Entity {
        let e = scene.track.spawn(kind, lane, scene.distance);
        let contact = Contact::dog_with_entity(e, &kind).unwrap();
        scene.contact_began(&contact);
        e
    }

    #[test]
    fn contacts_need_the_dog() {
        let mut scene = running_scene();
        let gate = scene.track.spawn(EntityKind::Checkpoint, 0, 0.0);
        scene.contact_began(&Contact::new(Body::ground(), Body::entity(Category::Checkpoint, gate)));
        assert_eq!(scene.state.checkpoint_count, 0);
        assert!(scene.track.contains(gate));

        scene.contact_began(&Contact::new(Body::entity(Category::Checkpoint, gate), Body::dog()));
        assert_eq!(scene.state.checkpoint_count, 1);
        assert!(!scene.track.contains(gate));
    }

    #[test]
    fn ground_contacts_toggle_grounded_even_before_start() {
        let mut scene = GameScene::new(GameConfig::default(), RunSetup::default());
        scene.contact_ended(&Contact::dog_with(Body::ground()));
        assert!(!scene.dog.grounded);
        scene.contact_began(&Contact::dog_with(Body::ground()));
        assert!(scene.dog.grounded);
    }

    #[test]
    fn hide_spot_is_destroyed_in_either_stance() {
        let mut scene = running_scene();

        // Wrong stance: culvert while running is a hit.
        let culvert = touch(&mut scene, EntityKind::HideSpot(HideSpotType::Culvert), 0);
        assert!(!scene.track.contains(culvert));
        assert!(!scene.state.is_hiding);
        assert!(scene.state.catcher > 0.0);

        // Correct stance: sliding into a culvert hides.
        scene.state.exit_hiding();
        assert!(scene.dog.begin_slide(scene.now));
        let culvert = touch(&mut scene, EntityKind::HideSpot(HideSpotType::Culvert), 0);
        assert!(!scene.track.contains(culvert));
        assert!(scene.state.is_hiding);
        assert_eq!(scene.state.successful_hides, 1);
    }

    #[test]
    fn hide_reduces_scent_with_upgrade_bonus() {
        let mut setup = RunSetup::default();
        setup.upgrades.hide_scent_bonus_multiplier = 1.5;
        let mut scene = GameScene::new(GameConfig::default(), setup);
        scene.start_run_if_needed();
        for _ in 0..20 {
            scene.scent.on_jump(1.0);
        }
        let before = scene.scent.scent();
        touch(&mut scene, EntityKind::HideSpot(HideSpotType::Bush), 0);
        assert!((before - scene.scent.scent() - 18.0).abs() < 1e-3);
    }

    #[test]
    fn bear_requirements() {
        let mut scene = running_scene();
        touch(&mut scene, EntityKind::Bear(BearRequirement::Slide), 0);
        assert!(scene.state.catcher > 0.0);
        let after_hit = scene.state.catcher;

        scene.dog.begin_slide(scene.now);
        let bear = touch(&mut scene, EntityKind::Bear(BearRequirement::Slide), 0);
        assert!(!scene.track.contains(bear));
        assert_eq!(scene.state.catcher, after_hit);
        assert!(scene.drain_events().contains(&RunEvent::NearMiss));

        scene.dog.stance = crate::player::Stance::Run;
        scene.dog.jump(1.0);
        touch(&mut scene, EntityKind::Bear(BearRequirement::Jump), 0);
        assert_eq!(scene.state.catcher, after_hit);
    }

    #[test]
    fn obstacles_persist_and_panic() {
        let mut scene = running_scene();
        let rock = touch(&mut scene, EntityKind::Obstacle(Clearance::Jump), 0);
        assert!(scene.track.contains(rock));
        assert!(scene.effects.is_active(StatusEffectKind::Panic));
        assert!((scene.state.catcher - 0.18).abs() < 1e-6);
    }

    #[test]
    fn heavy_animals_slow() {
        let mut scene = running_scene();
        touch(&mut scene, EntityKind::Animal(Creature::Deer), 0);
        assert!(!scene.effects.is_active(StatusEffectKind::Slowed));
        touch(&mut scene, EntityKind::Animal(Creature::Moose), 0);
        assert!(scene.effects.is_active(StatusEffectKind::Slowed));
    }

    #[test]
    fn risk_only_pickups_need_a_risk_lane() {
        let mut setup = RunSetup::default();
        setup.modifiers.risk_only = true;
        let mut scene = GameScene::new(GameConfig::default(), setup);
        scene.start_run_if_needed();

        let food = touch(&mut scene, EntityKind::Pickup(PickupKind::FoodBig), 0);
        assert!(!scene.track.contains(food));
        assert_eq!(scene.state.food_collected, 0);

        touch(&mut scene, EntityKind::LaneZone(LaneZoneType::Risk), 0);
        let score = scene.state.score;
        touch(&mut scene, EntityKind::Pickup(PickupKind::FoodBig), 0);
        assert_eq!(scene.state.food_collected, 1);
        assert_eq!(scene.state.score - score, 50);
    }

    #[test]
    fn leaving_a_lane_zone_reverts_to_safe() {
        let mut scene = running_scene();
        let zone = touch(&mut scene, EntityKind::LaneZone(LaneZoneType::Shortcut), 0);
        assert_eq!(scene.risk_lanes.current_zone(), LaneZoneType::Shortcut);
        scene.contact_ended(&Contact::dog_with(Body::entity(Category::LaneZone, zone)));
        assert_eq!(scene.risk_lanes.current_zone(), LaneZoneType::Safe);
    }

    #[test]
    fn checkpoint_rewards_and_ramp() {
        let mut scene = running_scene();
        let speed = scene.scroll_speed_base();
        touch(&mut scene, EntityKind::Checkpoint, 0);
        assert_eq!(scene.difficulty_level(), 1);
        assert_eq!(scene.scroll_speed_base(), speed + 35.0);
        let food = scene.track.count(|k| matches!(k, EntityKind::Pickup(_)));
        assert!((1..=2).contains(&food));
        assert_eq!(scene.track.count(|k| matches!(k, EntityKind::HideSpot(_))), 1);
        assert_eq!(scene.track.count(|k| matches!(k, EntityKind::Checkpoint)), 0);
    }

    #[test]
    fn every_third_checkpoint_panics() {
        let mut scene = running_scene();
        for _ in 0..2 {
            touch(&mut scene, EntityKind::Checkpoint, 0);
        }
        scene.effects.reset();
        touch(&mut scene, EntityKind::Checkpoint, 0);
        assert!(scene.effects.is_active(StatusEffectKind::Panic));
    }

    #[test]
    fn ice_sets_lockout_and_cover_disarms_storm() {
        let mut scene = running_scene();
        scene.now = 10.0;
        touch(&mut scene, EntityKind::IcePatch, 0);
        assert!((scene.ice_slip_end_time() - 11.2).abs() < 1e-4);

        scene.weather.trigger_new_cover_challenge();
        touch(&mut scene, EntityKind::CoverZone, 0);
        assert!(!scene.weather.cover_active());
        assert_eq!(scene.state.food_collected, 1);
    }

    #[test]
    fn nothing_changes_after_the_run_ends() {
        let mut scene = running_scene();
        scene.state.trigger_game_over();
        let food = touch(&mut scene, EntityKind::Pickup(PickupKind::FoodSmall), 0);
        assert!(scene.track.contains(food));
        assert_eq!(scene.state.food_collected, 0);
        assert_eq!(scene.phase(), GamePhase::GameOver);
    }
}
