//! Track container: every spawned entity lives in a `hecs::World` owned here.
//!
//! Also hosts the reference contact probe used by the headless driver, and the
//! [`Presenter`] seam a renderer plugs into.

use engine_core::{ContentId, Extent, Lifetime, TrackPos};
use glam::Vec2;
use hecs::{Entity, World};

use crate::content::{Clearance, EntityKind, LaneZoneType};

/// Receives placement and camera updates. Rendering lives behind this.
pub trait Presenter {
    fn spawned(&mut self, entity: Entity, kind: EntityKind, pos: TrackPos, content: Option<&str>);
    fn despawned(&mut self, entity: Entity);
    fn camera_follow(&mut self, world_offset: f32, target: Vec2);
}

/// Presents nothing.
#[derive(Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn spawned(&mut self, _entity: Entity, _kind: EntityKind, _pos: TrackPos, _content: Option<&str>) {}
    fn despawned(&mut self, _entity: Entity) {}
    fn camera_follow(&mut self, _world_offset: f32, _target: Vec2) {}
}

/// What the probe needs to know about the dog this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DogProbe {
    pub lane: i32,
    pub y: f32,
    pub sliding: bool,
    /// High enough to clear jump obstacles.
    pub clears_jump: bool,
}

pub struct Track {
    world: World,
    presenter: Box<dyn Presenter>,
}

impl Default for Track {
    fn default() -> Self {
        Self::new()
    }
}

impl Track {
    pub fn new() -> Self {
        Self::with_presenter(Box::new(NullPresenter))
    }

    pub fn with_presenter(presenter: Box<dyn Presenter>) -> Self {
        Self { world: World::new(), presenter }
    }

    pub fn set_presenter(&mut self, presenter: Box<dyn Presenter>) {
        self.presenter = presenter;
    }

    pub fn presenter_mut(&mut self) -> &mut dyn Presenter {
        self.presenter.as_mut()
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        let all: Vec<Entity> = self.world.iter().map(|e| e.entity()).collect();
        for e in all {
            self.despawn(e);
        }
    }

    // ── Spawning ────────────────────────────────────────────────────────

    pub fn spawn(&mut self, kind: EntityKind, lane: i32, y: f32) -> Entity {
        let pos = TrackPos::new(lane, y);
        let e = self.world.spawn((kind, pos, Extent::new(kind.half_length())));
        self.presenter.spawned(e, kind, pos, None);
        e
    }

    /// Spawn with the catalog id it was built from.
    pub fn spawn_content(&mut self, kind: EntityKind, lane: i32, y: f32, content: &str) -> Entity {
        let pos = TrackPos::new(lane, y);
        let e = self.world.spawn((kind, pos, Extent::new(kind.half_length()), ContentId::new(content)));
        self.presenter.spawned(e, kind, pos, Some(content));
        e
    }

    /// Lane zone covering `[start_y, start_y + length]`.
    pub fn spawn_lane_zone(&mut self, zone: LaneZoneType, lane: i32, start_y: f32, length: f32) -> Entity {
        let half = length.max(0.0) / 2.0;
        let kind = EntityKind::LaneZone(zone);
        let pos = TrackPos::new(lane, start_y + half);
        let e = self.world.spawn((kind, pos, Extent::new(half)));
        self.presenter.spawned(e, kind, pos, Some(zone.label()));
        e
    }

    /// Entity that removes itself after `seconds`.
    pub fn spawn_transient(&mut self, kind: EntityKind, lane: i32, y: f32, seconds: f32) -> Entity {
        let e = self.spawn(kind, lane, y);
        // Just spawned, cannot be missing.
        let _ = self.world.insert_one(e, Lifetime::new(seconds));
        e
    }

    pub fn despawn(&mut self, entity: Entity) -> bool {
        if self.world.despawn(entity).is_ok() {
            self.presenter.despawned(entity);
            true
        } else {
            false
        }
    }

    // ── Lookup ──────────────────────────────────────────────────────────

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.contains(entity)
    }

    pub fn kind(&self, entity: Entity) -> Option<EntityKind> {
        self.world.get::<&EntityKind>(entity).ok().map(|k| *k)
    }

    pub fn position(&self, entity: Entity) -> Option<TrackPos> {
        self.world.get::<&TrackPos>(entity).ok().map(|p| *p)
    }

    pub fn content_id(&self, entity: Entity) -> Option<String> {
        self.world.get::<&ContentId>(entity).ok().map(|c| c.as_str().to_string())
    }

    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.world.len() == 0
    }

    pub fn count(&self, pred: impl Fn(&EntityKind) -> bool) -> usize {
        self.world.query::<&EntityKind>().iter().filter(|(_, k)| pred(k)).count()
    }

    /// All entities of a kind matching `pred`, with positions.
    pub fn find(&self, pred: impl Fn(&EntityKind) -> bool) -> Vec<(Entity, EntityKind, TrackPos)> {
        self.world
            .query::<(&EntityKind, &TrackPos)>()
            .iter()
            .filter(|(_, (k, _))| pred(k))
            .map(|(e, (k, p))| (e, *k, *p))
            .collect()
    }

    // ── Per-frame passes ────────────────────────────────────────────────

    /// Remove and return every spawn marker.
    pub fn take_markers(&mut self) -> Vec<(EntityKind, TrackPos)> {
        let markers = self.find(|k| k.is_marker());
        for (e, _, _) in &markers {
            self.despawn(*e);
        }
        markers.into_iter().map(|(_, k, p)| (k, p)).collect()
    }

    pub fn tick_lifetimes(&mut self, dt: f32) {
        let expired: Vec<Entity> = self
            .world
            .query_mut::<&mut Lifetime>()
            .into_iter()
            .filter_map(|(e, life)| life.tick(dt).then_some(e))
            .collect();
        for e in expired {
            self.despawn(e);
        }
    }

    /// Despawn entities left behind `cutoff_y`. Lane zones go once their far end passes.
    pub fn cleanup_behind(&mut self, cutoff_y: f32) -> Vec<EntityKind> {
        let stale: Vec<(Entity, EntityKind)> = self
            .world
            .query::<(&EntityKind, &TrackPos, &Extent)>()
            .iter()
            .filter(|(_, (kind, pos, extent))| {
                let y = match kind {
                    EntityKind::LaneZone(_) => pos.y + extent.half_length,
                    _ => pos.y,
                };
                y < cutoff_y
            })
            .map(|(e, (k, _, _))| (e, *k))
            .collect();
        for (e, _) in &stale {
            self.despawn(*e);
        }
        stale.into_iter().map(|(_, k)| k).collect()
    }

    /// Entities currently overlapping the dog.
    pub fn overlapping(&self, dog: &DogProbe) -> Vec<(Entity, EntityKind)> {
        self.world
            .query::<(&EntityKind, &TrackPos, &Extent)>()
            .iter()
            .filter(|(_, (kind, pos, extent))| touches(kind, pos, extent, dog))
            .map(|(e, (k, _, _))| (e, *k))
            .collect()
    }
}

fn touches(kind: &EntityKind, pos: &TrackPos, extent: &Extent, dog: &DogProbe) -> bool {
    if kind.is_marker() || matches!(kind, EntityKind::LionWarning) {
        return false;
    }
    if !kind.spans_all_lanes() && pos.lane != dog.lane {
        return false;
    }
    if !extent.contains(pos.y, dog.y) {
        return false;
    }
    match kind {
        EntityKind::Obstacle(Clearance::Jump) => !dog.clears_jump,
        EntityKind::Obstacle(Clearance::Slide) => !dog.sliding,
        _ => true,
    }
}

/// Contact begin/end sets from frame-to-frame overlap.
#[derive(Debug, Default)]
pub struct ContactProbe {
    touching: Vec<(Entity, EntityKind)>,
}

#[derive(Debug, Default, PartialEq)]
pub struct ProbeResult {
    pub began: Vec<(Entity, EntityKind)>,
    pub ended: Vec<(Entity, EntityKind)>,
}

impl ContactProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.touching.clear();
    }

    /// Compare this frame's overlaps with the last. Entities that were
    /// despawned meanwhile are forgotten without an end event.
    pub fn probe(&mut self, track: &Track, dog: &DogProbe) -> ProbeResult {
        let now = track.overlapping(dog);
        let mut result = ProbeResult::default();
        for (e, k) in &self.touching {
            if track.contains(*e) && !now.iter().any(|(n, _)| n == e) {
                result.ended.push((*e, *k));
            }
        }
        for (e, k) in &now {
            if !self.touching.iter().any(|(t, _)| t == e) {
                result.began.push((*e, *k));
            }
        }
        self.touching = now;
        result
    }
}
