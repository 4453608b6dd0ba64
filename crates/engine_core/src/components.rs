//! Common ECS components for entities living on the track.

/// Lane + longitudinal position of a track entity. `y` grows in the running direction.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackPos {
    pub lane: i32,
    pub y: f32,
}

impl TrackPos {
    pub fn new(lane: i32, y: f32) -> Self {
        Self { lane, y }
    }

    /// Signed distance ahead of `other_y` (negative = behind).
    pub fn ahead_of(&self, other_y: f32) -> f32 {
        self.y - other_y
    }
}

/// Half of an entity's extent along the track. Contact is possible while the
/// player's y is within `[y - half_length, y + half_length]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub half_length: f32,
}

impl Extent {
    pub fn new(half_length: f32) -> Self {
        Self { half_length }
    }

    pub fn contains(&self, center_y: f32, probe_y: f32) -> bool {
        (probe_y - center_y).abs() <= self.half_length
    }
}

impl Default for Extent {
    fn default() -> Self {
        Self::new(30.0)
    }
}

/// Catalog id of the content an entity was built from (e.g. "trashcan", "foodBig").
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentId(pub String);

impl ContentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Tag component for entities scheduled for removal at the end of the frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct Despawn;

/// Seconds until the entity removes itself (warnings and other transient tells).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lifetime {
    pub remaining: f32,
}

impl Lifetime {
    pub fn new(seconds: f32) -> Self {
        Self { remaining: seconds }
    }

    /// Count down; returns `true` once expired.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining -= dt;
        self.remaining <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_contains_is_inclusive() {
        let e = Extent::new(10.0);
        assert!(e.contains(100.0, 110.0));
        assert!(e.contains(100.0, 90.0));
        assert!(!e.contains(100.0, 110.5));
    }

    #[test]
    fn lifetime_expires_at_zero() {
        let mut l = Lifetime::new(1.0);
        assert!(!l.tick(0.5));
        assert!(l.tick(0.5));
    }

    #[test]
    fn ahead_of_is_signed() {
        let p = TrackPos::new(0, 50.0);
        assert_eq!(p.ahead_of(20.0), 30.0);
        assert_eq!(p.ahead_of(80.0), -30.0);
    }
}
