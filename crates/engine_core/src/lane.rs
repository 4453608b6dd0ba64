//! Lane geometry for the fixed three-lane track.

use serde::{Deserialize, Serialize};

/// Leftmost lane index.
pub const MIN_LANE: i32 = -1;
/// Rightmost lane index.
pub const MAX_LANE: i32 = 1;
/// All lanes, left to right.
pub const LANES: [i32; 3] = [-1, 0, 1];

/// Maps lane indices to horizontal offsets. Lane moves saturate at the track edges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneSystem {
    /// Horizontal distance between neighbouring lane centres.
    pub lane_offset: f32,
}

impl Default for LaneSystem {
    fn default() -> Self {
        Self { lane_offset: 120.0 }
    }
}

impl LaneSystem {
    pub fn new(lane_offset: f32) -> Self {
        Self { lane_offset }
    }

    /// Clamp a lane index into `[MIN_LANE, MAX_LANE]`.
    pub fn clamped_lane(&self, lane: i32) -> i32 {
        lane.clamp(MIN_LANE, MAX_LANE)
    }

    /// Horizontal offset of a lane centre.
    pub fn x(&self, lane: i32) -> f32 {
        self.clamped_lane(lane) as f32 * self.lane_offset
    }

    /// Lane reached by stepping `delta` lanes from `lane`.
    pub fn step(&self, lane: i32, delta: i32) -> i32 {
        self.clamped_lane(lane.saturating_add(delta))
    }

    /// Number of lanes on the track.
    pub fn lane_count(&self) -> usize {
        LANES.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lanes_saturate_instead_of_wrapping() {
        let lanes = LaneSystem::default();
        assert_eq!(lanes.clamped_lane(5), 1);
        assert_eq!(lanes.clamped_lane(-7), -1);
        assert_eq!(lanes.step(1, 1), 1);
        assert_eq!(lanes.step(-1, -1), -1);
        assert_eq!(lanes.step(0, -1), -1);
    }

    #[test]
    fn x_offsets_scale_with_lane() {
        let lanes = LaneSystem::new(100.0);
        assert_eq!(lanes.x(-1), -100.0);
        assert_eq!(lanes.x(0), 0.0);
        assert_eq!(lanes.x(1), 100.0);
        assert_eq!(lanes.x(3), 100.0);
    }
}
