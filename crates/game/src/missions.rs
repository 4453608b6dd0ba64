//! Daily mission board and the consecutive-day streak.

use procgen::{missions_for_day, CalendarDay, Mission, MissionType};
use serde::{Deserialize, Serialize};

use crate::state::RunSummary;

/// Today's missions with best-run progress. Regenerated when the day changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyMissionBoard {
    pub day: Option<CalendarDay>,
    pub missions: Vec<Mission>,
}

impl DailyMissionBoard {
    /// Regenerate for `today` unless the board already belongs to it. Returns `true` on regeneration.
    pub fn refresh(&mut self, today: CalendarDay) -> bool {
        if self.day == Some(today) && !self.missions.is_empty() {
            return false;
        }
        self.day = Some(today);
        self.missions = missions_for_day(today);
        log::debug!("Daily missions for {}: {:?}", today.key(), self.missions.iter().map(|m| &m.id).collect::<Vec<_>>());
        true
    }

    /// Fold one run into progress. Returns missions completed by this run.
    pub fn apply_run(&mut self, summary: &RunSummary) -> Vec<Mission> {
        let mut newly = Vec::new();
        for mission in &mut self.missions {
            if mission.is_complete {
                continue;
            }
            mission.progress = mission.progress.max(run_value(mission.mission_type, summary));
            if mission.progress >= mission.target {
                mission.is_complete = true;
                newly.push(mission.clone());
            }
        }
        newly
    }

    pub fn completed_count(&self) -> usize {
        self.missions.iter().filter(|m| m.is_complete).count()
    }
}

fn run_value(kind: MissionType, s: &RunSummary) -> u32 {
    match kind {
        MissionType::PassCheckpoints => s.checkpoints,
        MissionType::SuccessfulHides => s.hides,
        MissionType::CollectFood => s.food,
        MissionType::SurviveSeconds => s.elapsed.max(0.0) as u32,
        MissionType::ReachDistance => s.distance.min(u32::MAX as u64) as u32,
    }
}

pub const MAX_STREAK_BONUS_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreakTracker {
    pub count: u32,
    pub last_day: Option<CalendarDay>,
}

impl StreakTracker {
    /// Record a session on `today`: same day unchanged, next day +1, otherwise back to 1.
    pub fn bump(&mut self, today: CalendarDay) -> u32 {
        match self.last_day {
            Some(last) if last == today => {}
            Some(last) if last == today.previous() => self.count += 1,
            _ => self.count = 1,
        }
        self.last_day = Some(today);
        self.count
    }

    /// `1 + 0.05 · min(streak, 7)`.
    pub fn multiplier(&self) -> f32 {
        1.0 + 0.05 * self.count.min(MAX_STREAK_BONUS_DAYS) as f32
    }
}
