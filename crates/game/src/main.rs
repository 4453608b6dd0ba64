//! Headless DogDash driver.
//!
//! Runs one seeded run at a fixed frame rate, either steered by a simple
//! look-ahead autopilot or replaying a script of `<seconds> <intent>` lines,
//! then settles the result into the saved progression.
//!
//! Usage: `dogdash-sim [script.txt]`

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use game::content::{BearRequirement, Clearance, Creature, EntityKind, HideSpotType};
use game::{GameConfig, GameScene, LogReporter, ProgressionStore, RonFileBackend, RunReporter, RunSetup};
use input::{ElementState, InputState, Intent, KeyCode};
use procgen::{CalendarDay, DailyChallenge};

/// How far ahead of the dog the autopilot reacts.
const LOOKAHEAD: f32 = 110.0;

/// A scripted intent at a run time.
#[derive(Debug, Clone, Copy)]
struct ScriptStep {
    at: f32,
    intent: Intent,
}

fn load_script(path: &str) -> Result<Vec<ScriptStep>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading script {}", path))?;
    let mut steps = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (time, token) = line
            .split_once(char::is_whitespace)
            .with_context(|| format!("line {}: expected `<seconds> <intent>`", n + 1))?;
        let at: f32 = time.parse().with_context(|| format!("line {}: bad time {:?}", n + 1, time))?;
        let intent =
            Intent::from_token(token).with_context(|| format!("line {}: unknown intent {:?}", n + 1, token))?;
        steps.push(ScriptStep { at, intent });
    }
    steps.sort_by(|a, b| a.at.total_cmp(&b.at));
    Ok(steps)
}

/// Key to press this frame, if any.
fn autopilot(scene: &GameScene) -> Option<KeyCode> {
    let lane = scene.dog.lane;
    let y = scene.distance();
    let ahead = scene.track.find(|k| !k.is_marker());
    let mut threat: Option<(EntityKind, f32)> = None;
    for (_, kind, pos) in &ahead {
        let in_lane = pos.lane == lane || kind.spans_all_lanes();
        if in_lane && pos.y > y && pos.y - y <= LOOKAHEAD {
            if threat.map_or(true, |(_, ty)| pos.y < ty) {
                threat = Some((*kind, pos.y));
            }
        }
    }
    let (kind, _) = threat?;
    match kind {
        EntityKind::Obstacle(Clearance::Jump)
        | EntityKind::Bear(BearRequirement::Jump)
        | EntityKind::Animal(Creature::Deer | Creature::Moose) => Some(KeyCode::Space),
        EntityKind::Obstacle(Clearance::Slide)
        | EntityKind::Bear(BearRequirement::Slide)
        | EntityKind::HideSpot(HideSpotType::Culvert) => Some(KeyCode::ArrowDown),
        EntityKind::Animal(_) | EntityKind::StinkCloud | EntityKind::LightningZone | EntityKind::IcePatch => {
            let blocked = |l: i32| ahead.iter().any(|(_, _, p)| p.lane == l && p.y > y && p.y - y <= LOOKAHEAD);
            if lane > -1 && !blocked(lane - 1) {
                Some(KeyCode::ArrowLeft)
            } else if lane < 1 && !blocked(lane + 1) {
                Some(KeyCode::ArrowRight)
            } else {
                Some(KeyCode::Space)
            }
        }
        _ => None,
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let script = match std::env::args().nth(1) {
        Some(path) => Some(load_script(&path)?),
        None => None,
    };

    let cfg = GameConfig::load();
    let secs = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs() as i64).unwrap_or(0);
    let today = CalendarDay::from_unix_seconds(secs);

    let mut store = ProgressionStore::open_or_default(RonFileBackend::new(&cfg.sim.save_path));
    let streak = store.begin_day(today);
    let challenge = DailyChallenge::for_day(today);
    log::info!("Day {} (streak {}): {} - {}", today.key(), streak, challenge.title, challenge.description);

    let setup = RunSetup::from_progression(&store.data, challenge.modifiers);
    let frame_dt = 1.0 / cfg.sim.frame_rate.max(1.0);
    let max_frames = (cfg.sim.max_seconds / frame_dt).ceil() as u64;
    let mut scene = GameScene::new(cfg, setup);
    let mut reporter = LogReporter;
    let mut keys = InputState::new();
    let mut script_pos = 0;

    let mut summary = None;
    for frame in 0..max_frames {
        match &script {
            Some(steps) => {
                while let Some(step) = steps.get(script_pos).filter(|s| s.at <= scene.now()) {
                    scene.queue_intent(step.intent);
                    script_pos += 1;
                }
            }
            None => {
                if let Some(key) = autopilot(&scene) {
                    keys.process_keyboard(key, ElementState::Pressed);
                    keys.process_keyboard(key, ElementState::Released);
                }
                for intent in keys.drain_intents() {
                    scene.queue_intent(intent);
                }
            }
        }

        scene.update(frame as f32 * frame_dt);
        for event in scene.drain_events() {
            reporter.run_event(&event);
            if let game::RunEvent::RunEnded(s) = event {
                summary = Some(s);
            }
        }
        if summary.is_some() {
            break;
        }
    }

    let summary = summary.unwrap_or_else(|| {
        log::info!("Time limit reached after {:.0}s", scene.now());
        scene.state.summary()
    });

    let settlement = store.settle_run(&summary, today);
    for report in &settlement.reports {
        reporter.report(report);
    }
    log::info!(
        "Earned {} PP (x{:.2} streak), {} from missions, {} XP{}",
        settlement.currency_earned,
        settlement.streak_multiplier,
        settlement.mission_rewards,
        settlement.xp_gained,
        if settlement.ranked_up() { format!(", rank up to {}", settlement.new_rank.display_name()) } else { String::new() }
    );
    for key in &settlement.new_unlocks {
        log::info!("Unlocked {}", key);
    }

    store.save().context("saving progression")?;
    Ok(())
}
