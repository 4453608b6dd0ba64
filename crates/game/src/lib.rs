//! DogDash simulation core: the run orchestrator, its subsystems and
//! meta-progression. Rendering, audio and platform services live outside
//! this crate and talk to it through [`Presenter`], [`RunReporter`] and
//! [`ProgressionBackend`].

pub mod adrenaline;
pub mod biome;
pub mod camera;
pub mod checkpoint;
pub mod collision;
pub mod config;
pub mod content;
pub mod effects;
pub mod events;
pub mod hud;
pub mod missions;
pub mod perks;
pub mod player;
pub mod progression;
pub mod rank;
pub mod risk_lane;
pub mod scene;
pub mod scent;
pub mod spawner;
pub mod state;
pub mod track;
pub mod update;
pub mod upgrades;
pub mod weather;

pub use collision::{Body, Category, Contact};
pub use config::GameConfig;
pub use content::EntityKind;
pub use events::{LogReporter, NullReporter, RecordingReporter, ReportEvent, RunEvent, RunReporter};
pub use progression::{MemoryBackend, Progression, ProgressionBackend, ProgressionStore, RonFileBackend, RunSettlement};
pub use scene::{FrameModifiers, GameScene, RunSetup};
pub use state::{GamePhase, RunSummary};
pub use track::{NullPresenter, Presenter};
