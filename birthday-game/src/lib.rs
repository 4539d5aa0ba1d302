//! Birthday Adventure game engine
//!
//! Platform-agnostic core of Yuval's birthday adventure: the screen sequence,
//! the player's picks, media candidate resolution, math encounters and the
//! synthesised sound cues. Nothing here touches the DOM.

pub mod assets;
pub mod challenge;
pub mod constants;
pub mod encounter;
pub mod error;
pub mod games;
pub mod screens;
pub mod session;
pub mod sound;
pub mod state;
pub mod transition;

pub use assets::{
    AssetCandidate, AssetCatalog, AssetProbe, AssetRequest, KnownFiles, MediaKind, Resolution,
    ResolvedAsset, candidates, media_kind_for_path, resolve, resolve_detailed, resolve_with,
};
pub use challenge::MathQuestion;
pub use encounter::{AnswerOutcome, Encounter, EncounterKind, EncounterPhase, EncounterSpec};
pub use error::GameError;
pub use games::{GameEntry, GamesList};
pub use screens::{Screen, ScreenFlow};
pub use session::{GameSession, SelectionOutcome};
pub use sound::{SoundEffect, SoundSettings, Voice, narration_path};
pub use state::{
    Attraction, Brother, Choices, Dessert, GameState, Hero, Mama, Papa, Partner, Restaurant, Team,
};
pub use transition::{TimedStep, TransitionPlan, TransitionStep};
