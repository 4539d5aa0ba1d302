use thiserror::Error;

use crate::encounter::EncounterPhase;
use crate::screens::Screen;

/// Errors raised by the core game logic.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("unknown screen slug: {0}")]
    UnknownScreen(String),
    #[error("unknown {kind} choice: {id}")]
    UnknownChoice { kind: &'static str, id: String },
    #[error("team is incomplete: missing {missing}")]
    IncompleteTeam { missing: &'static str },
    #[error("encounter cannot move from {from:?} to {to:?}")]
    InvalidEncounterStep {
        from: EncounterPhase,
        to: EncounterPhase,
    },
    #[error("action belongs to {expected:?} but the current screen is {actual:?}")]
    WrongScreen { expected: Screen, actual: Screen },
    #[error("games list could not be parsed: {0}")]
    GamesList(#[from] serde_json::Error),
}
