//! Enemy encounters guarding the restaurant, attraction and dessert picks.

use serde::{Deserialize, Serialize};

use crate::assets::AssetRequest;
use crate::challenge::MathQuestion;
use crate::error::GameError;
use crate::screens::Screen;
use crate::sound::SoundEffect;
use crate::state::{Attraction, Choices, Dessert, Restaurant};

pub const ENEMIES_DIR: &str = "enemies";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncounterKind {
    Restaurant,
    Attraction,
    Dessert,
}

/// Static description of one encounter screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncounterSpec {
    pub kind: EncounterKind,
    pub screen: Screen,
    pub enemy: &'static str,
    pub defeated: &'static str,
    pub options_dir: &'static str,
    /// Prefix of the enemy CSS classes (`{prefix}-hit`, `{prefix}-asset`).
    pub css_prefix: &'static str,
    /// From screen entry to the math overlay.
    pub intro_delay_ms: u32,
    /// From the end of the defeat sequence to unlocking the options.
    pub unlock_delay_ms: u32,
    pub unlock_track: u8,
    /// From an option pick to advancing.
    pub leave_delay_ms: u32,
    pub appear_cues: [SoundEffect; 2],
}

impl EncounterSpec {
    pub const RESTAURANT: Self = Self {
        kind: EncounterKind::Restaurant,
        screen: Screen::Restaurant,
        enemy: "Dragon",
        defeated: "dragon_defeated",
        options_dir: Restaurant::DIR,
        css_prefix: "dragon",
        intro_delay_ms: 3_000,
        unlock_delay_ms: 500,
        unlock_track: 10,
        leave_delay_ms: 600,
        appear_cues: [SoundEffect::EnemyAppear, SoundEffect::DragonRoar],
    };

    pub const ATTRACTION: Self = Self {
        kind: EncounterKind::Attraction,
        screen: Screen::Attraction,
        enemy: "robot",
        defeated: "robot_defeated",
        options_dir: Attraction::DIR,
        css_prefix: "robot",
        intro_delay_ms: 3_300,
        unlock_delay_ms: 600,
        unlock_track: 8,
        leave_delay_ms: 1_600,
        appear_cues: [SoundEffect::EnemyAppear, SoundEffect::RobotBeep],
    };

    pub const DESSERT: Self = Self {
        kind: EncounterKind::Dessert,
        screen: Screen::Dessert,
        enemy: "dessert_enemy",
        defeated: "dessert_enemy_defeated",
        options_dir: Dessert::DIR,
        css_prefix: "dessert-enemy",
        intro_delay_ms: 3_000,
        unlock_delay_ms: 500,
        unlock_track: 12,
        leave_delay_ms: 600,
        appear_cues: [SoundEffect::EnemyAppear, SoundEffect::RobotBeep],
    };

    pub const ALL: [Self; 3] = [Self::RESTAURANT, Self::ATTRACTION, Self::DESSERT];

    #[must_use]
    pub fn for_screen(screen: Screen) -> Option<Self> {
        Self::ALL.into_iter().find(|spec| spec.screen == screen)
    }

    #[must_use]
    pub const fn enemy_asset(&self) -> AssetRequest {
        AssetRequest::new(ENEMIES_DIR, self.enemy)
    }

    #[must_use]
    pub const fn defeated_asset(&self) -> AssetRequest {
        AssetRequest::new(ENEMIES_DIR, self.defeated)
    }

    /// Option ids in display order.
    #[must_use]
    pub fn option_ids(&self) -> Vec<&'static str> {
        match self.kind {
            EncounterKind::Restaurant => Restaurant::ALL.iter().map(|o| o.id()).collect(),
            EncounterKind::Attraction => Attraction::ALL.iter().map(|o| o.id()).collect(),
            EncounterKind::Dessert => Dessert::ALL.iter().map(|o| o.id()).collect(),
        }
    }

    #[must_use]
    pub fn option_assets(&self) -> Vec<AssetRequest> {
        match self.kind {
            EncounterKind::Restaurant => Restaurant::ALL.iter().map(|o| o.card_asset()).collect(),
            EncounterKind::Attraction => Attraction::ALL.iter().map(|o| o.card_asset()).collect(),
            EncounterKind::Dessert => Dessert::ALL.iter().map(|o| o.card_asset()).collect(),
        }
    }

    /// Store the picked option on `choices`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnknownChoice`] when `id` is not one of this
    /// encounter's options.
    pub fn apply_choice(&self, choices: &mut Choices, id: &str) -> Result<(), GameError> {
        match self.kind {
            EncounterKind::Restaurant => choices.restaurant = Some(Restaurant::from_id(id)?),
            EncounterKind::Attraction => choices.attraction = Some(Attraction::from_id(id)?),
            EncounterKind::Dessert => choices.dessert = Some(Dessert::from_id(id)?),
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EncounterPhase {
    /// Enemy on screen, options locked.
    Intro,
    /// Math overlay open, question still hidden.
    Challenge,
    QuestionShown,
    Defeating,
    OptionsUnlocked,
    Chosen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerOutcome {
    Correct,
    Wrong,
}

/// Live encounter progress for the current screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encounter {
    spec: EncounterSpec,
    phase: EncounterPhase,
    question: Option<MathQuestion>,
    attempts: u32,
}

impl Encounter {
    #[must_use]
    pub const fn new(spec: EncounterSpec) -> Self {
        Self {
            spec,
            phase: EncounterPhase::Intro,
            question: None,
            attempts: 0,
        }
    }

    #[must_use]
    pub const fn spec(&self) -> &EncounterSpec {
        &self.spec
    }

    #[must_use]
    pub const fn phase(&self) -> EncounterPhase {
        self.phase
    }

    #[must_use]
    pub const fn question(&self) -> Option<&MathQuestion> {
        self.question.as_ref()
    }

    /// Wrong answers given so far.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Option cards ignore clicks until the enemy is gone.
    #[must_use]
    pub const fn options_locked(&self) -> bool {
        !matches!(self.phase, EncounterPhase::OptionsUnlocked)
    }

    fn step(&mut self, from: EncounterPhase, to: EncounterPhase) -> Result<(), GameError> {
        if self.phase != from {
            return Err(GameError::InvalidEncounterStep {
                from: self.phase,
                to,
            });
        }
        log::debug!("{:?} encounter: {from:?} -> {to:?}", self.spec.kind);
        self.phase = to;
        Ok(())
    }

    /// Open the math overlay with `question`, still hidden.
    ///
    /// # Errors
    ///
    /// Fails unless the encounter is in its intro.
    pub fn show_challenge(&mut self, question: MathQuestion) -> Result<(), GameError> {
        self.step(EncounterPhase::Intro, EncounterPhase::Challenge)?;
        self.question = Some(question);
        Ok(())
    }

    /// # Errors
    ///
    /// Fails unless the overlay is open with the question hidden.
    pub fn reveal_question(&mut self) -> Result<&MathQuestion, GameError> {
        self.step(EncounterPhase::Challenge, EncounterPhase::QuestionShown)?;
        self.question
            .as_ref()
            .ok_or(GameError::InvalidEncounterStep {
                from: EncounterPhase::Intro,
                to: EncounterPhase::QuestionShown,
            })
    }

    /// Check an answer. A correct one starts the defeat sequence; a wrong
    /// one leaves the question open for another try.
    ///
    /// # Errors
    ///
    /// Fails unless the question is showing.
    pub fn answer(&mut self, value: u8) -> Result<AnswerOutcome, GameError> {
        let correct = match (&self.question, self.phase) {
            (Some(question), EncounterPhase::QuestionShown) => question.is_correct(value),
            _ => {
                return Err(GameError::InvalidEncounterStep {
                    from: self.phase,
                    to: EncounterPhase::Defeating,
                });
            }
        };
        if correct {
            self.step(EncounterPhase::QuestionShown, EncounterPhase::Defeating)?;
            Ok(AnswerOutcome::Correct)
        } else {
            self.attempts += 1;
            Ok(AnswerOutcome::Wrong)
        }
    }

    /// # Errors
    ///
    /// Fails unless the defeat sequence is running.
    pub fn defeat_finished(&mut self) -> Result<(), GameError> {
        self.step(EncounterPhase::Defeating, EncounterPhase::OptionsUnlocked)
    }

    /// Record the picked option.
    ///
    /// # Errors
    ///
    /// Fails while options are locked, after a pick was already made, or
    /// for an id that is not one of this encounter's options.
    pub fn choose(&mut self, choices: &mut Choices, id: &str) -> Result<(), GameError> {
        if self.phase != EncounterPhase::OptionsUnlocked {
            return Err(GameError::InvalidEncounterStep {
                from: self.phase,
                to: EncounterPhase::Chosen,
            });
        }
        self.spec.apply_choice(choices, id)?;
        self.step(EncounterPhase::OptionsUnlocked, EncounterPhase::Chosen)
    }
}
