use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::assets::AssetRequest;
use crate::challenge::MathQuestion;
use crate::constants::{HERO_ADVANCE_DELAY_MS, TEAM_UP_PREVIEW_DELAY_MS};
use crate::encounter::{Encounter, EncounterSpec};
use crate::error::GameError;
use crate::screens::Screen;
use crate::state::{GameState, Hero, Partner};
use crate::transition::TransitionPlan;

/// What the front end should do after a pick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionOutcome {
    /// A pick was already made on this screen or a transition is in flight.
    Ignored,
    /// Advance to the next screen after the delay.
    Advance { after_ms: u32 },
    /// Show the team-up preview after the delay; its button advances.
    TeamUp { preview: AssetRequest, after_ms: u32 },
}

/// High-level wrapper binding the screen flow, the player's picks and the
/// live encounter together.
#[derive(Debug, Clone)]
pub struct GameSession {
    state: GameState,
    encounter: Option<Encounter>,
    picked: bool,
    seed: u64,
    rng: ChaCha8Rng,
}

impl GameSession {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            state: GameState::new(),
            encounter: None,
            picked: false,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub const fn current(&self) -> Screen {
        self.state.flow.current()
    }

    #[must_use]
    pub const fn encounter(&self) -> Option<&Encounter> {
        self.encounter.as_ref()
    }

    pub const fn encounter_mut(&mut self) -> Option<&mut Encounter> {
        self.encounter.as_mut()
    }

    /// True while a screen is sliding in or a pick is waiting to advance.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.picked || self.state.flow.is_transitioning()
    }

    /// Plan for the first screen of a page load.
    pub fn start(&mut self) -> TransitionPlan {
        self.state.flow.begin_transition();
        self.enter_current(false)
    }

    /// Move to the next screen. `None` while a transition is in flight or on
    /// the last screen.
    pub fn advance(&mut self) -> Option<TransitionPlan> {
        if self.state.flow.is_transitioning() {
            log::debug!("advance ignored: transition in flight");
            return None;
        }
        self.state.flow.advance()?;
        self.state.flow.begin_transition();
        Some(self.enter_current(true))
    }

    /// Clear every pick and go back to the welcome screen.
    pub fn restart(&mut self) -> TransitionPlan {
        self.state.restart();
        self.state.flow.begin_transition();
        self.enter_current(true)
    }

    pub fn finish_transition(&mut self) {
        self.state.flow.finish_transition();
    }

    fn enter_current(&mut self, has_previous: bool) -> TransitionPlan {
        let screen = self.current();
        self.picked = false;
        self.encounter = EncounterSpec::for_screen(screen).map(Encounter::new);
        log::info!("entering {}", screen.slug());
        TransitionPlan::enter(screen, has_previous)
    }

    fn expect_screen(&self, expected: Screen) -> Result<(), GameError> {
        let actual = self.current();
        if actual == expected {
            Ok(())
        } else {
            Err(GameError::WrongScreen { expected, actual })
        }
    }

    /// # Errors
    ///
    /// Returns [`GameError::WrongScreen`] outside the hero selection screen.
    pub fn pick_hero(&mut self, hero: Hero) -> Result<SelectionOutcome, GameError> {
        self.expect_screen(Screen::HeroSelection)?;
        if self.is_busy() {
            return Ok(SelectionOutcome::Ignored);
        }
        self.picked = true;
        self.state.choices.hero = Some(hero);
        Ok(SelectionOutcome::Advance {
            after_ms: HERO_ADVANCE_DELAY_MS,
        })
    }

    /// Record a brother, mama or papa pick. Without a hero there is nothing
    /// to preview, so the flow simply advances.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::WrongScreen`] when `partner` does not belong to
    /// the current selection screen.
    pub fn pick_partner(&mut self, partner: Partner) -> Result<SelectionOutcome, GameError> {
        let expected = match partner {
            Partner::Brother(_) => Screen::BrotherSelection,
            Partner::Mama(_) => Screen::MamaSelection,
            Partner::Papa(_) => Screen::PapaSelection,
        };
        self.expect_screen(expected)?;
        if self.is_busy() {
            return Ok(SelectionOutcome::Ignored);
        }
        self.picked = true;
        Ok(match self.state.choices.pick_partner(partner) {
            Some(preview) => SelectionOutcome::TeamUp {
                preview,
                after_ms: TEAM_UP_PREVIEW_DELAY_MS,
            },
            None => {
                log::warn!("partner {} picked before a hero", partner.id());
                SelectionOutcome::Advance {
                    after_ms: TEAM_UP_PREVIEW_DELAY_MS,
                }
            }
        })
    }

    /// Generate a question and open the math overlay.
    ///
    /// # Errors
    ///
    /// Fails off an encounter screen or outside the encounter intro.
    pub fn open_challenge(&mut self) -> Result<MathQuestion, GameError> {
        let question = MathQuestion::generate(&mut self.rng);
        let screen = self.current();
        let encounter = self.encounter.as_mut().ok_or(GameError::WrongScreen {
            expected: Screen::Restaurant,
            actual: screen,
        })?;
        encounter.show_challenge(question.clone())?;
        Ok(question)
    }

    /// Pick an option on an encounter screen.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::WrongScreen`] off an encounter screen and
    /// [`GameError::InvalidEncounterStep`] while the options are locked.
    pub fn choose_option(&mut self, id: &str) -> Result<SelectionOutcome, GameError> {
        if self.is_busy() {
            return Ok(SelectionOutcome::Ignored);
        }
        let screen = self.current();
        let encounter = self.encounter.as_mut().ok_or(GameError::WrongScreen {
            expected: Screen::Restaurant,
            actual: screen,
        })?;
        encounter.choose(&mut self.state.choices, id)?;
        self.picked = true;
        Ok(SelectionOutcome::Advance {
            after_ms: encounter.spec().leave_delay_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Brother, Mama};
    use crate::transition::TransitionStep;

    fn settled(seed: u64) -> GameSession {
        let mut session = GameSession::new(seed);
        session.start();
        session.finish_transition();
        session
    }

    fn step_to(session: &mut GameSession, screen: Screen) {
        while session.current() != screen {
            session.picked = false;
            session.advance().unwrap();
            session.finish_transition();
        }
    }

    #[test]
    fn advance_waits_for_the_running_transition() {
        let mut session = GameSession::new(1);
        session.start();
        assert!(session.advance().is_none());
        session.finish_transition();
        let plan = session.advance().unwrap();
        assert_eq!(
            plan.position(TransitionStep::Activate(Screen::HeroSelection)),
            Some(0)
        );
        assert!(session.advance().is_none());
        assert_eq!(session.current(), Screen::HeroSelection);
    }

    #[test]
    fn second_pick_on_a_screen_is_ignored() {
        let mut session = settled(1);
        step_to(&mut session, Screen::HeroSelection);
        assert_eq!(
            session.pick_hero(Hero::Batman).unwrap(),
            SelectionOutcome::Advance {
                after_ms: HERO_ADVANCE_DELAY_MS
            }
        );
        assert_eq!(
            session.pick_hero(Hero::Flash).unwrap(),
            SelectionOutcome::Ignored
        );
        assert_eq!(session.state().choices.hero, Some(Hero::Batman));
    }

    #[test]
    fn partner_pick_previews_the_team_up() {
        let mut session = settled(1);
        step_to(&mut session, Screen::HeroSelection);
        session.pick_hero(Hero::Flash).unwrap();
        session.advance().unwrap();
        session.finish_transition();

        let outcome = session
            .pick_partner(Partner::Brother(Brother::Thor))
            .unwrap();
        let SelectionOutcome::TeamUp { preview, after_ms } = outcome else {
            panic!("expected a team-up preview, got {outcome:?}");
        };
        assert_eq!(preview.path_stem(), "Yuval_Or/flash_thor");
        assert_eq!(after_ms, TEAM_UP_PREVIEW_DELAY_MS);
    }

    #[test]
    fn picks_are_bound_to_their_screen() {
        let mut session = settled(1);
        assert!(matches!(
            session.pick_partner(Partner::Mama(Mama::Wonder)),
            Err(GameError::WrongScreen {
                expected: Screen::MamaSelection,
                actual: Screen::Welcome
            })
        ));
        assert!(session.choose_option("pizza").is_err());
    }

    #[test]
    fn encounter_screens_gate_their_options() {
        let mut session = settled(3);
        step_to(&mut session, Screen::Restaurant);
        assert!(session.encounter().is_some());
        assert!(matches!(
            session.choose_option("pizza"),
            Err(GameError::InvalidEncounterStep { .. })
        ));

        let question = session.open_challenge().unwrap();
        let encounter = session.encounter_mut().unwrap();
        encounter.reveal_question().unwrap();
        encounter.answer(question.correct).unwrap();
        encounter.defeat_finished().unwrap();

        assert_eq!(
            session.choose_option("wok").unwrap(),
            SelectionOutcome::Advance {
                after_ms: EncounterSpec::RESTAURANT.leave_delay_ms
            }
        );
        assert_eq!(session.choose_option("pizza").unwrap(), SelectionOutcome::Ignored);
    }

    #[test]
    fn restart_returns_to_welcome_with_nothing_picked() {
        let mut session = settled(1);
        step_to(&mut session, Screen::HeroSelection);
        session.pick_hero(Hero::Flash).unwrap();
        step_to(&mut session, Screen::FinalCelebration);
        assert!(session.advance().is_none());

        let plan = session.restart();
        assert_eq!(session.current(), Screen::Welcome);
        assert_eq!(session.state().choices.hero, None);
        assert!(plan.position(TransitionStep::ExitPrevious).is_some());
        assert!(session.encounter().is_none());
    }
}
