use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use birthday_game::{
    AnswerOutcome, GameError, GameSession, Hero, MathQuestion, Partner, SelectionOutcome,
    TransitionPlan, TransitionStep,
};
use yew::UseReducerDispatcher;

use super::stage::{Stage, StageAction};
use crate::dom;
use crate::sound;

/// Glue between the session, the mounted stage and the browser clock.
///
/// Cloned into every callback of the game page. All clones share the
/// session and the generation counter.
#[derive(Clone)]
pub struct GameHandle {
    session: Rc<RefCell<GameSession>>,
    stage: UseReducerDispatcher<Stage>,
    generation: Rc<Cell<u32>>,
}

impl GameHandle {
    #[must_use]
    pub const fn new(
        session: Rc<RefCell<GameSession>>,
        stage: UseReducerDispatcher<Stage>,
        generation: Rc<Cell<u32>>,
    ) -> Self {
        Self {
            session,
            stage,
            generation,
        }
    }

    #[must_use]
    pub fn session(&self) -> Ref<'_, GameSession> {
        self.session.borrow()
    }

    /// Drop every pending timer and plan.
    pub fn invalidate(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
    }

    pub fn start(&self) {
        let plan = self.session.borrow_mut().start();
        self.run(plan);
    }

    pub fn advance(&self) {
        let plan = self.session.borrow_mut().advance();
        match plan {
            Some(plan) => self.run(plan),
            None => log::debug!("advance ignored"),
        }
    }

    /// Advance after `delay_ms`, unless another transition starts first.
    pub fn advance_after(&self, delay_ms: u32) {
        let generation = self.generation.get();
        let handle = self.clone();
        dom::after_ms(delay_ms, move || {
            if handle.generation.get() == generation {
                handle.advance();
            }
        });
    }

    pub fn restart(&self) {
        let plan = self.session.borrow_mut().restart();
        self.run(plan);
    }

    /// Execute `plan` against the stage with browser timers.
    pub fn run(&self, plan: TransitionPlan) {
        self.invalidate();
        let generation = self.generation.get();
        let handle = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let mut elapsed = 0;
            for (at_ms, steps) in plan.batches() {
                if at_ms > elapsed {
                    if let Err(err) = dom::sleep_ms(at_ms - elapsed).await {
                        log::error!("transition timer failed: {err}");
                        return;
                    }
                    elapsed = at_ms;
                }
                if handle.generation.get() != generation {
                    log::debug!("transition {generation} superseded");
                    return;
                }
                for step in steps {
                    handle.apply(step, generation);
                }
            }
        });
    }

    fn apply(&self, step: TransitionStep, generation: u32) {
        match step {
            TransitionStep::Activate(screen) => {
                let choices = self.session.borrow().state().choices;
                self.stage.dispatch(StageAction::Enter {
                    screen,
                    choices,
                    generation,
                });
            }
            TransitionStep::StopNarration => sound::stop_narration(),
            TransitionStep::EnableInteractions => self.set_interactions(generation, true),
            TransitionStep::DisableInteractions => self.set_interactions(generation, false),
            TransitionStep::PlayNarration(track) => self.play_narration(track, generation),
            TransitionStep::ExitPrevious => {
                self.stage.dispatch(StageAction::ExitPrevious { generation });
            }
            TransitionStep::RemovePrevious => {
                self.stage.dispatch(StageAction::RemovePrevious { generation });
            }
            TransitionStep::FinishTransition => self.session.borrow_mut().finish_transition(),
        }
    }

    fn set_interactions(&self, generation: u32, enabled: bool) {
        self.stage.dispatch(StageAction::Interactions {
            generation,
            enabled,
        });
    }

    /// Lock input and play `track` on the current screen.
    pub fn narrate(&self, track: u8) {
        let generation = self.generation.get();
        self.set_interactions(generation, false);
        self.play_narration(track, generation);
    }

    fn play_narration(&self, track: u8, generation: u32) {
        let handle = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            match sound::play_narration(track).await {
                Ok(true) => {}
                Ok(false) => handle.set_interactions(generation, true),
                Err(err) => {
                    log::warn!("narration {track} failed: {err}");
                    handle.set_interactions(generation, true);
                }
            }
        });
    }

    fn follow(&self, result: Result<SelectionOutcome, GameError>) -> SelectionOutcome {
        match result {
            Ok(SelectionOutcome::Advance { after_ms }) => {
                self.advance_after(after_ms);
                SelectionOutcome::Advance { after_ms }
            }
            Ok(outcome) => outcome,
            Err(err) => {
                log::warn!("pick rejected: {err}");
                SelectionOutcome::Ignored
            }
        }
    }

    pub fn pick_hero(&self, hero: Hero) -> SelectionOutcome {
        let result = self.session.borrow_mut().pick_hero(hero);
        self.follow(result)
    }

    /// A [`SelectionOutcome::TeamUp`] is returned untouched: the screen shows
    /// the preview and calls [`GameHandle::advance`] from its button.
    pub fn pick_partner(&self, partner: Partner) -> SelectionOutcome {
        let result = self.session.borrow_mut().pick_partner(partner);
        self.follow(result)
    }

    pub fn choose_option(&self, id: &str) -> SelectionOutcome {
        let result = self.session.borrow_mut().choose_option(id);
        self.follow(result)
    }

    pub fn open_challenge(&self) -> Option<MathQuestion> {
        let result = self.session.borrow_mut().open_challenge();
        result
            .inspect_err(|err| log::warn!("challenge not opened: {err}"))
            .ok()
    }

    /// Show the hidden question. False when the encounter moved on.
    pub fn reveal_question(&self) -> bool {
        let mut session = self.session.borrow_mut();
        let Some(encounter) = session.encounter_mut() else {
            return false;
        };
        encounter
            .reveal_question()
            .inspect_err(|err| log::warn!("question not revealed: {err}"))
            .is_ok()
    }

    pub fn answer(&self, value: u8) -> Option<AnswerOutcome> {
        let mut session = self.session.borrow_mut();
        let encounter = session.encounter_mut()?;
        encounter
            .answer(value)
            .inspect_err(|err| log::warn!("answer {value} rejected: {err}"))
            .ok()
    }

    /// Unlock the options and play the encounter's unlock narration.
    pub fn unlock_options(&self) {
        let track = {
            let mut session = self.session.borrow_mut();
            let Some(encounter) = session.encounter_mut() else {
                return;
            };
            if let Err(err) = encounter.defeat_finished() {
                log::warn!("options not unlocked: {err}");
                return;
            }
            encounter.spec().unlock_track
        };
        self.narrate(track);
    }
}
