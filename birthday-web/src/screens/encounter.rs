//! Enemy encounter screen: the enemy shows up behind a math overlay, a
//! correct sum knocks it out, and only then can an option be picked.
//!
//! The session owns the encounter phase. This component keeps a parallel
//! view state for what the phase alone cannot tell the DOM (overlay fade,
//! shaking buttons, hit flash) and drives the timers between steps.

use std::rc::Rc;

use birthday_game::constants::{
    DEFEAT_HIT_MS, DEFEAT_SETTLE_MS, DEFEAT_START_DELAY_MS, DEFEAT_VIDEO_MAX_MS,
    MATH_OVERLAY_FADE_MS, MATH_REVEAL_DELAY_MS, WRONG_ANSWER_SHAKE_MS,
};
use birthday_game::{
    AnswerOutcome, EncounterPhase, EncounterSpec, MathQuestion, SelectionOutcome, SoundEffect,
};
use yew::prelude::*;

use super::{MathOverlay, later, use_mounted};
use crate::assets::AssetView;
use crate::i18n::t;
use crate::sound;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
    Closed,
    Open,
    Fading,
}

/// Where the enemy in the screen's own container is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyStage {
    /// Still inside the overlay, or not loaded yet.
    Absent,
    Alive,
    Hit,
    /// The defeated clip replaced the live enemy.
    Falling,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncounterView {
    pub phase: EncounterPhase,
    pub question: Option<MathQuestion>,
    pub revealed: bool,
    pub overlay: Overlay,
    pub wrong: Vec<u8>,
    pub shaking: Option<u8>,
    pub enemy: EnemyStage,
    pub defeated: bool,
    pub selected: Option<String>,
}

impl Default for EncounterView {
    fn default() -> Self {
        Self {
            phase: EncounterPhase::Intro,
            question: None,
            revealed: false,
            overlay: Overlay::Closed,
            wrong: Vec::new(),
            shaking: None,
            enemy: EnemyStage::Absent,
            defeated: false,
            selected: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewAction {
    ShowChallenge(MathQuestion),
    Reveal,
    Wrong(u8),
    StopShake(u8),
    Correct,
    CloseOverlay,
    StartDefeat,
    HitDone,
    Defeated,
    Unlock,
    Select(String),
}

impl EncounterView {
    /// Options accept clicks once the enemy is gone and nothing was picked.
    #[must_use]
    pub fn options_open(&self) -> bool {
        self.phase == EncounterPhase::OptionsUnlocked && self.selected.is_none()
    }

    pub fn apply(&mut self, action: ViewAction) {
        match action {
            ViewAction::ShowChallenge(question) if self.phase == EncounterPhase::Intro => {
                self.phase = EncounterPhase::Challenge;
                self.question = Some(question);
                self.overlay = Overlay::Open;
            }
            ViewAction::Reveal if self.phase == EncounterPhase::Challenge => {
                self.phase = EncounterPhase::QuestionShown;
                self.revealed = true;
            }
            ViewAction::Wrong(value) if self.phase == EncounterPhase::QuestionShown => {
                if !self.wrong.contains(&value) {
                    self.wrong.push(value);
                }
                self.shaking = Some(value);
            }
            ViewAction::StopShake(value) => {
                if self.shaking == Some(value) {
                    self.shaking = None;
                }
            }
            ViewAction::Correct if self.phase == EncounterPhase::QuestionShown => {
                self.phase = EncounterPhase::Defeating;
                self.revealed = false;
                self.shaking = None;
                self.overlay = Overlay::Fading;
            }
            ViewAction::CloseOverlay if self.overlay == Overlay::Fading => {
                self.overlay = Overlay::Closed;
                self.enemy = EnemyStage::Alive;
            }
            ViewAction::StartDefeat if self.enemy == EnemyStage::Alive => {
                self.enemy = EnemyStage::Hit;
            }
            ViewAction::HitDone if self.enemy == EnemyStage::Hit => {
                self.enemy = EnemyStage::Falling;
            }
            ViewAction::Defeated if self.phase == EncounterPhase::Defeating => {
                self.defeated = true;
            }
            ViewAction::Unlock if self.defeated => {
                self.phase = EncounterPhase::OptionsUnlocked;
            }
            ViewAction::Select(id) if self.options_open() => {
                self.phase = EncounterPhase::Chosen;
                self.selected = Some(id);
            }
            other => log::debug!("encounter view ignored {other:?} in {:?}", self.phase),
        }
    }
}

impl Reducible for EncounterView {
    type Action = ViewAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        if next == *self { self } else { Rc::new(next) }
    }
}

/// Joins the hit flash with the end of the defeated clip. The clip ends
/// either through its `ended` event or the timeout, whichever comes first.
#[derive(Debug, Default)]
pub struct DefeatGate {
    hit_done: bool,
    media_done: bool,
    released: bool,
}

impl DefeatGate {
    /// True exactly once, when this call completes the pair.
    pub fn hit_finished(&mut self) -> bool {
        self.hit_done = true;
        self.try_release()
    }

    pub fn media_finished(&mut self) -> bool {
        self.media_done = true;
        self.try_release()
    }

    fn try_release(&mut self) -> bool {
        if self.hit_done && self.media_done && !self.released {
            self.released = true;
            return true;
        }
        false
    }
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub spec: EncounterSpec,
    pub interactive: bool,
    pub on_open: Callback<(), Option<MathQuestion>>,
    pub on_reveal: Callback<(), bool>,
    pub on_answer: Callback<u8, Option<AnswerOutcome>>,
    /// Enemy gone: unlock the options and play the prompt.
    pub on_unlock: Callback<()>,
    pub on_choose: Callback<String, SelectionOutcome>,
}

#[function_component(EncounterScreen)]
pub fn encounter_screen(props: &Props) -> Html {
    let view = use_reducer(EncounterView::default);
    let alive = use_mounted();
    let gate = use_mut_ref(DefeatGate::default);
    let spec = props.spec;

    {
        let timers = alive.clone();
        let dispatcher = view.dispatcher();
        let on_open = props.on_open.clone();
        let on_reveal = props.on_reveal.clone();
        use_effect_with(spec, move |spec| {
            later(&timers, spec.intro_delay_ms, {
                let timers = timers.clone();
                let cues = spec.appear_cues;
                move || {
                    for cue in cues {
                        sound::play(cue);
                    }
                    let Some(question) = on_open.emit(()) else {
                        return;
                    };
                    dispatcher.dispatch(ViewAction::ShowChallenge(question));
                    later(&timers, MATH_REVEAL_DELAY_MS, move || {
                        if on_reveal.emit(()) {
                            sound::play(SoundEffect::MathQuestion);
                            dispatcher.dispatch(ViewAction::Reveal);
                        }
                    });
                }
            });
            || {}
        });
    }

    let release_defeat = {
        let alive = alive.clone();
        let dispatcher = view.dispatcher();
        let on_unlock = props.on_unlock.clone();
        Rc::new(move || {
            let timers = alive.clone();
            let dispatcher = dispatcher.clone();
            let on_unlock = on_unlock.clone();
            later(&alive, DEFEAT_SETTLE_MS, move || {
                dispatcher.dispatch(ViewAction::Defeated);
                later(&timers, spec.unlock_delay_ms, move || {
                    dispatcher.dispatch(ViewAction::Unlock);
                    on_unlock.emit(());
                });
            });
        })
    };

    let on_media_done = {
        let gate = gate.clone();
        let release = release_defeat.clone();
        Callback::from(move |()| {
            if gate.borrow_mut().media_finished() {
                release();
            }
        })
    };

    let answer = {
        let alive = alive.clone();
        let gate = gate.clone();
        let dispatcher = view.dispatcher();
        let on_answer = props.on_answer.clone();
        let on_media_done = on_media_done.clone();
        let release = release_defeat;
        let ready = props.interactive && view.revealed && view.overlay == Overlay::Open;
        Callback::from(move |value: u8| {
            if !ready {
                return;
            }
            match on_answer.emit(value) {
                Some(AnswerOutcome::Correct) => {
                    sound::play(SoundEffect::MathCorrect);
                    dispatcher.dispatch(ViewAction::Correct);
                    let fade = dispatcher.clone();
                    later(&alive, MATH_OVERLAY_FADE_MS, move || {
                        fade.dispatch(ViewAction::CloseOverlay);
                    });
                    let timers = alive.clone();
                    let gate = gate.clone();
                    let dispatcher = dispatcher.clone();
                    let on_media_done = on_media_done.clone();
                    let release = release.clone();
                    later(&alive, DEFEAT_START_DELAY_MS, move || {
                        sound::play(SoundEffect::EnemyDefeat);
                        dispatcher.dispatch(ViewAction::StartDefeat);
                        later(&timers, DEFEAT_VIDEO_MAX_MS, move || on_media_done.emit(()));
                        later(&timers, DEFEAT_HIT_MS, move || {
                            dispatcher.dispatch(ViewAction::HitDone);
                            if gate.borrow_mut().hit_finished() {
                                release();
                            }
                        });
                    });
                }
                Some(AnswerOutcome::Wrong) => {
                    sound::play(SoundEffect::MathWrong);
                    dispatcher.dispatch(ViewAction::Wrong(value));
                    let dispatcher = dispatcher.clone();
                    later(&alive, WRONG_ANSWER_SHAKE_MS * 2, move || {
                        dispatcher.dispatch(ViewAction::StopShake(value));
                    });
                }
                None => {}
            }
        })
    };

    let choose = {
        let dispatcher = view.dispatcher();
        let on_choose = props.on_choose.clone();
        let open = props.interactive && view.options_open();
        Callback::from(move |id: String| {
            if !open {
                return;
            }
            if on_choose.emit(id.clone()) == SelectionOutcome::Ignored {
                return;
            }
            sound::play(SoundEffect::ButtonClick);
            dispatcher.dispatch(ViewAction::Select(id));
        })
    };

    let prefix = spec.css_prefix;
    let slug = spec.screen.slug();
    let enemy = match view.enemy {
        EnemyStage::Absent => html! {},
        EnemyStage::Alive | EnemyStage::Hit => {
            let request = spec.enemy_asset();
            html! {
                <AssetView
                    key="alive"
                    dir={request.dir().to_string()}
                    base={request.base().to_string()}
                    class={classes!(
                        format!("{prefix}-asset"),
                        (view.enemy == EnemyStage::Hit).then(|| format!("{prefix}-hit")),
                    )}
                />
            }
        }
        EnemyStage::Falling => {
            let request = spec.defeated_asset();
            html! {
                <AssetView
                    key="defeated"
                    dir={request.dir().to_string()}
                    base={request.base().to_string()}
                    class={classes!(format!("{prefix}-asset"), format!("{prefix}-defeated-anim"))}
                    looping={false}
                    on_finished={on_media_done}
                />
            }
        }
    };

    let locked = view.phase < EncounterPhase::OptionsUnlocked;
    let cards = spec
        .option_ids()
        .into_iter()
        .zip(spec.option_assets())
        .map(|(id, asset)| {
            let class = classes!(
                "selection-card",
                format!("{slug}-card"),
                locked.then_some("disabled-no-visual"),
                match view.selected.as_deref() {
                    Some(chosen) if chosen == id => classes!("selected", "explosion-active"),
                    Some(_) => classes!("disabled"),
                    None => classes!(),
                },
            );
            let onclick = {
                let choose = choose.clone();
                Callback::from(move |_: MouseEvent| choose.emit(id.to_string()))
            };
            html! {
                <div key={id} class={class} data-id={id} {onclick}>
                    <AssetView dir={asset.dir().to_string()} base={asset.base().to_string()} />
                </div>
            }
        });

    let overlay = match (&view.question, view.overlay) {
        (Some(question), Overlay::Open | Overlay::Fading) => {
            let request = spec.enemy_asset();
            html! {
                <MathOverlay
                    question={question.clone()}
                    revealed={view.revealed}
                    fading={view.overlay == Overlay::Fading}
                    wrong={view.wrong.clone()}
                    shaking={view.shaking}
                    interactive={props.interactive}
                    enemy={request}
                    enemy_class={classes!(format!("{prefix}-asset"), format!("{prefix}-entry-anim"))}
                    on_answer={answer}
                />
            }
        }
        _ => html! {},
    };

    html! {
        <div class={classes!("encounter", view.defeated.then_some("enemy-defeated"))}>
            <h1>{ t(&format!("encounter.{slug}")) }</h1>
            <div class={classes!(
                format!("{prefix}-container"),
                view.defeated.then_some("enemy-container-defeated"),
            )}>
                { enemy }
            </div>
            <div class={format!("{slug}-options-container")}>
                { for cards }
            </div>
            { overlay }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> MathQuestion {
        MathQuestion {
            a: 4,
            b: 3,
            correct: 7,
            choices: vec![6, 7, 8, 9],
        }
    }

    fn run(actions: impl IntoIterator<Item = ViewAction>) -> EncounterView {
        let mut view = EncounterView::default();
        for action in actions {
            view.apply(action);
        }
        view
    }

    #[test]
    fn full_sequence_unlocks_then_picks() {
        let mut view = run([
            ViewAction::ShowChallenge(question()),
            ViewAction::Reveal,
            ViewAction::Wrong(6),
            ViewAction::StopShake(6),
            ViewAction::Correct,
            ViewAction::CloseOverlay,
            ViewAction::StartDefeat,
            ViewAction::HitDone,
            ViewAction::Defeated,
        ]);
        assert_eq!(view.wrong, vec![6]);
        assert_eq!(view.enemy, EnemyStage::Falling);
        assert!(view.defeated);
        assert!(!view.options_open());

        view.apply(ViewAction::Unlock);
        assert!(view.options_open());
        view.apply(ViewAction::Select("pizza".into()));
        assert_eq!(view.phase, EncounterPhase::Chosen);
        view.apply(ViewAction::Select("wok".into()));
        assert_eq!(view.selected.as_deref(), Some("pizza"));
    }

    #[test]
    fn options_stay_locked_until_the_enemy_is_down() {
        let view = run([
            ViewAction::ShowChallenge(question()),
            ViewAction::Unlock,
            ViewAction::Select("pizza".into()),
        ]);
        assert_eq!(view.phase, EncounterPhase::Challenge);
        assert!(view.selected.is_none());
    }

    #[test]
    fn answers_before_the_reveal_are_ignored() {
        let view = run([ViewAction::ShowChallenge(question()), ViewAction::Correct]);
        assert_eq!(view.overlay, Overlay::Open);
        assert_eq!(view.phase, EncounterPhase::Challenge);
    }

    #[test]
    fn a_later_wrong_answer_keeps_the_newer_shake() {
        let view = run([
            ViewAction::ShowChallenge(question()),
            ViewAction::Reveal,
            ViewAction::Wrong(6),
            ViewAction::Wrong(8),
            ViewAction::StopShake(6),
        ]);
        assert_eq!(view.shaking, Some(8));
        assert_eq!(view.wrong, vec![6, 8]);
    }

    #[test]
    fn defeat_gate_releases_once_both_sides_finish() {
        let mut gate = DefeatGate::default();
        assert!(!gate.hit_finished());
        assert!(gate.media_finished());
        assert!(!gate.media_finished());

        let mut gate = DefeatGate::default();
        assert!(!gate.media_finished());
        assert!(gate.hit_finished());
    }
}
