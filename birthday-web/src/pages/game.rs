use std::cell::Cell;

use birthday_game::{
    Brother, EncounterSpec, GameError, GameSession, Hero, Mama, Papa, Partner, Screen,
    SelectionOutcome,
};
use yew::prelude::*;

use crate::app::controller::GameHandle;
use crate::app::stage::{Slot, Stage, StageAction};
use crate::i18n::t;
use crate::screens::{
    EncounterScreen, FinaleScreen, SelectionKind, SelectionScreen, TeamRevealScreen,
    WelcomeScreen,
};
use crate::sound;

fn rejected(err: &GameError) -> SelectionOutcome {
    log::warn!("pick rejected: {err}");
    SelectionOutcome::Ignored
}

fn pick_for(kind: SelectionKind, handle: &GameHandle, id: &str) -> SelectionOutcome {
    let partner = match kind {
        SelectionKind::Hero => {
            return Hero::from_id(id).map_or_else(|err| rejected(&err), |h| handle.pick_hero(h));
        }
        SelectionKind::Brother => Brother::from_id(id).map(Partner::Brother),
        SelectionKind::Mama => Mama::from_id(id).map(Partner::Mama),
        SelectionKind::Papa => Papa::from_id(id).map(Partner::Papa),
    };
    partner.map_or_else(|err| rejected(&err), |p| handle.pick_partner(p))
}

fn render_screen(slot: Slot, interactive: bool, handle: &GameHandle) -> Html {
    let advance = {
        let handle = handle.clone();
        Callback::from(move |()| handle.advance())
    };

    if let Some(kind) = SelectionKind::for_screen(slot.screen) {
        let handle = handle.clone();
        let on_pick = Callback::from(move |id: String| pick_for(kind, &handle, &id));
        return html! {
            <SelectionScreen {kind} {interactive} {on_pick} on_continue={advance} />
        };
    }

    if let Some(spec) = EncounterSpec::for_screen(slot.screen) {
        let on_open = {
            let handle = handle.clone();
            Callback::from(move |()| handle.open_challenge())
        };
        let on_reveal = {
            let handle = handle.clone();
            Callback::from(move |()| handle.reveal_question())
        };
        let on_answer = {
            let handle = handle.clone();
            Callback::from(move |value: u8| handle.answer(value))
        };
        let on_unlock = {
            let handle = handle.clone();
            Callback::from(move |()| handle.unlock_options())
        };
        let on_choose = {
            let handle = handle.clone();
            Callback::from(move |id: String| handle.choose_option(&id))
        };
        return html! {
            <EncounterScreen
                {spec}
                {interactive}
                {on_open}
                {on_reveal}
                {on_answer}
                {on_unlock}
                {on_choose}
            />
        };
    }

    match slot.screen {
        Screen::Welcome => html! { <WelcomeScreen {interactive} on_start={advance} /> },
        Screen::TeamReveal => html! {
            <TeamRevealScreen choices={slot.choices} {interactive} on_continue={advance} />
        },
        Screen::FinalCelebration => {
            let handle = handle.clone();
            let on_restart = Callback::from(move |()| handle.restart());
            html! { <FinaleScreen choices={slot.choices} {interactive} {on_restart} /> }
        }
        other => {
            log::error!("no view for screen {}", other.slug());
            html! {}
        }
    }
}

/// Screen classes: the slug marker plus the enter or exit animation.
#[must_use]
pub fn slot_classes(slot: &Slot, active: bool) -> Classes {
    classes!(
        "screen",
        format!("{}-screen", slot.screen.slug()),
        active.then_some("active"),
        slot.exiting.then_some("exit"),
    )
}

#[function_component(SoundToggle)]
fn sound_toggle() -> Html {
    let enabled = use_state(|| sound::settings().enabled);
    let onclick = {
        let enabled = enabled.clone();
        Callback::from(move |_: MouseEvent| {
            let next = !*enabled;
            sound::set_enabled(next);
            enabled.set(next);
        })
    };
    let (icon, label) = if *enabled {
        ("🔊", t("game.sound_off"))
    } else {
        ("🔇", t("game.sound_on"))
    };
    html! {
        <button type="button" class="sound-toggle" aria-label={label.clone()} title={label} {onclick}>
            { icon }
        </button>
    }
}

/// Hosts the adventure: one session per mount, screens stacked on a stage.
#[function_component(GamePage)]
pub fn game_page() -> Html {
    let session = use_mut_ref(|| GameSession::new(rand::random()));
    let generation = use_memo((), |_| Cell::new(0_u32));
    let stage = use_reducer(Stage::default);
    let handle = GameHandle::new(session, stage.dispatcher(), generation);

    {
        let handle = handle.clone();
        let dispatcher = stage.dispatcher();
        use_effect_with((), move |_| {
            log::info!("starting adventure with seed {}", handle.session().seed());
            sound::set_listener(Callback::from(move |playing: bool| {
                dispatcher.dispatch(StageAction::Narration(playing));
            }));
            handle.start();
            move || {
                handle.invalidate();
                sound::clear_listener();
                sound::stop_narration();
            }
        });
    }

    let accepts = stage.accepts_input();
    let active_generation = stage.active.map(|slot| slot.generation);
    let slots = stage.slots().into_iter().map(|slot| {
        let active = Some(slot.generation) == active_generation;
        html! {
            <div key={slot.generation.to_string()} class={slot_classes(&slot, active)}>
                { render_screen(slot, active && accepts, &handle) }
            </div>
        }
    });

    html! {
        <div class={classes!("game-stage", (!accepts).then_some("interactions-locked"))}>
            <SoundToggle />
            { for slots }
        </div>
    }
}
