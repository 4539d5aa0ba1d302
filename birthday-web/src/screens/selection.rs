use birthday_game::constants::TEAM_UP_FADE_MS;
use birthday_game::{AssetRequest, Brother, Hero, Mama, Papa, Screen, SelectionOutcome, SoundEffect};
use yew::prelude::*;

use super::{Bursts, Confetti, celebrate};
use crate::assets::AssetView;
use crate::dom;
use crate::i18n::t;
use crate::sound;

/// The four family pick screens share one layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionKind {
    Hero,
    Brother,
    Mama,
    Papa,
}

impl SelectionKind {
    #[must_use]
    pub const fn for_screen(screen: Screen) -> Option<Self> {
        match screen {
            Screen::HeroSelection => Some(Self::Hero),
            Screen::BrotherSelection => Some(Self::Brother),
            Screen::MamaSelection => Some(Self::Mama),
            Screen::PapaSelection => Some(Self::Papa),
            _ => None,
        }
    }

    #[must_use]
    pub const fn title_key(self) -> &'static str {
        match self {
            Self::Hero => "selection.hero",
            Self::Brother => "selection.brother",
            Self::Mama => "selection.mama",
            Self::Papa => "selection.papa",
        }
    }

    /// `(id, card asset)` pairs in display order.
    #[must_use]
    pub fn options(self) -> Vec<(&'static str, AssetRequest)> {
        match self {
            Self::Hero => Hero::ALL.iter().map(|c| (c.id(), c.card_asset())).collect(),
            Self::Brother => Brother::ALL.iter().map(|c| (c.id(), c.card_asset())).collect(),
            Self::Mama => Mama::ALL.iter().map(|c| (c.id(), c.card_asset())).collect(),
            Self::Papa => Papa::ALL.iter().map(|c| (c.id(), c.card_asset())).collect(),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub kind: SelectionKind,
    pub interactive: bool,
    /// Records the pick and says what happens next.
    pub on_pick: Callback<String, SelectionOutcome>,
    /// Pressed on the team-up preview.
    pub on_continue: Callback<()>,
}

#[function_component(SelectionScreen)]
pub fn selection_screen(props: &Props) -> Html {
    let selected = use_state(|| None::<String>);
    let preview = use_state(|| None::<AssetRequest>);
    let fading = use_state(|| false);
    let bursts = use_reducer(Bursts::default);

    let pick = {
        let selected = selected.clone();
        let preview = preview.clone();
        let bursts = bursts.dispatcher();
        let on_pick = props.on_pick.clone();
        let interactive = props.interactive;
        Callback::from(move |id: String| {
            if !interactive || selected.is_some() {
                return;
            }
            let outcome = on_pick.emit(id.clone());
            if outcome == SelectionOutcome::Ignored {
                return;
            }
            sound::play(SoundEffect::CharacterSelect);
            selected.set(Some(id));
            celebrate(&bursts);
            if let SelectionOutcome::TeamUp {
                preview: request,
                after_ms,
            } = outcome
            {
                let preview = preview.clone();
                let bursts = bursts.clone();
                dom::after_ms(after_ms, move || {
                    sound::play(SoundEffect::TeamUp);
                    preview.set(Some(request));
                    celebrate(&bursts);
                });
            }
        })
    };

    let on_awesome = {
        let preview = preview.clone();
        let fading = fading.clone();
        let on_continue = props.on_continue.clone();
        Callback::from(move |_: MouseEvent| {
            if *fading {
                return;
            }
            sound::play(SoundEffect::ButtonClick);
            fading.set(true);
            let preview = preview.clone();
            let on_continue = on_continue.clone();
            dom::after_ms(TEAM_UP_FADE_MS, move || {
                preview.set(None);
                on_continue.emit(());
            });
        })
    };

    let cards = props.kind.options().into_iter().map(|(id, asset)| {
        let class = classes!(
            "selection-card",
            match selected.as_deref() {
                Some(chosen) if chosen == id => Some("selected"),
                Some(_) => Some("disabled"),
                None => None,
            }
        );
        let onclick = {
            let pick = pick.clone();
            Callback::from(move |_: MouseEvent| pick.emit(id.to_string()))
        };
        html! {
            <div key={id} class={class} data-id={id} {onclick}>
                <AssetView dir={asset.dir().to_string()} base={asset.base().to_string()} />
            </div>
        }
    });

    html! {
        <>
            <h1>{ t(props.kind.title_key()) }</h1>
            <div class="selection-container">
                { for cards }
            </div>
            if let Some(request) = (*preview).clone() {
                <div class={classes!("team-preview-overlay", fading.then_some("fading"))}>
                    <div class="team-preview-content">
                        <AssetView dir={request.dir().to_string()} base={request.base().to_string()} />
                    </div>
                    <button type="button" class="btn-next" onclick={on_awesome}>
                        { t("selection.team_up") }
                    </button>
                </div>
            }
            <Confetti bursts={bursts.0} />
        </>
    }
}
