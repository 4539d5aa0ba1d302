use birthday_game::constants::{FINALE_BURST_OFFSETS_MS, FINALE_CELEBRATION_DELAY_MS};
use birthday_game::{Choices, ResolvedAsset, SoundEffect};
use yew::prelude::*;

use super::{Bursts, Confetti, celebrate, later, use_mounted};
use crate::assets::{AssetMedia, AssetView};
use crate::i18n::t;
use crate::sound;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub choices: Choices,
    pub interactive: bool,
    pub on_restart: Callback<()>,
}

#[function_component(FinaleScreen)]
pub fn finale_screen(props: &Props) -> Html {
    let bursts = use_reducer(Bursts::default);
    let mounted = use_mounted();

    {
        let bursts = bursts.dispatcher();
        use_effect_with((), move |_| {
            sound::play(SoundEffect::Celebration);
            for offset in FINALE_BURST_OFFSETS_MS {
                let bursts = bursts.clone();
                later(&mounted, FINALE_CELEBRATION_DELAY_MS + offset, move || {
                    celebrate(&bursts);
                });
            }
            || {}
        });
    }

    let team = match props.choices.team() {
        Ok(team) => {
            let request = team.asset();
            html! {
                <AssetView dir={request.dir().to_string()} base={request.base().to_string()} />
            }
        }
        Err(err) => html! { <AssetMedia asset={ResolvedAsset::placeholder(err.to_string())} /> },
    };

    let (restaurant, attraction, dessert) = props.choices.recap();
    let recap = [
        ("finale.food", restaurant.card_asset()),
        ("finale.fun", attraction.card_asset()),
        ("finale.dessert", dessert.card_asset()),
    ]
    .into_iter()
    .map(|(label, asset)| {
        html! {
            <div key={label} class="choice-item">
                <AssetView dir={asset.dir().to_string()} base={asset.base().to_string()} />
                <div class="choice-label">{ t(label) }</div>
            </div>
        }
    });

    let onclick = {
        let on_restart = props.on_restart.clone();
        Callback::from(move |_: MouseEvent| {
            sound::play(SoundEffect::ButtonClick);
            on_restart.emit(());
        })
    };

    html! {
        <div class="celebration-content">
            <h1 class="celebration-title">{ t("finale.title") }</h1>
            <h2 class="celebration-subtitle">{ t("finale.subtitle") }</h2>
            <div class="team-container">{ team }</div>
            <div class="choices-summary">
                <h3>{ t("finale.recap") }</h3>
                <div class="choices-grid">{ for recap }</div>
            </div>
            <button
                type="button"
                class="btn-next restart-btn"
                disabled={!props.interactive}
                {onclick}
            >
                { format!("↺ {}", t("finale.again")) }
            </button>
            <Confetti bursts={bursts.0} />
        </div>
    }
}
