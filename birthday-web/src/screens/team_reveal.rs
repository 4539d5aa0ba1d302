use birthday_game::constants::{REVEAL_CELEBRATION_DELAY_MS, REVEAL_SECOND_BURST_MS};
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
    pub on_continue: Callback<()>,
}

#[function_component(TeamRevealScreen)]
pub fn team_reveal_screen(props: &Props) -> Html {
    let bursts = use_reducer(Bursts::default);
    let mounted = use_mounted();

    {
        let bursts = bursts.dispatcher();
        use_effect_with((), move |_| {
            let timers = mounted.clone();
            later(&mounted, REVEAL_CELEBRATION_DELAY_MS, move || {
                celebrate(&bursts);
                sound::play(SoundEffect::Celebration);
                later(&timers, REVEAL_SECOND_BURST_MS, move || celebrate(&bursts));
            });
            || {}
        });
    }

    let asset = match props.choices.team() {
        Ok(team) => {
            let request = team.asset();
            html! {
                <AssetView
                    dir={request.dir().to_string()}
                    base={request.base().to_string()}
                    class="team-reveal-asset"
                />
            }
        }
        Err(err) => {
            log::warn!("team reveal without a full team: {err}");
            html! {
                <AssetMedia
                    asset={ResolvedAsset::placeholder(err.to_string())}
                    class="team-reveal-asset"
                />
            }
        }
    };

    let onclick = {
        let on_continue = props.on_continue.clone();
        Callback::from(move |_: MouseEvent| {
            sound::play(SoundEffect::ButtonClick);
            on_continue.emit(());
        })
    };

    html! {
        <>
            <h1>{ t("reveal.title") }</h1>
            <div class="team-reveal-container">
                <div class="reveal-content">{ asset }</div>
            </div>
            <button
                type="button"
                class="btn-next reveal-btn"
                disabled={!props.interactive}
                {onclick}
            >
                { t("reveal.begin") }
            </button>
            <Confetti bursts={bursts.0} />
        </>
    }
}
