use birthday_game::SoundEffect;
use yew::prelude::*;

use crate::i18n::t;
use crate::sound;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub interactive: bool,
    pub on_start: Callback<()>,
}

#[function_component(WelcomeScreen)]
pub fn welcome_screen(props: &Props) -> Html {
    let on_click = {
        let on_start = props.on_start.clone();
        let interactive = props.interactive;
        Callback::from(move |_: MouseEvent| {
            if interactive {
                sound::play(SoundEffect::ButtonClick);
                on_start.emit(());
            }
        })
    };

    html! {
        <div class="welcome-content">
            <div class="welcome-header">
                <h1 class="welcome-title">
                    <span class="title-line">{ t("welcome.line_1") }</span>
                    <span class="title-line">{ t("welcome.line_2") }</span>
                    <span class="title-line">{ t("welcome.line_3") }</span>
                </h1>
                <div class="welcome-subtitle">{ t("welcome.subtitle") }</div>
            </div>
            <div class="welcome-illustration" aria-hidden="true">
                { for ["🦸", "🎈", "🎁", "⭐", "🎊"].iter().map(|emoji| html! {
                    <div class="floating-emoji">{ *emoji }</div>
                }) }
            </div>
            <div class="welcome-footer">
                <button
                    type="button"
                    class="btn-next welcome-btn"
                    disabled={!props.interactive}
                    onclick={on_click}
                >
                    <span class="btn-text">{ t("welcome.start") }</span>
                    <span class="btn-sparkle">{ "✨" }</span>
                </button>
            </div>
        </div>
    }
}
