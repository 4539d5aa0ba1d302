use birthday_game::{AssetRequest, MathQuestion};
use yew::prelude::*;

use crate::assets::AssetView;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub question: MathQuestion,
    /// The question text and buttons are hidden until revealed.
    pub revealed: bool,
    #[prop_or_default]
    pub fading: bool,
    /// Answers already tried and found wrong.
    #[prop_or_default]
    pub wrong: Vec<u8>,
    #[prop_or_default]
    pub shaking: Option<u8>,
    pub interactive: bool,
    pub enemy: AssetRequest,
    #[prop_or_default]
    pub enemy_class: Classes,
    pub on_answer: Callback<u8>,
}

/// Overlay blocking the enemy until the sum is answered.
#[function_component(MathOverlay)]
pub fn math_overlay(props: &Props) -> Html {
    let buttons = props.question.choices.iter().map(|&value| {
        let class = classes!(
            "math-answer-btn",
            props.wrong.contains(&value).then_some("wrong"),
            (props.shaking == Some(value)).then_some("shake"),
        );
        let onclick = {
            let on_answer = props.on_answer.clone();
            Callback::from(move |_: MouseEvent| on_answer.emit(value))
        };
        html! {
            <button
                key={value.to_string()}
                type="button"
                class={class}
                disabled={!props.interactive || !props.revealed}
                {onclick}
            >
                { value.to_string() }
            </button>
        }
    });

    let hidden = (!props.revealed).then_some("hidden");
    html! {
        <div class={classes!("math-challenge-overlay", props.fading.then_some("fading"))}>
            <div class="math-enemy-wrap">
                <AssetView
                    dir={props.enemy.dir().to_string()}
                    base={props.enemy.base().to_string()}
                    class={props.enemy_class.clone()}
                />
            </div>
            <div class={classes!("math-question-text", hidden)}>
                { props.question.prompt() }
            </div>
            <div class={classes!("math-answer-row", hidden)}>
                { for buttons }
            </div>
        </div>
    }
}
