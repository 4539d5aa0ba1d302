use birthday_game::GamesList;
use yew::prelude::*;

use crate::dom;
use crate::i18n::t;
use crate::paths;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GamesState {
    Loading,
    Loaded(GamesList),
    Failed,
}

#[derive(Properties, PartialEq)]
pub struct GamesListProps {
    pub state: GamesState,
}

/// The `#games-list` container for whatever state the fetch is in.
#[function_component(GamesListView)]
pub fn games_list_view(props: &GamesListProps) -> Html {
    let body = match &props.state {
        GamesState::Loading => html! { { t("landing.loading") } },
        GamesState::Failed => html! { { t("landing.failed") } },
        GamesState::Loaded(games) => html! {
            { for games.into_iter().map(|game| html! {
                <a key={game.path.clone()} class="game-card" href={paths::asset_path(&game.path)}>
                    { game.title.clone() }
                    if let Some(description) = &game.description {
                        <span class="game-description">{ description.clone() }</span>
                    }
                </a>
            }) }
        },
    };
    html! { <div id="games-list" class="games-list">{ body }</div> }
}

#[allow(clippy::future_not_send)]
async fn load_games() -> GamesState {
    let url = paths::asset_path(paths::GAMES_LIST);
    let parsed = match dom::fetch_text(&url).await {
        Ok(raw) => GamesList::from_json(&raw).map_err(crate::error::WebError::from),
        Err(err) => Err(err),
    };
    match parsed {
        Ok(games) => GamesState::Loaded(games),
        Err(err) => {
            log::error!("loading {url} failed: {err}");
            GamesState::Failed
        }
    }
}

#[function_component(LandingPage)]
pub fn landing_page() -> Html {
    let state = use_state(|| GamesState::Loading);

    {
        let state = state.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                state.set(load_games().await);
            });
            || {}
        });
    }

    html! {
        <main class="platform">
            <h1 class="platform-title">{ t("landing.title") }</h1>
            <GamesListView state={(*state).clone()} />
        </main>
    }
}
