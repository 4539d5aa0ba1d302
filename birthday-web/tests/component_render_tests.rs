use birthday_game::{
    Attraction, Brother, Choices, Dessert, EncounterSpec, GamesList, Hero, Mama,
    MathQuestion, Papa, Restaurant, ResolvedAsset, SelectionOutcome,
};
use birthday_web::assets::{AssetMedia, AssetMediaProps};
use birthday_web::pages::{GamePage, GamesListView, GamesState, NotFound};
use birthday_web::screens::{
    EncounterScreen, FinaleScreen, MathOverlay, SelectionKind, SelectionScreen, TeamRevealScreen,
    WelcomeScreen,
};
use futures::executor::block_on;
use yew::{Callback, Classes, LocalServerRenderer};

fn full_team() -> Choices {
    Choices {
        hero: Some(Hero::Batman),
        brother: Some(Brother::Thor),
        mama: Some(Mama::Wonder),
        papa: Some(Papa::Hulk),
        restaurant: Some(Restaurant::Wok),
        attraction: Some(Attraction::Safari),
        dessert: Some(Dessert::Candies),
    }
}

fn question() -> MathQuestion {
    MathQuestion {
        a: 5,
        b: 4,
        correct: 9,
        choices: vec![8, 9, 10, 11],
    }
}

#[test]
fn welcome_renders_title_and_locked_start_button() {
    let props = birthday_web::screens::welcome::Props {
        interactive: false,
        on_start: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<WelcomeScreen>::with_props(props).render());
    assert!(html.contains("welcome-title"));
    assert!(html.contains("Birthday"));
    assert!(html.contains("Ready for an amazing day?"));
    assert!(html.contains("welcome-btn"));
    assert!(html.contains("disabled"));
}

#[test]
fn hero_selection_lists_both_heroes() {
    let props = birthday_web::screens::selection::Props {
        kind: SelectionKind::Hero,
        interactive: true,
        on_pick: Callback::from(|_: String| SelectionOutcome::Ignored),
        on_continue: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<SelectionScreen>::with_props(props).render());
    assert!(html.contains("Yuval Choose your superhero"));
    assert!(html.contains("data-id=\"flash\""));
    assert!(html.contains("data-id=\"batman\""));
    assert_eq!(html.matches("selection-card").count(), 2);
    assert!(!html.contains("team-preview-overlay"));
}

#[test]
fn partner_selection_uses_its_own_title() {
    let props = birthday_web::screens::selection::Props {
        kind: SelectionKind::Papa,
        interactive: true,
        on_pick: Callback::from(|_: String| SelectionOutcome::Ignored),
        on_continue: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<SelectionScreen>::with_props(props).render());
    assert!(html.contains("Choose papa superhero"));
    assert!(html.contains("data-id=\"capitan\""));
}

#[test]
fn encounter_starts_with_locked_options_and_no_overlay() {
    let props = birthday_web::screens::encounter::Props {
        spec: EncounterSpec::RESTAURANT,
        interactive: true,
        on_open: Callback::from(|()| None),
        on_reveal: Callback::from(|()| false),
        on_answer: Callback::from(|_: u8| None),
        on_unlock: Callback::noop(),
        on_choose: Callback::from(|_: String| SelectionOutcome::Ignored),
    };
    let html = block_on(LocalServerRenderer::<EncounterScreen>::with_props(props).render());
    assert!(html.contains("What do you want to eat?"));
    assert!(html.contains("dragon-container"));
    assert!(html.contains("restaurant-options-container"));
    assert_eq!(html.matches("restaurant-card").count(), 4);
    assert_eq!(html.matches("disabled-no-visual").count(), 4);
    assert!(!html.contains("math-challenge-overlay"));
    assert!(!html.contains("enemy-defeated"));
}

#[test]
fn dessert_encounter_uses_its_prefix() {
    let props = birthday_web::screens::encounter::Props {
        spec: EncounterSpec::DESSERT,
        interactive: false,
        on_open: Callback::from(|()| None),
        on_reveal: Callback::from(|()| false),
        on_answer: Callback::from(|_: u8| None),
        on_unlock: Callback::noop(),
        on_choose: Callback::from(|_: String| SelectionOutcome::Ignored),
    };
    let html = block_on(LocalServerRenderer::<EncounterScreen>::with_props(props).render());
    assert!(html.contains("dessert-enemy-container"));
    assert!(html.contains("data-id=\"strawberries\""));
}

#[test]
fn math_overlay_hides_question_until_revealed() {
    let props = birthday_web::screens::math::Props {
        question: question(),
        revealed: false,
        fading: false,
        wrong: Vec::new(),
        shaking: None,
        interactive: true,
        enemy: EncounterSpec::ATTRACTION.enemy_asset(),
        enemy_class: Classes::from("robot-asset"),
        on_answer: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<MathOverlay>::with_props(props).render());
    assert!(html.contains("math-challenge-overlay"));
    assert!(html.contains("math-enemy-wrap"));
    assert!(html.contains("5 + 4 = ?"));
    assert!(html.contains("math-question-text hidden"));
    assert_eq!(html.matches("math-answer-btn").count(), 4);
}

#[test]
fn math_overlay_marks_wrong_and_shaking_answers() {
    let props = birthday_web::screens::math::Props {
        question: question(),
        revealed: true,
        fading: false,
        wrong: vec![8],
        shaking: Some(8),
        interactive: true,
        enemy: EncounterSpec::ATTRACTION.enemy_asset(),
        enemy_class: Classes::new(),
        on_answer: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<MathOverlay>::with_props(props).render());
    assert!(!html.contains("hidden"));
    assert!(html.contains("math-answer-btn wrong shake"));
}

#[test]
fn team_reveal_renders_team_and_begin_button() {
    let props = birthday_web::screens::team_reveal::Props {
        choices: full_team(),
        interactive: true,
        on_continue: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<TeamRevealScreen>::with_props(props).render());
    assert!(html.contains("Yey we have the team ready!!!"));
    assert!(html.contains("team-reveal-container"));
    assert!(html.contains("BEGIN ADVENTURE"));
    assert!(html.contains("asset-loading"));
}

#[test]
fn team_reveal_without_team_shows_placeholder() {
    let props = birthday_web::screens::team_reveal::Props {
        choices: Choices::default(),
        interactive: true,
        on_continue: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<TeamRevealScreen>::with_props(props).render());
    assert!(html.contains("placeholder-asset"));
    assert!(html.contains("team is incomplete: missing hero"));
}

#[test]
fn finale_recaps_choices_and_offers_restart() {
    let props = birthday_web::screens::finale::Props {
        choices: full_team(),
        interactive: true,
        on_restart: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<FinaleScreen>::with_props(props).render());
    assert!(html.contains("BEST BIRTHDAY EVER!"));
    assert!(html.contains("You Did It!"));
    assert!(html.contains("Your Amazing Choices:"));
    assert!(html.contains("Food"));
    assert!(html.contains("Fun"));
    assert!(html.contains("Dessert"));
    assert!(html.contains("PLAY AGAIN"));
    assert!(html.contains("restart-btn"));
}

#[test]
fn asset_media_renders_each_kind() {
    let video = AssetMediaProps {
        asset: ResolvedAsset::Video {
            path: "characters/yuval_flash.mp4".to_string(),
        },
        class: Classes::new(),
        looping: true,
        on_finished: None,
    };
    let html = block_on(LocalServerRenderer::<AssetMedia>::with_props(video).render());
    assert!(html.contains("<video"));
    assert!(html.contains("/games/yuval-birthday/characters/yuval_flash.mp4"));

    let image = AssetMediaProps {
        asset: ResolvedAsset::Image {
            path: "restaurant/pizza.png".to_string(),
        },
        class: Classes::from("card-art"),
        looping: true,
        on_finished: None,
    };
    let html = block_on(LocalServerRenderer::<AssetMedia>::with_props(image).render());
    assert!(html.contains("<img"));
    assert!(html.contains("Game Asset: restaurant/pizza.png"));
    assert!(html.contains("card-art"));

    let missing = AssetMediaProps {
        asset: ResolvedAsset::placeholder("robot_defeated"),
        class: Classes::new(),
        looping: false,
        on_finished: None,
    };
    let html = block_on(LocalServerRenderer::<AssetMedia>::with_props(missing).render());
    assert!(html.contains("placeholder-asset"));
    assert!(html.contains("robot_defeated"));
}

#[test]
fn games_list_view_covers_every_state() {
    let render = |state: GamesState| {
        let props = birthday_web::pages::landing::GamesListProps { state };
        block_on(LocalServerRenderer::<GamesListView>::with_props(props).render())
    };

    assert!(render(GamesState::Loading).contains("Loading games..."));
    assert!(render(GamesState::Failed).contains("Failed to load games."));

    let games = GamesList::from_json(
        r#"[
            {"title": "Birthday", "path": "yuval-birthday", "description": "Heroes"},
            {"title": "Quiet", "path": "quiet"}
        ]"#,
    )
    .unwrap();
    let html = render(GamesState::Loaded(games));
    assert_eq!(html.matches("class=\"game-card\"").count(), 2);
    assert!(html.contains("href=\"/yuval-birthday\""));
    assert_eq!(html.matches("game-description").count(), 1);
}

#[test]
fn not_found_renders_copy_and_back_button() {
    let props = birthday_web::pages::not_found::Props {
        on_go_home: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<NotFound>::with_props(props).render());
    assert!(html.contains("Page not found"));
    assert!(html.contains("Back to the games"));
}

#[test]
fn game_page_starts_locked_with_sound_toggle() {
    let html = block_on(LocalServerRenderer::<GamePage>::new().render());
    assert!(html.contains("game-stage interactions-locked"));
    assert!(html.contains("sound-toggle"));
}
