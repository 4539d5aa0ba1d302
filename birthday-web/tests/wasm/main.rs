#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;
use yew::Renderer;

use birthday_web::app::App;
use birthday_web::{dom, paths};

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn ensure_app_root() -> web_sys::Element {
    let doc = dom::document().expect("document");
    if let Some(root) = doc.get_element_by_id("app") {
        root.set_inner_html("");
        return root;
    }
    let root = doc.create_element("div").expect("create app root");
    root.set_id("app");
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append app root");
    root
}

#[wasm_bindgen_test]
fn document_is_reachable() {
    assert!(dom::window().is_ok());
    assert!(dom::document().is_ok());
}

#[wasm_bindgen_test]
async fn sleep_resolves() {
    dom::sleep_ms(5).await.expect("timer");
}

#[wasm_bindgen_test]
async fn missing_media_is_reported_absent() {
    let url = paths::game_asset("characters/not_a_real_file.png");
    assert!(!birthday_web::assets::media_exists(&url).await);
}

#[wasm_bindgen_test]
async fn app_mounts_the_landing_page() {
    Renderer::<App>::with_root(ensure_app_root()).render();
    dom::sleep_ms(20).await.expect("timer");
    let doc = dom::document().expect("document");
    assert!(
        doc.get_element_by_id("games-list").is_some(),
        "landing page renders the games list container"
    );
}
