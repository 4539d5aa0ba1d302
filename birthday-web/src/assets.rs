//! Browser side of media loading: probe candidate files over HTTP or through
//! throwaway media elements, then render whatever the resolver settled on.

use std::collections::BTreeMap;

use birthday_game::{MediaKind, ResolvedAsset, media_kind_for_path, resolve_with};
use js_sys::{Function, Promise};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlElement, HtmlImageElement, HtmlMediaElement, HtmlVideoElement};
use yew::prelude::*;

use crate::dom;
use crate::error::WebError;
use crate::i18n;
use crate::paths;

/// Does `url` point at a loadable image or video?
///
/// Served pages ask with a `HEAD` request first. Anything other than a clear
/// yes or 404 falls through to loading the file in a detached element.
#[allow(clippy::future_not_send)]
pub async fn media_exists(url: &str) -> bool {
    if dom::page_is_http() {
        match dom::fetch_head(url).await {
            Ok(resp) if resp.ok() => return true,
            Ok(resp) if resp.status() == 404 => return false,
            Ok(resp) => log::debug!("HEAD {url} returned {}, probing element", resp.status()),
            Err(err) => log::debug!("HEAD {url} failed ({err}), probing element"),
        }
    }
    let Some(kind) = media_kind_for_path(url) else {
        return false;
    };
    probe_element(url, kind).await.unwrap_or_else(|err| {
        log::warn!("probing {url} failed: {err}");
        false
    })
}

#[allow(clippy::future_not_send)]
async fn probe_element(url: &str, kind: MediaKind) -> Result<bool, WebError> {
    let element: HtmlElement = match kind {
        MediaKind::Image => HtmlImageElement::new()?.unchecked_into(),
        MediaKind::Video => dom::document()?
            .create_element("video")?
            .dyn_into::<HtmlVideoElement>()
            .map_err(|_| WebError::Js("created element is not a video".to_string()))?
            .unchecked_into(),
    };

    let mut resolve_slot: Option<Function> = None;
    let promise = Promise::new(&mut |resolve, _reject| {
        resolve_slot = Some(resolve);
    });
    let resolve = resolve_slot
        .ok_or_else(|| WebError::Js("resolve function should be set".to_string()))?;
    let settle = |found: bool| {
        let resolve = resolve.clone();
        Closure::once_into_js(move || {
            let _ = resolve.call1(&JsValue::NULL, &JsValue::from_bool(found));
        })
    };
    let on_found = settle(true);
    let on_missing = settle(false);

    element.set_onerror(Some(on_missing.unchecked_ref()));
    match kind {
        MediaKind::Image => {
            element.set_onload(Some(on_found.unchecked_ref()));
            element.unchecked_ref::<HtmlImageElement>().set_src(url);
        }
        MediaKind::Video => {
            element.set_onloadedmetadata(Some(on_found.unchecked_ref()));
            let video = element.unchecked_ref::<HtmlMediaElement>();
            video.set_preload("metadata");
            video.set_src(url);
        }
    }

    let found = JsFuture::from(promise).await?.as_bool().unwrap_or(false);
    element.set_onerror(None);
    element.set_onload(None);
    element.set_onloadedmetadata(None);
    Ok(found)
}

/// Resolve `base` inside `dir` against the files the server actually has.
#[allow(clippy::future_not_send)]
pub async fn load_media(dir: &str, base: &str) -> ResolvedAsset {
    resolve_with(dir, base, |candidate| async move {
        media_exists(&paths::game_asset(&candidate.path)).await
    })
    .await
}

#[derive(Properties, PartialEq)]
pub struct AssetMediaProps {
    pub asset: ResolvedAsset,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or(true)]
    pub looping: bool,
    /// Fired when a non-looping video ends, or once an image or placeholder
    /// is on screen.
    #[prop_or_default]
    pub on_finished: Option<Callback<()>>,
}

/// Render an already resolved asset.
#[function_component(AssetMedia)]
pub fn asset_media(props: &AssetMediaProps) -> Html {
    let broken = use_state(|| None::<String>);
    let video_ref = use_node_ref();

    {
        let video_ref = video_ref.clone();
        let looping = props.looping;
        let on_finished = props.on_finished.clone();
        let is_video = matches!(props.asset, ResolvedAsset::Video { .. });
        use_effect_with((props.asset.clone(), looping), move |_| {
            if let Some(video) = video_ref.cast::<HtmlMediaElement>() {
                video.set_muted(true);
                video.set_loop(looping);
                if let Ok(play) = video.play() {
                    wasm_bindgen_futures::spawn_local(async move {
                        if let Err(err) = JsFuture::from(play).await {
                            log::warn!("video play failed: {}", dom::js_error_message(&err));
                        }
                    });
                }
            } else if !is_video {
                if let Some(cb) = on_finished {
                    cb.emit(());
                }
            }
            || {}
        });
    }

    let on_error = {
        let broken = broken.clone();
        let on_finished = props.on_finished.clone();
        let path = props.asset.path().map(str::to_string);
        Callback::from(move |_: Event| {
            if let Some(path) = path.clone() {
                log::error!("media failed to load: {path}");
                broken.set(Some(path));
            }
            if let Some(cb) = &on_finished {
                cb.emit(());
            }
        })
    };

    if let Some(path) = (*broken).clone() {
        return placeholder(&path, props.class.clone());
    }

    match &props.asset {
        ResolvedAsset::Video { path } => {
            let on_ended = props.on_finished.clone().map(|cb| {
                Callback::from(move |_: Event| cb.emit(()))
            });
            html! {
                <video
                    ref={video_ref}
                    class={classes!("game-asset", "video-asset", props.class.clone())}
                    src={paths::game_asset(path)}
                    autoplay=true
                    muted=true
                    playsinline=true
                    loop={props.looping}
                    onended={on_ended}
                    onerror={on_error}
                />
            }
        }
        ResolvedAsset::Image { path } => {
            let mut args = BTreeMap::new();
            args.insert("path", path.as_str());
            html! {
                <img
                    class={classes!("game-asset", props.class.clone())}
                    src={paths::game_asset(path)}
                    alt={i18n::tr("asset.alt", Some(&args))}
                    onerror={on_error}
                />
            }
        }
        ResolvedAsset::Placeholder { label } => placeholder(label, props.class.clone()),
    }
}

fn placeholder(label: &str, class: Classes) -> Html {
    html! {
        <div class={classes!("game-asset", "placeholder-asset", class)}>
            <span class="placeholder-icon">{ "?" }</span>
            <span class="placeholder-text">{ label.to_string() }</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct AssetViewProps {
    pub dir: AttrValue,
    pub base: AttrValue,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or(true)]
    pub looping: bool,
    #[prop_or_default]
    pub on_finished: Option<Callback<()>>,
}

/// Resolve and render `base` from `dir`, showing a loading state meanwhile.
#[function_component(AssetView)]
pub fn asset_view(props: &AssetViewProps) -> Html {
    let resolved = use_state(|| None::<ResolvedAsset>);

    {
        let resolved = resolved.clone();
        use_effect_with(
            (props.dir.clone(), props.base.clone()),
            move |(dir, base)| {
                resolved.set(None);
                let dir = dir.clone();
                let base = base.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    resolved.set(Some(load_media(&dir, &base).await));
                });
                || {}
            },
        );
    }

    match &*resolved {
        Some(asset) => html! {
            <AssetMedia
                asset={asset.clone()}
                class={props.class.clone()}
                looping={props.looping}
                on_finished={props.on_finished.clone()}
            />
        },
        None => html! {
            <div class={classes!("game-asset", "asset-loading", props.class.clone())}>
                { i18n::t("asset.loading") }
            </div>
        },
    }
}
