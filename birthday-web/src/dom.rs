use js_sys::{Function, Promise};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, RequestInit, Response, Window};

use crate::error::WebError;

/// Retrieve the global `window` object.
///
/// # Errors
/// Returns [`WebError::NoWindow`] outside of a browser context.
pub fn window() -> Result<Window, WebError> {
    web_sys::window().ok_or(WebError::NoWindow)
}

/// Retrieve the document object for DOM interactions.
///
/// # Errors
/// Returns [`WebError::NoDocument`] when the window has no document.
pub fn document() -> Result<Document, WebError> {
    window()?.document().ok_or(WebError::NoDocument)
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// True when the page was served over `http:` or `https:`.
///
/// Pages opened from `file:` cannot issue `HEAD` requests for their assets.
#[must_use]
pub fn page_is_http() -> bool {
    window()
        .ok()
        .and_then(|w| w.location().protocol().ok())
        .is_some_and(|protocol| protocol.starts_with("http"))
}

/// Yield execution for the requested number of milliseconds.
///
/// # Errors
/// Returns an error if the timer cannot be scheduled or the underlying JavaScript promise rejects.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn sleep_ms(duration_ms: u32) -> Result<(), WebError> {
    let mut resolve_slot: Option<Function> = None;
    let promise = Promise::new(&mut |resolve, _reject| {
        resolve_slot = Some(resolve);
    });

    let resolve = resolve_slot
        .ok_or_else(|| WebError::Js("resolve function should be set".to_string()))?;
    let closure = Closure::once(move || {
        let _ = resolve.call0(&JsValue::UNDEFINED);
    });

    let timeout = i32::try_from(duration_ms).unwrap_or(i32::MAX);
    let _ = window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        timeout,
    )?;
    closure.forget();

    JsFuture::from(promise).await?;
    Ok(())
}

/// Run `f` once `duration_ms` have passed.
pub fn after_ms(duration_ms: u32, f: impl FnOnce() + 'static) {
    wasm_bindgen_futures::spawn_local(async move {
        match sleep_ms(duration_ms).await {
            Ok(()) => f(),
            Err(err) => log::error!("timer of {duration_ms}ms failed: {err}"),
        }
    });
}

/// Perform a fetch request and return the browser `Response`.
///
/// # Errors
/// Returns an error if the fetch request fails or the response cannot be converted to `Response`.
#[allow(clippy::future_not_send)]
pub async fn fetch_response(url: &str) -> Result<Response, WebError> {
    let resp_value = JsFuture::from(window()?.fetch_with_str(url)).await?;
    Ok(resp_value.dyn_into::<Response>()?)
}

/// Issue a `HEAD` request for `url`.
///
/// # Errors
/// Returns an error when the request is rejected (network failure, CORS).
#[allow(clippy::future_not_send)]
pub async fn fetch_head(url: &str) -> Result<Response, WebError> {
    let init = RequestInit::new();
    init.set_method("HEAD");
    let resp_value = JsFuture::from(window()?.fetch_with_str_and_init(url, &init)).await?;
    Ok(resp_value.dyn_into::<Response>()?)
}

/// Fetch `url` and return its body as text.
///
/// # Errors
/// Returns [`WebError::Http`] for a non-2xx status and [`WebError::Js`] when
/// the request or body read fails.
#[allow(clippy::future_not_send)]
pub async fn fetch_text(url: &str) -> Result<String, WebError> {
    let response = fetch_response(url).await?;
    if !response.ok() {
        return Err(WebError::Http {
            url: url.to_string(),
            status: response.status(),
        });
    }
    let body = JsFuture::from(response.text()?).await?;
    body.as_string()
        .ok_or_else(|| WebError::Js(format!("body of {url} is not text")))
}
