//! Web Audio playback for synthesised cues and the numbered narration clips.

use std::cell::RefCell;
use std::collections::HashMap;

use birthday_game::sound::{ATTACK_SECS, Pitch, RELEASE_FLOOR, Waveform};
use birthday_game::{SoundEffect, SoundSettings, Voice, narration_path};
use js_sys::{Function, Promise};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AudioContext, AudioContextState, AudioScheduledSourceNode, HtmlAudioElement, OscillatorType,
};
use yew::Callback;

use crate::error::WebError;
use crate::paths;

struct SoundManager {
    context: Option<AudioContext>,
    settings: SoundSettings,
    rng: SmallRng,
    narration: HashMap<u8, HtmlAudioElement>,
    current: Option<HtmlAudioElement>,
    listener: Option<Callback<bool>>,
}

impl SoundManager {
    fn new() -> Self {
        Self {
            context: None,
            settings: SoundSettings::default(),
            rng: SmallRng::from_entropy(),
            narration: HashMap::new(),
            current: None,
            listener: None,
        }
    }

    fn context(&mut self) -> Result<AudioContext, WebError> {
        if let Some(ctx) = &self.context {
            return Ok(ctx.clone());
        }
        let ctx = AudioContext::new()?;
        self.context = Some(ctx.clone());
        Ok(ctx)
    }

    fn play(&mut self, effect: SoundEffect) -> Result<(), WebError> {
        let volume = self.settings.volume();
        if !self.settings.enabled || volume <= 0.0 {
            return Ok(());
        }
        let ctx = self.context()?;
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume()?;
        }
        for voice in effect.recipe(&mut self.rng) {
            schedule(&ctx, &voice, volume)?;
        }
        Ok(())
    }
}

thread_local! {
    static MANAGER: RefCell<SoundManager> = RefCell::new(SoundManager::new());
}

const fn oscillator_type(waveform: Waveform) -> OscillatorType {
    match waveform {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Square => OscillatorType::Square,
        Waveform::Sawtooth => OscillatorType::Sawtooth,
        Waveform::Triangle => OscillatorType::Triangle,
    }
}

fn schedule(ctx: &AudioContext, voice: &Voice, volume: f32) -> Result<(), WebError> {
    let oscillator = ctx.create_oscillator()?;
    let gain = ctx.create_gain()?;
    oscillator.set_type(oscillator_type(voice.waveform));

    let start = ctx.current_time() + f64::from(voice.at_ms) / 1000.0;
    let end = start + f64::from(voice.duration_secs);
    let frequency = oscillator.frequency();
    match voice.pitch {
        Pitch::Fixed(hz) => {
            frequency.set_value_at_time(hz, start)?;
        }
        Pitch::Sweep(from, to) => {
            frequency.set_value_at_time(from, start)?;
            frequency.exponential_ramp_to_value_at_time(to, end)?;
        }
    }

    let level = gain.gain();
    level.set_value_at_time(0.0, start)?;
    level.linear_ramp_to_value_at_time(voice.peak(volume), start + f64::from(ATTACK_SECS))?;
    level.exponential_ramp_to_value_at_time(RELEASE_FLOOR, end)?;

    oscillator.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&ctx.destination())?;
    let source: &AudioScheduledSourceNode = &oscillator;
    source.start_with_when(start)?;
    source.stop_with_when(end)?;
    Ok(())
}

/// Play a synthesised cue. Failures are logged and otherwise ignored.
pub fn play(effect: SoundEffect) {
    if let Err(err) = MANAGER.with(|cell| cell.borrow_mut().play(effect)) {
        log::warn!("sound {} failed: {err}", effect.name());
    }
}

#[must_use]
pub fn settings() -> SoundSettings {
    MANAGER.with(|cell| cell.borrow().settings)
}

/// Turn every cue and narration clip on or off. Turning sound off also
/// stops the clip that is playing.
pub fn set_enabled(enabled: bool) {
    MANAGER.with(|cell| cell.borrow_mut().settings.enabled = enabled);
    if !enabled {
        stop_narration();
    }
}

/// Register the callback told when narration starts (`true`) or stops (`false`).
pub fn set_listener(listener: Callback<bool>) {
    MANAGER.with(|cell| cell.borrow_mut().listener = Some(listener));
}

pub fn clear_listener() {
    MANAGER.with(|cell| cell.borrow_mut().listener = None);
}

fn notify(playing: bool) {
    // cloned out so the listener may call back into the manager
    let listener = MANAGER.with(|cell| cell.borrow().listener.clone());
    if let Some(listener) = listener {
        listener.emit(playing);
    }
}

/// Pause and rewind the current narration clip, if any.
pub fn stop_narration() {
    let current = MANAGER.with(|cell| cell.borrow_mut().current.take());
    if let Some(audio) = current {
        if let Err(err) = audio.pause() {
            log::warn!("pausing narration failed: {}", crate::dom::js_error_message(&err));
        }
        audio.set_current_time(0.0);
        notify(false);
    }
}

/// Play narration `track` from the start, cutting whatever was playing.
///
/// Returns `Ok(false)` when sound is disabled and nothing was played.
///
/// # Errors
/// Returns [`WebError::Narration`] when the clip cannot be loaded and
/// [`WebError::Js`] when the browser refuses to play it.
#[allow(clippy::future_not_send)]
pub async fn play_narration(track: u8) -> Result<bool, WebError> {
    if !settings().enabled {
        return Ok(false);
    }
    stop_narration();
    let audio = load_track(track).await?;
    audio.set_current_time(0.0);
    MANAGER.with(|cell| cell.borrow_mut().current = Some(audio.clone()));
    JsFuture::from(audio.play()?).await?;
    log::debug!("narration {track} playing");
    Ok(true)
}

#[allow(clippy::future_not_send)]
async fn load_track(track: u8) -> Result<HtmlAudioElement, WebError> {
    if let Some(audio) = MANAGER.with(|cell| cell.borrow().narration.get(&track).cloned()) {
        return Ok(audio);
    }

    let url = paths::game_asset(&narration_path(track));
    let audio = HtmlAudioElement::new_with_src(&url)?;
    audio.set_preload("auto");

    let mut resolve_slot: Option<Function> = None;
    let promise = Promise::new(&mut |resolve, _reject| {
        resolve_slot = Some(resolve);
    });
    let resolve = resolve_slot
        .ok_or_else(|| WebError::Js("resolve function should be set".to_string()))?;
    let settle = |ready: bool| {
        let resolve = resolve.clone();
        Closure::once_into_js(move || {
            let _ = resolve.call1(&JsValue::NULL, &JsValue::from_bool(ready));
        })
    };
    let on_ready = settle(true);
    let on_error = settle(false);
    audio.set_oncanplaythrough(Some(on_ready.unchecked_ref()));
    audio.set_onerror(Some(on_error.unchecked_ref()));
    audio.load();

    let ready = JsFuture::from(promise).await?.as_bool().unwrap_or(false);
    audio.set_oncanplaythrough(None);
    audio.set_onerror(None);
    if !ready {
        log::error!("narration {url} failed to load");
        return Err(WebError::Narration(track));
    }

    for (event, playing) in [("play", true), ("pause", false), ("ended", false)] {
        let handler = Closure::<dyn FnMut()>::new(move || notify(playing));
        audio.add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())?;
        // lives as long as the cached element
        handler.forget();
    }

    MANAGER.with(|cell| cell.borrow_mut().narration.insert(track, audio.clone()));
    Ok(audio)
}
