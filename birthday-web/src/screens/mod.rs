//! One component per screen of the adventure. Screens own their animations
//! and cues; every decision goes back to the game page through callbacks.

use std::cell::RefCell;
use std::rc::Rc;

use birthday_game::SoundEffect;
use yew::prelude::*;

use crate::dom;
use crate::sound;

pub mod encounter;
pub mod finale;
pub mod math;
pub mod selection;
pub mod team_reveal;
pub mod welcome;

pub use encounter::EncounterScreen;
pub use finale::FinaleScreen;
pub use math::MathOverlay;
pub use selection::{SelectionKind, SelectionScreen};
pub use team_reveal::TeamRevealScreen;
pub use welcome::WelcomeScreen;

/// Cleared when the owning component unmounts.
pub type Mounted = Rc<RefCell<bool>>;

#[hook]
pub fn use_mounted() -> Mounted {
    let mounted = use_mut_ref(|| true);
    {
        let mounted = mounted.clone();
        use_effect_with((), move |_| move || *mounted.borrow_mut() = false);
    }
    mounted
}

/// Run `f` after `ms` unless the screen has gone away.
pub fn later(mounted: &Mounted, ms: u32, f: impl FnOnce() + 'static) {
    let mounted = mounted.clone();
    dom::after_ms(ms, move || {
        if *mounted.borrow() {
            f();
        }
    });
}

/// Count of confetti bursts fired on a screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bursts(pub u32);

impl Reducible for Bursts {
    type Action = ();

    fn reduce(self: Rc<Self>, (): ()) -> Rc<Self> {
        Rc::new(Self(self.0.wrapping_add(1)))
    }
}

/// Confetti cue plus a fresh burst element.
pub fn celebrate(bursts: &UseReducerDispatcher<Bursts>) {
    sound::play(SoundEffect::Confetti);
    bursts.dispatch(());
}

#[derive(Properties, PartialEq)]
pub struct ConfettiProps {
    pub bursts: u32,
}

/// Re-keyed on every burst so the CSS animation restarts.
#[function_component(Confetti)]
pub fn confetti(props: &ConfettiProps) -> Html {
    if props.bursts == 0 {
        return html! {};
    }
    html! {
        <div class="confetti-layer" aria-hidden="true">
            <div key={props.bursts.to_string()} class="confetti-burst"></div>
        </div>
    }
}
