//! What is mounted right now: the active screen, the one sliding out, and
//! whether input is accepted.
//!
//! Every transition gets a generation number. Timed actions carry the
//! generation they were scheduled for and are dropped once a newer
//! transition has started.

use std::rc::Rc;

use birthday_game::{Choices, Screen};
use yew::Reducible;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slot {
    pub screen: Screen,
    /// Picks as they were when the screen entered. An outgoing screen keeps
    /// rendering these while a restart clears the session.
    pub choices: Choices,
    pub generation: u32,
    pub exiting: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stage {
    pub generation: u32,
    pub active: Option<Slot>,
    pub previous: Option<Slot>,
    pub interactions: bool,
    pub narrating: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageAction {
    Enter {
        screen: Screen,
        choices: Choices,
        generation: u32,
    },
    ExitPrevious { generation: u32 },
    RemovePrevious { generation: u32 },
    Interactions { generation: u32, enabled: bool },
    /// Narration started (`true`) or stopped.
    Narration(bool),
}

impl Stage {
    /// Buttons and cards accept clicks.
    #[must_use]
    pub const fn accepts_input(&self) -> bool {
        self.interactions && !self.narrating
    }

    pub fn apply(&mut self, action: StageAction) {
        match action {
            StageAction::Enter {
                screen,
                choices,
                generation,
            } => {
                if generation < self.generation {
                    return;
                }
                self.generation = generation;
                // a third screen arriving mid-exit drops the oldest
                self.previous = self.active.take();
                self.active = Some(Slot {
                    screen,
                    choices,
                    generation,
                    exiting: false,
                });
            }
            StageAction::ExitPrevious { generation } if generation == self.generation => {
                if let Some(previous) = self.previous.as_mut() {
                    previous.exiting = true;
                }
            }
            StageAction::RemovePrevious { generation } if generation == self.generation => {
                self.previous = None;
            }
            StageAction::Interactions {
                generation,
                enabled,
            } if generation == self.generation => {
                self.interactions = enabled;
            }
            StageAction::Narration(playing) => {
                self.narrating = playing;
                if !playing {
                    self.interactions = true;
                }
            }
            StageAction::ExitPrevious { .. }
            | StageAction::RemovePrevious { .. }
            | StageAction::Interactions { .. } => {
                log::debug!("dropping stale {action:?}");
            }
        }
    }

    /// Mounted slots in DOM order: the outgoing screen first.
    #[must_use]
    pub fn slots(&self) -> Vec<Slot> {
        self.previous.into_iter().chain(self.active).collect()
    }
}

impl Reducible for Stage {
    type Action = StageAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        if next == *self { self } else { Rc::new(next) }
    }
}
