//! Ordered, timed steps for bringing a screen on stage.
//!
//! The plan is data: the browser executes it with timers, the tester checks
//! its ordering without any clock at all.

use serde::{Deserialize, Serialize};

use crate::constants::{NARRATION_DELAY_MS, SCREEN_EXIT_MS};
use crate::screens::Screen;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionStep {
    /// Mount the new screen with its `active` class.
    Activate(Screen),
    /// Cut whatever narration is still playing.
    StopNarration,
    EnableInteractions,
    DisableInteractions,
    /// Start a narration track. On failure interactions are re-enabled.
    PlayNarration(u8),
    /// Switch the outgoing screen to its exit animation.
    ExitPrevious,
    /// Drop the outgoing screen from the DOM.
    RemovePrevious,
    /// Release the transition latch.
    FinishTransition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedStep {
    pub at_ms: u32,
    pub step: TransitionStep,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionPlan {
    steps: Vec<TimedStep>,
}

impl TransitionPlan {
    /// Build the plan for entering `screen`. `has_previous` is false only for
    /// the very first screen of a page load.
    #[must_use]
    pub fn enter(screen: Screen, has_previous: bool) -> Self {
        let mut plan = Self::default();
        plan.push(0, TransitionStep::Activate(screen));
        plan.push(0, TransitionStep::StopNarration);

        match screen.narration_track() {
            Some(track) => {
                plan.push(NARRATION_DELAY_MS, TransitionStep::DisableInteractions);
                plan.push(NARRATION_DELAY_MS, TransitionStep::PlayNarration(track));
            }
            None => plan.push(0, TransitionStep::EnableInteractions),
        }

        if has_previous {
            plan.push(0, TransitionStep::ExitPrevious);
            plan.push(SCREEN_EXIT_MS, TransitionStep::RemovePrevious);
            plan.push(SCREEN_EXIT_MS, TransitionStep::FinishTransition);
        } else {
            plan.push(0, TransitionStep::FinishTransition);
        }

        // stable: steps at the same instant keep insertion order
        plan.steps.sort_by_key(|s| s.at_ms);
        plan
    }

    fn push(&mut self, at_ms: u32, step: TransitionStep) {
        self.steps.push(TimedStep { at_ms, step });
    }

    #[must_use]
    pub fn steps(&self) -> &[TimedStep] {
        &self.steps
    }

    /// Steps grouped by start time, earliest first.
    #[must_use]
    pub fn batches(&self) -> Vec<(u32, Vec<TransitionStep>)> {
        let mut batches: Vec<(u32, Vec<TransitionStep>)> = Vec::new();
        for timed in &self.steps {
            match batches.last_mut() {
                Some((at, steps)) if *at == timed.at_ms => steps.push(timed.step),
                _ => batches.push((timed.at_ms, vec![timed.step])),
            }
        }
        batches
    }

    /// Time of the last step.
    #[must_use]
    pub fn duration_ms(&self) -> u32 {
        self.steps.last().map_or(0, |s| s.at_ms)
    }

    #[must_use]
    pub fn position(&self, step: TransitionStep) -> Option<usize> {
        self.steps.iter().position(|s| s.step == step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_load_finishes_immediately() {
        let plan = TransitionPlan::enter(Screen::Welcome, false);
        assert!(plan.position(TransitionStep::ExitPrevious).is_none());
        let finish = plan
            .steps()
            .iter()
            .find(|s| s.step == TransitionStep::FinishTransition)
            .unwrap();
        assert_eq!(finish.at_ms, 0);
        assert_eq!(plan.duration_ms(), NARRATION_DELAY_MS);
    }

    #[test]
    fn narration_follows_activation_and_lock() {
        let plan = TransitionPlan::enter(Screen::Restaurant, true);
        let activate = plan.position(TransitionStep::Activate(Screen::Restaurant));
        let stop = plan.position(TransitionStep::StopNarration);
        let lock = plan.position(TransitionStep::DisableInteractions);
        let play = plan.position(TransitionStep::PlayNarration(9));
        assert!(activate < stop);
        assert!(stop < lock);
        assert!(lock < play);
        assert!(plan.position(TransitionStep::EnableInteractions).is_none());
    }

    #[test]
    fn previous_screen_leaves_after_exit_animation() {
        let plan = TransitionPlan::enter(Screen::Dessert, true);
        let batches = plan.batches();
        assert_eq!(
            batches.iter().map(|(at, _)| *at).collect::<Vec<_>>(),
            vec![0, NARRATION_DELAY_MS, SCREEN_EXIT_MS]
        );
        assert_eq!(
            batches[0].1,
            vec![
                TransitionStep::Activate(Screen::Dessert),
                TransitionStep::StopNarration,
                TransitionStep::ExitPrevious,
            ]
        );
        assert_eq!(
            batches[2].1,
            vec![
                TransitionStep::RemovePrevious,
                TransitionStep::FinishTransition
            ]
        );
        assert_eq!(plan.duration_ms(), SCREEN_EXIT_MS);
    }

    #[test]
    fn every_screen_plan_releases_the_latch_once() {
        for screen in Screen::ALL {
            for has_previous in [false, true] {
                let plan = TransitionPlan::enter(screen, has_previous);
                let finishes = plan
                    .steps()
                    .iter()
                    .filter(|s| s.step == TransitionStep::FinishTransition)
                    .count();
                assert_eq!(finishes, 1, "{screen:?}");
            }
        }
    }
}
