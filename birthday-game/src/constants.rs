//! Timings shared by the web front end and the logic tester. All values are
//! milliseconds unless the name says otherwise.

/// Delay between a screen becoming active and its narration track starting.
pub const NARRATION_DELAY_MS: u32 = 100;
/// Length of the CSS exit animation of the outgoing screen.
pub const SCREEN_EXIT_MS: u32 = 500;

/// Pause after the hero pick before moving on.
pub const HERO_ADVANCE_DELAY_MS: u32 = 1_500;
/// Pause after a partner pick before the team-up preview opens.
pub const TEAM_UP_PREVIEW_DELAY_MS: u32 = 1_000;
/// Fade-out of the team-up preview overlay.
pub const TEAM_UP_FADE_MS: u32 = 500;

/// Math question and answers stay hidden this long after the overlay opens.
pub const MATH_REVEAL_DELAY_MS: u32 = 3_000;
/// Fade of the math overlay after a correct answer.
pub const MATH_OVERLAY_FADE_MS: u32 = 300;
/// Delay between a correct answer and the start of the defeat sequence.
pub const DEFEAT_START_DELAY_MS: u32 = 450;
/// Upper bound on waiting for a defeat clip to report `ended`.
pub const DEFEAT_VIDEO_MAX_MS: u32 = 5_000;
/// Hit flash on the live enemy before the defeated asset replaces it.
pub const DEFEAT_HIT_MS: u32 = 600;
/// Settle time after the defeat clip.
pub const DEFEAT_SETTLE_MS: u32 = 300;
/// Shake animation on a wrong answer button, per iteration.
pub const WRONG_ANSWER_SHAKE_MS: u32 = 250;

/// Team reveal: first confetti burst, then a second one after this gap.
pub const REVEAL_CELEBRATION_DELAY_MS: u32 = 300;
pub const REVEAL_SECOND_BURST_MS: u32 = 500;

/// Finale: delay before the confetti bursts, then their offsets.
pub const FINALE_CELEBRATION_DELAY_MS: u32 = 500;
pub const FINALE_BURST_OFFSETS_MS: [u32; 3] = [0, 300, 600];

/// Default sound effect volume.
pub const DEFAULT_SFX_VOLUME: f32 = 0.6;
