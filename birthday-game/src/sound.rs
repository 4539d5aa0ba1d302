//! Sound effect recipes and narration track naming.
//!
//! Effects are synthesised, not loaded: each [`SoundEffect`] expands into a
//! handful of oscillator voices the browser schedules on an `AudioContext`.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SFX_VOLUME;

/// Gain reached at the end of the attack, as a fraction of the volume.
pub const PEAK_GAIN_FACTOR: f32 = 0.3;
/// Attack length in seconds.
pub const ATTACK_SECS: f32 = 0.01;
/// Exponential ramps cannot reach zero, so decay stops here.
pub const RELEASE_FLOOR: f32 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SoundEffect {
    ButtonClick,
    ButtonHover,
    CharacterSelect,
    TeamUp,
    MathCorrect,
    MathWrong,
    MathQuestion,
    EnemyAppear,
    EnemyDefeat,
    DragonRoar,
    RobotBeep,
    Celebration,
    Confetti,
    Firework,
    ScreenTransition,
    /// Fallback for names nobody recognises.
    Beep,
}

impl SoundEffect {
    pub const ALL: [Self; 16] = [
        Self::ButtonClick,
        Self::ButtonHover,
        Self::CharacterSelect,
        Self::TeamUp,
        Self::MathCorrect,
        Self::MathWrong,
        Self::MathQuestion,
        Self::EnemyAppear,
        Self::EnemyDefeat,
        Self::DragonRoar,
        Self::RobotBeep,
        Self::Celebration,
        Self::Confetti,
        Self::Firework,
        Self::ScreenTransition,
        Self::Beep,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ButtonClick => "buttonClick",
            Self::ButtonHover => "buttonHover",
            Self::CharacterSelect => "characterSelect",
            Self::TeamUp => "teamUp",
            Self::MathCorrect => "mathCorrect",
            Self::MathWrong => "mathWrong",
            Self::MathQuestion => "mathQuestion",
            Self::EnemyAppear => "enemyAppear",
            Self::EnemyDefeat => "enemyDefeat",
            Self::DragonRoar => "dragonRoar",
            Self::RobotBeep => "robotBeep",
            Self::Celebration => "celebration",
            Self::Confetti => "confetti",
            Self::Firework => "firework",
            Self::ScreenTransition => "screenTransition",
            Self::Beep => "beep",
        }
    }

    /// Unknown names map to [`SoundEffect::Beep`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|effect| effect.name() == name)
            .unwrap_or(Self::Beep)
    }

    /// Expand into voices. `rng` feeds the sparkle effects.
    pub fn recipe<R: Rng>(self, rng: &mut R) -> Vec<Voice> {
        use Waveform::{Sawtooth, Sine, Square};
        match self {
            Self::ButtonClick => vec![Voice::tone(0, 800.0, 0.05, Sine, 1.0)],
            Self::ButtonHover => vec![Voice::tone(0, 600.0, 0.03, Sine, 0.5)],
            Self::CharacterSelect => vec![
                Voice::sweep(0, 400.0, 800.0, 0.2, 1.0),
                Voice::tone(0, 600.0, 0.1, Sine, 0.7),
            ],
            Self::TeamUp => chord(0, &[523.0, 659.0, 784.0], 0.3, 1.0),
            Self::MathCorrect => vec![
                Voice::tone(0, 523.0, 0.1, Sine, 1.0),
                Voice::tone(50, 659.0, 0.1, Sine, 1.0),
                Voice::tone(100, 784.0, 0.2, Sine, 1.0),
            ],
            Self::MathWrong => vec![Voice::sweep(0, 400.0, 200.0, 0.3, 1.0)],
            Self::MathQuestion => vec![
                Voice::tone(0, 600.0, 0.15, Sine, 1.0),
                Voice::tone(100, 700.0, 0.15, Sine, 1.0),
            ],
            Self::EnemyAppear => vec![Voice::sweep(0, 200.0, 300.0, 0.4, 0.6)],
            Self::EnemyDefeat => chord(0, &[523.0, 659.0, 784.0, 1047.0], 0.4, 1.0),
            Self::DragonRoar => vec![
                Voice::sweep(0, 150.0, 100.0, 0.5, 0.5),
                Voice::tone(0, 120.0, 0.3, Sawtooth, 0.3),
            ],
            Self::RobotBeep => vec![
                Voice::tone(0, 800.0, 0.1, Square, 1.0),
                Voice::tone(100, 1000.0, 0.1, Square, 1.0),
            ],
            Self::Celebration => {
                let mut voices = chord(0, &[523.0, 659.0, 784.0, 988.0], 0.5, 1.0);
                voices.extend(chord(200, &[659.0, 784.0, 988.0, 1175.0], 0.4, 1.0));
                voices
            }
            Self::Confetti => (0..5)
                .map(|i| Voice::tone(i * 30, rng.gen_range(800.0..1200.0), 0.1, Sine, 0.4))
                .collect(),
            Self::Firework => {
                let mut voices = vec![Voice::sweep(0, 400.0, 1000.0, 0.1, 1.0)];
                voices.extend((0..3).map(|i| {
                    Voice::tone(100 + i * 50, rng.gen_range(600.0..1200.0), 0.15, Sine, 0.5)
                }));
                voices
            }
            Self::ScreenTransition => vec![Voice::sweep(0, 300.0, 500.0, 0.2, 0.5)],
            Self::Beep => vec![Voice::tone(0, 600.0, 0.1, Sine, 1.0)],
        }
    }
}

fn chord(at_ms: u32, frequencies: &[f32], duration_secs: f32, gain: f32) -> Vec<Voice> {
    frequencies
        .iter()
        .map(|f| Voice::tone(at_ms, *f, duration_secs, Waveform::Sine, gain))
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Pitch {
    Fixed(f32),
    /// Exponential glide from the first to the second frequency.
    Sweep(f32, f32),
}

/// One oscillator with a short attack and exponential release.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    pub at_ms: u32,
    pub pitch: Pitch,
    pub waveform: Waveform,
    pub duration_secs: f32,
    /// Multiplier on the effect volume.
    pub gain: f32,
}

impl Voice {
    #[must_use]
    pub const fn tone(
        at_ms: u32,
        frequency: f32,
        duration_secs: f32,
        waveform: Waveform,
        gain: f32,
    ) -> Self {
        Self {
            at_ms,
            pitch: Pitch::Fixed(frequency),
            waveform,
            duration_secs,
            gain,
        }
    }

    #[must_use]
    pub const fn sweep(at_ms: u32, from: f32, to: f32, duration_secs: f32, gain: f32) -> Self {
        Self {
            at_ms,
            pitch: Pitch::Sweep(from, to),
            waveform: Waveform::Sine,
            duration_secs,
            gain,
        }
    }

    /// Peak gain for a given effect volume.
    #[must_use]
    pub fn peak(&self, volume: f32) -> f32 {
        volume * self.gain * PEAK_GAIN_FACTOR
    }
}

/// User-facing effect settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SoundSettings {
    volume: f32,
    pub enabled: bool,
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            volume: DEFAULT_SFX_VOLUME,
            enabled: true,
        }
    }
}

impl SoundSettings {
    #[must_use]
    pub const fn volume(&self) -> f32 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }
}

/// Location of a numbered narration clip.
#[must_use]
pub fn narration_path(track: u8) -> String {
    format!("audio/{track}.m4a")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn names_round_trip_and_unknown_beeps() {
        for effect in SoundEffect::ALL {
            assert_eq!(SoundEffect::from_name(effect.name()), effect);
        }
        assert_eq!(SoundEffect::from_name("kazoo"), SoundEffect::Beep);
    }

    #[test]
    fn every_recipe_has_audible_voices() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for effect in SoundEffect::ALL {
            let voices = effect.recipe(&mut rng);
            assert!(!voices.is_empty(), "{effect:?}");
            assert!(voices.iter().all(|v| v.duration_secs > 0.0 && v.gain > 0.0));
        }
    }

    #[test]
    fn celebration_plays_two_chords() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let voices = SoundEffect::Celebration.recipe(&mut rng);
        assert_eq!(voices.len(), 8);
        assert_eq!(voices.iter().filter(|v| v.at_ms == 200).count(), 4);
    }

    #[test]
    fn sparkles_stay_in_their_band() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for voice in SoundEffect::Confetti.recipe(&mut rng) {
            let Pitch::Fixed(f) = voice.pitch else {
                panic!("confetti uses fixed tones");
            };
            assert!((800.0..1200.0).contains(&f));
        }
    }

    #[test]
    fn volume_is_clamped() {
        let mut settings = SoundSettings::default();
        assert!((settings.volume() - DEFAULT_SFX_VOLUME).abs() < f32::EPSILON);
        settings.set_volume(1.7);
        assert!((settings.volume() - 1.0).abs() < f32::EPSILON);
        settings.set_volume(-0.2);
        assert!(settings.volume().abs() < f32::EPSILON);
        let voice = Voice::tone(0, 440.0, 0.1, Waveform::Sine, 0.5);
        assert!((voice.peak(1.0) - 0.15).abs() < 1e-6);
    }

    #[test]
    fn narration_files_are_numbered() {
        assert_eq!(narration_path(13), "audio/13.m4a");
    }
}
