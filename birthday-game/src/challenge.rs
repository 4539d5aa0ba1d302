use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Operands are drawn from `0..OPERAND_LIMIT`.
pub const OPERAND_LIMIT: u8 = 10;
/// Largest possible sum, and upper clamp for distractors.
pub const MAX_ANSWER: u8 = 2 * (OPERAND_LIMIT - 1);
pub const CHOICE_COUNT: usize = 4;
/// Distractors land within this distance of the right answer.
const DISTRACTOR_SPREAD: i16 = 3;

/// A single "a + b = ?" question with shuffled answer buttons.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MathQuestion {
    pub a: u8,
    pub b: u8,
    pub correct: u8,
    pub choices: Vec<u8>,
}

impl MathQuestion {
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        let a = rng.gen_range(0..OPERAND_LIMIT);
        let b = rng.gen_range(0..OPERAND_LIMIT);
        let correct = a + b;

        let mut choices = Vec::with_capacity(CHOICE_COUNT);
        choices.push(correct);
        while choices.len() < CHOICE_COUNT {
            let offset = rng.gen_range(0..=2 * DISTRACTOR_SPREAD) - DISTRACTOR_SPREAD;
            let wrong = (i16::from(correct) + offset).clamp(0, i16::from(MAX_ANSWER));
            let wrong = u8::try_from(wrong).unwrap_or(MAX_ANSWER);
            if !choices.contains(&wrong) {
                choices.push(wrong);
            }
        }
        choices.shuffle(rng);

        Self {
            a,
            b,
            correct,
            choices,
        }
    }

    #[must_use]
    pub fn prompt(&self) -> String {
        format!("{} + {} = ?", self.a, self.b)
    }

    #[must_use]
    pub const fn is_correct(&self, answer: u8) -> bool {
        answer == self.correct
    }
}
