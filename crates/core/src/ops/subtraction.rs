use rand::{Rng, RngCore};

use crate::model::{Level, LevelGuide, Question};
use crate::ops::{Operation, OperationKind};

/// Subtraction drills. The second operand is sampled at or below the first
/// so the answer is never negative.
pub struct Subtraction;

impl Subtraction {
    fn max_operand(level: Level) -> i64 {
        match level {
            Level::Beginner => 10,
            Level::Advanced => 20,
            Level::Champion => 50,
        }
    }
}

impl Operation for Subtraction {
    fn kind(&self) -> OperationKind {
        OperationKind::Subtraction
    }

    fn symbol(&self) -> &'static str {
        "-"
    }

    fn generate(&self, level: Level, rng: &mut dyn RngCore) -> Question {
        let max = Self::max_operand(level);
        let a = rng.random_range(0..=max);
        let b = rng.random_range(0..=a);
        Question::new(a, b, a - b)
    }

    fn prompt(&self, question: &Question) -> String {
        let (a, b) = question.operands();
        format!("{a} - {b} = ?")
    }

    fn guide(&self, level: Level) -> LevelGuide {
        match level {
            Level::Beginner => LevelGuide {
                label: "Beginners",
                title: "Taking away 😺",
                body: "Subtracting means taking away.\n\
                       Start from the big number and count backwards.\n\
                       Example: 5 - 2 → 4, 3.\n\
                       Mati's tip: fingers are allowed 😸",
            },
            Level::Advanced => LevelGuide {
                label: "Advanced",
                title: "Bigger take-aways 🐾",
                body: "Count up from the small number instead.\n\
                       Example: 14 - 9 → from 9 to 14 is 5.\n\
                       Mati's tip: counting up is often faster 🐾",
            },
            Level::Champion => LevelGuide {
                label: "Champions",
                title: "Champion take-aways 🐯",
                body: "Subtract the tens first, then the ones.\n\
                       Example: 42 - 17 → 42 - 10 is 32, then 7 less.\n\
                       Mati's tip: break it into pieces 🧱",
            },
        }
    }
}
