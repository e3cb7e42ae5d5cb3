use rand::{Rng, RngCore};

use crate::model::{Level, LevelGuide, Question};
use crate::ops::{Operation, OperationKind};

/// Division drills. The dividend is built as `divisor × quotient` so the
/// answer is always an exact integer.
pub struct Division;

impl Division {
    fn max_operand(level: Level) -> i64 {
        match level {
            Level::Beginner => 5,
            Level::Advanced => 10,
            Level::Champion => 12,
        }
    }
}

impl Operation for Division {
    fn kind(&self) -> OperationKind {
        OperationKind::Division
    }

    fn symbol(&self) -> &'static str {
        "÷"
    }

    fn generate(&self, level: Level, rng: &mut dyn RngCore) -> Question {
        let max = Self::max_operand(level);
        let divisor = rng.random_range(1..=max);
        let quotient = rng.random_range(1..=max);
        Question::new(divisor * quotient, divisor, quotient)
    }

    fn prompt(&self, question: &Question) -> String {
        let (a, b) = question.operands();
        format!("{a} ÷ {b} = ?")
    }

    fn guide(&self, level: Level) -> LevelGuide {
        match level {
            Level::Beginner => LevelGuide {
                label: "Beginners",
                title: "Sharing out 😺",
                body: "Dividing means sharing fairly.\n\
                       Example: 6 ÷ 2 → share 6 treats between 2 cats.\n\
                       Each cat gets 3.\n\
                       Mati's tip: draw the groups 😸",
            },
            Level::Advanced => LevelGuide {
                label: "Advanced",
                title: "Dividing faster 🐾",
                body: "Think of the multiplication table backwards.\n\
                       Example: 42 ÷ 7 → what times 7 makes 42?\n\
                       Mati's tip: multiplication and division are twins 🐾",
            },
            Level::Champion => LevelGuide {
                label: "Champions",
                title: "Champion dividing 🐯",
                body: "Use facts you already know and check your answer.\n\
                       Example: 96 ÷ 12 → 8, because 8 × 12 is 96.\n\
                       Mati's tip: multiply back to check 🧠",
            },
        }
    }
}
