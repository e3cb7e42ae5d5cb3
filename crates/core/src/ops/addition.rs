use rand::{Rng, RngCore};

use crate::model::{Level, LevelGuide, Question};
use crate::ops::{Operation, OperationKind};

/// Addition drills. Both operands are sampled from the level's range.
pub struct Addition;

impl Addition {
    fn max_operand(level: Level) -> i64 {
        match level {
            Level::Beginner => 10,
            Level::Advanced => 20,
            Level::Champion => 50,
        }
    }
}

impl Operation for Addition {
    fn kind(&self) -> OperationKind {
        OperationKind::Addition
    }

    fn symbol(&self) -> &'static str {
        "+"
    }

    fn generate(&self, level: Level, rng: &mut dyn RngCore) -> Question {
        let max = Self::max_operand(level);
        let a = rng.random_range(0..=max);
        let b = rng.random_range(0..=max);
        Question::new(a, b, a + b)
    }

    fn prompt(&self, question: &Question) -> String {
        let (a, b) = question.operands();
        format!("{a} + {b} = ?")
    }

    fn guide(&self, level: Level) -> LevelGuide {
        match level {
            Level::Beginner => LevelGuide {
                label: "Beginners",
                title: "Adding up 😺",
                body: "Adding means putting together.\n\
                       Count on your fingers or draw little circles.\n\
                       Example: 3 + 2 is 3, then two more: 4, 5.\n\
                       Mati's tip: slow and clear beats fast 😸",
            },
            Level::Advanced => LevelGuide {
                label: "Advanced",
                title: "Bigger sums 🐾",
                body: "Make a ten first, then add the rest.\n\
                       Example: 8 + 7 → 8 + 2 is 10, then 5 more is 15.\n\
                       Mati's tip: tens make everything easier 🐾",
            },
            Level::Champion => LevelGuide {
                label: "Champions",
                title: "Champion sums 🐯",
                body: "Split numbers into tens and ones.\n\
                       Example: 27 + 15 → 20 + 10, then 7 + 5.\n\
                       Check that the answer makes sense.\n\
                       Mati's tip: a moment of thought saves mistakes 🧠",
            },
        }
    }
}
