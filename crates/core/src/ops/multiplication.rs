use rand::{Rng, RngCore};

use crate::model::{Level, LevelGuide, Question};
use crate::ops::{Operation, OperationKind};

/// Multiplication drills. Values stay small for kid-friendly practice.
pub struct Multiplication;

impl Multiplication {
    fn max_operand(level: Level) -> i64 {
        match level {
            Level::Beginner => 5,
            Level::Advanced => 10,
            Level::Champion => 12,
        }
    }
}

impl Operation for Multiplication {
    fn kind(&self) -> OperationKind {
        OperationKind::Multiplication
    }

    fn symbol(&self) -> &'static str {
        "×"
    }

    fn generate(&self, level: Level, rng: &mut dyn RngCore) -> Question {
        let max = Self::max_operand(level);
        let a = rng.random_range(0..=max);
        let b = rng.random_range(0..=max);
        Question::new(a, b, a * b)
    }

    fn prompt(&self, question: &Question) -> String {
        let (a, b) = question.operands();
        format!("{a} × {b} = ?")
    }

    fn guide(&self, level: Level) -> LevelGuide {
        match level {
            Level::Beginner => LevelGuide {
                label: "Beginners",
                title: "Beginners 😺",
                body: "Mati the cat explains: multiplying is adding again and again.\n\
                       Pick one number and add it to itself.\n\
                       Example: 3 × 2 is the same as 3 + 3.\n\
                       Draw circles or use your fingers.\n\
                       Mati's tip: slow and clear is best 😸",
            },
            Level::Advanced => LevelGuide {
                label: "Advanced",
                title: "Advanced 🐾",
                body: "Mati the cat already calculates faster.\n\
                       Use the multiplication table and remember familiar facts.\n\
                       If it's hard, break it into parts.\n\
                       Example: 6 × 7 → first 6 × 5, then 6 × 2, and add them up.\n\
                       Mati's tip: breaking it up makes it easy 🐾",
            },
            Level::Champion => LevelGuide {
                label: "Champions",
                title: "Champions 🐯",
                body: "This is a level for real champions.\n\
                       Mati the cat knows the table well and uses clever tricks.\n\
                       Check whether the answer makes sense.\n\
                       Example: 9 × 12 → 10 × 12, then take away 12.\n\
                       Mati's tip: a moment of thought saves mistakes 🧠",
            },
        }
    }
}
