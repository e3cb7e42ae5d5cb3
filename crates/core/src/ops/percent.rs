use rand::{Rng, RngCore};

use crate::model::{Level, LevelGuide, Question};
use crate::ops::{Operation, OperationKind};

const MAX_TRIES: u32 = 20;

/// Percent drills: "how much is p% of base?".
///
/// The answer is sampled first and the base derived as `answer * 100 / p`,
/// so the answer is always a whole number. Operands are `(percent, base)`.
pub struct Percent;

impl Percent {
    fn percents(level: Level) -> &'static [i64] {
        match level {
            Level::Beginner => &[10, 25, 50],
            Level::Advanced => &[5, 10, 20, 25, 50],
            Level::Champion => &[1, 2, 4, 5, 10, 20, 25, 50],
        }
    }

    fn answer_range(level: Level) -> (i64, i64) {
        match level {
            Level::Beginner => (1, 20),
            Level::Advanced => (1, 40),
            Level::Champion => (1, 60),
        }
    }

    /// Largest base value a level may produce.
    pub(crate) fn max_base(level: Level) -> i64 {
        match level {
            Level::Beginner => 200,
            Level::Advanced => 400,
            Level::Champion => 600,
        }
    }
}

impl Operation for Percent {
    fn kind(&self) -> OperationKind {
        OperationKind::Percent
    }

    fn symbol(&self) -> &'static str {
        "%"
    }

    fn generate(&self, level: Level, rng: &mut dyn RngCore) -> Question {
        let percents = Self::percents(level);
        let p = percents[rng.random_range(0..percents.len())];
        let (min, max) = Self::answer_range(level);

        // Every percent in the tables divides `answer * 100` evenly; the
        // bounded retry keeps the invariant even if the tables change.
        let mut answer = rng.random_range(min..=max);
        let mut tries = 0;
        while answer * 100 % p != 0 && tries < MAX_TRIES {
            answer = rng.random_range(min..=max);
            tries += 1;
        }

        let max_base = Self::max_base(level);
        let mut base = answer * 100 / p;
        if base > max_base || answer * 100 % p != 0 {
            answer = (max_base * p / 100).max(1);
            base = answer * 100 / p;
        }

        Question::new(p, base, answer)
    }

    fn prompt(&self, question: &Question) -> String {
        let (p, base) = question.operands();
        format!("How much is {p}% of {base}?")
    }

    fn guide(&self, level: Level) -> LevelGuide {
        match level {
            Level::Beginner => LevelGuide {
                label: "Beginners",
                title: "Percent for beginners 😺",
                body: "Percent means 'how many out of 100'.\n\
                       Super easy ones first:\n\
                       50% = half, 25% = a quarter, 10% = divide by 10.\n\
                       Example: 25% of 80 = 20.\n\
                       Mati's tip: do 10/25/50 first, then keep going 🐾",
            },
            Level::Advanced => LevelGuide {
                label: "Advanced",
                title: "Advanced percent 🐾",
                body: "Now we add more easy percents.\n\
                       5% is half of 10%. 20% is double 10%.\n\
                       Example: 15% of 200 = 10% (20) + 5% (10) = 30.\n\
                       Mati's tip: think in small pieces 😺",
            },
            Level::Champion => LevelGuide {
                label: "Champions",
                title: "Percent for champions 🐯",
                body: "Slightly cleverer percents, still simple.\n\
                       1% = divide by 100. 2% = twice 1%. 4% = double 2%.\n\
                       Example: 4% of 200 = 8.\n\
                       Mati's tip: you can always split percents apart 🧱",
            },
        }
    }
}
