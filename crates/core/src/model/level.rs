use serde::{Deserialize, Serialize};

/// A named difficulty tier.
///
/// Every operation maps a level to its own operand ranges and explanatory
/// content; the tier itself is shared so a learner's stored proficiency
/// counter selects the same tier across practice types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Beginner,
    Advanced,
    Champion,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Advanced, Level::Champion];

    /// Derive a level from a learner's stored proficiency counter.
    ///
    /// Counters are whole numbers by contract: `<= 1` selects the easiest
    /// tier, exactly `2` the middle tier, everything above the hardest.
    /// A missing or non-finite counter defaults to the easiest tier.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn from_proficiency(counter: Option<f64>) -> Self {
        let Some(n) = counter else {
            return Level::Beginner;
        };
        if !n.is_finite() || n <= 1.0 {
            Level::Beginner
        } else if n == 2.0 {
            Level::Advanced
        } else {
            Level::Champion
        }
    }

    /// Position in the difficulty ordering, easiest first.
    #[must_use]
    pub fn rank(&self) -> u8 {
        match self {
            Level::Beginner => 0,
            Level::Advanced => 1,
            Level::Champion => 2,
        }
    }
}

/// Static display content for one level of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelGuide {
    /// Short badge label, e.g. "Beginners".
    pub label: &'static str,
    /// Heading of the explanation panel.
    pub title: &'static str,
    /// Kid-facing explanation, newline separated.
    pub body: &'static str,
}
