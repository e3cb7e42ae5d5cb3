//! Operation strategies.
//!
//! Each practice type is one strategy behind the [`Operation`] trait: it
//! knows how to generate a question for a difficulty level, how to render a
//! prompt, and what explanatory content each level carries. The session
//! controller is generic over the strategy, so there is exactly one state
//! machine for all practice types.

mod addition;
mod division;
mod multiplication;
mod percent;
mod subtraction;

use std::fmt;
use std::str::FromStr;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Level, LevelGuide, Question};

pub use addition::Addition;
pub use division::Division;
pub use multiplication::Multiplication;
pub use percent::Percent;
pub use subtraction::Subtraction;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown operation: {raw}")]
pub struct ParseOperationError {
    pub raw: String,
}

/// The closed set of practice types.
///
/// The lowercase name doubles as the API path segment (`score/{kind}`,
/// `user/{kind}-f`) and as the prefix of the session draft key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Percent,
}

impl OperationKind {
    pub const ALL: [OperationKind; 5] = [
        OperationKind::Addition,
        OperationKind::Subtraction,
        OperationKind::Multiplication,
        OperationKind::Division,
        OperationKind::Percent,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Addition => "addition",
            OperationKind::Subtraction => "subtraction",
            OperationKind::Multiplication => "multiplication",
            OperationKind::Division => "division",
            OperationKind::Percent => "percent",
        }
    }

    /// Session-store key for this practice type's draft.
    #[must_use]
    pub fn draft_key(&self) -> String {
        format!("{}_practice_state_v1", self.as_str())
    }

    /// The strategy implementing this practice type.
    #[must_use]
    pub fn strategy(self) -> &'static dyn Operation {
        match self {
            OperationKind::Addition => &Addition,
            OperationKind::Subtraction => &Subtraction,
            OperationKind::Multiplication => &Multiplication,
            OperationKind::Division => &Division,
            OperationKind::Percent => &Percent,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseOperationError { raw: s.to_string() })
    }
}

/// One practice type: question generation plus display content.
///
/// Generators are pure up to the caller-supplied random source, sample
/// operands uniformly within the level's inclusive range, never block and
/// have no side effects. Every generated question has an exact integer
/// answer.
pub trait Operation: Send + Sync {
    fn kind(&self) -> OperationKind;

    /// Operator symbol used in prompts and story handoffs.
    fn symbol(&self) -> &'static str;

    fn generate(&self, level: Level, rng: &mut dyn RngCore) -> Question;

    fn prompt(&self, question: &Question) -> String;

    fn guide(&self, level: Level) -> LevelGuide;
}
