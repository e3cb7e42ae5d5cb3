use serde::{Deserialize, Serialize};

/// One practice problem: a pair of operands and the expected answer.
///
/// The meaning of the operands depends on the operation that produced the
/// question (for percent questions they are `(percent, base)`). A question
/// is immutable once created and replaced wholesale on advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    operands: (i64, i64),
    answer: i64,
}

impl Question {
    #[must_use]
    pub fn new(a: i64, b: i64, answer: i64) -> Self {
        Self {
            operands: (a, b),
            answer,
        }
    }

    #[must_use]
    pub fn operands(&self) -> (i64, i64) {
        self.operands
    }

    #[must_use]
    pub fn answer(&self) -> i64 {
        self.answer
    }
}
