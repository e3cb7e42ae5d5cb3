#![forbid(unsafe_code)]

pub mod error;
pub mod practice_service;
pub mod progress_client;
pub mod story_service;

pub use mathcat_core::Clock;

pub use error::{PracticeError, ProgressError};
pub use practice_service::{ADVANCE_DELAY, AnswerOutcome, PracticeSession, ScoreReport};
pub use progress_client::{
    HttpProgressClient, InMemoryProgress, LoginOutcome, ProgressConfig, ProgressStore,
};
pub use story_service::{Narrator, StoryRequest, StoryTeller};
