mod draft;
mod level;
mod question;

pub use draft::SessionDraft;
pub use level::{Level, LevelGuide};
pub use question::Question;
