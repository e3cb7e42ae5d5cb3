use mathcat_core::model::Level;
use mathcat_core::ops::OperationKind;
use services::PracticeSession;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PracticeVm {
    pub prompt: String,
    pub input: String,
    pub message: String,
    pub level_badge: &'static str,
    pub guide_title: &'static str,
    pub guide_body: &'static str,
    pub scoring_suppressed: bool,
}

#[must_use]
pub fn map_practice(session: &PracticeSession) -> PracticeVm {
    let guide = session.guide();
    PracticeVm {
        prompt: session.prompt(),
        input: session.input().to_string(),
        message: session.message().to_string(),
        level_badge: level_badge(session.level()),
        guide_title: guide.title,
        guide_body: guide.body,
        scoring_suppressed: session.scoring_suppressed(),
    }
}

#[must_use]
pub fn level_badge(level: Level) -> &'static str {
    match level {
        Level::Beginner => "Beginners 😺",
        Level::Advanced => "Advanced 🐾",
        Level::Champion => "Champions 🐯",
    }
}

#[must_use]
pub fn operation_label(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::Addition => "Addition",
        OperationKind::Subtraction => "Subtraction",
        OperationKind::Multiplication => "Multiplication",
        OperationKind::Division => "Division",
        OperationKind::Percent => "Percentages",
    }
}

#[must_use]
pub fn operation_emoji(kind: OperationKind) -> &'static str {
    match kind {
        OperationKind::Addition => "➕",
        OperationKind::Subtraction => "➖",
        OperationKind::Multiplication => "✖️",
        OperationKind::Division => "➗",
        OperationKind::Percent => "💯",
    }
}
