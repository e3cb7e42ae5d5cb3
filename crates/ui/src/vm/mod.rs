mod practice_vm;

pub use practice_vm::{
    PracticeVm, level_badge, map_practice, operation_emoji, operation_label,
};
