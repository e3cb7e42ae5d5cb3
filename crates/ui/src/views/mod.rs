mod home;
mod login;
mod practice;
mod register;
mod state;
mod story;
#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use home::HomeView;
pub use login::LoginView;
pub use practice::PracticeView;
pub use register::RegisterView;
pub use state::{view_state_from_resource, ViewError, ViewState};
pub use story::StoryView;
