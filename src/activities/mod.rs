pub mod end_session;
pub mod joining;
pub mod score_screen;
pub mod transition;

pub use end_session::EndSessionActivity;
pub use joining::JoiningActivity;
pub use score_screen::ScoreScreenActivity;
pub use transition::TransitionActivity;
