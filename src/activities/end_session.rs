use crate::application::{ActivityContext, SessionError};
use crate::domain::{ActivitySettings, SessionEvent};
use crate::traits::ActivityBehavior;
use std::time::Duration;

/// Fades out and ends the current session
///
/// Keeps the previous activity alive while fading, locks input for the
/// duration and hands control back to the main menu once begun.
#[derive(Debug, Default)]
pub struct EndSessionActivity;

impl EndSessionActivity {
    const TRANSITION_TIME: Duration = Duration::from_millis(250);

    pub fn new() -> Self {
        EndSessionActivity
    }
}

impl ActivityBehavior for EndSessionActivity {
    fn settings(&self) -> ActivitySettings {
        ActivitySettings::default()
            .with_transition_time(Self::TRANSITION_TIME)
            .with_inherits_tint(true)
            .with_inherits_slow_motion(true)
            .with_inherits_camera_offset(true)
            .with_inherits_vr_overlay_center(true)
    }

    fn on_transition_in(&mut self, ctx: &mut ActivityContext<'_>) -> Result<(), SessionError> {
        ctx.emit(SessionEvent::InputLocked);
        Ok(())
    }

    fn on_begin(&mut self, ctx: &mut ActivityContext<'_>) -> Result<(), SessionError> {
        ctx.emit(SessionEvent::InputUnlocked);
        ctx.emit(SessionEvent::MainMenuRequested);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::Session;
    use crate::domain::ServerStatus;
    use crate::traits::NullProcessControl;

    #[test]
    fn test_short_transition_with_full_inheritance() {
        let settings = EndSessionActivity::new().settings();

        assert_eq!(settings.transition_time, Duration::from_millis(250));
        assert!(settings.inherits_tint);
        assert!(settings.inherits_slow_motion);
        assert!(settings.inherits_camera_offset);
        assert!(settings.inherits_vr_overlay_center);
    }

    #[test]
    fn test_locks_input_then_requests_main_menu() {
        let mut session = Session::new(ServerStatus::default(), Box::new(NullProcessControl));
        session
            .set_activity(Box::new(EndSessionActivity::new()))
            .unwrap();

        let events = session.drain_events();
        assert!(events.contains(&SessionEvent::InputLocked));
        assert!(!events.contains(&SessionEvent::InputUnlocked));

        session.advance(Duration::from_millis(250)).unwrap();

        let events = session.drain_events();
        assert!(events.contains(&SessionEvent::InputUnlocked));
        assert!(events.contains(&SessionEvent::MainMenuRequested));
    }
}
