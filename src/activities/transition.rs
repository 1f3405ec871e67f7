use crate::application::{ActivityContext, SessionCommand, SessionError};
use crate::domain::{ActivitySettings, Actor, TimeKind};
use crate::traits::ActivityBehavior;
use std::time::Duration;

/// A simple overlay fade out/in
///
/// Bare-minimum bridge between two level-based activities: fades a
/// background in and ends itself almost immediately after beginning.
#[derive(Debug, Default)]
pub struct TransitionActivity;

impl TransitionActivity {
    const TRANSITION_TIME: Duration = Duration::from_millis(500);
    const LIFETIME_AFTER_BEGIN: Duration = Duration::from_millis(100);

    pub fn new() -> Self {
        TransitionActivity
    }
}

impl ActivityBehavior for TransitionActivity {
    fn settings(&self) -> ActivitySettings {
        ActivitySettings::default()
            .with_transition_time(Self::TRANSITION_TIME)
            .with_inherits_slow_motion(true)
            .with_inherits_tint(true)
            .with_inherits_camera_offset(true)
            .with_inherits_vr_overlay_center(true)
            .with_fixed_vr_overlay(true)
    }

    fn on_transition_in(&mut self, ctx: &mut ActivityContext<'_>) -> Result<(), SessionError> {
        ctx.spawn(Actor::Background {
            fade_time: Duration::from_millis(500),
            start_faded: false,
            show_logo: false,
        });
        Ok(())
    }

    fn on_begin(&mut self, ctx: &mut ActivityContext<'_>) -> Result<(), SessionError> {
        // Die almost immediately
        ctx.schedule(
            Self::LIFETIME_AFTER_BEGIN,
            TimeKind::Sim,
            SessionCommand::End {
                activity: ctx.activity(),
            },
        );
        Ok(())
    }
}
