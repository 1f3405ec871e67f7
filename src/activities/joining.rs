use crate::application::{ActivityContext, SessionError};
use crate::domain::{ActivitySettings, Actor, MusicTrack, SessionEvent};
use crate::traits::ActivityBehavior;
use std::time::Duration;

/// Standard activity for waiting for players to join
///
/// Shows tips and other info while players check ready; the session shuts
/// it down once everyone has.
#[derive(Debug, Default)]
pub struct JoiningActivity;

impl JoiningActivity {
    pub fn new() -> Self {
        JoiningActivity
    }
}

impl ActivityBehavior for JoiningActivity {
    fn settings(&self) -> ActivitySettings {
        ActivitySettings::default()
            .with_joining_activity(true)
            // Players may be idle waiting for joiners; don't kick them for it
            .with_allow_kick_idle_players(false)
            .with_fixed_vr_overlay(true)
    }

    fn on_transition_in(&mut self, ctx: &mut ActivityContext<'_>) -> Result<(), SessionError> {
        ctx.spawn(Actor::Background {
            fade_time: Duration::from_millis(500),
            start_faded: true,
            show_logo: true,
        });
        ctx.spawn(Actor::TipsText);
        ctx.set_music(Some(MusicTrack::CharSelect));
        let activity = ctx.activity();
        ctx.emit(SessionEvent::JoinInfoOpened { activity });
        Ok(())
    }
}
