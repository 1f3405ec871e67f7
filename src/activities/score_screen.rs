use crate::application::{ActivityContext, SessionCommand, SessionError};
use crate::domain::{
    ActivitySettings, Actor, MusicTrack, Player, RestartAction, RestartPolicy, TimeKind,
};
use crate::traits::ActivityBehavior;
use std::time::Duration;
use uuid::Uuid;

const DEFAULT_MIN_VIEW_TIME: Duration = Duration::from_secs(5);
const SERIES_VICTORY_MIN_VIEW_TIME: Duration = Duration::from_secs(15);
const TRANSITION_TIME: Duration = Duration::from_millis(500);

/// A standard score screen that fades in and shows stuff for a while
///
/// After the minimum view time elapses, player input is assigned to end
/// the activity; joining players can never skip the view time by pressing
/// immediately.
#[derive(Debug)]
pub struct ScoreScreenActivity {
    min_view_time: Duration,
    show_tips: bool,
    music: Option<MusicTrack>,
    continue_message: String,
    policy: RestartPolicy,
}

impl Default for ScoreScreenActivity {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreScreenActivity {
    pub fn new() -> Self {
        ScoreScreenActivity {
            min_view_time: DEFAULT_MIN_VIEW_TIME,
            show_tips: true,
            music: Some(MusicTrack::Scores),
            continue_message: "press any button to continue".to_string(),
            policy: RestartPolicy::new(false),
        }
    }

    /// The final screen of a team series: longer view time, no tips or
    /// music up front, and server restarts allowed
    pub fn series_victory() -> Self {
        Self::new()
            .with_min_view_time(SERIES_VICTORY_MIN_VIEW_TIME)
            .without_tips()
            .with_music(None)
            .with_server_restart(true)
    }

    pub fn with_min_view_time(mut self, min_view_time: Duration) -> Self {
        self.min_view_time = min_view_time;
        self
    }

    pub fn without_tips(mut self) -> Self {
        self.show_tips = false;
        self
    }

    pub fn with_music(mut self, music: Option<MusicTrack>) -> Self {
        self.music = music;
        self
    }

    pub fn with_continue_message(mut self, message: String) -> Self {
        self.continue_message = message;
        self
    }

    pub fn with_server_restart(mut self, allow: bool) -> Self {
        self.policy = RestartPolicy::new(allow);
        self
    }
}

impl ActivityBehavior for ScoreScreenActivity {
    fn settings(&self) -> ActivitySettings {
        ActivitySettings::default()
            .with_transition_time(TRANSITION_TIME)
            .with_min_view_time(self.min_view_time)
            .with_inherits_tint(true)
            .with_inherits_camera_offset(true)
            .with_fixed_vr_overlay(true)
            .with_server_restart(self.policy.allows_server_restart())
    }

    fn on_transition_in(&mut self, ctx: &mut ActivityContext<'_>) -> Result<(), SessionError> {
        ctx.spawn(Actor::Background {
            fade_time: Duration::from_millis(500),
            start_faded: false,
            show_logo: true,
        });
        if self.show_tips {
            ctx.spawn(Actor::TipsText);
        }
        ctx.set_music(self.music);
        Ok(())
    }

    fn on_begin(&mut self, ctx: &mut ActivityContext<'_>) -> Result<(), SessionError> {
        // Pop up the continue prompt once the minimum view time is over
        let min_view_time = ctx.settings().min_view_time;
        ctx.schedule(
            min_view_time,
            TimeKind::Sim,
            SessionCommand::ShowContinuePrompt {
                activity: ctx.activity(),
                message: self.continue_message.clone(),
            },
        );
        Ok(())
    }

    fn on_player_join(
        &mut self,
        ctx: &mut ActivityContext<'_>,
        player: &Player,
    ) -> Result<(), SessionError> {
        // If we're still kicking at the end of the assign delay, this
        // player's input gets bound to trigger us.
        let due = ctx.birth_time() + ctx.settings().min_view_time;
        let delay = due.saturating_since(ctx.now());

        ctx.schedule(
            delay,
            TimeKind::Sim,
            SessionCommand::AssignInput {
                activity: ctx.activity(),
                player_id: player.id(),
            },
        );
        Ok(())
    }

    fn on_input_pressed(
        &mut self,
        ctx: &mut ActivityContext<'_>,
        _player_id: Uuid,
    ) -> Result<(), SessionError> {
        // In server mode a dirty config takes precedence over the normal
        // continue path, at most once per action.
        if let Some(action) = self.policy.evaluate(ctx.server_status()) {
            match action {
                RestartAction::Shutdown(reason) => ctx.schedule_shutdown(reason),
                RestartAction::Relaunch => ctx.schedule_relaunch(),
            }
            return Ok(());
        }

        ctx.end()
    }
}
