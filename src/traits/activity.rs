use crate::application::{ActivityContext, SessionError};
use crate::domain::{ActivitySettings, Player};
use uuid::Uuid;

/// Overridable lifecycle hooks for one activity
///
/// The session performs its own bookkeeping (state transition, event
/// emission) before invoking each hook, so implementations get the
/// base-setup-first ordering without having to chain into a parent call.
/// Hook failures propagate to the session's caller; the controller does
/// not catch them.
pub trait ActivityBehavior {
    /// Configuration for this activity, read once at construction
    fn settings(&self) -> ActivitySettings;

    /// The activity started fading in; construct decorative state here
    fn on_transition_in(&mut self, ctx: &mut ActivityContext<'_>) -> Result<(), SessionError> {
        let _ = ctx;
        Ok(())
    }

    /// The activity reached steady state
    ///
    /// Guaranteed to run after `on_transition_in` has completed; the only
    /// point from which per-player input assignments become meaningful.
    fn on_begin(&mut self, ctx: &mut ActivityContext<'_>) -> Result<(), SessionError> {
        let _ = ctx;
        Ok(())
    }

    /// A player joined while this activity is current
    ///
    /// Does not touch the state machine; typically schedules a deferred
    /// input assignment.
    fn on_player_join(
        &mut self,
        ctx: &mut ActivityContext<'_>,
        player: &Player,
    ) -> Result<(), SessionError> {
        let _ = (ctx, player);
        Ok(())
    }

    /// A bound button was pressed by `player_id`
    ///
    /// Only delivered while the activity is still live. The default ends
    /// the activity.
    fn on_input_pressed(
        &mut self,
        ctx: &mut ActivityContext<'_>,
        player_id: Uuid,
    ) -> Result<(), SessionError> {
        let _ = player_id;
        ctx.end()
    }
}
