use crate::domain::{ActivityId, QuitReason};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Commands processed by the session's single-threaded loop
///
/// Timers and input assignments never call into the session directly;
/// they enqueue one of these, and the session checks the owning
/// activity's liveness when the command is actually handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionCommand {
    /// Promote the activity from transitioning-in to running
    Begin { activity: ActivityId },

    /// Start the activity's transition-out (idempotent)
    End { activity: ActivityId },

    /// Complete the transition-out and release the activity slot
    FinishTransitionOut { activity: ActivityId },

    /// Bind a player's buttons to the activity's input callback
    AssignInput {
        activity: ActivityId,
        player_id: Uuid,
    },

    /// A bound button was pressed
    InputFired {
        activity: ActivityId,
        player_id: Uuid,
    },

    /// Show the "press any button" affordance
    ShowContinuePrompt {
        activity: ActivityId,
        message: String,
    },

    /// One-shot process shutdown (session-owned, survives teardown)
    Shutdown { reason: QuitReason },

    /// One-shot session relaunch (session-owned, survives teardown)
    Relaunch,
}

impl SessionCommand {
    /// The activity this command belongs to, if any
    ///
    /// `Shutdown` and `Relaunch` are session-owned and keep firing after
    /// the scheduling activity is torn down.
    pub fn owner(&self) -> Option<ActivityId> {
        match self {
            SessionCommand::Begin { activity }
            | SessionCommand::End { activity }
            | SessionCommand::FinishTransitionOut { activity }
            | SessionCommand::AssignInput { activity, .. }
            | SessionCommand::InputFired { activity, .. }
            | SessionCommand::ShowContinuePrompt { activity, .. } => Some(*activity),
            SessionCommand::Shutdown { .. } | SessionCommand::Relaunch => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_of_activity_commands() {
        let activity = Uuid::new_v4();
        let cmd = SessionCommand::Begin { activity };

        assert_eq!(cmd.owner(), Some(activity));
    }

    #[test]
    fn test_process_commands_are_session_owned() {
        assert_eq!(
            SessionCommand::Shutdown {
                reason: QuitReason::Shutdown
            }
            .owner(),
            None
        );
        assert_eq!(SessionCommand::Relaunch.owner(), None);
    }

    #[test]
    fn test_command_round_trip() {
        let cmd = SessionCommand::AssignInput {
            activity: Uuid::new_v4(),
            player_id: Uuid::new_v4(),
        };

        let json = serde_json::to_string(&cmd).unwrap();
        let back: SessionCommand = serde_json::from_str(&json).unwrap();

        assert_eq!(back, cmd);
    }
}
