use crate::domain::{ActivityId, Actor, MusicTrack, QuitReason, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events emitted by the session for the host/frontend to observe
///
/// Events carry data, not callbacks, so the stream stays serializable and
/// can be shipped to a remote observer verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// An activity entered its fade-in phase
    ActivityTransitioningIn { activity: ActivityId },

    /// An activity reached steady state
    ActivityBegan { activity: ActivityId },

    /// `end()` took effect; the activity is fading out
    ActivityEnding { activity: ActivityId },

    /// Transition-out finished; the slot is free again
    ActivityEnded {
        activity: ActivityId,
        actors_torn_down: usize,
    },

    /// A player joined while this activity was current
    PlayerJoined {
        activity: ActivityId,
        player_id: Uuid,
        joined_at: Timestamp,
    },

    /// A player's buttons were bound to the activity's input callback
    InputAssigned {
        activity: ActivityId,
        player_id: Uuid,
    },

    /// A cosmetic actor was constructed for this activity
    ActorSpawned { activity: ActivityId, actor: Actor },

    /// The activity requested a music change (`None` silences music)
    MusicChanged { track: Option<MusicTrack> },

    /// The "press any button" affordance became visible
    ContinuePromptShown { activity: ActivityId },

    /// The joiner screen opened its join-info panel
    JoinInfoOpened { activity: ActivityId },

    /// All player input is locked during the end-session fade
    InputLocked,

    /// Input lock released
    InputUnlocked,

    /// The session asked the host to return to the main menu
    MainMenuRequested,

    /// A one-shot process shutdown was scheduled
    ShutdownScheduled { reason: QuitReason },

    /// A one-shot session relaunch was scheduled
    RelaunchScheduled,
}
