use crate::domain::SimTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Activity instance ID (unique within a session)
pub type ActivityId = Uuid;

/// Activity lifecycle state
///
/// States only ever move forward; `Ended` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityState {
    /// Constructed, not yet handed to the session
    Created,
    /// Fading in; the previous activity may still be alive
    TransitioningIn,
    /// Steady state - gameplay/UI is live
    Running,
    /// Fading out; scheduled callbacks for this activity no longer fire
    TransitioningOut,
    /// Torn down, slot released
    Ended,
}

impl ActivityState {
    /// Whether callbacks owned by an activity in this state may still run
    pub fn is_live(&self) -> bool {
        !matches!(self, ActivityState::TransitioningOut | ActivityState::Ended)
    }
}

impl fmt::Display for ActivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityState::Created => write!(f, "created"),
            ActivityState::TransitioningIn => write!(f, "transitioning-in"),
            ActivityState::Running => write!(f, "running"),
            ActivityState::TransitioningOut => write!(f, "transitioning-out"),
            ActivityState::Ended => write!(f, "ended"),
        }
    }
}

/// Errors from lifecycle transitions
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ActivityError {
    #[error("Invalid lifecycle transition: {from} -> {to}")]
    InvalidTransition {
        from: ActivityState,
        to: ActivityState,
    },
}

/// Per-activity configuration, fixed at construction
///
/// The inherit flags are copied from the predecessor activity by the host
/// and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySettings {
    /// Fade duration bridging into (and out of) this activity
    pub transition_time: Duration,

    /// Minimum time the activity stays on screen before player input can
    /// dismiss it
    pub min_view_time: Duration,

    /// Keep the predecessor's screen tint
    pub inherits_tint: bool,

    /// Keep the predecessor's slow-motion factor
    pub inherits_slow_motion: bool,

    /// Keep the predecessor's camera offset
    pub inherits_camera_offset: bool,

    /// Keep the predecessor's VR overlay center
    pub inherits_vr_overlay_center: bool,

    /// Pin the VR overlay in place while this activity is up
    pub use_fixed_vr_overlay: bool,

    /// Whether idle players may be kicked during this activity
    pub allow_kick_idle_players: bool,

    /// Marks a joiner screen; the session shuts it down once everyone
    /// has checked ready
    pub is_joining_activity: bool,

    /// Enables the server restart/shutdown arbitration on player input
    pub allow_server_restart: bool,
}

impl Default for ActivitySettings {
    fn default() -> Self {
        ActivitySettings {
            transition_time: Duration::ZERO,
            min_view_time: Duration::ZERO,
            inherits_tint: false,
            inherits_slow_motion: false,
            inherits_camera_offset: false,
            inherits_vr_overlay_center: false,
            use_fixed_vr_overlay: false,
            allow_kick_idle_players: true,
            is_joining_activity: false,
            allow_server_restart: false,
        }
    }
}

impl ActivitySettings {
    pub fn with_transition_time(mut self, transition_time: Duration) -> Self {
        self.transition_time = transition_time;
        self
    }

    pub fn with_min_view_time(mut self, min_view_time: Duration) -> Self {
        self.min_view_time = min_view_time;
        self
    }

    pub fn with_inherits_tint(mut self, value: bool) -> Self {
        self.inherits_tint = value;
        self
    }

    pub fn with_inherits_slow_motion(mut self, value: bool) -> Self {
        self.inherits_slow_motion = value;
        self
    }

    pub fn with_inherits_camera_offset(mut self, value: bool) -> Self {
        self.inherits_camera_offset = value;
        self
    }

    pub fn with_inherits_vr_overlay_center(mut self, value: bool) -> Self {
        self.inherits_vr_overlay_center = value;
        self
    }

    pub fn with_fixed_vr_overlay(mut self, value: bool) -> Self {
        self.use_fixed_vr_overlay = value;
        self
    }

    pub fn with_allow_kick_idle_players(mut self, value: bool) -> Self {
        self.allow_kick_idle_players = value;
        self
    }

    pub fn with_joining_activity(mut self, value: bool) -> Self {
        self.is_joining_activity = value;
        self
    }

    pub fn with_server_restart(mut self, value: bool) -> Self {
        self.allow_server_restart = value;
        self
    }
}

/// The activity state machine itself
///
/// Owns the current state and the sim-time birth timestamp. The session
/// drives transitions; behaviors only observe them through their hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLifecycle {
    state: ActivityState,
    birth_time: SimTime,
}

impl ActivityLifecycle {
    pub fn new(birth_time: SimTime) -> Self {
        ActivityLifecycle {
            state: ActivityState::Created,
            birth_time,
        }
    }

    pub fn state(&self) -> ActivityState {
        self.state
    }

    pub fn birth_time(&self) -> SimTime {
        self.birth_time
    }

    /// `Created -> TransitioningIn`; invoked exactly once by the session
    pub fn transition_in(&mut self) -> Result<(), ActivityError> {
        match self.state {
            ActivityState::Created => {
                self.state = ActivityState::TransitioningIn;
                Ok(())
            }
            from => Err(ActivityError::InvalidTransition {
                from,
                to: ActivityState::TransitioningIn,
            }),
        }
    }

    /// `TransitioningIn -> Running`; never valid before `transition_in`
    pub fn begin(&mut self) -> Result<(), ActivityError> {
        match self.state {
            ActivityState::TransitioningIn => {
                self.state = ActivityState::Running;
                Ok(())
            }
            from => Err(ActivityError::InvalidTransition {
                from,
                to: ActivityState::Running,
            }),
        }
    }

    /// Begin transitioning out; returns whether the state actually changed
    ///
    /// Idempotent: a second call while already transitioning out (or
    /// ended) is a no-op. An activity may also be ended while still
    /// fading in.
    pub fn end(&mut self) -> bool {
        match self.state {
            ActivityState::TransitioningIn | ActivityState::Running => {
                self.state = ActivityState::TransitioningOut;
                true
            }
            _ => false,
        }
    }

    /// `TransitioningOut -> Ended`; fired once the transition duration
    /// elapses
    pub fn finish_transition_out(&mut self) -> Result<(), ActivityError> {
        match self.state {
            ActivityState::TransitioningOut => {
                self.state = ActivityState::Ended;
                Ok(())
            }
            from => Err(ActivityError::InvalidTransition {
                from,
                to: ActivityState::Ended,
            }),
        }
    }
}
