//! Activity lifecycle management for game sessions.
//!
//! A session owns one current activity and drives it through
//! `Created -> TransitioningIn -> Running -> TransitioningOut -> Ended`.
//! Timers and input assignments never touch the activity directly: they
//! enqueue commands, and the session checks the owning activity's
//! liveness when each command is handled, so stale callbacks can never
//! fire into an activity that has started tearing down.

pub mod activities;
pub mod application;
pub mod domain;
pub mod traits;

pub use application::{ActivityContext, Session, SessionCommand, SessionError};
pub use domain::{
    ActivityError, ActivityId, ActivityLifecycle, ActivitySettings, ActivityState, Actor,
    InputAction, MusicTrack, Player, QuitReason, RestartPolicy, ServerStatus, SessionEvent,
    SimTime, TimeKind, Timestamp,
};
pub use traits::{ActivityBehavior, NullProcessControl, ProcessControl};
