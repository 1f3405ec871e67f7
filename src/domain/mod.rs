pub mod activity;
pub mod actor;
pub mod events;
pub mod player;
pub mod server;
pub mod time;

pub use activity::{ActivityError, ActivityId, ActivityLifecycle, ActivitySettings, ActivityState};
pub use actor::{Actor, ActorStage, MusicTrack};
pub use events::SessionEvent;
pub use player::{InputAction, Player, PlayerError, Timestamp};
pub use server::{QuitReason, RestartAction, RestartPolicy, ServerStatus};
pub use time::{SimTime, TimeKind};
