use instant::Instant;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Named input actions a player's controls can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    Jump,
    Punch,
    Bomb,
    PickUp,
}

impl InputAction {
    /// The full button set used for "press any button" bindings
    pub const ALL: [InputAction; 4] = [
        InputAction::Jump,
        InputAction::Punch,
        InputAction::Bomb,
        InputAction::PickUp,
    ];
}

impl fmt::Display for InputAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputAction::Jump => write!(f, "jump"),
            InputAction::Punch => write!(f, "punch"),
            InputAction::Bomb => write!(f, "bomb"),
            InputAction::PickUp => write!(f, "pick-up"),
        }
    }
}

/// Wall-clock timestamp in milliseconds since application start (monotonic)
///
/// Serializable and comparable; distinct from [`SimTime`](crate::domain::SimTime),
/// which the scheduler drives explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a timestamp representing the current moment
    pub fn now() -> Self {
        // One anchor point shared by all timestamps in the process
        static ANCHOR: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();
        let anchor = ANCHOR.get_or_init(Instant::now);

        let elapsed = Instant::now().duration_since(*anchor);
        Timestamp(elapsed.as_millis() as u64)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Errors that can occur when creating players
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PlayerError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name must be between 1 and 50 characters")]
    InvalidNameLength,
}

/// A player handle delivered by the host's input router
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: Uuid,
    name: String,
    joined_at: Timestamp,
}

impl Player {
    pub fn new(name: String) -> Result<Self, PlayerError> {
        Self::validate_name(&name)?;

        Ok(Player {
            id: Uuid::new_v4(),
            name,
            joined_at: Timestamp::now(),
        })
    }

    fn validate_name(name: &str) -> Result<(), PlayerError> {
        if name.is_empty() {
            return Err(PlayerError::EmptyName);
        }

        if name.len() > 50 {
            return Err(PlayerError::InvalidNameLength);
        }

        Ok(())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn joined_at(&self) -> Timestamp {
        self.joined_at
    }
}
