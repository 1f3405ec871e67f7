use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Music tracks an activity can request from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicTrack {
    /// Character-select / joining screen music
    CharSelect,
    /// Score screen music
    Scores,
    /// Main menu music
    Menu,
}

impl fmt::Display for MusicTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MusicTrack::CharSelect => write!(f, "char-select"),
            MusicTrack::Scores => write!(f, "scores"),
            MusicTrack::Menu => write!(f, "menu"),
        }
    }
}

/// Cosmetic actor record
///
/// The actual rendering lives in the host; these records describe what the
/// host's actor factory should construct. Their lifetime is tied to the
/// owning activity and they are torn down together on transition-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Actor {
    /// Full-screen background, optionally with the game logo
    Background {
        fade_time: Duration,
        start_faded: bool,
        show_logo: bool,
    },

    /// Rotating gameplay tips
    TipsText,

    /// Flashing "press any button to continue" style prompt
    ContinuePrompt { message: String },
}

/// The set of cosmetic actors currently alive for one activity
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorStage {
    actors: Vec<Actor>,
}

impl ActorStage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, actor: Actor) {
        self.actors.push(actor);
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Tear down all actors; returns how many were removed
    pub fn clear(&mut self) -> usize {
        let count = self.actors.len();
        self.actors.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_and_clear() {
        let mut stage = ActorStage::new();
        assert!(stage.is_empty());

        stage.spawn(Actor::Background {
            fade_time: Duration::from_millis(500),
            start_faded: true,
            show_logo: true,
        });
        stage.spawn(Actor::TipsText);

        assert_eq!(stage.len(), 2);
        assert_eq!(stage.clear(), 2);
        assert!(stage.is_empty());
    }

    #[test]
    fn test_actor_serialization() {
        let actor = Actor::ContinuePrompt {
            message: "press any button to continue".to_string(),
        };

        let json = serde_json::to_value(&actor).unwrap();
        assert_eq!(json["type"], "ContinuePrompt");

        let back: Actor = serde_json::from_value(json).unwrap();
        assert_eq!(back, actor);
    }

    #[test]
    fn test_music_track_display() {
        assert_eq!(MusicTrack::CharSelect.to_string(), "char-select");
        assert_eq!(MusicTrack::Scores.to_string(), "scores");
    }
}
