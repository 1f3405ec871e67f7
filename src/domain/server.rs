use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a scheduled process shutdown was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuitReason {
    /// Plain shutdown; the process is not expected back
    Shutdown,
    /// The server wrapper will bring the process back up
    Restarting,
}

impl fmt::Display for QuitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuitReason::Shutdown => write!(f, "shutdown"),
            QuitReason::Restarting => write!(f, "restarting"),
        }
    }
}

/// Read-only snapshot of the server's config state
///
/// Injected into the session instead of being read from ambient global
/// state; the host refreshes it whenever the on-disk config changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
    /// The config changed since this session was launched
    pub config_dirty: bool,

    /// The new config asks the process to exit rather than reload
    pub quit: bool,

    /// Why the exit was requested (only meaningful with `quit`)
    pub quit_reason: QuitReason,
}

impl Default for ServerStatus {
    fn default() -> Self {
        ServerStatus {
            config_dirty: false,
            quit: false,
            quit_reason: QuitReason::Shutdown,
        }
    }
}

/// Action decided by the restart policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartAction {
    /// Schedule a delayed process shutdown
    Shutdown(QuitReason),
    /// Schedule a delayed session relaunch with the updated config
    Relaunch,
}

/// One-shot arbitration between "shut the server down" and "relaunch the
/// session with new config"
///
/// Each action is guarded by its own latch so it fires at most once per
/// activity instance, no matter how many times the triggering input
/// callback runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestartPolicy {
    allow_server_restart: bool,
    kicked_off_shutdown: bool,
    kicked_off_restart: bool,
}

impl RestartPolicy {
    pub fn new(allow_server_restart: bool) -> Self {
        RestartPolicy {
            allow_server_restart,
            kicked_off_shutdown: false,
            kicked_off_restart: false,
        }
    }

    pub fn allows_server_restart(&self) -> bool {
        self.allow_server_restart
    }

    /// Decide whether a one-shot action should be taken for this press
    ///
    /// Returns `None` when the normal end-activity path should proceed.
    pub fn evaluate(&mut self, status: &ServerStatus) -> Option<RestartAction> {
        if !self.allow_server_restart || !status.config_dirty {
            return None;
        }

        if status.quit {
            if self.kicked_off_shutdown {
                return None;
            }
            self.kicked_off_shutdown = true;
            tracing::info!(reason = %status.quit_reason, "exiting for server shutdown");
            Some(RestartAction::Shutdown(status.quit_reason))
        } else {
            if self.kicked_off_restart {
                return None;
            }
            self.kicked_off_restart = true;
            tracing::info!("running updated server config");
            Some(RestartAction::Relaunch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dirty_quit_status(reason: QuitReason) -> ServerStatus {
        ServerStatus {
            config_dirty: true,
            quit: true,
            quit_reason: reason,
        }
    }

    #[test]
    fn test_no_action_when_restart_disallowed() {
        let mut policy = RestartPolicy::new(false);
        let status = dirty_quit_status(QuitReason::Shutdown);

        assert_eq!(policy.evaluate(&status), None);
    }

    #[test]
    fn test_no_action_when_config_clean() {
        let mut policy = RestartPolicy::new(true);
        let status = ServerStatus::default();

        assert_eq!(policy.evaluate(&status), None);
    }

    #[test]
    fn test_shutdown_fires_exactly_once() {
        let mut policy = RestartPolicy::new(true);
        let status = dirty_quit_status(QuitReason::Restarting);

        assert_eq!(
            policy.evaluate(&status),
            Some(RestartAction::Shutdown(QuitReason::Restarting))
        );

        // Repeated triggers after the latch is set take no action
        assert_eq!(policy.evaluate(&status), None);
        assert_eq!(policy.evaluate(&status), None);
    }

    #[test]
    fn test_relaunch_fires_exactly_once() {
        let mut policy = RestartPolicy::new(true);
        let status = ServerStatus {
            config_dirty: true,
            quit: false,
            quit_reason: QuitReason::Shutdown,
        };

        assert_eq!(policy.evaluate(&status), Some(RestartAction::Relaunch));
        assert_eq!(policy.evaluate(&status), None);
    }

    #[test]
    fn test_latches_are_independent() {
        let mut policy = RestartPolicy::new(true);

        let relaunch_status = ServerStatus {
            config_dirty: true,
            quit: false,
            quit_reason: QuitReason::Shutdown,
        };
        assert_eq!(
            policy.evaluate(&relaunch_status),
            Some(RestartAction::Relaunch)
        );

        // A later quit request is still honored once
        let quit_status = dirty_quit_status(QuitReason::Shutdown);
        assert_eq!(
            policy.evaluate(&quit_status),
            Some(RestartAction::Shutdown(QuitReason::Shutdown))
        );
        assert_eq!(policy.evaluate(&quit_status), None);
    }

    #[test]
    fn test_default_status_is_clean() {
        let status = ServerStatus::default();
        assert!(!status.config_dirty);
        assert!(!status.quit);
    }
}
