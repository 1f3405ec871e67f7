use crate::domain::QuitReason;

/// Host seam for the two opaque process-level operations
///
/// Both are invoked only through delayed, one-shot commands scheduled by
/// the server-restart policy (or an end-session flow).
pub trait ProcessControl {
    /// Exit the process
    fn quit(&mut self, reason: QuitReason);

    /// Relaunch the hosting session with the updated server config
    fn relaunch_session(&mut self);
}

/// Process control that does nothing; suitable for clients and tests
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProcessControl;

impl ProcessControl for NullProcessControl {
    fn quit(&mut self, _reason: QuitReason) {}

    fn relaunch_session(&mut self) {}
}
