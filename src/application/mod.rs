pub mod commands;
pub mod queue;
pub mod scheduler;
pub mod session;

pub use commands::SessionCommand;
pub use queue::{CommandQueue, QueueError};
pub use scheduler::{DueCommand, Scheduler};
pub use session::{ActivityContext, InputAssignment, Session, SessionError};
