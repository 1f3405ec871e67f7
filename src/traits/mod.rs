pub mod activity;
pub mod process;

pub use activity::ActivityBehavior;
pub use process::{NullProcessControl, ProcessControl};
