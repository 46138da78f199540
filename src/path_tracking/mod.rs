// Path Tracking module

pub mod cross_track;
pub mod pid;
pub mod pid_tracker;
pub mod simulation;

pub use cross_track::*;
pub use pid::*;
pub use pid_tracker::*;
pub use simulation::*;
