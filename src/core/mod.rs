// core/mod.rs

// Declares and exposes the robot's core: world state, motion commands and the
// command-execution controller.

pub mod command;
pub mod controller;
pub mod state;

pub use command::{Command, CommandError, Rotation};
pub use controller::RobotController;
pub use state::{DeviceMode, Heading, Pose};
