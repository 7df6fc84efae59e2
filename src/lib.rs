//! Cleaning robot controller
//!
//! Navigation and safety logic for a grid-stepping autonomous cleaning robot:
//! pose tracking, motor commands, infrared obstacle avoidance and
//! battery-driven switching between cleaning and recharge mode. Hardware is
//! reached through the collaborator traits in [`hardware`], backed either by
//! Linux sysfs GPIO or by an in-memory simulation.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod config;
pub mod core;
pub mod hardware;

// Re-export commonly used items for easier access
pub use config::{Backend, PinMap, RobotConfig};
pub use crate::core::{Command, CommandError, DeviceMode, Heading, Pose, Rotation, RobotController};
pub use hardware::{Hardware, HardwareError, SimHandle};

/// Crate-level error types
#[derive(Debug)]
pub enum RobotError {
    /// Configuration could not be read or is invalid
    ConfigError(String),
    /// Hardware backend failed to come up
    HardwareError(HardwareError),
    /// Command rejected by the controller
    CommandError(CommandError),
}

impl std::fmt::Display for RobotError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            RobotError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            RobotError::HardwareError(err) => write!(f, "Hardware error: {}", err),
            RobotError::CommandError(err) => write!(f, "Command error: {}", err),
        }
    }
}

impl std::error::Error for RobotError {}

impl From<HardwareError> for RobotError {
    fn from(err: HardwareError) -> Self {
        RobotError::HardwareError(err)
    }
}

impl From<CommandError> for RobotError {
    fn from(err: CommandError) -> Self {
        RobotError::CommandError(err)
    }
}
