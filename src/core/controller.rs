// core/controller.rs

// Command-execution state machine for the cleaning robot. Each call reads a
// fresh battery level, then either falls back to recharge mode, reports an
// obstacle, or moves the robot one step and updates its pose.

use super::command::{Command, CommandError, Rotation};
use super::state::{DeviceMode, Pose};
use crate::hardware::Hardware;
use log::{info, warn};

/// Robot controller: owns the pose and the device mode, drives the hardware.
pub struct RobotController {
    hardware: Hardware,
    battery_threshold: u8,
    pose: Option<Pose>,
    mode: DeviceMode,
}

impl RobotController {
    /// Creates a controller. The pose stays unset until [`initialize`](Self::initialize).
    pub fn new(hardware: Hardware, battery_threshold: u8) -> Self {
        RobotController {
            hardware,
            battery_threshold,
            pose: None,
            mode: DeviceMode::default(),
        }
    }

    /// Puts the robot at (0,0) facing north, whatever its previous state.
    pub fn initialize(&mut self) {
        self.pose = Some(Pose::origin());
        info!("Robot initialized at {}", Pose::origin());
    }

    /// Current `"(x,y,heading)"` snapshot.
    ///
    /// Meant to be called after `initialize`; before that it returns `"(?,?,?)"`.
    pub fn status(&self) -> String {
        match &self.pose {
            Some(pose) => pose.to_string(),
            None => "(?,?,?)".to_string(),
        }
    }

    /// Parses a command token and executes it.
    ///
    /// Unrecognized tokens are rejected before any sensor or actuator is touched.
    pub fn execute_command(&mut self, token: &str) -> Result<String, CommandError> {
        let command: Command = token.parse()?;
        self.execute(command)
    }

    /// Runs one control cycle for `command` and returns the status string:
    /// - `"!(x,y,h)"` when the battery is at or below the threshold (no motion, recharge mode)
    /// - `"(x,y,h)(ox,oy)"` when an obstacle blocks the robot (no motion)
    /// - `"(x,y,h)"` after a successful move
    pub fn execute(&mut self, command: Command) -> Result<String, CommandError> {
        let pose = self.pose.ok_or(CommandError::NotInitialized)?;

        let charge = self.hardware.battery.charge_level();
        if charge <= self.battery_threshold {
            warn!("Battery at {}%, ignoring {} and switching to recharge", charge, command);
            self.manage_cleaning_system();
            return Ok(format!("!{}", self.status()));
        }

        if self.obstacle_found() {
            let (ox, oy) = project_obstacle(&pose, command);
            warn!("Obstacle at ({},{}), {} not executed", ox, oy, command);
            return Ok(format!("{}({},{})", self.status(), ox, oy));
        }

        let next = match command {
            Command::Forward => {
                self.hardware.wheel_motor.drive();
                Pose { position: pose.position + pose.heading.forward(), ..pose }
            }
            Command::Backward => {
                self.hardware.wheel_motor.drive();
                Pose { position: pose.position - pose.heading.forward(), ..pose }
            }
            Command::Left => {
                self.hardware.rotation_motor.rotate(Rotation::Left);
                Pose { heading: pose.heading.left(), ..pose }
            }
            Command::Right => {
                self.hardware.rotation_motor.rotate(Rotation::Right);
                Pose { heading: pose.heading.right(), ..pose }
            }
        };
        self.pose = Some(next);
        info!("{} -> {}", command, next);

        Ok(self.status())
    }

    /// Cell the robot would have entered with `command`; rotations stay in place.
    pub fn obstacle_position(&self, command: Command) -> Option<(i32, i32)> {
        self.pose.as_ref().map(|pose| project_obstacle(pose, command))
    }

    /// Re-reads the battery and asserts both device outputs: cleaning above
    /// the threshold, recharge LED otherwise. Outputs are written every time,
    /// even when the mode does not change.
    pub fn manage_cleaning_system(&mut self) {
        let charge = self.hardware.battery.charge_level();
        let mode = DeviceMode::for_charge(charge, self.battery_threshold);

        self.hardware.recharge_led.set_active(mode.recharge_led_on);
        self.hardware.cleaning_system.set_active(mode.cleaning_system_on);

        if mode != self.mode {
            if mode.cleaning_system_on {
                info!("Battery at {}%: cleaning system on", charge);
            } else {
                warn!("Battery at {}%: cleaning system off, recharge LED on", charge);
            }
        }
        self.mode = mode;
    }

    /// Passes the infrared sensor reading through.
    pub fn obstacle_found(&self) -> bool {
        self.hardware.obstacle_sensor.read()
    }

    pub fn pose(&self) -> Option<Pose> {
        self.pose
    }

    pub fn device_mode(&self) -> DeviceMode {
        self.mode
    }

    pub fn cleaning_system_on(&self) -> bool {
        self.mode.cleaning_system_on
    }

    pub fn recharge_led_on(&self) -> bool {
        self.mode.recharge_led_on
    }

    pub fn battery_threshold(&self) -> u8 {
        self.battery_threshold
    }
}

fn project_obstacle(pose: &Pose, command: Command) -> (i32, i32) {
    let cell = match command {
        Command::Forward => pose.position + pose.heading.forward(),
        Command::Backward => pose.position - pose.heading.forward(),
        Command::Left | Command::Right => pose.position,
    };
    (cell.x, cell.y)
}
