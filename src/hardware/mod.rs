//! Hardware access for the cleaning robot
//!
//! The controller only ever talks to the collaborator traits defined here.
//! Two backends provide them: a Linux sysfs backend for the real board and an
//! in-memory simulation used by tests and the interactive binary. Both go
//! through the same GPIO device layer, so the pin protocol is identical.

pub mod gpio;
pub mod sim;
pub mod sysfs;

use crate::config::RobotConfig;
use crate::core::Rotation;
use log::info;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub use gpio::{GpioBus, GpioInfraredSensor, GpioRotationMotor, GpioSwitch, GpioWheelMotor, PinMode, SharedBus};
pub use sim::{SimHandle, SimulatedBattery, SimulatedGpio};
pub use sysfs::{SysfsBattery, SysfsGpio};

/// Infrared obstacle detector in front of the robot.
#[cfg_attr(test, mockall::automock)]
pub trait ObstacleSensor {
    /// True if something currently blocks the path
    fn read(&self) -> bool;
}

/// Battery charge gauge.
#[cfg_attr(test, mockall::automock)]
pub trait BatteryMonitor {
    /// Remaining charge in percent, 0..=100
    fn charge_level(&self) -> u8;
}

/// Drive motor. Blocks for the settle delay on real hardware.
#[cfg_attr(test, mockall::automock)]
pub trait WheelMotor {
    fn drive(&mut self);
}

/// Steering motor. Blocks for the settle delay on real hardware.
#[cfg_attr(test, mockall::automock)]
pub trait RotationMotor {
    fn rotate(&mut self, rotation: Rotation);
}

/// Binary output such as the cleaning system or the recharge LED.
#[cfg_attr(test, mockall::automock)]
pub trait Switch {
    fn set_active(&mut self, active: bool);
}

/// Capability set handed to the controller at construction.
pub struct Hardware {
    pub obstacle_sensor: Box<dyn ObstacleSensor>,
    pub battery: Box<dyn BatteryMonitor>,
    pub wheel_motor: Box<dyn WheelMotor>,
    pub rotation_motor: Box<dyn RotationMotor>,
    pub cleaning_system: Box<dyn Switch>,
    pub recharge_led: Box<dyn Switch>,
}

/// GPIO or battery access failure
#[derive(Debug)]
pub enum HardwareError {
    /// Underlying file or device I/O failed
    Io(std::io::Error),
    /// Pin used in a mode it was not set up for
    InvalidMode(u8),
    /// Device returned something that could not be interpreted
    InvalidValue(String),
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HardwareError::Io(err) => write!(f, "I/O error: {}", err),
            HardwareError::InvalidMode(pin) => write!(f, "Pin {} not configured for this operation", pin),
            HardwareError::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
        }
    }
}

impl std::error::Error for HardwareError {}

impl From<std::io::Error> for HardwareError {
    fn from(err: std::io::Error) -> Self {
        HardwareError::Io(err)
    }
}

/// Wires the GPIO devices onto an already constructed bus.
fn gpio_devices(bus: SharedBus, battery: Box<dyn BatteryMonitor>, config: &RobotConfig) -> Result<Hardware, HardwareError> {
    let pins = &config.pins;
    gpio::setup_pins(&bus, pins)?;
    let settle_delay = config.settle_delay();

    Ok(Hardware {
        obstacle_sensor: Box::new(GpioInfraredSensor::new(bus.clone(), pins.infrared)),
        battery,
        wheel_motor: Box::new(GpioWheelMotor::new(bus.clone(), pins, settle_delay)),
        rotation_motor: Box::new(GpioRotationMotor::new(bus.clone(), pins, settle_delay)),
        cleaning_system: Box::new(GpioSwitch::new(bus.clone(), pins.cleaning_system, "cleaning system")),
        recharge_led: Box::new(GpioSwitch::new(bus, pins.recharge_led, "recharge LED")),
    })
}

/// Real board: sysfs GPIO plus the power-supply capacity file.
pub fn sysfs(config: &RobotConfig) -> Result<Hardware, HardwareError> {
    info!("Opening sysfs GPIO at {}", config.gpio_root.display());
    let bus: SharedBus = Rc::new(RefCell::new(SysfsGpio::new(&config.gpio_root)));
    let battery = Box::new(SysfsBattery::new(&config.battery_path));
    gpio_devices(bus, battery, config)
}

/// In-memory board with a handle for driving sensor inputs and inspecting outputs.
pub fn simulated(config: &RobotConfig) -> Result<(Hardware, SimHandle), HardwareError> {
    info!(
        "Using simulated hardware (initial charge {}%)",
        config.simulation.initial_charge
    );
    let handle = SimHandle::new(config.pins.clone(), config.simulation.initial_charge);
    handle.set_obstacle(config.simulation.obstacle);
    let hardware = gpio_devices(handle.bus(), Box::new(handle.battery()), config)?;
    Ok((hardware, handle))
}
