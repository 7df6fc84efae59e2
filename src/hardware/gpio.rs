//! GPIO-backed robot devices
//!
//! Pin protocol for the dual-channel motor driver board:
//!
//! | Device         | Active pins                         | Direction            |
//! |----------------|-------------------------------------|----------------------|
//! | Wheel motor    | AIN1=1, AIN2=0, PWMA=1, STBY=1      | clockwise            |
//! | Rotation motor | BIN1/BIN2, PWMB=1, STBY=1           | L: 1/0, R: 0/1       |
//!
//! After the settle delay every pin of the channel is pulled low again.

use super::{HardwareError, ObstacleSensor, RotationMotor, Switch, WheelMotor};
use crate::config::PinMap;
use crate::core::Rotation;
use log::{debug, error};
use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinMode {
    Input,
    Output,
}

/// Raw pin access. Implemented by the sysfs and simulated backends.
pub trait GpioBus {
    fn setup(&mut self, pin: u8, mode: PinMode) -> Result<(), HardwareError>;
    fn write(&mut self, pin: u8, high: bool) -> Result<(), HardwareError>;
    fn read(&mut self, pin: u8) -> Result<bool, HardwareError>;
}

/// One bus shared by every device on the board
pub type SharedBus = Rc<RefCell<dyn GpioBus>>;

/// Configures the infrared pin as input and every actuator pin as output.
pub fn setup_pins(bus: &SharedBus, pins: &PinMap) -> Result<(), HardwareError> {
    let mut bus = bus.borrow_mut();
    bus.setup(pins.infrared, PinMode::Input)?;
    for pin in pins.outputs() {
        bus.setup(pin, PinMode::Output)?;
    }
    Ok(())
}

// Writes a sequence of levels. Failures are logged and the sequence continues,
// so a stuck pin never leaves the rest of the channel energized.
fn write_levels(bus: &SharedBus, levels: &[(u8, bool)]) {
    let mut bus = bus.borrow_mut();
    for &(pin, high) in levels {
        debug!("GPIO {} <- {}", pin, if high { "HIGH" } else { "LOW" });
        if let Err(e) = bus.write(pin, high) {
            error!("Failed to drive GPIO {}: {}", pin, e);
        }
    }
}

fn settle(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}

/// Drive motor on channel A of the driver board
pub struct GpioWheelMotor {
    bus: SharedBus,
    ain1: u8,
    ain2: u8,
    pwma: u8,
    stby: u8,
    settle_delay: Duration,
}

impl GpioWheelMotor {
    pub fn new(bus: SharedBus, pins: &PinMap, settle_delay: Duration) -> Self {
        GpioWheelMotor {
            bus,
            ain1: pins.ain1,
            ain2: pins.ain2,
            pwma: pins.pwma,
            stby: pins.stby,
            settle_delay,
        }
    }
}

impl WheelMotor for GpioWheelMotor {
    fn drive(&mut self) {
        write_levels(
            &self.bus,
            &[(self.ain1, true), (self.ain2, false), (self.pwma, true), (self.stby, true)],
        );
        settle(self.settle_delay);
        write_levels(
            &self.bus,
            &[(self.ain1, false), (self.ain2, false), (self.pwma, false), (self.stby, false)],
        );
    }
}

/// Steering motor on channel B of the driver board
pub struct GpioRotationMotor {
    bus: SharedBus,
    bin1: u8,
    bin2: u8,
    pwmb: u8,
    stby: u8,
    settle_delay: Duration,
}

impl GpioRotationMotor {
    pub fn new(bus: SharedBus, pins: &PinMap, settle_delay: Duration) -> Self {
        GpioRotationMotor {
            bus,
            bin1: pins.bin1,
            bin2: pins.bin2,
            pwmb: pins.pwmb,
            stby: pins.stby,
            settle_delay,
        }
    }
}

impl RotationMotor for GpioRotationMotor {
    fn rotate(&mut self, rotation: Rotation) {
        let (bin1, bin2) = match rotation {
            Rotation::Left => (true, false),
            Rotation::Right => (false, true),
        };
        write_levels(
            &self.bus,
            &[(self.bin1, bin1), (self.bin2, bin2), (self.pwmb, true), (self.stby, true)],
        );
        settle(self.settle_delay);
        write_levels(
            &self.bus,
            &[(self.bin1, false), (self.bin2, false), (self.pwmb, false), (self.stby, false)],
        );
    }
}

/// Infrared obstacle sensor on a single input pin (high = obstacle)
pub struct GpioInfraredSensor {
    bus: SharedBus,
    pin: u8,
}

impl GpioInfraredSensor {
    pub fn new(bus: SharedBus, pin: u8) -> Self {
        GpioInfraredSensor { bus, pin }
    }
}

impl ObstacleSensor for GpioInfraredSensor {
    fn read(&self) -> bool {
        match self.bus.borrow_mut().read(self.pin) {
            Ok(level) => level,
            Err(e) => {
                // Unreadable sensor counts as blocked
                error!("Failed to read infrared sensor on GPIO {}: {}", self.pin, e);
                true
            }
        }
    }
}

/// Single output pin switching a device on or off
pub struct GpioSwitch {
    bus: SharedBus,
    pin: u8,
    name: &'static str,
}

impl GpioSwitch {
    pub fn new(bus: SharedBus, pin: u8, name: &'static str) -> Self {
        GpioSwitch { bus, pin, name }
    }
}

impl Switch for GpioSwitch {
    fn set_active(&mut self, active: bool) {
        debug!("{} -> {}", self.name, if active { "on" } else { "off" });
        write_levels(&self.bus, &[(self.pin, active)]);
    }
}
