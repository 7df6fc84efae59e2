// hardware/sim.rs

// In-memory stand-in for the robot board. Pins keep their levels and every
// write is recorded, so tests can check the exact pin traffic. The battery is
// a settable percentage. Motors run with no settle delay.

use super::gpio::{GpioBus, PinMode, SharedBus};
use super::{BatteryMonitor, HardwareError};
use crate::config::PinMap;
use crate::core::Rotation;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Pin-level simulation of the GPIO header
#[derive(Debug, Default)]
pub struct SimulatedGpio {
    modes: HashMap<u8, PinMode>,
    levels: HashMap<u8, bool>,
    writes: Vec<(u8, bool)>,
}

impl SimulatedGpio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the level seen on an input pin
    pub fn set_input(&mut self, pin: u8, high: bool) {
        self.levels.insert(pin, high);
    }

    /// Current level of a pin, low if never driven
    pub fn level(&self, pin: u8) -> bool {
        self.levels.get(&pin).copied().unwrap_or(false)
    }

    /// Every successful write in order
    pub fn writes(&self) -> &[(u8, bool)] {
        &self.writes
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }
}

impl GpioBus for SimulatedGpio {
    fn setup(&mut self, pin: u8, mode: PinMode) -> Result<(), HardwareError> {
        self.modes.insert(pin, mode);
        if mode == PinMode::Output {
            self.levels.insert(pin, false);
        }
        Ok(())
    }

    fn write(&mut self, pin: u8, high: bool) -> Result<(), HardwareError> {
        match self.modes.get(&pin) {
            Some(PinMode::Output) => {
                self.levels.insert(pin, high);
                self.writes.push((pin, high));
                Ok(())
            }
            _ => Err(HardwareError::InvalidMode(pin)),
        }
    }

    fn read(&mut self, pin: u8) -> Result<bool, HardwareError> {
        if self.modes.contains_key(&pin) {
            Ok(self.level(pin))
        } else {
            Err(HardwareError::InvalidMode(pin))
        }
    }
}

/// Battery gauge backed by a shared percentage
#[derive(Debug, Clone)]
pub struct SimulatedBattery {
    charge: Rc<Cell<u8>>,
}

impl BatteryMonitor for SimulatedBattery {
    fn charge_level(&self) -> u8 {
        self.charge.get()
    }
}

/// Test-side view of a simulated board.
///
/// Cloning the handle shares the same board.
#[derive(Clone)]
pub struct SimHandle {
    gpio: Rc<RefCell<SimulatedGpio>>,
    charge: Rc<Cell<u8>>,
    pins: PinMap,
}

impl SimHandle {
    pub fn new(pins: PinMap, initial_charge: u8) -> Self {
        SimHandle {
            gpio: Rc::new(RefCell::new(SimulatedGpio::new())),
            charge: Rc::new(Cell::new(initial_charge.min(100))),
            pins,
        }
    }

    /// Bus view for the GPIO device layer
    pub fn bus(&self) -> SharedBus {
        self.gpio.clone()
    }

    pub fn battery(&self) -> SimulatedBattery {
        SimulatedBattery {
            charge: self.charge.clone(),
        }
    }

    /// Clamped to 100
    pub fn set_charge_level(&self, percent: u8) {
        self.charge.set(percent.min(100));
    }

    pub fn charge_level(&self) -> u8 {
        self.charge.get()
    }

    pub fn set_obstacle(&self, present: bool) {
        self.gpio.borrow_mut().set_input(self.pins.infrared, present);
    }

    pub fn cleaning_system_output(&self) -> bool {
        self.gpio.borrow().level(self.pins.cleaning_system)
    }

    pub fn recharge_led_output(&self) -> bool {
        self.gpio.borrow().level(self.pins.recharge_led)
    }

    /// Number of times the wheel motor was energized
    pub fn wheel_activations(&self) -> usize {
        let pwma = self.pins.pwma;
        self.gpio
            .borrow()
            .writes()
            .iter()
            .filter(|&&(pin, high)| pin == pwma && high)
            .count()
    }

    /// Rotations performed, reconstructed from the BIN1 level at each PWMB pulse
    pub fn rotations(&self) -> Vec<Rotation> {
        let gpio = self.gpio.borrow();
        let mut bin1 = false;
        let mut rotations = Vec::new();
        for &(pin, high) in gpio.writes() {
            if pin == self.pins.bin1 {
                bin1 = high;
            } else if pin == self.pins.pwmb && high {
                rotations.push(if bin1 { Rotation::Left } else { Rotation::Right });
            }
        }
        rotations
    }

    /// Forgets recorded pin traffic, keeps levels
    pub fn clear_history(&self) {
        self.gpio.borrow_mut().clear_writes();
    }
}
