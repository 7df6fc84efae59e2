// hardware/sysfs.rs

// Linux sysfs access for the real board: GPIO through /sys/class/gpio and the
// battery gauge through a power_supply `capacity` file.

use super::gpio::{GpioBus, PinMode};
use super::{BatteryMonitor, HardwareError};
use log::{debug, error};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// GPIO pins exported through the sysfs interface (BCM numbering)
pub struct SysfsGpio {
    root: PathBuf,
    exported: HashSet<u8>,
}

impl SysfsGpio {
    pub fn new(root: &Path) -> Self {
        SysfsGpio {
            root: root.to_path_buf(),
            exported: HashSet::new(),
        }
    }

    fn pin_dir(&self, pin: u8) -> PathBuf {
        self.root.join(format!("gpio{}", pin))
    }

    fn export(&mut self, pin: u8) -> Result<(), HardwareError> {
        if self.exported.contains(&pin) {
            return Ok(());
        }
        if !self.pin_dir(pin).exists() {
            debug!("Exporting GPIO {}", pin);
            fs::write(self.root.join("export"), pin.to_string())?;
        }
        self.exported.insert(pin);
        Ok(())
    }
}

impl GpioBus for SysfsGpio {
    fn setup(&mut self, pin: u8, mode: PinMode) -> Result<(), HardwareError> {
        self.export(pin)?;
        let direction = match mode {
            PinMode::Input => "in",
            PinMode::Output => "out",
        };
        fs::write(self.pin_dir(pin).join("direction"), direction)?;
        Ok(())
    }

    fn write(&mut self, pin: u8, high: bool) -> Result<(), HardwareError> {
        if !self.exported.contains(&pin) {
            return Err(HardwareError::InvalidMode(pin));
        }
        fs::write(self.pin_dir(pin).join("value"), if high { "1" } else { "0" })?;
        Ok(())
    }

    fn read(&mut self, pin: u8) -> Result<bool, HardwareError> {
        if !self.exported.contains(&pin) {
            return Err(HardwareError::InvalidMode(pin));
        }
        let raw = fs::read_to_string(self.pin_dir(pin).join("value"))?;
        match raw.trim() {
            "1" => Ok(true),
            "0" => Ok(false),
            other => Err(HardwareError::InvalidValue(format!("GPIO {} value {:?}", pin, other))),
        }
    }
}

/// Battery gauge reading a power_supply `capacity` file
pub struct SysfsBattery {
    path: PathBuf,
}

impl SysfsBattery {
    pub fn new(path: &Path) -> Self {
        SysfsBattery {
            path: path.to_path_buf(),
        }
    }

    fn read_capacity(&self) -> Result<u8, HardwareError> {
        let raw = fs::read_to_string(&self.path)?;
        let percent: u32 = raw
            .trim()
            .parse()
            .map_err(|_| HardwareError::InvalidValue(format!("battery capacity {:?}", raw.trim())))?;
        Ok(percent.min(100) as u8)
    }
}

impl BatteryMonitor for SysfsBattery {
    fn charge_level(&self) -> u8 {
        match self.read_capacity() {
            Ok(percent) => percent,
            Err(e) => {
                // Unknown charge is treated as empty
                error!("Failed to read battery at {}: {}", self.path.display(), e);
                0
            }
        }
    }
}
