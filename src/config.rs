// src/config.rs
// Robot configuration, loaded from YAML.

use crate::RobotError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Which hardware backend drives the robot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Linux sysfs GPIO and power-supply gauge
    Sysfs,
    /// In-memory board, no settle delay
    Simulated,
}

/// GPIO pin assignment (BCM numbering)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinMap {
    pub recharge_led: u8,
    pub cleaning_system: u8,
    pub infrared: u8,
    pub pwma: u8,
    pub ain2: u8,
    pub ain1: u8,
    pub bin1: u8,
    pub bin2: u8,
    pub pwmb: u8,
    pub stby: u8,
}

impl PinMap {
    /// Every pin driven as an output
    pub fn outputs(&self) -> [u8; 9] {
        [
            self.recharge_led,
            self.cleaning_system,
            self.pwma,
            self.ain2,
            self.ain1,
            self.bin1,
            self.bin2,
            self.pwmb,
            self.stby,
        ]
    }
}

impl Default for PinMap {
    fn default() -> Self {
        PinMap {
            recharge_led: 18,
            cleaning_system: 27,
            infrared: 22,
            pwma: 23,
            ain2: 24,
            ain1: 25,
            bin1: 5,
            bin2: 6,
            pwmb: 12,
            stby: 13,
        }
    }
}

/// Simulated backend parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Battery charge at start, percent
    pub initial_charge: u8,
    /// Whether the infrared sensor starts out blocked
    pub obstacle: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            initial_charge: 100,
            obstacle: false,
        }
    }
}

/// Main configuration structure for the robot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    /// Hardware backend
    pub backend: Backend,
    /// Wait after each motor command on real hardware
    pub settle_delay_ms: u64,
    /// At or below this charge the robot stops moving and recharges
    pub battery_threshold: u8,
    /// Pin assignment
    pub pins: PinMap,
    /// sysfs GPIO root
    pub gpio_root: PathBuf,
    /// power_supply capacity file
    pub battery_path: PathBuf,
    /// Simulated backend settings
    pub simulation: SimulationConfig,
}

impl Default for RobotConfig {
    fn default() -> Self {
        RobotConfig {
            backend: Backend::Simulated,
            settle_delay_ms: 1000,
            battery_threshold: 10,
            pins: PinMap::default(),
            gpio_root: PathBuf::from("/sys/class/gpio"),
            battery_path: PathBuf::from("/sys/class/power_supply/BAT0/capacity"),
            simulation: SimulationConfig::default(),
        }
    }
}

impl RobotConfig {
    /// Loads and validates a YAML configuration file
    pub fn from_file(path: &Path) -> Result<Self, RobotError> {
        let file = std::fs::File::open(path)
            .map_err(|e| RobotError::ConfigError(format!("{}: {}", path.display(), e)))?;
        let config: RobotConfig = serde_yaml::from_reader(file)
            .map_err(|e| RobotError::ConfigError(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates YAML text
    pub fn from_yaml(text: &str) -> Result<Self, RobotError> {
        let config: RobotConfig =
            serde_yaml::from_str(text).map_err(|e| RobotError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects out-of-range percentages and pins assigned twice
    pub fn validate(&self) -> Result<(), RobotError> {
        if self.battery_threshold > 100 {
            return Err(RobotError::ConfigError(format!(
                "battery_threshold {} exceeds 100",
                self.battery_threshold
            )));
        }
        if self.simulation.initial_charge > 100 {
            return Err(RobotError::ConfigError(format!(
                "simulation.initial_charge {} exceeds 100",
                self.simulation.initial_charge
            )));
        }

        let mut seen = HashSet::new();
        for pin in std::iter::once(self.pins.infrared).chain(self.pins.outputs()) {
            if !seen.insert(pin) {
                return Err(RobotError::ConfigError(format!("GPIO {} assigned twice", pin)));
            }
        }
        Ok(())
    }

    /// Settle delay actually applied; always zero on the simulated backend
    pub fn settle_delay(&self) -> Duration {
        match self.backend {
            Backend::Sysfs => Duration::from_millis(self.settle_delay_ms),
            Backend::Simulated => Duration::ZERO,
        }
    }
}
