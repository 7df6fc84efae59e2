// core/state.rs

// Holds the robot's in-memory world model: grid position, compass heading and
// the two mutually exclusive device outputs (cleaning system, recharge LED).
// There is no map beyond the robot's own cell.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compass heading, cyclic N -> E -> S -> W -> N.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    N,
    E,
    S,
    W,
}

impl Heading {
    /// Unit step in the direction the robot is facing (y grows northwards).
    pub fn forward(self) -> Vector2<i32> {
        match self {
            Heading::N => Vector2::new(0, 1),
            Heading::E => Vector2::new(1, 0),
            Heading::S => Vector2::new(0, -1),
            Heading::W => Vector2::new(-1, 0),
        }
    }

    /// Heading after a 90° counter-clockwise turn
    pub fn left(self) -> Heading {
        match self {
            Heading::N => Heading::W,
            Heading::W => Heading::S,
            Heading::S => Heading::E,
            Heading::E => Heading::N,
        }
    }

    /// Heading after a 90° clockwise turn
    pub fn right(self) -> Heading {
        match self {
            Heading::N => Heading::E,
            Heading::E => Heading::S,
            Heading::S => Heading::W,
            Heading::W => Heading::N,
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let letter = match self {
            Heading::N => "N",
            Heading::E => "E",
            Heading::S => "S",
            Heading::W => "W",
        };
        f.write_str(letter)
    }
}

/// Grid cell plus heading. Coordinates are unbounded signed integers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pose {
    pub position: Vector2<i32>,
    pub heading: Heading,
}

impl Pose {
    /// Origin facing north
    pub fn origin() -> Self {
        Pose {
            position: Vector2::new(0, 0),
            heading: Heading::N,
        }
    }

    pub fn x(&self) -> i32 {
        self.position.x
    }

    pub fn y(&self) -> i32 {
        self.position.y
    }
}

// Renders as "(x,y,heading)", the status string handed back to callers.
impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{},{})", self.position.x, self.position.y, self.heading)
    }
}

/// Last state asserted on the cleaning-system and recharge-LED outputs.
///
/// Both flags start out false; after the first battery check exactly one of
/// them is set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeviceMode {
    pub cleaning_system_on: bool,
    pub recharge_led_on: bool,
}

impl DeviceMode {
    /// Mode for the given charge: cleaning above the threshold, recharging otherwise.
    pub fn for_charge(charge: u8, threshold: u8) -> Self {
        let active = charge > threshold;
        DeviceMode {
            cleaning_system_on: active,
            recharge_led_on: !active,
        }
    }
}
