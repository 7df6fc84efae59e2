// src/main.rs
// Entry point: loads the configuration, brings up the hardware backend and
// feeds stdin lines to the robot controller, one command per line.

use cleaning_robot::{Backend, RobotConfig, RobotController, SimHandle, hardware};
use log::{error, info};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Handles the simulation-only inputs. Returns false if the line is not one of them.
fn simulation_input(sim: &SimHandle, line: &str) -> bool {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("battery"), Some(value)) => match value.parse::<u8>() {
            Ok(percent) => {
                sim.set_charge_level(percent);
                info!("Simulated battery set to {}%", sim.charge_level());
            }
            Err(_) => eprintln!("battery expects a percentage, got {:?}", value),
        },
        (Some("obstacle"), Some(value)) => match value {
            "on" => sim.set_obstacle(true),
            "off" => sim.set_obstacle(false),
            _ => eprintln!("obstacle expects on|off, got {:?}", value),
        },
        _ => return false,
    }
    true
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => RobotConfig::from_file(Path::new(&path))?,
        None => RobotConfig::default(),
    };
    info!("Starting cleaning robot ({:?} backend)", config.backend);

    let (hardware, sim) = match config.backend {
        Backend::Sysfs => (hardware::sysfs(&config)?, None),
        Backend::Simulated => {
            let (hardware, handle) = hardware::simulated(&config)?;
            (hardware, Some(handle))
        }
    };

    let mut robot = RobotController::new(hardware, config.battery_threshold);
    robot.initialize();
    robot.manage_cleaning_system();
    println!("{}", robot.status());

    let stdout = io::stdout();
    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("quit") {
            break;
        }
        if line.eq_ignore_ascii_case("status") {
            println!("{}", robot.status());
            continue;
        }
        if let Some(handle) = &sim {
            if simulation_input(handle, line) {
                continue;
            }
        }

        match robot.execute_command(line) {
            Ok(status) => println!("{}", status),
            Err(e) => {
                error!("{}", e);
                eprintln!("{}", e);
            }
        }
        stdout.lock().flush()?;
    }

    info!("Cleaning robot stopped at {}", robot.status());
    Ok(())
}
