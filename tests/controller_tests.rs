use cleaning_robot::{
    Command, CommandError, Heading, PinMap, RobotConfig, RobotController, Rotation, SimHandle,
    hardware,
};
use rstest::{fixture, rstest};

// Controller over the simulated board, initialized at the origin
#[fixture]
fn robot() -> (RobotController, SimHandle) {
    let config = RobotConfig::default();
    let (hardware, sim) = hardware::simulated(&config).unwrap();
    let mut robot = RobotController::new(hardware, config.battery_threshold);
    robot.initialize();
    (robot, sim)
}

// Turns the robot at the origin to face `heading`, then forgets the motor traffic
fn face(robot: &mut RobotController, sim: &SimHandle, heading: Heading) {
    let turns = match heading {
        Heading::N => 0,
        Heading::E => 1,
        Heading::S => 2,
        Heading::W => 3,
    };
    for _ in 0..turns {
        robot.execute(Command::Right).unwrap();
    }
    sim.clear_history();
}

#[rstest]
#[case(Heading::N, Command::Forward, "(0,1,N)")]
#[case(Heading::E, Command::Forward, "(1,0,E)")]
#[case(Heading::S, Command::Forward, "(0,-1,S)")]
#[case(Heading::W, Command::Forward, "(-1,0,W)")]
#[case(Heading::N, Command::Backward, "(0,-1,N)")]
#[case(Heading::E, Command::Backward, "(-1,0,E)")]
#[case(Heading::S, Command::Backward, "(0,1,S)")]
#[case(Heading::W, Command::Backward, "(1,0,W)")]
#[case(Heading::N, Command::Left, "(0,0,W)")]
#[case(Heading::E, Command::Left, "(0,0,N)")]
#[case(Heading::S, Command::Left, "(0,0,E)")]
#[case(Heading::W, Command::Left, "(0,0,S)")]
#[case(Heading::N, Command::Right, "(0,0,E)")]
#[case(Heading::E, Command::Right, "(0,0,S)")]
#[case(Heading::S, Command::Right, "(0,0,W)")]
#[case(Heading::W, Command::Right, "(0,0,N)")]
fn transition_table(
    robot: (RobotController, SimHandle),
    #[case] heading: Heading,
    #[case] command: Command,
    #[case] expected: &str,
) {
    let (mut robot, sim) = robot;
    face(&mut robot, &sim, heading);

    assert_eq!(robot.execute(command).unwrap(), expected);
    match command.rotation() {
        Some(rotation) => {
            assert_eq!(sim.rotations(), vec![rotation]);
            assert_eq!(sim.wheel_activations(), 0);
        }
        None => {
            assert_eq!(sim.wheel_activations(), 1);
            assert!(sim.rotations().is_empty());
        }
    }
}

#[rstest]
#[case(Heading::N, "FORWARD", "(0,0,N)(0,1)")]
#[case(Heading::E, "FORWARD", "(0,0,E)(1,0)")]
#[case(Heading::S, "BACKWARD", "(0,0,S)(0,1)")]
#[case(Heading::W, "BACKWARD", "(0,0,W)(1,0)")]
#[case(Heading::N, "LEFT", "(0,0,N)(0,0)")]
#[case(Heading::S, "RIGHT", "(0,0,S)(0,0)")]
fn obstacle_is_reported_without_moving(
    robot: (RobotController, SimHandle),
    #[case] heading: Heading,
    #[case] token: &str,
    #[case] expected: &str,
) {
    let (mut robot, sim) = robot;
    face(&mut robot, &sim, heading);
    sim.set_obstacle(true);

    assert_eq!(robot.execute_command(token).unwrap(), expected);
    assert_eq!(robot.pose().unwrap().heading, heading);
    assert_eq!(sim.wheel_activations(), 0);
    assert!(sim.rotations().is_empty());
}

#[rstest]
fn forward_with_charge_moves_one_cell(robot: (RobotController, SimHandle)) {
    let (mut robot, sim) = robot;
    sim.set_charge_level(11);

    assert_eq!(robot.execute_command("FORWARD").unwrap(), "(0,1,N)");
    assert_eq!(sim.wheel_activations(), 1);
}

#[rstest]
fn right_turn_drives_rotation_motor_right(robot: (RobotController, SimHandle)) {
    let (mut robot, sim) = robot;
    sim.set_charge_level(11);

    assert_eq!(robot.execute_command("RIGHT").unwrap(), "(0,0,E)");
    assert_eq!(sim.rotations(), vec![Rotation::Right]);
}

#[rstest]
fn low_battery_keeps_position_and_switches_outputs(robot: (RobotController, SimHandle)) {
    let (mut robot, sim) = robot;
    robot.execute(Command::Forward).unwrap();
    robot.manage_cleaning_system();
    assert!(sim.cleaning_system_output());

    sim.set_charge_level(9);
    sim.clear_history();
    assert_eq!(robot.execute(Command::Forward).unwrap(), "!(0,1,N)");
    assert_eq!(sim.wheel_activations(), 0);
    assert!(!sim.cleaning_system_output());
    assert!(sim.recharge_led_output());
    assert!(robot.recharge_led_on());
    assert!(!robot.cleaning_system_on());
}

#[rstest]
fn low_battery_wins_over_obstacle(robot: (RobotController, SimHandle)) {
    let (mut robot, sim) = robot;
    sim.set_charge_level(5);
    sim.set_obstacle(true);

    assert_eq!(robot.execute_command("LEFT").unwrap(), "!(0,0,N)");
}

#[rstest]
fn recharged_battery_restores_cleaning(robot: (RobotController, SimHandle)) {
    let (mut robot, sim) = robot;
    sim.set_charge_level(9);
    robot.manage_cleaning_system();
    assert!(sim.recharge_led_output());

    sim.set_charge_level(11);
    robot.manage_cleaning_system();
    assert!(sim.cleaning_system_output());
    assert!(!sim.recharge_led_output());
    assert!(robot.cleaning_system_on());
}

#[rstest]
fn unknown_token_leaves_state_alone(robot: (RobotController, SimHandle)) {
    let (mut robot, sim) = robot;
    robot.execute(Command::Left).unwrap();
    sim.clear_history();

    let err = robot.execute_command("SPIN").unwrap_err();
    assert_eq!(err, CommandError::Unrecognized("SPIN".to_string()));
    assert_eq!(robot.status(), "(0,0,W)");
    assert_eq!(sim.wheel_activations(), 0);
    assert!(sim.rotations().is_empty());
}

#[rstest]
fn a_short_tour_returns_home(robot: (RobotController, SimHandle)) {
    let (mut robot, sim) = robot;
    for token in ["f", "f", "r", "f", "r", "f", "f", "r", "f", "r"] {
        robot.execute_command(token).unwrap();
    }
    assert_eq!(robot.status(), "(0,0,N)");
    assert_eq!(sim.wheel_activations(), 6);
    assert_eq!(sim.rotations().len(), 4);
}

#[test]
fn initialize_is_idempotent() {
    let (hardware, _sim) = hardware::simulated(&RobotConfig::default()).unwrap();
    let mut robot = RobotController::new(hardware, 10);
    assert_eq!(robot.execute(Command::Forward), Err(CommandError::NotInitialized));

    robot.initialize();
    robot.initialize();
    assert_eq!(robot.status(), "(0,0,N)");
}

#[test]
fn custom_threshold_is_respected() {
    let config = RobotConfig::from_yaml("battery_threshold: 30\nsimulation:\n  initial_charge: 25\n").unwrap();
    let (hardware, sim) = hardware::simulated(&config).unwrap();
    let mut robot = RobotController::new(hardware, config.battery_threshold);
    robot.initialize();

    assert_eq!(robot.execute(Command::Forward).unwrap(), "!(0,0,N)");
    sim.set_charge_level(31);
    assert_eq!(robot.execute(Command::Forward).unwrap(), "(0,1,N)");
}

#[test]
fn simulated_board_uses_configured_pins() {
    let yaml = "pins:\n  recharge_led: 2\n  cleaning_system: 3\n";
    let config = RobotConfig::from_yaml(yaml).unwrap();
    let (hardware, sim) = hardware::simulated(&config).unwrap();
    let mut robot = RobotController::new(hardware, config.battery_threshold);
    robot.initialize();
    robot.manage_cleaning_system();

    assert!(sim.cleaning_system_output());
    assert_eq!(config.pins.infrared, PinMap::default().infrared);
}
