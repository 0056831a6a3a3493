//! End-to-end runs of machines against the reference worlds.

use automata::builder::{Diagram, StateMachineBuilder, TransitionBuilder};
use automata::core::Signals;
use automata::games;
use automata::machine::StateMachine;
use automata::simulation::{drive, LoopHandle, Phase, SimulationLoop};
use automata::world::gate::{CLOSED, OPEN};
use automata::world::{GateWorld, RobotConfig, RobotWorld, Status, World, WorldStatus};
use std::time::Duration;

const GATE_SOLUTION: &str = r#"{
    "states": [
        { "id": "Idle", "output": "00", "initial": true, "x": 40, "y": 40 },
        { "id": "Opening", "output": "10" },
        { "id": "Open", "output": "00" },
        { "id": "Passing", "output": "00" },
        { "id": "Closing", "output": "01" }
    ],
    "transitions": [
        { "source": "Idle", "target": "Opening", "guard": "1***" },
        { "source": "Opening", "target": "Open", "guard": "*1**" },
        { "source": "Open", "target": "Passing", "guard": "***1" },
        { "source": "Passing", "target": "Closing", "guard": "***0" },
        { "source": "Closing", "target": "Idle", "guard": "**1*" }
    ]
}"#;

fn gate_solution() -> StateMachine {
    Diagram::from_json(GATE_SOLUTION)
        .unwrap()
        .validate(4, 2)
        .unwrap()
}

fn constant(sensors: usize, output: &str) -> StateMachine {
    StateMachineBuilder::new()
        .sensors(sensors)
        .actuators(output.len())
        .state("Hold", output)
        .initial("Hold")
        .build()
        .unwrap()
}

fn around_the_wall() -> StateMachine {
    let edge = |from: &str, to: &str, guard: &str| {
        TransitionBuilder::new().from(from).to(to).when(guard)
    };
    StateMachineBuilder::new()
        .sensors(4)
        .actuators(4)
        .state("Forward", "1010")
        .state("TurnLeft", "0110")
        .state("Climb", "1010")
        .state("TurnRight", "1001")
        .state("Cross", "1010")
        .state("Over", "1010")
        .state("TurnDown", "1001")
        .state("Descend", "1010")
        .initial("Forward")
        .transitions([
            edge("Forward", "TurnLeft", "**1*"),
            edge("TurnLeft", "Climb", "***1"),
            edge("Climb", "TurnRight", "*0**"),
            edge("TurnRight", "Cross", "***1"),
            edge("Cross", "Over", "*1**"),
            edge("Over", "TurnDown", "*0**"),
            edge("TurnDown", "Descend", "***1"),
        ])
        .build()
        .unwrap()
}

#[test]
fn raising_the_gate_opens_it_until_lowered() {
    let mut machine = constant(4, "10");
    let mut world = GateWorld::default();

    for tick in 1..=100u64 {
        let actuators = machine.step(world.sensors()).unwrap();
        world.step(&actuators);
        // 60 units of travel at one unit per tick
        assert_eq!(world.sensors().get(OPEN), tick >= 60, "tick {tick}");
    }

    world.step(&"01".parse::<Signals>().unwrap());
    assert!(!world.sensors().get(OPEN));
    assert!(!world.sensors().get(CLOSED));
}

#[test]
fn lowering_onto_a_car_is_an_error() {
    let machine = StateMachineBuilder::new()
        .sensors(4)
        .actuators(2)
        .state("Closed", "00")
        .state("Opening", "10")
        .state("Open", "00")
        .state("Closing", "01")
        .initial("Closed")
        .transitions([
            TransitionBuilder::new().from("Closed").to("Opening").when("1***"),
            TransitionBuilder::new().from("Opening").to("Open").when("*1**"),
            TransitionBuilder::new().from("Open").to("Closing").when("***1"),
        ])
        .build()
        .unwrap();

    let mut sim = SimulationLoop::new(machine, GateWorld::default()).unwrap();
    let report = sim.run(1_000).unwrap().unwrap();

    assert!(sim.world().crushed());
    assert_eq!(report.outcome.status, Status::Error);
    assert_eq!(
        report.outcome.message.as_deref(),
        Some("Do not close the gate when a car is passing through.")
    );
}

#[test]
fn correct_gate_diagram_succeeds() {
    let mut sim = SimulationLoop::new(gate_solution(), games::open_the_gate()).unwrap();
    let report = sim.run(1_000).unwrap().unwrap();

    assert_eq!(report.outcome.status, Status::Success);
    assert_eq!(report.final_state, "Idle");
    assert_eq!(sim.phase(), Phase::Finished);
    assert!(sim.machine().history().get_path().contains(&"Passing"));
}

#[test]
fn holding_both_commands_ends_with_a_warning() {
    let machine = StateMachineBuilder::new()
        .sensors(4)
        .actuators(2)
        .state("Idle", "00")
        .state("Jam", "11")
        .state("Opening", "10")
        .state("Open", "00")
        .initial("Idle")
        .transitions([
            TransitionBuilder::new().from("Idle").to("Jam").when("1***"),
            TransitionBuilder::new().from("Jam").to("Opening").when("****"),
            TransitionBuilder::new().from("Opening").to("Open").when("*1**"),
        ])
        .build()
        .unwrap();

    let mut sim = SimulationLoop::new(machine, GateWorld::default()).unwrap();
    let report = sim.run(1_000).unwrap().unwrap();

    assert_eq!(report.outcome.status, Status::Warning);
    assert!(report.problem_ticks >= 1);
}

#[test]
fn unchanged_outputs_survive_state_changes() {
    let mut machine = StateMachineBuilder::new()
        .sensors(1)
        .actuators(2)
        .state("A", "1*")
        .state("B", "*0")
        .state("C", "**")
        .initial("A")
        .transitions([
            TransitionBuilder::new().from("A").to("B").when("1"),
            TransitionBuilder::new().from("B").to("C").when("1"),
            TransitionBuilder::new().from("C").to("A").when("1"),
        ])
        .build()
        .unwrap();

    let hold = Signals::zeros(1);
    let go: Signals = "1".parse().unwrap();

    assert_eq!(machine.step(&hold).unwrap().to_string(), "10");
    assert_eq!(machine.step(&go).unwrap().to_string(), "10");
    for _ in 0..5 {
        assert_eq!(machine.step(&hold).unwrap().to_string(), "10");
    }
    assert_eq!(machine.step(&go).unwrap().to_string(), "10");
    assert_eq!(machine.current_state().id(), "C");
    assert_eq!(machine.step(&go).unwrap().to_string(), "10");
    assert_eq!(machine.current_state().id(), "A");
}

#[test]
fn driving_straight_keeps_heading() {
    let config = RobotConfig {
        start_x: 20.0,
        start_y: 50.0,
        goal_x: 90.0,
        goal_y: 10.0,
        goal_radius: 1.0,
        ..RobotConfig::default()
    };
    let mut world = RobotWorld::new(config).unwrap();
    let mut machine = constant(4, "1010");

    for _ in 0..30 {
        let actuators = machine.step(world.sensors()).unwrap();
        world.step(&actuators);
    }

    assert_eq!(world.position(), (50.0, 50.0));
    assert_eq!(world.transform().heading(), 0.0);
    assert_eq!(world.status(), WorldStatus::Running);
}

#[test]
fn pivoting_on_one_wheel_reaches_the_goal() {
    let config = RobotConfig {
        start_x: 50.0,
        start_y: 50.0,
        goal_x: 30.0,
        goal_y: 78.0,
        goal_radius: 3.0,
        ..RobotConfig::default()
    };
    let world = RobotWorld::new(config).unwrap();
    let mut sim = SimulationLoop::new(constant(4, "1000"), world).unwrap();

    let report = sim.run(200).unwrap().unwrap();

    assert_eq!(report.outcome.status, Status::Success);
    assert_eq!(report.problem_ticks, 0);
    assert_eq!(sim.phase(), Phase::Finished);
}

#[test]
fn robot_finds_the_way_behind_the_wall() {
    let mut sim = SimulationLoop::new(around_the_wall(), games::behind_the_wall()).unwrap();

    let report = sim.run(2_000).unwrap().unwrap();

    assert_eq!(report.outcome.status, Status::Success);
    assert_eq!(report.final_state, "Descend");
}

#[test]
fn games_resolve_by_key_and_run() {
    let world = games::by_key(games::OPEN_THE_GATE).unwrap();
    let mut sim = SimulationLoop::new(gate_solution(), world).unwrap();

    let report = sim.run(1_000).unwrap().unwrap();
    assert_eq!(report.outcome.status, Status::Success);
}

#[tokio::test]
async fn driver_runs_to_completion() {
    let mut sim = SimulationLoop::new(gate_solution(), games::open_the_gate()).unwrap();
    sim.set_tick_interval(Duration::ZERO);
    let (handle, commands) = LoopHandle::channel(4);

    let task = tokio::spawn(drive(sim, commands));
    handle.start().await.unwrap();

    let sim = task.await.unwrap().unwrap();
    assert_eq!(sim.phase(), Phase::Finished);
    assert_eq!(sim.report().unwrap().outcome.status, Status::Success);
    drop(handle);
}

#[tokio::test]
async fn driver_reset_discards_progress() {
    let sim = SimulationLoop::new(gate_solution(), games::open_the_gate()).unwrap();
    let initial = sim.snapshot();
    let (handle, commands) = LoopHandle::channel(4);

    let task = tokio::spawn(drive(sim, commands));
    handle.set_interval(Duration::ZERO).await.unwrap();
    handle.start().await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    handle.reset().await.unwrap();
    drop(handle);

    let sim = task.await.unwrap().unwrap();
    assert_eq!(sim.snapshot(), initial);
}
