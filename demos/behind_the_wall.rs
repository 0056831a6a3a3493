//! Behind the Wall
//!
//! This demo steers the robot around a wall to reach the goal behind it.
//!
//! Key concepts:
//! - Building a machine with the fluent builder
//! - End-of-rotation sensing to make exact quarter turns
//! - Running a loop synchronously to completion
//!
//! Run with: RUST_LOG=info cargo run --example behind_the_wall

use automata::builder::{StateMachineBuilder, TransitionBuilder};
use automata::games;
use automata::simulation::SimulationLoop;
use tracing_subscriber::EnvFilter;

fn edge(from: &str, to: &str, guard: &str) -> TransitionBuilder {
    TransitionBuilder::new().from(from).to(to).when(guard)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Behind the Wall ===\n");

    // Sensors WL WR WA EOR, actuators LF LB RF RB
    let machine = StateMachineBuilder::new()
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
        .build()?;

    let mut sim = SimulationLoop::new(machine, games::behind_the_wall())?;
    let report = sim.run(5_000)?;

    println!("Path taken:");
    for step in sim.machine().history().transitions() {
        println!("  tick {:>4}: {} -> {}", step.tick, step.from, step.to);
    }

    let (x, y) = sim.world().position();
    println!("\nFinal position: ({x:.1}, {y:.1})");
    match report {
        Some(report) => println!("Status: {} after {} ticks", report.outcome.status, report.ticks),
        None => println!("The robot did not reach the goal"),
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
