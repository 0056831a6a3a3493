//! Open the Gate
//!
//! This demo drives the level crossing game with a diagram loaded from JSON.
//!
//! Key concepts:
//! - Loading and validating a diagram
//! - Driving a loop in real time with a command handle
//! - Observing ticks as they happen
//!
//! Run with: RUST_LOG=debug cargo run --example open_the_gate

use automata::builder::Diagram;
use automata::games;
use automata::simulation::{drive, LoopHandle, SimulationLoop, TickEvent, TickObserver};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const DIAGRAM: &str = r#"{
    "states": [
        { "id": "Idle", "output": "00", "initial": true },
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

// Prints each state change
struct StateChanges {
    last: String,
}

impl TickObserver for StateChanges {
    fn on_tick(&mut self, event: &TickEvent) {
        if event.state != self.last {
            println!(
                "  tick {:>4}: {:<8} sensors {} -> actuators {}",
                event.tick, event.state, event.sensors, event.actuators
            );
            self.last = event.state.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Open the Gate ===\n");

    let machine = Diagram::from_json(DIAGRAM)?.validate(4, 2)?;
    let world = games::open_the_gate();
    println!("Sensors:   B (button), O (open), C (closed), V (vehicle)");
    println!("Actuators: U (up), D (down)\n");

    let mut sim = SimulationLoop::new(machine, world)?.with_observer(StateChanges {
        last: "Idle".to_string(),
    });
    sim.set_tick_interval(Duration::from_millis(2));

    let (handle, commands) = LoopHandle::channel(8);
    let task = tokio::spawn(drive(sim, commands));
    handle.start().await?;

    let sim = task.await??;
    if let Some(report) = sim.report() {
        println!("\nRun {} finished after {} ticks", report.run_id, report.ticks);
        println!("Status:  {}", report.outcome.status);
        if let Some(message) = &report.outcome.message {
            println!("Message: {message}");
        }
        println!("\n{}", serde_json::to_string_pretty(report)?);
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
