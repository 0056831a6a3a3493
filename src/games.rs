//! Ready-made game worlds.
//!
//! Each game pairs a world type with a fixed set of parameters and a stable
//! key, so that saved diagrams can name the game they were written for.

use crate::world::geometry::Rect;
use crate::world::{GateConfig, GateWorld, RobotConfig, RobotWorld, World};

pub const OPEN_THE_GATE: &str = "automata.games.openTheGate";
pub const BEHIND_THE_WALL: &str = "automata.games.robot.BehindTheWall";

/// Every known game key.
pub const KEYS: [&str; 2] = [OPEN_THE_GATE, BEHIND_THE_WALL];

/// Open the gate for the car, let it through, and close the gate again.
pub fn open_the_gate() -> GateWorld {
    GateWorld::from_valid(GateConfig::default())
}

/// Drive the robot around a wall to the goal hidden behind it.
pub fn behind_the_wall() -> RobotWorld {
    RobotWorld::from_valid(behind_the_wall_config())
}

/// Parameters of [`behind_the_wall`].
pub fn behind_the_wall_config() -> RobotConfig {
    RobotConfig {
        width: 600.0,
        height: 400.0,
        walls: vec![Rect::new(300.0, 60.0, 310.0, 340.0)],
        start_x: 50.0,
        start_y: 200.0,
        goal_x: 330.0,
        goal_y: 200.0,
        goal_radius: 15.0,
        ..RobotConfig::default()
    }
}

/// Look up a game by key.
///
/// # Example
///
/// ```rust
/// use automata::games;
/// use automata::world::World;
///
/// let world = games::by_key("automata.games.openTheGate").unwrap();
/// assert_eq!(world.sensor_count(), 4);
/// assert!(games::by_key("automata.games.unknown").is_none());
/// ```
pub fn by_key(key: &str) -> Option<Box<dyn World + Send>> {
    match key {
        OPEN_THE_GATE => Some(Box::new(open_the_gate())),
        BEHIND_THE_WALL => Some(Box::new(behind_the_wall())),
        _ => None,
    }
}
