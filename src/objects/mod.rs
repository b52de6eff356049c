pub mod pendulum;

pub use pendulum::{Bob, SimulationState};
