pub mod integrator;

pub use integrator::{accelerations, step};
