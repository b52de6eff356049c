pub mod energy;

pub use energy::{kinetic_energy, potential_energy, total_energy};
