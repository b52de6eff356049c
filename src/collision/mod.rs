pub mod detection;
pub mod manifold;
pub mod obstacle;

// Re-export key types
pub use detection::{check_bob, resolve, CollisionSettings};
pub use manifold::{BobContact, CollisionReport};
pub use obstacle::Obstacle;
