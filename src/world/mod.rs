pub mod commands;
pub mod engine;
pub mod trail;

pub use commands::{InputCommand, Parameter};
pub use engine::{Engine, Mode, Snapshot};
pub use trail::Trail;
