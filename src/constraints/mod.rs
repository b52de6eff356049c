pub mod drag;

pub use drag::DragTarget;
