pub mod controls;

pub use controls::Controls;
