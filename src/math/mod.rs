pub mod frame;
pub mod vec2;

pub use frame::Frame;
pub use vec2::Vec2;
