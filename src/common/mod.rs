pub mod material;

pub use material::ObstacleMaterial;
