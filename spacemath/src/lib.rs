pub mod vec3;
pub mod bounds3;

pub use vec3::Point3;
pub use vec3::Vector3;
pub use bounds3::Bounds3;
