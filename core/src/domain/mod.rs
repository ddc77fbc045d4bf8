//! Domain layer: value objects and entities of the OTP lifecycle

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
