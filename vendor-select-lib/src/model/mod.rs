//! Typed models

mod entity;
mod value;
mod vendor;

pub use entity::*;
pub use value::*;
pub use vendor::*;
