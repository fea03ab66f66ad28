pub mod color;
pub mod error;
pub mod export;
pub mod hierarchy;
pub mod human;
pub mod model;
pub mod treemap;

pub use color::*;
pub use error::*;
pub use model::*;
pub use treemap::{compute_layout, layout};
