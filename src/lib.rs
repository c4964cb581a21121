pub mod color;
pub mod config;
pub mod simulation;
pub mod graphics;
pub mod driver;
pub mod scene;
pub mod feed;

pub use color::Color;
pub use config::*;
pub use simulation::*;
pub use driver::*;
pub use scene::*;
