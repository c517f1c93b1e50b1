// Grid world construction and procedural map generation

pub mod grid_world;
pub mod map_generation;

pub use grid_world::*;
pub use map_generation::*;
