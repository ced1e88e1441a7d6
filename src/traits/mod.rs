pub mod map;
pub mod scene;

pub use map::*;
pub use scene::*;
