pub mod animation;
pub mod canvas;
pub mod clock;
pub mod frame;
pub mod surface_renderer;

pub use animation::{AnimationDriver, DriverState, Pose};
pub use canvas::{Canvas, Rgba};
pub use clock::AnimationClock;
pub use frame::{FrameInfo, FrameIterator};
pub use surface_renderer::SurfaceRenderer;
