use glam::Vec2;

use crate::scene::SceneObject;

/// Handle to an object living in an overlay scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub u64);

/// 3D overlay scene abstraction: owns renderables, knows its viewport
pub trait OverlayScene {
    /// Insert an object and return its handle
    fn add(&mut self, object: SceneObject) -> ObjectId;

    /// Remove an object, returning it if it was present
    fn remove(&mut self, id: ObjectId) -> Option<SceneObject>;

    fn get(&self, id: ObjectId) -> Option<&SceneObject>;

    fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject>;

    /// Viewport size in physical pixels
    fn viewport_size(&self) -> Vec2;

    /// Ask the host to draw another frame
    fn request_redraw(&mut self);
}
