use glam::Vec2;
use std::collections::BTreeMap;

use super::{ObjectKind, SceneObject};
use crate::traits::{ObjectId, OverlayScene};

/// In-memory overlay scene: the objects a renderer draws each frame
#[derive(Debug, Default)]
pub struct SceneGraph {
    objects: BTreeMap<ObjectId, SceneObject>,
    next_id: u64,
    viewport: Vec2,
    redraw_requested: bool,
}

impl SceneGraph {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn set_viewport_size(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    /// Returns and clears the pending redraw flag
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects.iter().map(|(id, object)| (*id, object))
    }

    pub fn count(&self, kind: ObjectKind) -> usize {
        self.objects.values().filter(|o| o.kind() == kind).count()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl OverlayScene for SceneGraph {
    fn add(&mut self, object: SceneObject) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.insert(id, object);
        id
    }

    fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        self.objects.remove(&id)
    }

    fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Curve;
    use crate::scene::TrackRenderer;
    use glam::Vec3;

    fn track() -> SceneObject {
        let curve = Curve::new(vec![Vec3::ZERO, Vec3::X]).unwrap();
        SceneObject::Track(TrackRenderer::default().render(&curve))
    }

    #[test]
    fn test_ids_are_unique_and_never_reused() {
        let mut scene = SceneGraph::default();
        let a = scene.add(track());
        scene.remove(a);
        let b = scene.add(track());
        assert_ne!(a, b);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_remove_missing_is_none() {
        let mut scene = SceneGraph::default();
        assert!(scene.remove(ObjectId(42)).is_none());
    }

    #[test]
    fn test_redraw_flag_is_consumed() {
        let mut scene = SceneGraph::new(Vec2::new(800.0, 600.0));
        assert!(!scene.take_redraw_request());
        scene.request_redraw();
        assert!(scene.take_redraw_request());
        assert!(!scene.take_redraw_request());
    }

    #[test]
    fn test_count_by_kind() {
        let mut scene = SceneGraph::default();
        scene.add(track());
        assert_eq!(scene.count(ObjectKind::Track), 1);
        assert_eq!(scene.count(ObjectKind::Character), 0);
    }
}
