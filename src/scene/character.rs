use glam::{Mat4, Quat, Vec3};
use std::sync::Arc;

use crate::core::animation::Pose;
use crate::loaders::Model;

/// Animated figure placed in the scene
#[derive(Debug, Clone)]
pub struct Character {
    model: Arc<Model>,
    pub position: Vec3,
    pub orientation: Quat,
}

impl Character {
    pub fn new(model: Arc<Model>) -> Self {
        Self {
            model,
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn scale(&self) -> f32 {
        self.model.scale
    }

    pub fn set_pose(&mut self, pose: &Pose) {
        self.position = pose.position;
        self.orientation = pose.orientation;
    }

    /// Model-to-scene transform
    pub fn transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale()), self.orientation, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_model() -> Arc<Model> {
        let model = Model::from_triangles(None, vec![[Vec3::ZERO, Vec3::X, Vec3::Y]])
            .unwrap()
            .with_scale(0.5);
        Arc::new(model)
    }

    #[test]
    fn test_transform_applies_scale_then_translation() {
        let mut character = Character::new(unit_model());
        character.set_pose(&Pose {
            position: Vec3::new(10.0, 0.0, 0.0),
            orientation: Quat::IDENTITY,
            progress: 0.0,
        });

        let p = character.transform().transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(10.5, 0.0, 0.0), 1e-6));
    }
}
