use glam::{Mat4, Vec3};
use log::{debug, info};
use std::path::Path;

use crate::error::ModelLoadError;
use crate::math::AABB;

/// Character scale applied after loading
pub const DEFAULT_MODEL_SCALE: f32 = 0.5;

/// Triangle soup flattened out of a glTF scene graph, in model space
#[derive(Debug, Clone)]
pub struct Model {
    pub name: Option<String>,
    pub triangles: Vec<[Vec3; 3]>,
    pub bounds: AABB,
    /// Uniform scale applied when the model is placed in a scene
    pub scale: f32,
}

impl Model {
    /// Returns `None` when there are no triangles
    pub fn from_triangles(name: Option<String>, triangles: Vec<[Vec3; 3]>) -> Option<Self> {
        let bounds = AABB::from_points(triangles.iter().flatten().copied())?;
        Some(Self {
            name,
            triangles,
            bounds,
            scale: 1.0,
        })
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

/// Loads a glTF/GLB file from disk, resolving external buffers next to it
pub fn load_gltf_model(path: impl AsRef<Path>) -> Result<Model, ModelLoadError> {
    let path = path.as_ref();
    debug!("Loading glTF file: {:?}", path);

    let (document, buffers, _images) = gltf::import(path).map_err(|source| ModelLoadError::Import {
        path: path.display().to_string(),
        source,
    })?;

    model_from_document(&document, &buffers, &path.display().to_string())
}

/// Flattens the default scene (or the first one) of an imported document
pub fn model_from_document(
    document: &gltf::Document,
    buffers: &[gltf::buffer::Data],
    label: &str,
) -> Result<Model, ModelLoadError> {
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| ModelLoadError::NoGeometry(label.to_string()))?;

    let mut triangles = Vec::new();
    for node in scene.nodes() {
        process_node(&node, buffers, &Mat4::IDENTITY, &mut triangles);
    }

    let model = Model::from_triangles(scene.name().map(str::to_string), triangles)
        .ok_or_else(|| ModelLoadError::NoGeometry(label.to_string()))?;

    let size = model.bounds.size();
    info!(
        "Loaded {} ({} triangles, {:.2}x{:.2}x{:.2} units, {} nodes, {} meshes)",
        label,
        model.triangle_count(),
        size.x,
        size.y,
        size.z,
        document.nodes().count(),
        document.meshes().count()
    );
    Ok(model)
}

/// Recursively processes glTF nodes
fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &Mat4,
    triangles: &mut Vec<[Vec3; 3]>,
) {
    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    if let Some(mesh) = node.mesh() {
        process_mesh(&mesh, buffers, &global_transform, triangles);
    }

    for child in node.children() {
        process_node(&child, buffers, &global_transform, triangles);
    }
}

fn process_mesh(
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    transform: &Mat4,
    triangles: &mut Vec<[Vec3; 3]>,
) {
    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            debug!("Skipping non-triangle primitive in mesh {:?}", mesh.name());
            continue;
        }

        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));

        let Some(positions) = reader.read_positions() else {
            continue;
        };
        let vertices: Vec<Vec3> = positions
            .map(|pos| transform.transform_point3(Vec3::from_array(pos)))
            .collect();

        let corner = |i: u32| vertices.get(i as usize).copied();

        match reader.read_indices() {
            Some(indices) => {
                let indices: Vec<u32> = indices.into_u32().collect();
                for tri in indices.chunks_exact(3) {
                    if let (Some(a), Some(b), Some(c)) = (corner(tri[0]), corner(tri[1]), corner(tri[2])) {
                        triangles.push([a, b, c]);
                    }
                }
            }
            None => {
                for tri in vertices.chunks_exact(3) {
                    triangles.push([tri[0], tri[1], tri[2]]);
                }
            }
        }
    }
}
