pub mod gltf;
pub mod loader;

pub use self::gltf::{load_gltf_model, model_from_document, Model, DEFAULT_MODEL_SCALE};
pub use self::loader::{AssetSource, ModelLoader};
