pub mod app;
pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod geo;
pub mod headless;
pub mod loaders;
pub mod map;
pub mod math;
pub mod scene;
pub mod services;
pub mod traits;

pub use config::Config;
pub use scene::{SceneController, SceneStatus};
