//! Scene objects and their lifecycle.

mod character;
mod controller;
mod graph;
mod track;

pub use character::Character;
pub use controller::{AttachOutcome, RouteTicket, SceneController, SceneStatus};
pub use graph::SceneGraph;
pub use track::{Track, TrackRenderer, TrackStyle, DEFAULT_TRACK_DENSITY};

/// Renderable owned by the scene controller
#[derive(Debug, Clone)]
pub enum SceneObject {
    Track(Track),
    Character(Character),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Track,
    Character,
}

impl SceneObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            SceneObject::Track(_) => ObjectKind::Track,
            SceneObject::Character(_) => ObjectKind::Character,
        }
    }
}
