pub mod obj;
pub mod yaml;

use crate::{camera::Camera, world::World};

/// A parsed scene file: the world to render and the camera to render it
/// with.
#[derive(Debug)]
pub struct Scene {
    pub world: World,
    pub camera: Camera,
}
