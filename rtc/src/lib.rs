pub mod bounds;
pub mod camera;
pub mod canvas;
pub mod cli;
pub mod color;
pub mod float;
pub mod intersection;
pub mod light;
pub mod material;
pub mod matrix;
pub mod object;
pub mod pattern;
pub mod ray;
pub mod scene;
pub mod shape;
pub mod transform;
pub mod tuple;
pub mod utils;
pub mod world;
