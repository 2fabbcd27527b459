use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    canvas::Canvas,
    color::Color,
    matrix::Matrix,
    ray::Ray,
    transform::Transform,
    tuple::{Point, Tuple},
    world::World,
};

/// Maps canvas pixels to world-space rays through a view transformation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Camera {
    h_size: usize,
    v_size: usize,
    fov: f64,
    transformation: Matrix,
    transformation_inverse: Matrix,
    pixel_size: f64,
    half_width: f64,
    half_height: f64,
    anti_aliasing_offsets: Vec<f64>,
}

impl Camera {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_size(mut self, h_size: usize, v_size: usize) -> Self {
        let (pixel_size, half_width, half_height) = Camera::pixel_size(h_size, v_size, self.fov);
        self.h_size = h_size;
        self.v_size = v_size;
        self.pixel_size = pixel_size;
        self.half_width = half_width;
        self.half_height = half_height;

        self
    }

    pub fn with_fov(mut self, fov: f64) -> Self {
        let (pixel_size, half_width, half_height) =
            Camera::pixel_size(self.h_size, self.v_size, fov);
        self.fov = fov;
        self.pixel_size = pixel_size;
        self.half_width = half_width;
        self.half_height = half_height;

        self
    }

    fn pixel_size(h_size: usize, v_size: usize, fov: f64) -> (f64, f64, f64) {
        let half_view = (fov / 2.0).tan();
        let aspect = h_size as f64 / v_size as f64;

        let (half_width, half_height) = if aspect >= 1.0 {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };

        let pixel_size = (half_width * 2.0) / h_size as f64;

        (pixel_size, half_width, half_height)
    }

    pub fn with_transformation(mut self, transformation: &Matrix) -> Self {
        self.transformation = *transformation;
        self.transformation_inverse = transformation.invert();

        self
    }

    /// Supersampling grid, from 1x1 up to 5x5 rays per pixel.
    pub fn with_anti_aliasing(mut self, level: usize) -> Self {
        self.anti_aliasing_offsets = match level {
            2 => vec![-0.5, 0.5],
            3 => vec![-0.5, 0.0, 0.5],
            4 => vec![-0.5, -0.25, 0.25, 0.5],
            5 => vec![-0.5, -0.25, 0.0, 0.25, 0.5],
            _ => vec![0.5],
        };

        self
    }

    fn ray_for_pixel(&self, px: usize, py: usize, x_offset: f64, y_offset: f64) -> Ray {
        let x_offset = (px as f64 + x_offset) * self.pixel_size;
        let y_offset = (py as f64 + y_offset) * self.pixel_size;

        let world_x = self.half_width - x_offset;
        let world_y = self.half_height - y_offset;

        let pixel = self.transformation_inverse * Point::new(world_x, world_y, -1.0);
        let origin = self.transformation_inverse * Point::zero();
        let direction = (pixel - origin).normalize();

        Ray { origin, direction }
    }

    fn color_at(&self, world: &World, col: usize, row: usize) -> Color {
        let mut color = Color::black();

        for x_offset in &self.anti_aliasing_offsets {
            for y_offset in &self.anti_aliasing_offsets {
                let ray = self.ray_for_pixel(col, row, *x_offset, *y_offset);
                color = color + world.color_at(&ray);
            }
        }

        color / self.anti_aliasing_offsets.len().pow(2) as f64
    }

    /// Renders one row per rayon task.
    pub fn render(&self, world: &World) -> Canvas {
        let mut image = Canvas::new(self.h_size, self.v_size);

        image
            .pixels_mut()
            .par_chunks_mut(self.h_size)
            .enumerate()
            .for_each(|(row, pixels)| {
                for (col, pixel) in pixels.iter_mut().enumerate() {
                    *pixel = self.color_at(world, col, row);
                }
            });

        image
    }

    pub fn render_sequential(&self, world: &World) -> Canvas {
        let mut image = Canvas::new(self.h_size, self.v_size);

        for row in 0..self.v_size {
            for col in 0..self.h_size {
                image[row][col] = self.color_at(world, col, row);
            }
        }

        image
    }

    pub fn h_size(&self) -> usize {
        self.h_size
    }

    pub fn v_size(&self) -> usize {
        self.v_size
    }

    pub fn fov(&self) -> f64 {
        self.fov
    }
}

impl Default for Camera {
    fn default() -> Self {
        let h_size = 100;
        let v_size = 100;
        let fov = std::f64::consts::PI / 2.0;

        let (pixel_size, half_width, half_height) = Camera::pixel_size(h_size, v_size, fov);

        Camera {
            h_size,
            v_size,
            fov,
            transformation: Matrix::id(),
            transformation_inverse: Matrix::id(),
            pixel_size,
            half_width,
            half_height,
            anti_aliasing_offsets: vec![0.5],
        }
    }
}

impl Transform for Camera {
    fn transform(self, transformation: &Matrix) -> Self {
        let new_transformation = *transformation * self.transformation;

        Camera {
            transformation: new_transformation,
            transformation_inverse: new_transformation.invert(),
            ..self
        }
    }
}
