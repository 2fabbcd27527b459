use std::{
    io::Write,
    path::Path,
};

use anyhow::Context;

use crate::color::Color;

type Error = anyhow::Error;

/// A width x height buffer of colors, filled in by the camera and exported
/// once rendering is done.
#[derive(Debug, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas::new_with_color(width, height, Color::black())
    }

    pub fn new_with_color(width: usize, height: usize, color: Color) -> Self {
        Canvas {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw row-major pixel access, used by the parallel renderer to hand
    /// out one row per task.
    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Writes the canvas to `path`, choosing the format from the
    /// extension: `.ppm` gets a plain-text P3 file, anything else goes
    /// through the `image` crate (PNG in practice).
    pub fn export(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let is_ppm = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("ppm"))
            .unwrap_or(false);

        if is_ppm {
            let file = std::fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = std::io::BufWriter::new(file);
            self.write_ppm(&mut writer)
                .with_context(|| format!("failed to write {}", path.display()))?;
            writer.flush().context("failed to flush PPM output")?;
        } else {
            let mut img = image::ImageBuffer::new(self.width as u32, self.height as u32);
            for (x, y, pixel) in img.enumerate_pixels_mut() {
                let (r, g, b) = scale_color(&self[y as usize][x as usize]);
                *pixel = image::Rgb([r, g, b]);
            }
            img.save(path)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }

        Ok(())
    }

    /// Plain-text PPM, lines kept under 70 characters as the format asks.
    pub fn write_ppm(&self, writer: &mut impl Write) -> std::io::Result<()> {
        writeln!(writer, "P3")?;
        writeln!(writer, "{} {}", self.width, self.height)?;
        writeln!(writer, "255")?;

        for row in 0..self.height {
            let mut line = String::new();
            for pixel in &self[row] {
                let (r, g, b) = scale_color(pixel);
                for value in [r, g, b] {
                    let token = value.to_string();
                    if line.is_empty() {
                        line.push_str(&token);
                    } else if line.len() + 1 + token.len() <= 70 {
                        line.push(' ');
                        line.push_str(&token);
                    } else {
                        writeln!(writer, "{line}")?;
                        line = token;
                    }
                }
            }
            if !line.is_empty() {
                writeln!(writer, "{line}")?;
            }
        }

        Ok(())
    }
}

fn scale_color(color: &Color) -> (u8, u8, u8) {
    (
        scale_color_component(color.r),
        scale_color_component(color.g),
        scale_color_component(color.b),
    )
}

fn scale_color_component(component: f64) -> u8 {
    (component.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl std::ops::Index<usize> for Canvas {
    type Output = [Color];

    fn index(&self, row: usize) -> &[Color] {
        let start = row * self.width;
        &self.pixels[start..start + self.width]
    }
}

impl std::ops::IndexMut<usize> for Canvas {
    fn index_mut(&mut self, row: usize) -> &mut [Color] {
        let start = row * self.width;
        &mut self.pixels[start..start + self.width]
    }
}
