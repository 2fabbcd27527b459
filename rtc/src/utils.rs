use std::{
    fs::{File, OpenOptions},
    io::{stdout, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;

type Error = anyhow::Error;

/// Returns an absolute path from a path that may not be absolute.
///
/// Relative paths are resolved relative to the current directory.
pub fn make_path_absolute(path: impl AsRef<Path>) -> Result<PathBuf, Error> {
    let path = path.as_ref();
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()
            .context("failed to get current directory")?
            .join(path))
    }
}

/// Opens a new file for output with common options.
pub fn new_output_file(path: impl AsRef<Path>) -> Result<File, Error> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .context("failed to open output file")
}

/// Returns a generic buffered output stream, either `stdout` or a file.
pub fn new_buffered_output_stream<T: AsRef<Path>>(
    path: &Option<T>,
) -> Result<Box<dyn Write>, Error> {
    if let Some(path) = path {
        let real_path = make_path_absolute(path)?;
        let file = new_output_file(real_path)?;
        Ok(Box::new(BufWriter::new(file)))
    } else {
        let stdout = stdout().lock();
        Ok(Box::new(BufWriter::new(stdout)))
    }
}

/// The default image path for a scene: the scene file name with its
/// extension replaced by `png`, next to the scene file.
pub fn default_image_path(scene_path: impl AsRef<Path>) -> PathBuf {
    let mut path = scene_path.as_ref().to_path_buf();
    path.set_extension("png");

    path
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn the_default_image_path_swaps_the_extension() {
        assert_eq!(
            default_image_path("scenes/reflection.yaml"),
            PathBuf::from("scenes/reflection.png")
        );
        assert_eq!(
            default_image_path("/tmp/scene"),
            PathBuf::from("/tmp/scene.png")
        );
    }
}
