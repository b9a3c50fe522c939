use std::fs;
use std::path::{Path, PathBuf};

use crate::capture::domain::frame_source::{FrameResult, FrameSource};
use crate::shared::constants::IMAGE_EXTENSIONS;
use crate::shared::pixel_buffer::PixelBuffer;
use crate::shared::source_metadata::SourceMetadata;

/// Adapts a still image, or a directory of stills, to the [`FrameSource`] interface.
///
/// A directory is read as a frame sequence ordered by file name, which is
/// how webcam snapshot tools usually number their output. Each file is
/// decoded with the `image` crate only when its frame is requested.
pub struct ImageSequenceSource {
    paths: Vec<PathBuf>,
    opened: bool,
}

impl ImageSequenceSource {
    pub fn new() -> Self {
        Self {
            paths: Vec::new(),
            opened: false,
        }
    }
}

impl Default for ImageSequenceSource {
    fn default() -> Self {
        Self::new()
    }
}

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn list_images(dir: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && is_image(p))
        .collect();
    paths.sort();
    Ok(paths)
}

fn decode(path: &Path, index: usize) -> FrameResult {
    let img = image::open(path)
        .map_err(|e| format!("failed to decode {}: {e}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok(PixelBuffer::new(img.into_raw(), width, height, index)?)
}

impl FrameSource for ImageSequenceSource {
    fn open(&mut self, path: &Path) -> Result<SourceMetadata, Box<dyn std::error::Error>> {
        let paths = if path.is_dir() {
            list_images(path)?
        } else if path.is_file() {
            vec![path.to_path_buf()]
        } else {
            return Err(format!("Input not found: {}", path.display()).into());
        };

        let first = paths
            .first()
            .ok_or_else(|| format!("No images found in {}", path.display()))?;
        let (width, height) = image::image_dimensions(first)?;

        log::debug!("Opened {} image frame(s) from {}", paths.len(), path.display());

        let metadata = SourceMetadata {
            width,
            height,
            fps: 0.0,
            total_frames: paths.len(),
            source_path: Some(path.to_path_buf()),
        };
        self.paths = paths;
        self.opened = true;
        Ok(metadata)
    }

    fn frames(&mut self) -> Box<dyn Iterator<Item = FrameResult> + '_> {
        if !self.opened {
            return Box::new(std::iter::once(Err("ImageSequenceSource: not opened".into())));
        }
        Box::new(
            self.paths
                .iter()
                .enumerate()
                .map(|(index, path)| decode(path, index)),
        )
    }

    fn close(&mut self) {
        self.paths.clear();
        self.opened = false;
    }
}
