use std::path::{Path, PathBuf};

use filterlab_io::functional as F;
use image::{GrayImage, RgbImage};

use crate::error::ViewerError;

/// A borrowed image ready to be displayed.
#[derive(Debug, Clone, Copy)]
pub enum Frame<'a> {
    /// single channel image.
    Gray(&'a GrayImage),
    /// three channel image.
    Rgb(&'a RgbImage),
}

impl Frame<'_> {
    /// The frame size as (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Frame::Gray(image) => image.dimensions(),
            Frame::Rgb(image) => image.dimensions(),
        }
    }
}

/// A display capability: render frames in titled windows and release them.
///
/// Showing a frame under a title that is already on screen replaces it.
pub trait Viewer {
    /// Display `frame` in the window named `title`.
    fn show(&mut self, title: &str, frame: Frame<'_>) -> Result<(), ViewerError>;

    /// Block until a key is pressed in one of the windows.
    ///
    /// Returns `None` when the viewer has no keyboard, the caller then reads
    /// the key from the terminal instead.
    fn wait_key(&mut self) -> Result<Option<char>, ViewerError> {
        Ok(None)
    }

    /// Release every window opened so far.
    fn close_all(&mut self) -> Result<(), ViewerError>;
}

impl<V: Viewer + ?Sized> Viewer for &mut V {
    fn show(&mut self, title: &str, frame: Frame<'_>) -> Result<(), ViewerError> {
        (**self).show(title, frame)
    }

    fn wait_key(&mut self) -> Result<Option<char>, ViewerError> {
        (**self).wait_key()
    }

    fn close_all(&mut self) -> Result<(), ViewerError> {
        (**self).close_all()
    }
}

/// Turn a window title into a lowercase, underscore separated identifier.
pub fn slug(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Headless viewer writing every shown frame as a numbered PNG file.
///
/// It has no keyboard, keys are read from the terminal.
pub struct DiskViewer {
    output_dir: PathBuf,
    frames_written: usize,
}

impl DiskViewer {
    /// Create a viewer writing into `output_dir`, created on first use.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            frames_written: 0,
        }
    }

    /// The directory frames are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> usize {
        self.frames_written
    }
}

impl Viewer for DiskViewer {
    fn show(&mut self, title: &str, frame: Frame<'_>) -> Result<(), ViewerError> {
        let file_path = self
            .output_dir
            .join(format!("{:03}_{}.png", self.frames_written, slug(title)));
        match frame {
            Frame::Gray(image) => F::write_image_png_gray8(&file_path, image)?,
            Frame::Rgb(image) => F::write_image_png_rgb8(&file_path, image)?,
        }
        log::debug!("wrote {}", file_path.display());
        self.frames_written += 1;
        Ok(())
    }

    fn close_all(&mut self) -> Result<(), ViewerError> {
        log::info!(
            "wrote {} frames to {}",
            self.frames_written,
            self.output_dir.display()
        );
        Ok(())
    }
}
