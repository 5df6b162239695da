use std::path::Path;

use image::{GrayImage, ImageReader, RgbImage};

use crate::error::IoError;

/// Reads an image from the given file path as 8-bit RGB.
///
/// The method tries to read from any image format supported by the image
/// crate, guessing the format from the file contents. Grayscale and alpha
/// images are converted to RGB.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An RGB image containing the image data.
pub fn read_image_rgb8(file_path: impl AsRef<Path>) -> Result<RgbImage, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let image = ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    log::debug!(
        "decoded {} ({}x{}, {:?})",
        file_path.display(),
        image.width(),
        image.height(),
        image.color()
    );

    Ok(image.into_rgb8())
}

/// Writes an RGB image to the given path as PNG.
///
/// Missing parent directories are created.
pub fn write_image_png_rgb8(file_path: impl AsRef<Path>, image: &RgbImage) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    create_parent_dir(file_path)?;
    image.save_with_format(file_path, image::ImageFormat::Png)?;
    Ok(())
}

/// Writes a grayscale image to the given path as PNG.
///
/// Missing parent directories are created.
pub fn write_image_png_gray8(
    file_path: impl AsRef<Path>,
    image: &GrayImage,
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    create_parent_dir(file_path)?;
    image.save_with_format(file_path, image::ImageFormat::Png)?;
    Ok(())
}

fn create_parent_dir(file_path: &Path) -> Result<(), IoError> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
