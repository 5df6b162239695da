use image::{imageops, GrayImage, RgbImage};

/// Convert an RGB image to grayscale.
///
/// # Arguments
///
/// * `src` - The input RGB image.
///
/// # Returns
///
/// A single channel image with the same size as `src`.
pub fn gray_from_rgb(src: &RgbImage) -> GrayImage {
    imageops::grayscale(src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_gray_from_rgb() {
        let img = RgbImage::from_pixel(3, 2, Rgb([90, 90, 90]));
        let gray = gray_from_rgb(&img);
        assert_eq!(gray.dimensions(), (3, 2));
        assert!(gray.pixels().all(|p| p[0] == 90));
    }
}
