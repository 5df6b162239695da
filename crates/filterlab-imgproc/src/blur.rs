use image::GrayImage;
use imageproc::filter;

use crate::{
    error::ImgprocError,
    kernels::{sigma_from_kernel_size, KernelSize},
};

// normalized 1-D gaussian weights, centered on the kernel middle
fn gaussian_weights(kernel_size: KernelSize) -> Vec<f32> {
    let radius = kernel_size.radius() as i32;
    let two_sigma_sq = 2.0 * sigma_from_kernel_size(kernel_size).powi(2);
    let weights: Vec<f32> = (-radius..=radius)
        .map(|d| (-((d * d) as f32) / two_sigma_sq).exp())
        .collect();
    let total: f32 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}

/// Blur an image using a gaussian blur filter
///
/// The sigma is derived from the kernel size.
///
/// # Arguments
///
/// * `src` - The grayscale source image.
/// * `kernel_size` - The side length of the square kernel.
///
/// # Errors
///
/// Returns [`ImgprocError::KernelTooLarge`] if the kernel does not fit the image.
pub fn gaussian_blur(src: &GrayImage, kernel_size: KernelSize) -> Result<GrayImage, ImgprocError> {
    kernel_size.check_fits(src.width(), src.height())?;
    let weights = gaussian_weights(kernel_size);
    Ok(filter::separable_filter_equal(src, weights.as_slice()))
}

/// Blur an image using a median filter
///
/// # Arguments
///
/// * `src` - The grayscale source image.
/// * `kernel_size` - The side length of the square window.
///
/// # Errors
///
/// Returns [`ImgprocError::KernelTooLarge`] if the window does not fit the image.
pub fn median_blur(src: &GrayImage, kernel_size: KernelSize) -> Result<GrayImage, ImgprocError> {
    kernel_size.check_fits(src.width(), src.height())?;
    let radius = kernel_size.radius();
    Ok(filter::median_filter(src, radius, radius))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::Luma;

    #[test]
    fn test_gaussian_weights() -> Result<(), Box<dyn std::error::Error>> {
        let weights = gaussian_weights(KernelSize::new(5)?);
        assert_eq!(weights.len(), 5);
        assert_relative_eq!(weights.iter().sum::<f32>(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(weights[0], weights[4]);
        assert_relative_eq!(weights[1], weights[3]);
        assert!(weights[2] > weights[1] && weights[1] > weights[0]);

        assert_eq!(gaussian_weights(KernelSize::new(1)?), vec![1.0]);
        Ok(())
    }

    #[test]
    fn test_gaussian_blur_identity_kernel() -> Result<(), Box<dyn std::error::Error>> {
        let img = GrayImage::from_fn(4, 3, |x, y| Luma([(x * 10 + y) as u8]));
        let blurred = gaussian_blur(&img, KernelSize::new(1)?)?;
        assert_eq!(blurred, img);
        Ok(())
    }

    #[test]
    fn test_gaussian_blur_smooths() -> Result<(), Box<dyn std::error::Error>> {
        let mut img = GrayImage::new(7, 7);
        img.put_pixel(3, 3, Luma([255]));
        let blurred = gaussian_blur(&img, KernelSize::new(3)?)?;
        assert_eq!(blurred.dimensions(), (7, 7));
        assert!(blurred.get_pixel(3, 3)[0] < 255);
        assert!(blurred.get_pixel(2, 3)[0] > 0);
        assert_eq!(blurred.get_pixel(0, 0)[0], 0);
        Ok(())
    }

    #[test]
    fn test_median_blur_removes_salt() -> Result<(), Box<dyn std::error::Error>> {
        let mut img = GrayImage::from_pixel(6, 6, Luma([20]));
        img.put_pixel(2, 2, Luma([255]));
        let filtered = median_blur(&img, KernelSize::new(3)?)?;
        assert!(filtered.pixels().all(|p| p[0] == 20));
        Ok(())
    }

    #[test]
    fn test_kernel_too_large() -> Result<(), Box<dyn std::error::Error>> {
        let img = GrayImage::new(4, 8);
        let size = KernelSize::new(5)?;
        let expected = ImgprocError::KernelTooLarge {
            kernel: 5,
            width: 4,
            height: 8,
        };
        assert_eq!(gaussian_blur(&img, size), Err(expected.clone()));
        assert_eq!(median_blur(&img, size), Err(expected));
        Ok(())
    }
}
