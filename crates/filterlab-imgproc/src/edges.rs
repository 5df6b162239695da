use image::{GrayImage, ImageBuffer, Luma};
use imageproc::{edges, filter};

use crate::error::ParamError;

/// Derivative half of the separable 5x5 sobel kernel.
const SOBEL_DERIVATIVE: [i32; 5] = [-1, -2, 0, 2, 1];

/// Smoothing half of the separable 5x5 sobel kernel.
const SOBEL_SMOOTHING: [i32; 5] = [1, 4, 6, 4, 1];

/// Convert a signed filter response to its absolute 8-bit magnitude.
///
/// Magnitudes above 255 saturate instead of wrapping.
pub fn abs_to_u8(value: i16) -> u8 {
    value.unsigned_abs().min(u16::from(u8::MAX)) as u8
}

fn abs_image_u8(src: &ImageBuffer<Luma<i16>, Vec<i16>>) -> GrayImage {
    GrayImage::from_fn(src.width(), src.height(), |x, y| {
        Luma([abs_to_u8(src.get_pixel(x, y)[0])])
    })
}

fn bitwise_or(a: &GrayImage, b: &GrayImage) -> GrayImage {
    GrayImage::from_fn(a.width(), a.height(), |x, y| {
        Luma([a.get_pixel(x, y)[0] | b.get_pixel(x, y)[0]])
    })
}

/// Compute the combined sobel response of a grayscale image.
///
/// The horizontal and vertical 5x5 responses are converted to absolute 8-bit
/// magnitudes and merged with a bitwise OR.
///
/// # Arguments
///
/// * `src` - The grayscale source image.
///
/// # Returns
///
/// An image with the same size as `src`.
pub fn sobel(src: &GrayImage) -> GrayImage {
    // i16 holds the largest 5x5 response, 96 * 255
    let signed: ImageBuffer<Luma<i16>, Vec<i16>> =
        ImageBuffer::from_fn(src.width(), src.height(), |x, y| {
            Luma([i16::from(src.get_pixel(x, y)[0])])
        });
    let gx = filter::separable_filter(
        &signed,
        SOBEL_DERIVATIVE.as_slice(),
        SOBEL_SMOOTHING.as_slice(),
    );
    let gy = filter::separable_filter(
        &signed,
        SOBEL_SMOOTHING.as_slice(),
        SOBEL_DERIVATIVE.as_slice(),
    );
    bitwise_or(&abs_image_u8(&gx), &abs_image_u8(&gy))
}

/// Compute the absolute laplacian response of a grayscale image.
pub fn laplacian(src: &GrayImage) -> GrayImage {
    abs_image_u8(&filter::laplacian_filter(src))
}

/// Hysteresis thresholds for the canny edge detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CannyThresholds {
    /// the lower hysteresis threshold.
    pub low: i32,
    /// the upper hysteresis threshold.
    pub high: i32,
}

impl CannyThresholds {
    /// Create the thresholds, swapping them if given in the wrong order.
    pub fn new(low: i32, high: i32) -> Self {
        if low <= high {
            Self { low, high }
        } else {
            Self {
                low: high,
                high: low,
            }
        }
    }
}

/// Parse a single user supplied canny threshold.
pub fn parse_threshold(s: &str) -> Result<i32, ParamError> {
    let s = s.trim();
    s.parse::<i32>()
        .map_err(|_| ParamError::NotAnInteger(s.to_string()))
}

/// Detect edges with the canny detector.
///
/// # Arguments
///
/// * `src` - The grayscale source image.
/// * `thresholds` - The hysteresis thresholds.
///
/// # Returns
///
/// A binary image with the same size as `src`, edges are 255 and the rest 0.
pub fn canny(src: &GrayImage, thresholds: CannyThresholds) -> GrayImage {
    edges::canny(src, thresholds.low as f32, thresholds.high as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    // left half dark, right half bright
    fn step_image(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Luma([0])
            } else {
                Luma([200])
            }
        })
    }

    #[test]
    fn test_abs_to_u8() {
        assert_eq!(abs_to_u8(0), 0);
        assert_eq!(abs_to_u8(-12), 12);
        assert_eq!(abs_to_u8(255), 255);
        assert_eq!(abs_to_u8(-300), 255);
        assert_eq!(abs_to_u8(i16::MIN), 255);
    }

    #[test]
    fn test_sobel_flat_image() {
        let img = GrayImage::from_pixel(8, 6, Luma([77]));
        let edges = sobel(&img);
        assert_eq!(edges.dimensions(), (8, 6));
        assert!(edges.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn test_sobel_step_edge() {
        let img = step_image(10, 10);
        let edges = sobel(&img);
        assert_eq!(edges.get_pixel(5, 5)[0], 255);
        assert_eq!(edges.get_pixel(1, 5)[0], 0);
        assert_eq!(edges.get_pixel(8, 5)[0], 0);
    }

    #[test]
    fn test_sobel_ramp() {
        // one gray level per column
        let img = GrayImage::from_fn(12, 12, |x, _| Luma([x as u8]));
        let edges = sobel(&img);
        assert_eq!(edges.get_pixel(6, 6)[0], 128);
        assert_eq!(edges.get_pixel(3, 9)[0], 128);
    }

    #[test]
    fn test_laplacian() {
        let img = GrayImage::from_pixel(5, 5, Luma([10]));
        assert!(laplacian(&img).pixels().all(|p| p[0] == 0));

        let mut img = GrayImage::new(5, 5);
        img.put_pixel(2, 2, Luma([50]));
        let response = laplacian(&img);
        assert_eq!(response.dimensions(), (5, 5));
        assert!(response.get_pixel(2, 2)[0] > 0);
        assert_eq!(response.get_pixel(0, 4)[0], 0);
    }

    #[test]
    fn test_canny_thresholds() -> Result<(), ParamError> {
        assert_eq!(parse_threshold(" 150\n")?, 150);
        assert_eq!(parse_threshold("-7")?, -7);
        assert_eq!(
            parse_threshold("high"),
            Err(ParamError::NotAnInteger("high".to_string()))
        );
        assert!(parse_threshold("").is_err());
        assert!(parse_threshold("1.5").is_err());

        assert_eq!(
            CannyThresholds::new(50, 150),
            CannyThresholds { low: 50, high: 150 }
        );
        assert_eq!(
            CannyThresholds::new(150, 50),
            CannyThresholds { low: 50, high: 150 }
        );
        Ok(())
    }

    #[test]
    fn test_canny_binary_output() {
        let img = step_image(20, 16);
        let edges = canny(&img, CannyThresholds::new(50, 150));
        assert_eq!(edges.dimensions(), img.dimensions());
        assert!(edges.pixels().all(|p| p[0] == 0 || p[0] == 255));
        assert!(edges.pixels().any(|p| p[0] == 255));
    }
}
