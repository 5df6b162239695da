use std::str::FromStr;

use crate::error::{ImgprocError, ParamError};

/// The side length of a square filter kernel.
///
/// A kernel size is always a positive odd integer, so the kernel has a well
/// defined center pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelSize(u32);

impl KernelSize {
    /// Validate a raw integer as a kernel size.
    ///
    /// # Arguments
    ///
    /// * `size` - The requested kernel size.
    ///
    /// # Returns
    ///
    /// The kernel size, or the reason it was rejected.
    pub fn new(size: i64) -> Result<Self, ParamError> {
        if size <= 0 {
            return Err(ParamError::NotPositive(size));
        }
        if size % 2 == 0 {
            return Err(ParamError::NotOdd(size));
        }
        let size = u32::try_from(size).map_err(|_| ParamError::OutOfRange(size))?;
        Ok(Self(size))
    }

    /// The kernel side length.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Number of pixels on each side of the kernel center.
    pub fn radius(self) -> u32 {
        (self.0 - 1) / 2
    }

    /// Check that the kernel fits inside an image of the given size.
    pub fn check_fits(self, width: u32, height: u32) -> Result<(), ImgprocError> {
        if self.0 > width || self.0 > height {
            return Err(ImgprocError::KernelTooLarge {
                kernel: self.0,
                width,
                height,
            });
        }
        Ok(())
    }
}

impl FromStr for KernelSize {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let size = s
            .parse::<i64>()
            .map_err(|_| ParamError::NotAnInteger(s.to_string()))?;
        Self::new(size)
    }
}

/// Derive the gaussian sigma for a kernel size when none is given.
///
/// Uses the usual `0.3 * ((ksize - 1) * 0.5 - 1) + 0.8` rule.
pub fn sigma_from_kernel_size(kernel_size: KernelSize) -> f32 {
    0.3 * ((kernel_size.get() as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kernel_size_accepts_odd() -> Result<(), ParamError> {
        for (input, expected) in [("3", 3), ("5", 5), ("101", 101), (" 7\n", 7)] {
            let size: KernelSize = input.parse()?;
            assert_eq!(size.get(), expected);
        }
        Ok(())
    }

    #[test]
    fn test_kernel_size_rejects() {
        assert_eq!("4".parse::<KernelSize>(), Err(ParamError::NotOdd(4)));
        assert_eq!("6".parse::<KernelSize>(), Err(ParamError::NotOdd(6)));
        assert_eq!("-3".parse::<KernelSize>(), Err(ParamError::NotPositive(-3)));
        assert_eq!("0".parse::<KernelSize>(), Err(ParamError::NotPositive(0)));
        assert_eq!(
            "abc".parse::<KernelSize>(),
            Err(ParamError::NotAnInteger("abc".to_string()))
        );
        assert_eq!(
            "3.0".parse::<KernelSize>(),
            Err(ParamError::NotAnInteger("3.0".to_string()))
        );
        assert_eq!(
            KernelSize::new(i64::from(u32::MAX) + 2),
            Err(ParamError::OutOfRange(i64::from(u32::MAX) + 2))
        );
    }

    #[test]
    fn test_kernel_size_fits() -> Result<(), ParamError> {
        let size = KernelSize::new(5)?;
        assert_eq!(size.radius(), 2);
        assert!(size.check_fits(5, 5).is_ok());
        assert_eq!(
            size.check_fits(4, 10),
            Err(ImgprocError::KernelTooLarge {
                kernel: 5,
                width: 4,
                height: 10
            })
        );
        Ok(())
    }

    #[test]
    fn test_sigma_from_kernel_size() -> Result<(), ParamError> {
        assert_relative_eq!(sigma_from_kernel_size(KernelSize::new(3)?), 0.8);
        assert_relative_eq!(sigma_from_kernel_size(KernelSize::new(5)?), 1.1, epsilon = 1e-6);
        Ok(())
    }
}
