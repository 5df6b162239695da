/// Errors raised while validating user supplied filter parameters.
///
/// The messages are meant to be shown to the user as they are.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// The value does not parse as an integer.
    #[error("Invalid input. Please enter an integer.")]
    NotAnInteger(String),

    /// Kernel sizes must be strictly positive.
    #[error("Kernel size must be a positive odd number, got {0}.")]
    NotPositive(i64),

    /// Kernel sizes must be odd.
    #[error("Kernel size must be an odd number.")]
    NotOdd(i64),

    /// The value does not fit the range of the parameter.
    #[error("Value {0} is out of range.")]
    OutOfRange(i64),
}

/// An error type for the imgproc module.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImgprocError {
    /// A filter parameter failed validation.
    #[error(transparent)]
    InvalidParameter(#[from] ParamError),

    /// The kernel is larger than the image it is applied to.
    #[error("Kernel size {kernel} is too large for a {width}x{height} image.")]
    KernelTooLarge {
        /// the requested kernel size.
        kernel: u32,
        /// the image width.
        width: u32,
        /// the image height.
        height: u32,
    },
}
