#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// blur filters module.
pub mod blur;

/// color conversions module.
pub mod color;

/// edge detection module.
pub mod edges;

/// error types for the imgproc module.
pub mod error;

/// kernel sizes and kernel construction.
pub mod kernels;

/// per channel color tint transforms.
pub mod tint;

pub use error::{ImgprocError, ParamError};
