#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// interactive color filter session.
pub mod color_session;

/// line oriented terminal input and output.
pub mod console;

/// interactive edge detection session.
pub mod edge_session;

/// error types for the sessions.
pub mod error;

/// top level mode selection.
pub mod mode;

/// display backends.
pub mod viewer;

/// native display window with keyboard input.
pub mod window;

pub use error::{ConsoleError, SessionError, ViewerError};
