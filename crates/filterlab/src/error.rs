/// An error type for the console.
#[derive(thiserror::Error, Debug)]
pub enum ConsoleError {
    /// The input stream reached its end while a reply was expected.
    #[error("Input stream closed")]
    InputClosed,

    /// Failed to read from or write to the terminal.
    #[error("Failed to access the terminal. {0}")]
    Io(#[from] std::io::Error),
}

/// An error type for the display backends.
#[derive(thiserror::Error, Debug)]
pub enum ViewerError {
    /// The display window was closed by the user.
    #[error("The display window was closed")]
    WindowClosed,

    /// Error writing a frame to disk.
    #[error("Failed to write the frame. {0}")]
    Io(#[from] filterlab_io::IoError),
}

/// An error that ends a session.
///
/// User mistakes (bad numbers, unknown keys) never end up here, they are
/// reported on the console and the session goes on.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    /// The console failed or was closed.
    #[error(transparent)]
    Console(#[from] ConsoleError),

    /// The display backend failed.
    #[error(transparent)]
    Viewer(#[from] ViewerError),
}
