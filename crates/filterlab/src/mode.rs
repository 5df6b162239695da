use std::{
    io::{BufRead, Write},
    path::PathBuf,
    str::FromStr,
};

use crate::{
    color_session,
    console::Console,
    edge_session,
    error::{SessionError, ViewerError},
    viewer::Viewer,
};

/// The two interactive sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// edge detection on a grayscale view.
    Edge,
    /// color tints on the color image.
    Color,
}

/// Error for a mode flag other than `e` or `c`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid choice. Please restart and choose 'e' or 'c'.")]
pub struct UnknownMode(
    /// the rejected input.
    pub String,
);

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "e" => Ok(Mode::Edge),
            "c" => Ok(Mode::Color),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

/// Answers given up front, typically on the command line.
///
/// Anything left as `None` is asked for on the console.
#[derive(Debug, Clone, Default)]
pub struct ModeRequest {
    /// the raw mode flag.
    pub mode: Option<String>,
    /// the image to work on.
    pub image_path: Option<PathBuf>,
}

/// Read the mode and the image path, then hand over to the chosen session.
///
/// An unknown mode is reported and nothing else happens: no image is loaded
/// and `make_viewer` is never called.
pub fn run<R, W, V, M>(
    console: &mut Console<R, W>,
    request: ModeRequest,
    make_viewer: M,
) -> Result<(), SessionError>
where
    R: BufRead,
    W: Write,
    V: Viewer,
    M: FnOnce() -> Result<V, ViewerError>,
{
    let choice = match request.mode {
        Some(choice) => choice,
        None => {
            console.say("Choose one of the following:")?;
            console.say("e - Edge Detection")?;
            console.say("c - Change Tint Color")?;
            console.prompt_line("Enter your choice (e/c): ")?
        }
    };

    let image_path = match request.image_path {
        Some(image_path) => image_path,
        None => PathBuf::from(
            console
                .prompt_line("Enter the path to your image file: ")?
                .trim(),
        ),
    };

    match choice.parse::<Mode>() {
        Ok(Mode::Edge) => edge_session::run(console, &image_path, make_viewer),
        Ok(Mode::Color) => color_session::run(console, &image_path, make_viewer),
        Err(err) => {
            log::debug!("unknown mode {:?}", err.0);
            console.say(err)?;
            Ok(())
        }
    }
}
