use std::{
    io::{BufRead, Write},
    path::Path,
};

use filterlab_imgproc::{
    blur, color,
    edges::{self, CannyThresholds},
    kernels::KernelSize,
    ImgprocError,
};
use filterlab_io::functional as F;
use image::GrayImage;

use crate::{
    console::Console,
    error::{SessionError, ViewerError},
    viewer::{Frame, Viewer},
};

/// One entry of the edge detection menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOperation {
    /// combined horizontal and vertical sobel response.
    Sobel,
    /// canny edge detector, asks for two thresholds.
    Canny,
    /// laplacian response.
    Laplacian,
    /// gaussian blur, asks for a kernel size.
    GaussianSmoothing,
    /// median blur, asks for a kernel size.
    MedianFiltering,
    /// leave the session.
    Exit,
}

impl EdgeOperation {
    /// The menu, in display order.
    pub const MENU: [EdgeOperation; 6] = [
        EdgeOperation::Sobel,
        EdgeOperation::Canny,
        EdgeOperation::Laplacian,
        EdgeOperation::GaussianSmoothing,
        EdgeOperation::MedianFiltering,
        EdgeOperation::Exit,
    ];

    /// The digit selecting the operation.
    pub const fn key(self) -> &'static str {
        match self {
            EdgeOperation::Sobel => "1",
            EdgeOperation::Canny => "2",
            EdgeOperation::Laplacian => "3",
            EdgeOperation::GaussianSmoothing => "4",
            EdgeOperation::MedianFiltering => "5",
            EdgeOperation::Exit => "6",
        }
    }

    /// The menu label, also used as the window title.
    pub const fn label(self) -> &'static str {
        match self {
            EdgeOperation::Sobel => "Sobel Edge Detection",
            EdgeOperation::Canny => "Canny Edge Detection",
            EdgeOperation::Laplacian => "Laplacian Edge Detection",
            EdgeOperation::GaussianSmoothing => "Gaussian Smoothing",
            EdgeOperation::MedianFiltering => "Median Filtering",
            EdgeOperation::Exit => "Exit",
        }
    }

    /// Map a menu reply to an operation.
    pub fn from_choice(choice: &str) -> Option<Self> {
        let choice = choice.trim();
        Self::MENU.into_iter().find(|op| op.key() == choice)
    }
}

const ORIGINAL_TITLE: &str = "Original Image";

/// Run the edge detection session on the image at `image_path`.
///
/// The viewer is only created once the image has been loaded, and all its
/// windows are released when the session ends, whatever the reason.
pub fn run<R, W, V, M>(
    console: &mut Console<R, W>,
    image_path: &Path,
    make_viewer: M,
) -> Result<(), SessionError>
where
    R: BufRead,
    W: Write,
    V: Viewer,
    M: FnOnce() -> Result<V, ViewerError>,
{
    let image = match F::read_image_rgb8(image_path) {
        Ok(image) => image,
        Err(err) => {
            log::warn!("failed to load {}: {err}", image_path.display());
            console.say("Error: Could not load image.")?;
            return Ok(());
        }
    };
    log::info!("edge detection session on {}", image_path.display());

    let gray = color::gray_from_rgb(&image);
    let mut viewer = make_viewer()?;

    let outcome = interact(console, &mut viewer, &gray);
    let closed = viewer.close_all();
    outcome?;
    closed?;
    Ok(())
}

fn interact<R: BufRead, W: Write, V: Viewer>(
    console: &mut Console<R, W>,
    viewer: &mut V,
    gray: &GrayImage,
) -> Result<(), SessionError> {
    viewer.show(ORIGINAL_TITLE, Frame::Gray(gray))?;

    console.say("\nEdge Detection Options:")?;
    for op in EdgeOperation::MENU {
        console.say(format_args!("{}: {}", op.key(), op.label()))?;
    }

    loop {
        let choice = console.prompt_line("Enter your choice: ")?;
        let Some(op) = EdgeOperation::from_choice(&choice) else {
            console.say("Invalid choice. Try again.")?;
            continue;
        };
        log::debug!("edge menu selected {op:?}");

        if op == EdgeOperation::Exit {
            console.say("Exiting edge detection...")?;
            return Ok(());
        }

        if let Some(result) = apply(console, op, gray)? {
            viewer.show(op.label(), Frame::Gray(&result))?;
        }
    }
}

/// Run one operation, asking for its parameters first.
///
/// Returns `None` when a parameter was rejected; the reason has already been
/// reported on the console.
fn apply<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    op: EdgeOperation,
    gray: &GrayImage,
) -> Result<Option<GrayImage>, SessionError> {
    let result = match op {
        EdgeOperation::Sobel => edges::sobel(gray),
        EdgeOperation::Canny => {
            let Some(thresholds) = read_thresholds(console)? else {
                console.say("Invalid input. Please enter integers.")?;
                return Ok(None);
            };
            edges::canny(gray, thresholds)
        }
        EdgeOperation::Laplacian => edges::laplacian(gray),
        EdgeOperation::GaussianSmoothing => {
            match read_kernel_size(console)?.and_then(|size| blur::gaussian_blur(gray, size)) {
                Ok(result) => result,
                Err(err) => return reject(console, err),
            }
        }
        EdgeOperation::MedianFiltering => {
            match read_kernel_size(console)?.and_then(|size| blur::median_blur(gray, size)) {
                Ok(result) => result,
                Err(err) => return reject(console, err),
            }
        }
        EdgeOperation::Exit => return Ok(None),
    };
    Ok(Some(result))
}

// stops at the first reply that is not an integer
fn read_thresholds<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<Option<CannyThresholds>, SessionError> {
    let Ok(low) = edges::parse_threshold(&console.prompt_line("Enter low threshold: ")?) else {
        return Ok(None);
    };
    let Ok(high) = edges::parse_threshold(&console.prompt_line("Enter high threshold: ")?) else {
        return Ok(None);
    };
    Ok(Some(CannyThresholds::new(low, high)))
}

fn read_kernel_size<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<Result<KernelSize, ImgprocError>, SessionError> {
    let reply = console.prompt_line("Enter kernel size (odd number): ")?;
    Ok(reply.parse::<KernelSize>().map_err(ImgprocError::from))
}

fn reject<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    err: ImgprocError,
) -> Result<Option<GrayImage>, SessionError> {
    log::debug!("rejected parameter: {err:?}");
    console.say(err)?;
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_choice() {
        assert_eq!(EdgeOperation::from_choice("1"), Some(EdgeOperation::Sobel));
        assert_eq!(EdgeOperation::from_choice(" 2 "), Some(EdgeOperation::Canny));
        assert_eq!(EdgeOperation::from_choice("6"), Some(EdgeOperation::Exit));
        assert_eq!(EdgeOperation::from_choice("7"), None);
        assert_eq!(EdgeOperation::from_choice("0"), None);
        assert_eq!(EdgeOperation::from_choice("sobel"), None);
        assert_eq!(EdgeOperation::from_choice(""), None);
    }

    #[test]
    fn test_menu_keys_are_unique() {
        for (i, a) in EdgeOperation::MENU.iter().enumerate() {
            for b in &EdgeOperation::MENU[i + 1..] {
                assert_ne!(a.key(), b.key());
            }
        }
    }
}
